//! Recording renderer.
//!
//! [`DrawScope`] implements [`Renderer`] by appending [`DrawCommand`]s in
//! device space: the transform stack is applied while recording, so a
//! command list can be replayed by any backend without knowing about the
//! element tree. Tests use it to assert on what a frame painted.

use trellis_core::*;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Background(Color),
    Clear,
    Rect {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<(f32, Color)>,
    },
    Line {
        from: Vec2,
        to: Vec2,
        stroke: (f32, Color),
    },
    Ellipse {
        center: Vec2,
        rx: f32,
        ry: f32,
        fill: Option<Color>,
        stroke: Option<(f32, Color)>,
    },
    Polyline {
        points: Vec<Vec2>,
        stroke: (f32, Color),
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        align: TextAlign,
        color: Color,
    },
}

#[derive(Clone, Copy, Debug)]
struct PaintState {
    offset: Vec2,
    scale: f32,
    fill: Option<Color>,
    stroke: Option<(f32, Color)>,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            fill: Some(Color::WHITE),
            stroke: Some((1.0, Color::BLACK)),
        }
    }
}

impl PaintState {
    fn point(&self, p: Vec2) -> Vec2 {
        Vec2::new(self.offset.x + p.x * self.scale, self.offset.y + p.y * self.scale)
    }

    fn stroke(&self) -> Option<(f32, Color)> {
        self.stroke.map(|(w, c)| (w * self.scale, c))
    }
}

pub struct DrawScope {
    pub commands: Vec<DrawCommand>,
    measure: Box<dyn TextMeasure>,
    state: PaintState,
    saved: Vec<PaintState>,
}

impl Default for DrawScope {
    fn default() -> Self {
        Self::new(MonospaceMeasure::default())
    }
}

impl DrawScope {
    pub fn new(measure: impl TextMeasure + 'static) -> Self {
        Self {
            commands: Vec::new(),
            measure: Box::new(measure),
            state: PaintState::default(),
            saved: Vec::new(),
        }
    }

    /// Drops recorded commands and any unbalanced state, ready for the next frame.
    pub fn reset(&mut self) {
        if !self.saved.is_empty() {
            log::warn!("{} unbalanced push() calls in frame", self.saved.len());
        }
        self.commands.clear();
        self.state = PaintState::default();
        self.saved.clear();
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Recorded text, in paint order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    fn push_command(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }
}

impl TextMeasure for DrawScope {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        self.measure.text_width(text, size)
    }
}

impl Renderer for DrawScope {
    fn background(&mut self, colour: Color) {
        self.push_command(DrawCommand::Background(colour));
    }

    fn clear(&mut self) {
        self.push_command(DrawCommand::Clear);
    }

    fn push(&mut self) {
        self.saved.push(self.state);
    }

    fn pop(&mut self) {
        match self.saved.pop() {
            Some(state) => self.state = state,
            None => log::warn!("pop() without matching push()"),
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.state.offset.x += dx * self.state.scale;
        self.state.offset.y += dy * self.state.scale;
    }

    fn scale(&mut self, factor: f32) {
        self.state.scale *= factor;
    }

    fn fill(&mut self, colour: Color) {
        self.state.fill = Some(colour);
    }

    fn no_fill(&mut self) {
        self.state.fill = None;
    }

    fn stroke(&mut self, colour: Color, weight: f32) {
        self.state.stroke = Some((weight, colour));
    }

    fn no_stroke(&mut self) {
        self.state.stroke = None;
    }

    fn rect(&mut self, rect: Rect) {
        let s = self.state;
        if s.fill.is_none() && s.stroke.is_none() {
            return;
        }
        let origin = s.point(Vec2::new(rect.x, rect.y));
        self.push_command(DrawCommand::Rect {
            rect: Rect::new(origin.x, origin.y, rect.w * s.scale, rect.h * s.scale),
            fill: s.fill,
            stroke: s.stroke(),
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2) {
        let s = self.state;
        if let Some(stroke) = s.stroke() {
            self.push_command(DrawCommand::Line {
                from: s.point(from),
                to: s.point(to),
                stroke,
            });
        }
    }

    fn ellipse(&mut self, center: Vec2, rx: f32, ry: f32) {
        let s = self.state;
        if s.fill.is_none() && s.stroke.is_none() {
            return;
        }
        self.push_command(DrawCommand::Ellipse {
            center: s.point(center),
            rx: rx.max(0.0) * s.scale,
            ry: ry.max(0.0) * s.scale,
            fill: s.fill,
            stroke: s.stroke(),
        });
    }

    fn polyline(&mut self, points: &[Vec2]) {
        let s = self.state;
        if let Some(stroke) = s.stroke() {
            self.push_command(DrawCommand::Polyline {
                points: points.iter().map(|p| s.point(*p)).collect(),
                stroke,
            });
        }
    }

    fn text(&mut self, text: &str, pos: Vec2, size: f32, align: TextAlign) {
        let s = self.state;
        let Some(color) = s.fill else {
            return;
        };
        self.push_command(DrawCommand::Text {
            text: text.to_string(),
            pos: s.point(pos),
            size: size * s.scale,
            align,
            color,
        });
    }
}
