use crate::{Color, Rect, Vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Advance-width measurement for single-line text.
pub trait TextMeasure {
    fn text_width(&self, text: &str, size: f32) -> f32;
}

/// Fixed advance per character, proportional to the text size.
///
/// Used when no font is available (headless hosts, tests).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasure {
    pub advance: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { advance: 0.5 }
    }
}

impl MonospaceMeasure {
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.advance
    }
}

/// Immediate-mode drawing surface the draw passes paint into.
///
/// Fill and stroke are sticky state, like a canvas 2D context. `push`/`pop`
/// save and restore the transform together with fill/stroke state. Text is
/// painted with the current fill.
pub trait Renderer: TextMeasure {
    fn background(&mut self, colour: Color);
    fn clear(&mut self);

    fn push(&mut self);
    fn pop(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn scale(&mut self, factor: f32);

    fn fill(&mut self, colour: Color);
    fn no_fill(&mut self);
    fn stroke(&mut self, colour: Color, weight: f32);
    fn no_stroke(&mut self);

    fn rect(&mut self, rect: Rect);
    fn line(&mut self, from: Vec2, to: Vec2);
    fn ellipse(&mut self, center: Vec2, rx: f32, ry: f32);
    fn polyline(&mut self, points: &[Vec2]);
    fn text(&mut self, text: &str, pos: Vec2, size: f32, align: TextAlign);

    /// Fill with `colour`, or disable fill for the "no colour" marker.
    fn fill_opt(&mut self, colour: Option<Color>) {
        match colour {
            Some(c) => self.fill(c),
            None => self.no_fill(),
        }
    }

    /// Stroke with `colour`, or disable stroke for the "no colour" marker.
    fn stroke_opt(&mut self, colour: Option<Color>, weight: f32) {
        match colour {
            Some(c) => self.stroke(c, weight),
            None => self.no_stroke(),
        }
    }
}
