use trellis_core::{Rect, Renderer, TextAlign, Vec2};

use crate::element::{ElementOptions, ViewCx, Widget};

#[derive(Clone)]
pub struct ContainerOptions {
    pub element: ElementOptions,
    pub width: f32,
    pub height: f32,
    /// Header title. No header is drawn when empty.
    pub title: String,
    pub padding: f32,
    pub header: f32,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            element: ElementOptions::default(),
            width: 300.0,
            height: 200.0,
            title: String::new(),
            padding: 5.0,
            header: 25.0,
        }
    }
}

/// Panel anchored at its top-left corner, with the header above it.
pub struct Container {
    width: f32,
    height: f32,
    title: String,
    header: f32,
    text_size: f32,
}

impl Container {
    pub fn new(options: &ContainerOptions) -> Self {
        Self {
            width: options.width,
            height: options.height,
            title: options.title.clone(),
            header: options.header,
            text_size: options.header - 2.0 * options.padding,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Widget for Container {
    fn kind(&self) -> &'static str {
        "container"
    }

    /// Only the header counts, so tooltips belong to the title bar.
    fn is_hovered(&self, cx: &ViewCx) -> bool {
        !self.title.is_empty()
            && Rect::new(0.0, -self.header, self.width, self.header).contains_strict(cx.mouse())
    }

    fn show(&self, r: &mut dyn Renderer, cx: &ViewCx) {
        let style = cx.style();
        if self.width > 0.0 && self.height > 0.0 {
            r.fill_opt(style.colour("fill"));
            r.stroke_opt(style.colour("stroke"), 1.0);
            r.rect(Rect::new(0.0, 0.0, self.width, self.height));
        }

        if self.header <= 0.0 || self.title.is_empty() {
            return;
        }
        if let Some(header) = style.colour("header") {
            r.fill(header);
            r.rect(Rect::new(0.0, -self.header, self.width, self.header));
        }
        r.no_stroke();
        r.fill_opt(style.colour("text"));
        r.text(
            &self.title,
            Vec2::new(self.width * 0.5, -self.header * 0.5 + self.text_size / 3.0),
            self.text_size,
            TextAlign::Center,
        );
    }
}
