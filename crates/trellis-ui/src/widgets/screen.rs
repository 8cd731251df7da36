use std::any::Any;
use std::rc::Rc;

use trellis_core::{Rect, Renderer, TextAlign, UiConfig, Vec2};

use crate::element::{ElementOptions, ViewCx, Widget};
use crate::Ui;

/// Root of a screen. Covers the whole canvas.
#[derive(Clone, Copy, Debug, Default)]
pub struct Screen;

impl Widget for Screen {
    fn kind(&self) -> &'static str {
        "screen"
    }

    fn is_hovered(&self, cx: &ViewCx) -> bool {
        cx.pointer_on_canvas()
    }
}

/// Runs after an overlay became active, with the payload it was opened with.
pub type OnDisplay = Rc<dyn Fn(&mut Ui, &dyn Any)>;

#[derive(Clone)]
pub struct OverlayOptions {
    pub element: ElementOptions,
    /// Defaults to half the canvas width.
    pub width: Option<f32>,
    /// Defaults to half the canvas height.
    pub height: Option<f32>,
    /// A non-empty title adds a header bar and a close button.
    pub title: String,
    pub draw_box: bool,
    pub on_display: Option<OnDisplay>,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            element: ElementOptions::default(),
            width: None,
            height: None,
            title: String::new(),
            draw_box: true,
            on_display: None,
        }
    }
}

/// Modal root drawn above the current screen, centred in the canvas.
pub struct Overlay {
    width: f32,
    height: f32,
    title: String,
    draw_box: bool,
    header: f32,
    padding: f32,
    on_display: Option<OnDisplay>,
}

impl Overlay {
    /// Builds the overlay and the canvas position it should be placed at.
    pub(crate) fn new(options: &OverlayOptions, config: &UiConfig) -> (Self, Vec2) {
        let width = options.width.unwrap_or(config.width * 0.5);
        let height = options.height.unwrap_or(config.height * 0.5);
        let overlay = Self {
            width,
            height,
            title: options.title.clone(),
            draw_box: options.draw_box,
            header: config.overlay_header,
            padding: config.overlay_padding,
            on_display: options.on_display.clone(),
        };
        let position = Vec2::new((config.width - width) * 0.5, (config.height - height) * 0.5);
        (overlay, position)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_titled(&self) -> bool {
        !self.title.is_empty()
    }

    pub(crate) fn on_display(&self) -> Option<OnDisplay> {
        self.on_display.clone()
    }

    /// Centre and side length of the close button in the header.
    pub(crate) fn close_button(&self) -> (Vec2, f32) {
        let centre = Vec2::new(self.width - self.header * 0.5, -self.header * 0.5);
        (centre, self.header - 2.0 * self.padding)
    }

    fn text_size(&self) -> f32 {
        self.header - 2.0 * self.padding
    }
}

impl Widget for Overlay {
    fn kind(&self) -> &'static str {
        "overlay"
    }

    fn is_hovered(&self, cx: &ViewCx) -> bool {
        let top = if self.is_titled() { -self.header } else { 0.0 };
        Rect::new(0.0, top, self.width, self.height - top).contains_strict(cx.mouse())
    }

    fn show(&self, r: &mut dyn Renderer, cx: &ViewCx) {
        let style = cx.style();
        r.no_stroke();
        if self.draw_box && let Some(fill) = style.colour("fill") {
            r.fill(fill);
            r.rect(Rect::new(0.0, 0.0, self.width, self.height));
        }
        if !self.is_titled() {
            return;
        }
        if let Some(header) = style.colour("header") {
            r.fill(header);
            r.rect(Rect::new(0.0, -self.header, self.width, self.header));
        }
        let size = self.text_size();
        r.fill_opt(style.colour("text"));
        r.text(
            &self.title,
            Vec2::new(self.width * 0.5, -self.header * 0.5 + size / 3.0),
            size,
            TextAlign::Center,
        );
    }

    fn post_show(&self, r: &mut dyn Renderer, cx: &ViewCx) {
        if !self.draw_box && !self.is_titled() {
            return;
        }
        let Some(stroke) = cx.style().colour("stroke") else {
            return;
        };
        r.no_fill();
        r.stroke(stroke, 1.0);
        r.rect(Rect::new(0.0, 0.0, self.width, self.height));
        if self.is_titled() {
            r.rect(Rect::new(0.0, -self.header, self.width, self.header));
        }
    }
}
