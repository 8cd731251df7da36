use std::rc::Rc;

use trellis_core::{Color, Rect, Renderer, Style, Vec2};

use crate::element::{Cx, ElementOptions, ViewCx, Widget};
use crate::event::{CursorState, UiEvent};

pub type ToggleHandler = Rc<dyn Fn(bool, &mut Cx)>;

#[derive(Clone)]
pub struct CheckboxOptions {
    pub element: ElementOptions,
    pub size: f32,
    pub value: bool,
    pub on_click: Option<ToggleHandler>,
}

impl Default for CheckboxOptions {
    fn default() -> Self {
        Self {
            element: ElementOptions::default(),
            size: 30.0,
            value: false,
            on_click: None,
        }
    }
}

impl CheckboxOptions {
    pub fn on_click(mut self, f: impl Fn(bool, &mut Cx) + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }
}

pub struct Checkbox {
    size: f32,
    value: bool,
    on_click: Option<ToggleHandler>,
    hovered: bool,
}

impl Checkbox {
    pub fn new(options: CheckboxOptions) -> Self {
        Self {
            size: options.size,
            value: options.value,
            on_click: options.on_click,
            hovered: false,
        }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn set_value(&mut self, value: bool) {
        self.value = value;
    }

    fn over(&self, p: Vec2) -> bool {
        Rect::centered(0.0, 0.0, self.size, self.size).contains_strict(p)
    }

    /// `hoverchecked`, then `checked`, then `hover`, then the base bag.
    fn colour(&self, style: &Style, key: &str) -> Option<Color> {
        let modifiers: &[&str] = match (self.hovered, self.value) {
            (true, true) => &["hoverchecked", "checked", "hover"],
            (true, false) => &["hover"],
            (false, true) => &["checked"],
            (false, false) => &[],
        };
        modifiers
            .iter()
            .find_map(|m| style.colour_only_in(key, m))
            .or_else(|| style.colour(key))
    }
}

impl Widget for Checkbox {
    fn kind(&self) -> &'static str {
        "checkbox"
    }

    fn update(&mut self, cx: &mut Cx) {
        let over = self.over(cx.mouse());
        if over && !self.hovered {
            cx.play("hover");
        }
        self.hovered = over;
    }

    fn event(&mut self, event: &UiEvent, cx: &mut Cx) {
        if !event.is_primary_down() || !self.hovered {
            return;
        }
        self.value = !self.value;
        if let Some(on_click) = self.on_click.clone() {
            on_click(self.value, cx);
        }
        cx.play("click");
    }

    fn cursor_state(&self, _cx: &ViewCx) -> Option<CursorState> {
        self.hovered.then_some(CursorState::Pointer)
    }

    fn is_hovered(&self, cx: &ViewCx) -> bool {
        self.over(cx.mouse())
    }

    fn show(&self, r: &mut dyn Renderer, cx: &ViewCx) {
        let style = cx.style();
        let fill = self.colour(style, "fill");
        let stroke = self.colour(style, "stroke");
        r.fill_opt(fill);
        r.stroke_opt(stroke, 2.0);
        if fill.is_some() || stroke.is_some() {
            r.rect(Rect::centered(0.0, 0.0, self.size, self.size));
        }

        if !self.value {
            return;
        }
        let Some(tick) = self.colour(style, "tick").or(stroke) else {
            return;
        };
        let s = self.size;
        r.no_fill();
        r.stroke(tick, s / 6.0);
        r.polyline(&[
            Vec2::new(-s * 0.3, 0.0),
            Vec2::new(-s * 0.15, s * 0.15),
            Vec2::new(s * 0.3, -s * 0.3),
        ]);
    }
}
