use std::rc::Rc;

use trellis_core::{Rect, Renderer, Vec2};

use crate::element::{Cx, ElementOptions, ViewCx, Widget};
use crate::event::{CursorState, ScreenChange, UiEvent};

pub type ValueHandler = Rc<dyn Fn(f32, &mut Cx)>;

#[derive(Clone)]
pub struct SliderOptions {
    pub element: ElementOptions,
    pub width: f32,
    /// Thickness of the track.
    pub height: f32,
    pub radius: f32,
    pub min: f32,
    pub max: f32,
    /// Starts halfway between `min` and `max` when `None`.
    pub value: Option<f32>,
    pub increment: f32,
    pub on_move: Option<ValueHandler>,
    pub on_release: Option<ValueHandler>,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            element: ElementOptions::default(),
            width: 300.0,
            height: 10.0,
            radius: 20.0,
            min: 0.0,
            max: 1.0,
            value: None,
            increment: 1.0,
            on_move: None,
            on_release: None,
        }
    }
}

impl SliderOptions {
    pub fn on_move(mut self, f: impl Fn(f32, &mut Cx) + 'static) -> Self {
        self.on_move = Some(Rc::new(f));
        self
    }

    pub fn on_release(mut self, f: impl Fn(f32, &mut Cx) + 'static) -> Self {
        self.on_release = Some(Rc::new(f));
        self
    }
}

/// Horizontal slider centred on its position.
pub struct Slider {
    width: f32,
    height: f32,
    radius: f32,
    min: f32,
    max: f32,
    value: f32,
    increment: f32,
    on_move: Option<ValueHandler>,
    on_release: Option<ValueHandler>,
    hovered: bool,
    dragging: bool,
}

impl Slider {
    pub fn new(options: SliderOptions) -> Self {
        if options.max < options.min {
            log::warn!(
                "Slider max ({}) is less than its min ({})",
                options.max,
                options.min
            );
        }
        if options.increment <= 0.0 {
            log::warn!(
                "Slider increment must be positive, got {}; values will not snap",
                options.increment
            );
        }
        let mut slider = Self {
            width: options.width,
            height: options.height,
            radius: options.radius,
            min: options.min,
            max: options.max,
            value: 0.0,
            increment: options.increment,
            on_move: options.on_move,
            on_release: options.on_release,
            hovered: false,
            dragging: false,
        };
        slider.value = slider.clamp(
            options
                .value
                .unwrap_or((options.min + options.max) * 0.5),
        );
        slider
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = self.clamp(value);
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Clamps into `[min, max]` without panicking when the bounds are swapped.
    fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }

    fn snap(&self, value: f32) -> f32 {
        if self.increment > 0.0 {
            (value / self.increment).round() * self.increment
        } else {
            value
        }
    }

    fn percent(&self) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            0.0
        } else {
            (self.value - self.min) / range
        }
    }

    /// Knob centre on the track.
    pub fn knob_x(&self) -> f32 {
        self.width * (self.percent() - 0.5)
    }

    fn over(&self, p: Vec2) -> bool {
        Rect::new(
            -self.width * 0.5 - self.radius,
            -self.radius,
            self.width + 2.0 * self.radius,
            2.0 * self.radius,
        )
        .contains_strict(p)
    }

    fn value_at(&self, x: f32) -> f32 {
        let percent = x / self.width + 0.5;
        self.clamp(self.snap(percent * (self.max - self.min) + self.min))
    }
}

impl Widget for Slider {
    fn kind(&self) -> &'static str {
        "slider"
    }

    fn update(&mut self, cx: &mut Cx) {
        let mouse = cx.mouse();
        let hovered = self.dragging || self.over(mouse);
        if hovered && !self.hovered {
            cx.play("hover");
        }
        self.hovered = hovered;

        if !self.dragging {
            return;
        }
        let value = self.value_at(mouse.x);
        if value != self.value {
            self.value = value;
            if let Some(on_move) = self.on_move.clone() {
                on_move(value, cx);
            }
        }
    }

    fn event(&mut self, event: &UiEvent, cx: &mut Cx) {
        if event.is_primary_down() && self.over(cx.mouse()) {
            self.dragging = true;
        } else if event.is_primary_up() && self.dragging {
            self.dragging = false;
            if let Some(on_release) = self.on_release.clone() {
                on_release(self.value, cx);
            }
        }
    }

    fn change_screen(&mut self, change: &ScreenChange, _cx: &mut Cx) {
        if change.leaving {
            self.dragging = false;
            self.hovered = false;
        }
    }

    fn cursor_state(&self, _cx: &ViewCx) -> Option<CursorState> {
        self.hovered.then_some(CursorState::Pointer)
    }

    fn is_hovered(&self, cx: &ViewCx) -> bool {
        self.over(cx.mouse())
    }

    fn show(&self, r: &mut dyn Renderer, cx: &ViewCx) {
        let style = cx.style();
        r.no_fill();
        r.stroke_opt(style.colour_if("line", "hover", self.hovered), self.height);
        r.line(
            Vec2::new(-self.width * 0.5, 0.0),
            Vec2::new(self.width * 0.5, 0.0),
        );

        r.no_stroke();
        r.fill_opt(style.colour_if("circle", "hover", self.hovered));
        r.ellipse(Vec2::new(self.knob_x(), 0.0), self.radius, self.radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_defaults_to_midpoint_and_clamps() {
        let slider = Slider::new(SliderOptions {
            min: 0.0,
            max: 10.0,
            ..Default::default()
        });
        assert_eq!(slider.value(), 5.0);
        assert_eq!(slider.knob_x(), 0.0);

        let slider = Slider::new(SliderOptions {
            min: 0.0,
            max: 10.0,
            value: Some(42.0),
            ..Default::default()
        });
        assert_eq!(slider.value(), 10.0);
    }

    #[test]
    fn test_value_at_snaps_to_increment() {
        let slider = Slider::new(SliderOptions {
            width: 100.0,
            min: 0.0,
            max: 10.0,
            increment: 2.0,
            ..Default::default()
        });
        // 0.33 of the way along is 3.3, nearest multiple of 2 is 4.
        assert_eq!(slider.value_at(-17.0), 4.0);
        assert_eq!(slider.value_at(-500.0), 0.0);
        assert_eq!(slider.value_at(500.0), 10.0);
    }

    #[test]
    fn test_swapped_bounds_do_not_panic() {
        let mut slider = Slider::new(SliderOptions {
            min: 5.0,
            max: 1.0,
            ..Default::default()
        });
        slider.set_value(3.0);
        assert_eq!(slider.value(), 1.0);

        let flat = Slider::new(SliderOptions {
            min: 2.0,
            max: 2.0,
            ..Default::default()
        });
        assert_eq!(flat.knob_x(), -150.0);
    }
}
