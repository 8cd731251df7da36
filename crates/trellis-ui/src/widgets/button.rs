use std::rc::Rc;

use trellis_core::{Rect, Renderer, Style, TextAlign, Vec2};

use crate::element::{Cx, Dynamic, ElementOptions, ViewCx, Widget};
use crate::event::{CursorState, ScreenChange, UiEvent};
use crate::gesture::ClickCommit;

pub type ClickHandler = Rc<dyn Fn(&mut Cx)>;

#[derive(Clone)]
pub struct ButtonOptions {
    pub element: ElementOptions,
    pub width: f32,
    pub height: f32,
    pub text: Dynamic<String>,
    pub text_size: f32,
    pub on_click: Option<ClickHandler>,
}

impl Default for ButtonOptions {
    fn default() -> Self {
        Self {
            element: ElementOptions::default(),
            width: 200.0,
            height: 100.0,
            text: Dynamic::default(),
            text_size: 50.0,
            on_click: None,
        }
    }
}

impl ButtonOptions {
    pub fn on_click(mut self, f: impl Fn(&mut Cx) + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }
}

/// Push button centred on its position.
pub struct Button {
    width: f32,
    height: f32,
    text: Dynamic<String>,
    text_size: f32,
    on_click: Option<ClickHandler>,
    hovered: bool,
    click: ClickCommit<()>,
}

impl Button {
    pub fn new(options: ButtonOptions) -> Self {
        Self {
            width: options.width,
            height: options.height,
            text: options.text,
            text_size: options.text_size,
            on_click: options.on_click,
            hovered: false,
            click: ClickCommit::new(),
        }
    }

    pub fn text(&self) -> String {
        self.text.get()
    }

    pub fn set_text(&mut self, text: impl Into<Dynamic<String>>) {
        self.text = text.into();
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    fn bounds(&self) -> Rect {
        Rect::centered(0.0, 0.0, self.width, self.height)
    }

    fn over(&self, p: Vec2) -> Option<()> {
        self.bounds().contains_strict(p).then_some(())
    }

    fn paint(&self, r: &mut dyn Renderer, style: &Style, weight: f32) {
        r.fill_opt(style.colour_if("fill", "hover", self.hovered));
        r.stroke_opt(style.colour_if("stroke", "hover", self.hovered), weight);
        r.rect(self.bounds());

        let text = self.text.get();
        if text.is_empty() {
            return;
        }
        r.no_stroke();
        r.fill_opt(style.colour_if("text", "hover", self.hovered));
        r.text(
            &text,
            Vec2::new(0.0, self.text_size / 3.0),
            self.text_size,
            TextAlign::Center,
        );
    }
}

impl Widget for Button {
    fn kind(&self) -> &'static str {
        "button"
    }

    fn update(&mut self, cx: &mut Cx) {
        let over = self.over(cx.mouse()).is_some();
        if over && !self.hovered {
            cx.play("hover");
        }
        self.hovered = over;
    }

    fn event(&mut self, event: &UiEvent, cx: &mut Cx) {
        if event.is_primary_down() {
            self.click.press(self.over(cx.mouse()));
        } else if event.is_primary_up() && self.click.release(self.over(cx.mouse())).is_some() {
            if let Some(on_click) = self.on_click.clone() {
                on_click(cx);
            }
            cx.play("click");
        }
    }

    fn change_screen(&mut self, change: &ScreenChange, _cx: &mut Cx) {
        if change.leaving {
            self.click.cancel();
            self.hovered = false;
        }
    }

    fn cursor_state(&self, cx: &ViewCx) -> Option<CursorState> {
        self.over(cx.mouse()).map(|_| CursorState::Pointer)
    }

    fn is_hovered(&self, cx: &ViewCx) -> bool {
        self.over(cx.mouse()).is_some()
    }

    fn show(&self, r: &mut dyn Renderer, cx: &ViewCx) {
        self.paint(r, cx.style(), 1.0);
    }
}

/// Square button in an overlay header that closes the top overlay.
pub struct CloseButton {
    button: Button,
    size: f32,
}

impl CloseButton {
    pub fn new(size: f32) -> Self {
        let button = Button::new(
            ButtonOptions {
                width: size,
                height: size,
                ..Default::default()
            }
            .on_click(|cx| cx.commands().close_overlay()),
        );
        Self { button, size }
    }
}

impl Widget for CloseButton {
    fn kind(&self) -> &'static str {
        "closebutton"
    }

    fn update(&mut self, cx: &mut Cx) {
        self.button.update(cx);
    }

    fn event(&mut self, event: &UiEvent, cx: &mut Cx) {
        self.button.event(event, cx);
    }

    fn change_screen(&mut self, change: &ScreenChange, cx: &mut Cx) {
        self.button.change_screen(change, cx);
    }

    fn cursor_state(&self, cx: &ViewCx) -> Option<CursorState> {
        self.button.cursor_state(cx)
    }

    fn is_hovered(&self, cx: &ViewCx) -> bool {
        self.button.is_hovered(cx)
    }

    fn show(&self, r: &mut dyn Renderer, cx: &ViewCx) {
        let style = cx.style();
        self.button.paint(r, style, 2.0);

        let arm = self.size * 0.25;
        r.stroke_opt(style.colour_if("cross", "hover", self.button.hovered), 2.0);
        r.line(Vec2::new(-arm, -arm), Vec2::new(arm, arm));
        r.line(Vec2::new(arm, -arm), Vec2::new(-arm, arm));
    }
}
