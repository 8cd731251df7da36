use std::rc::Rc;

use trellis_core::{ClipboardRead, Key, KeyEvent, Rect, Renderer, TextAlign, TextMeasure, Vec2};

use crate::element::{Cx, ElementOptions, ViewCx, Widget};
use crate::event::{CursorState, ScreenChange, UiEvent};
use crate::text_edit::TextEdit;

pub type SubmitHandler = Rc<dyn Fn(&str, &mut Cx)>;
pub type FocusHandler = Rc<dyn Fn(&mut Cx)>;

#[derive(Clone)]
pub struct TextBoxOptions {
    pub element: ElementOptions,
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub value: String,
    /// Shown in the `default` colour while empty and unfocused.
    pub placeholder: String,
    /// Maximum length in graphemes, 0 for unlimited.
    pub max_length: usize,
    pub on_submit: Option<SubmitHandler>,
    pub on_focus: Option<FocusHandler>,
    pub on_blur: Option<FocusHandler>,
    pub click_to_focus: bool,
    pub allow_empty_submit: bool,
    pub clear_on_submit: bool,
    pub blur_on_submit: bool,
}

impl Default for TextBoxOptions {
    fn default() -> Self {
        Self {
            element: ElementOptions::default(),
            width: 400.0,
            height: 25.0,
            padding: 5.0,
            value: String::new(),
            placeholder: String::new(),
            max_length: 0,
            on_submit: None,
            on_focus: None,
            on_blur: None,
            click_to_focus: true,
            allow_empty_submit: false,
            clear_on_submit: true,
            blur_on_submit: true,
        }
    }
}

impl TextBoxOptions {
    pub fn on_submit(mut self, f: impl Fn(&str, &mut Cx) + 'static) -> Self {
        self.on_submit = Some(Rc::new(f));
        self
    }

    pub fn on_focus(mut self, f: impl Fn(&mut Cx) + 'static) -> Self {
        self.on_focus = Some(Rc::new(f));
        self
    }

    pub fn on_blur(mut self, f: impl Fn(&mut Cx) + 'static) -> Self {
        self.on_blur = Some(Rc::new(f));
        self
    }
}

/// A clipboard read in flight, tagged with the focus generation it was
/// issued under.
struct PendingPaste {
    read: ClipboardRead,
    generation: u64,
}

/// Single-line text input anchored at its bottom-left corner.
pub struct TextBox {
    width: f32,
    height: f32,
    padding: f32,
    placeholder: String,
    edit: TextEdit,
    on_submit: Option<SubmitHandler>,
    on_focus: Option<FocusHandler>,
    on_blur: Option<FocusHandler>,
    click_to_focus: bool,
    allow_empty_submit: bool,
    clear_on_submit: bool,
    blur_on_submit: bool,
    focused: bool,
    /// Bumped on every focus and blur.
    generation: u64,
    dragging: bool,
    shift: bool,
    keys: Vec<KeyEvent>,
    paste: Option<PendingPaste>,
}

impl TextBox {
    pub fn new(options: TextBoxOptions, m: &dyn TextMeasure) -> Self {
        let text_size = options.height - 2.0 * options.padding;
        let area = options.width - 2.0 * options.padding;
        Self {
            width: options.width,
            height: options.height,
            padding: options.padding,
            placeholder: options.placeholder,
            edit: TextEdit::new(options.value, area, text_size, options.max_length, m),
            on_submit: options.on_submit,
            on_focus: options.on_focus,
            on_blur: options.on_blur,
            click_to_focus: options.click_to_focus,
            allow_empty_submit: options.allow_empty_submit,
            clear_on_submit: options.clear_on_submit,
            blur_on_submit: options.blur_on_submit,
            focused: false,
            generation: 0,
            dragging: false,
            shift: false,
            keys: Vec::new(),
            paste: None,
        }
    }

    pub fn value(&self) -> &str {
        self.edit.value()
    }

    pub fn set_value(&mut self, value: impl Into<String>, m: &dyn TextMeasure) {
        self.edit.set_value(value, m);
    }

    pub fn edit(&self) -> &TextEdit {
        &self.edit
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_pasting(&self) -> bool {
        self.paste.is_some()
    }

    pub fn queued_keys(&self) -> usize {
        self.keys.len()
    }

    fn over(&self, p: Vec2) -> bool {
        Rect::new(0.0, -self.height, self.width, self.height).contains_strict(p)
    }

    fn focus(&mut self, cx: &mut Cx) {
        self.focused = true;
        self.generation += 1;
        // Reads from an earlier session are stale and would stall key draining.
        if self.paste.take().is_some() {
            log::debug!("Dropping clipboard read from an earlier focus");
        }
        if let Some(on_focus) = self.on_focus.clone() {
            on_focus(cx);
        }
    }

    fn blur(&mut self, cx: &mut Cx) {
        self.focused = false;
        self.generation += 1;
        self.dragging = false;
        self.shift = false;
        self.keys.clear();
        if let Some(on_blur) = self.on_blur.clone() {
            on_blur(cx);
        }
    }

    fn submit(&mut self, cx: &mut Cx) {
        if (self.allow_empty_submit || !self.edit.is_empty())
            && let Some(on_submit) = self.on_submit.clone()
        {
            on_submit(self.edit.value(), cx);
        }
        if self.clear_on_submit {
            self.edit.clear(cx.measure());
        }
        if self.blur_on_submit {
            self.blur(cx);
        }
    }

    /// Applies a finished clipboard read, if any. Text read for an earlier
    /// focus session is dropped.
    fn poll_paste(&mut self, cx: &mut Cx) {
        let Some(pending) = self.paste.as_mut() else {
            return;
        };
        match pending.read.try_recv() {
            Ok(None) => {}
            Ok(Some(text)) => {
                let generation = pending.generation;
                self.paste = None;
                if self.focused && generation == self.generation {
                    self.edit.paste(&text, cx.measure());
                } else {
                    log::debug!("Dropping clipboard text read before the field lost focus");
                }
            }
            Err(_) => {
                self.paste = None;
                log::warn!("Clipboard read failed, paste abandoned");
            }
        }
    }

    fn type_key(&mut self, key: &KeyEvent, cx: &mut Cx) {
        let select = key.modifiers.shift;
        let ctrl = key.modifiers.ctrl;
        match key.key {
            Key::ArrowLeft => {
                let target = if ctrl {
                    self.edit.word_left()
                } else {
                    self.edit.cursor().saturating_sub(1)
                };
                self.edit.move_to(target, select, cx.measure());
            }
            Key::ArrowRight => {
                let target = if ctrl {
                    self.edit.word_right()
                } else {
                    self.edit.cursor() + 1
                };
                self.edit.move_to(target, select, cx.measure());
            }
            Key::Home => self.edit.move_to(0, select, cx.measure()),
            Key::End => self.edit.move_to(self.edit.len(), select, cx.measure()),
            Key::Backspace => self.edit.backspace(cx.measure()),
            Key::Delete => self.edit.delete(cx.measure()),
            Key::Enter => self.submit(cx),
            Key::Character(c) if !ctrl => {
                let mut buf = [0; 4];
                self.edit.insert(c.encode_utf8(&mut buf), cx.measure());
            }
            Key::Character(c) => match c.to_ascii_lowercase() {
                'a' => self.edit.select_all(cx.measure()),
                'c' => {
                    let text = self.edit.copy_text();
                    cx.clipboard().write_text(&text);
                }
                'x' => {
                    let text = self.edit.cut(cx.measure());
                    cx.clipboard().write_text(&text);
                }
                'v' => {
                    if self.edit.has_selection() {
                        self.edit.remove_selection(None, cx.measure());
                    }
                    let read = cx.clipboard().read_text();
                    self.paste = Some(PendingPaste {
                        read,
                        generation: self.generation,
                    });
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn pointer_index(&self, mouse: Vec2, nudge: bool, m: &dyn TextMeasure) -> usize {
        self.edit.index_at_x(mouse.x - self.padding, nudge, m)
    }
}

impl Widget for TextBox {
    fn kind(&self) -> &'static str {
        "textbox"
    }

    fn update(&mut self, cx: &mut Cx) {
        self.poll_paste(cx);
        if !self.focused {
            return;
        }
        self.edit.tick();

        if self.paste.is_none() {
            let mut keys = std::mem::take(&mut self.keys).into_iter();
            while let Some(key) = keys.next() {
                self.type_key(&key, cx);
                if !self.focused {
                    return;
                }
                if self.paste.is_some() {
                    self.keys = keys.collect();
                    break;
                }
            }
        }

        if self.dragging {
            let interval = u64::from(cx.config().drag_scroll_interval.max(1));
            let nudge = cx.tick() % interval == 0;
            let index = self.pointer_index(cx.mouse(), nudge, cx.measure());
            self.edit.move_to(index, true, cx.measure());
        }
    }

    fn event(&mut self, event: &UiEvent, cx: &mut Cx) {
        match event {
            _ if event.is_primary_down() => {
                let mouse = cx.mouse();
                if self.over(mouse) {
                    if self.click_to_focus && !self.focused {
                        self.focus(cx);
                    }
                } else if self.focused {
                    self.blur(cx);
                }
                if !self.focused || !self.over(mouse) {
                    return;
                }
                self.dragging = true;
                if !self.shift {
                    let index = self.pointer_index(mouse, false, cx.measure());
                    self.edit.move_to(index, false, cx.measure());
                }
            }
            _ if event.is_primary_up() => self.dragging = false,
            UiEvent::KeyTyped(key) if self.focused => self.keys.push(key.clone()),
            UiEvent::KeyDown(key) => {
                self.dragging = false;
                if key.key == Key::Shift {
                    self.shift = true;
                }
            }
            UiEvent::KeyUp(key) if key.key == Key::Shift => self.shift = false,
            _ => {}
        }
    }

    fn change_screen(&mut self, change: &ScreenChange, cx: &mut Cx) {
        if change.leaving && self.focused {
            self.blur(cx);
        }
    }

    fn cursor_state(&self, cx: &ViewCx) -> Option<CursorState> {
        (self.over(cx.mouse()) && (self.focused || self.click_to_focus)).then_some(CursorState::Text)
    }

    fn is_hovered(&self, cx: &ViewCx) -> bool {
        self.over(cx.mouse())
    }

    fn on_measure_changed(&mut self, m: &dyn TextMeasure) {
        self.edit.clip(None, m);
    }

    fn show(&self, r: &mut dyn Renderer, cx: &ViewCx) {
        let style = cx.style();
        let m = cx.measure();
        let h = self.height;
        let size = self.edit.text_size();
        let baseline = -h * 0.5 + size / 3.0;

        r.fill_opt(style.colour("fill"));
        r.stroke_opt(style.colour("stroke"), 1.0);
        r.rect(Rect::new(0.0, -h, self.width, h));

        r.no_stroke();
        if let Some(colour) = style.colour("selection")
            && let Some((from, to)) = self.edit.selection_span(m)
        {
            r.fill(colour);
            r.rect(Rect::new(self.padding + from, -h * 0.5 - size * 0.5, to - from, size));
        }

        if !self.edit.is_empty() {
            r.fill_opt(style.colour("text"));
            r.text(
                self.edit.visible_text(),
                Vec2::new(self.padding + self.edit.text_x(), baseline),
                size,
                TextAlign::Left,
            );
        } else if !self.focused && !self.placeholder.is_empty() {
            r.fill_opt(style.colour("default").or_else(|| style.colour("text")));
            r.text(
                &self.placeholder,
                Vec2::new(self.padding, baseline),
                size,
                TextAlign::Left,
            );
        }

        if self.focused
            && self.edit.caret_visible(cx.config().caret_blink)
            && let Some(x) = self.edit.caret_x(m)
        {
            let x = self.padding + x;
            r.stroke_opt(style.colour("text"), 2.0);
            r.line(Vec2::new(x, -self.padding), Vec2::new(x, -self.padding - size));
        }
    }
}
