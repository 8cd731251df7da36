//! The controller tying the element tree, the screen stack, themes and the
//! host capabilities together.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use trellis_core::{
    Color, CursorHost, InputEvent, Rect, Renderer, Result, Services, Size, Style, TextAlign,
    TextMeasure, Theme, UiConfig, UiError, Vec2, ViewTransform,
};

use crate::commands::{Command, Commands};
use crate::cursor::CursorController;
use crate::element::{Cx, ElementOptions, Env, FrameInfo, NodeId, Widget};
use crate::event::UiEvent;
use crate::screens::{Notices, RootKind, ScreenStack};
use crate::tree::Tree;
use crate::widgets::{
    Button, ButtonOptions, ChatBox, ChatBoxOptions, Checkbox, CheckboxOptions, CloseButton,
    Container, ContainerOptions, Overlay, OverlayOptions, Screen, Slider, SliderOptions, Table,
    TableOptions, TextBox, TextBoxOptions,
};

const DEFAULT_THEME: &str = "default";
const DEFAULT_STYLE: &str = "default";
/// Window-space offset of the tooltip box from the pointer.
const TOOLTIP_OFFSET: Vec2 = Vec2::new(10.0, 10.0);

pub struct Ui {
    tree: Tree,
    env: Env,
    screens: ScreenStack,
    themes: HashMap<String, Theme>,
    theme: String,
    cursor: CursorController,
    cursor_host: Box<dyn CursorHost>,
    view: ViewTransform,
    window: Size,
}

impl Ui {
    /// Creates an empty UI. The window starts out the size of the canvas;
    /// call [`Ui::resize`] once the host knows its real size.
    pub fn new(config: UiConfig, services: Services) -> Result<Self> {
        config.validate()?;
        let window = config.canvas();
        let view = ViewTransform::fit(window, config.canvas(), config.buffer);
        let Services {
            measure,
            clipboard,
            sounds,
            cursor,
        } = services;

        Ok(Self {
            tree: Tree::new(),
            env: Env {
                measure,
                clipboard,
                sounds,
                commands: Commands::default(),
                config,
                frame: FrameInfo::default(),
            },
            screens: ScreenStack::new(),
            themes: HashMap::new(),
            theme: DEFAULT_THEME.to_string(),
            cursor: CursorController::new(),
            cursor_host: cursor,
            view,
            window,
        })
    }

    pub fn config(&self) -> &UiConfig {
        &self.env.config
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn cursor(&self) -> &CursorController {
        &self.cursor
    }

    pub fn view(&self) -> ViewTransform {
        self.view
    }

    pub fn tick(&self) -> u64 {
        self.env.frame.tick
    }

    fn insert(
        &mut self,
        parent: Option<NodeId>,
        widget: Box<dyn Widget>,
        options: ElementOptions,
    ) -> Result<NodeId> {
        let theme = self.themes.get(&self.theme);
        self.tree.insert(parent, widget, options, theme)
    }

    // Construction

    pub fn add_screen(&mut self, name: &str, options: ElementOptions) -> Result<NodeId> {
        let id = self.insert(None, Box::new(Screen), options)?;
        self.screens.register(name, RootKind::Screen, id);
        Ok(id)
    }

    /// Adds an overlay centred in the canvas. A titled overlay gets a close
    /// button in its header.
    pub fn add_overlay(&mut self, name: &str, options: OverlayOptions) -> Result<NodeId> {
        let (overlay, position) = Overlay::new(&options, &self.env.config);
        let close = overlay.is_titled().then(|| overlay.close_button());
        let element = ElementOptions {
            position,
            ..options.element
        };
        let id = self.insert(None, Box::new(overlay), element)?;
        if let Some((centre, size)) = close {
            let element = ElementOptions::at(centre.x, centre.y);
            self.insert(Some(id), Box::new(CloseButton::new(size)), element)?;
        }
        self.screens.register(name, RootKind::Overlay, id);
        Ok(id)
    }

    pub fn add_button(&mut self, parent: NodeId, mut options: ButtonOptions) -> Result<NodeId> {
        let element = std::mem::take(&mut options.element);
        self.insert(Some(parent), Box::new(Button::new(options)), element)
    }

    pub fn add_container(&mut self, parent: NodeId, options: ContainerOptions) -> Result<NodeId> {
        let container = Container::new(&options);
        self.insert(Some(parent), Box::new(container), options.element)
    }

    pub fn add_checkbox(&mut self, parent: NodeId, mut options: CheckboxOptions) -> Result<NodeId> {
        let element = std::mem::take(&mut options.element);
        self.insert(Some(parent), Box::new(Checkbox::new(options)), element)
    }

    pub fn add_slider(&mut self, parent: NodeId, mut options: SliderOptions) -> Result<NodeId> {
        let element = std::mem::take(&mut options.element);
        self.insert(Some(parent), Box::new(Slider::new(options)), element)
    }

    /// Fails with [`trellis_core::UiError::TableWithoutColumns`] before
    /// anything is inserted.
    pub fn add_table<R: 'static>(
        &mut self,
        parent: NodeId,
        mut options: TableOptions<R>,
    ) -> Result<NodeId> {
        let element = std::mem::take(&mut options.element);
        let table = Table::new(options)?;
        self.insert(Some(parent), Box::new(table), element)
    }

    pub fn add_textbox(&mut self, parent: NodeId, mut options: TextBoxOptions) -> Result<NodeId> {
        let element = std::mem::take(&mut options.element);
        let textbox = TextBox::new(options, &*self.env.measure);
        self.insert(Some(parent), Box::new(textbox), element)
    }

    pub fn add_chatbox(&mut self, parent: NodeId, options: ChatBoxOptions) -> Result<NodeId> {
        let chatbox = ChatBox::new(&options);
        self.insert(Some(parent), Box::new(chatbox), options.element)
    }

    /// Adds a user-defined widget.
    pub fn add_widget(
        &mut self,
        parent: NodeId,
        widget: impl Widget,
        options: ElementOptions,
    ) -> Result<NodeId> {
        self.insert(Some(parent), Box::new(widget), options)
    }

    // Lookup

    pub fn screen(&self, name: &str) -> Option<NodeId> {
        self.screens.get(name)
    }

    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        let id = self.tree.by_label(label);
        if id.is_none() {
            log::warn!("Failed to get element: {}", UiError::UnknownLabel(label.to_string()));
        }
        id
    }

    pub fn element<W: Widget>(&self, label: &str) -> Option<&W> {
        let id = self.node_by_label(label)?;
        self.tree.widget(id)
    }

    pub fn element_mut<W: Widget>(&mut self, label: &str) -> Option<&mut W> {
        let id = self.node_by_label(label)?;
        self.tree.widget_mut(id)
    }

    pub fn widget<W: Widget>(&self, id: NodeId) -> Option<&W> {
        self.tree.widget(id)
    }

    pub fn widget_mut<W: Widget>(&mut self, id: NodeId) -> Option<&mut W> {
        self.tree.widget_mut(id)
    }

    /// Runs `f` on a widget together with the text measurer, for calls
    /// that lay out text (`ChatBox::add_text`, `TextBox::set_value`).
    pub fn measured_mut<W: Widget, T>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut W, &dyn TextMeasure) -> T,
    ) -> Option<T> {
        let widget = self.tree.widget_mut::<W>(id)?;
        Some(f(widget, &*self.env.measure))
    }

    /// Registers a handler run after the widget's own handling of events
    /// named `name`. Returns false for a removed node.
    pub fn on(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        handler: impl Fn(&UiEvent, &mut Cx) + 'static,
    ) -> bool {
        self.tree.on(id, name, Rc::new(handler))
    }

    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        self.tree.set_hidden(id, hidden);
    }

    // Themes and host resources

    pub fn theme_name(&self) -> &str {
        &self.theme
    }

    /// Registers a theme. Activating it, or replacing the active theme,
    /// restyles every screen and overlay.
    pub fn add_theme(&mut self, name: &str, theme: Theme, activate: bool) {
        self.themes.insert(name.to_string(), theme);
        if activate || name == self.theme {
            self.set_theme(name);
        }
    }

    pub fn set_theme(&mut self, name: &str) -> bool {
        if !self.themes.contains_key(name) {
            log::warn!("Failed to set theme: {}", UiError::UnknownTheme(name.to_string()));
            return false;
        }
        self.theme = name.to_string();
        log::debug!("theme -> {name}");

        let roots: Vec<NodeId> = self.screens.roots().collect();
        let theme = self.themes.get(&self.theme);
        for root in roots {
            self.tree.resolve_styles(root, DEFAULT_STYLE, theme);
        }
        true
    }

    /// Maps cursor state names (`default`, `pointer`, `text`, ...) to host
    /// cursor images.
    pub fn set_cursors(&mut self, images: HashMap<String, String>) {
        self.cursor.set_images(images);
    }

    /// Replaces the text measurer and re-lays out every text box.
    pub fn set_text_measure(&mut self, measure: impl TextMeasure + 'static) {
        self.env.measure = Box::new(measure);
        let roots: Vec<NodeId> = self.screens.roots().collect();
        for root in roots {
            self.tree.measure_changed(root, &*self.env.measure);
        }
    }

    /// Recomputes the pan/zoom fitting the canvas into a window of the
    /// given pixel size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.window = Size::new(width, height);
        let config = &self.env.config;
        self.view = ViewTransform::fit(self.window, config.canvas(), config.buffer);
    }

    // Screens

    pub fn active_screen(&self) -> Option<NodeId> {
        self.screens.active()
    }

    pub fn current_screen(&self) -> Option<NodeId> {
        self.screens.current()
    }

    pub fn set_screen(&mut self, name: &str) -> bool {
        let changed = self.change_screen(name);
        self.flush_commands();
        changed
    }

    /// Opens the overlay `name` on top of the stack, then hands `payload`
    /// to its `on_display` hook.
    pub fn open_overlay(&mut self, name: &str, payload: impl Any) -> bool {
        let opened = self.push_overlay(name, Rc::new(payload));
        self.flush_commands();
        opened
    }

    pub fn close_overlay(&mut self) -> bool {
        let closed = self.pop_overlay();
        self.flush_commands();
        closed
    }

    fn deliver(&mut self, notices: Notices) {
        for (root, change) in notices {
            self.tree.change_screen(root, &change, &mut self.env);
        }
    }

    fn change_screen(&mut self, name: &str) -> bool {
        match self.screens.set_screen(name) {
            Some(notices) => {
                self.deliver(notices);
                true
            }
            None => false,
        }
    }

    fn push_overlay(&mut self, name: &str, payload: Rc<dyn Any>) -> bool {
        let Some((overlay, notices)) = self.screens.open_overlay(name) else {
            return false;
        };
        self.deliver(notices);
        if let Some(on_display) = self
            .tree
            .widget::<Overlay>(overlay)
            .and_then(Overlay::on_display)
        {
            on_display(self, &*payload);
        }
        true
    }

    fn pop_overlay(&mut self) -> bool {
        match self.screens.close_overlay() {
            Some(notices) => {
                self.deliver(notices);
                true
            }
            None => false,
        }
    }

    /// Applies commands queued by widgets and handlers. Commands queued
    /// while applying are handled in the same call.
    pub fn flush_commands(&mut self) {
        loop {
            let queue = self.env.commands.take();
            if queue.is_empty() {
                break;
            }
            for command in queue {
                match command {
                    Command::SetScreen(name) => {
                        self.change_screen(&name);
                    }
                    Command::OpenOverlay { name, payload } => {
                        self.push_overlay(&name, payload);
                    }
                    Command::CloseOverlay => {
                        self.pop_overlay();
                    }
                    Command::SetTheme(name) => {
                        self.set_theme(&name);
                    }
                    Command::Defer(f) => f(self),
                }
            }
        }
    }

    // Frame

    fn emit(&mut self, event: UiEvent) {
        if let Some(active) = self.screens.active() {
            self.tree.emit(active, &event, &mut self.env);
        }
        self.flush_commands();
    }

    /// Floods a named user event through the active screen.
    pub fn emit_custom(&mut self, name: impl Into<String>, payload: impl Any) {
        self.emit(UiEvent::Custom {
            name: name.into(),
            payload: Rc::new(payload),
        });
    }

    /// Routes one host input event to the active screen. Pointer moves are
    /// picked up by the next [`Ui::update`].
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { position } => self.cursor.pointer_moved(position),
            InputEvent::PointerDown { button } => {
                self.cursor.button_pressed();
                self.cursor.hide_tooltip();
                self.emit(UiEvent::PointerDown(button));
            }
            InputEvent::PointerUp { button } => {
                self.cursor.button_released();
                self.emit(UiEvent::PointerUp(button));
            }
            InputEvent::Wheel { delta } => {
                self.cursor.hide_tooltip();
                self.emit(UiEvent::Wheel(delta));
            }
            InputEvent::KeyDown(key) => {
                self.cursor.hide_tooltip();
                self.emit(UiEvent::KeyDown(key));
            }
            InputEvent::KeyUp(key) => self.emit(UiEvent::KeyUp(key)),
            InputEvent::KeyTyped(key) => {
                self.cursor.hide_tooltip();
                self.emit(UiEvent::KeyTyped(key));
            }
        }
    }

    /// Per-frame tick: pointer tracking, the active screen's update flood,
    /// then cursor-state resolution.
    pub fn update(&mut self) {
        self.env.frame.tick += 1;
        self.cursor
            .update(&self.view, self.window, &mut *self.cursor_host);
        self.env.frame.pointer_on_canvas = self.cursor.on_canvas();

        if let Some(active) = self.screens.active() {
            let mouse = self.cursor.mouse();
            self.tree.update(active, mouse, &mut self.env);
        }
        self.flush_commands();

        let state = self
            .screens
            .active()
            .and_then(|active| self.tree.cursor_state(active, &self.env));
        self.cursor.set_mode(state, &mut *self.cursor_host);
    }

    pub fn draw(&self, r: &mut dyn Renderer) {
        let style = self
            .screens
            .current()
            .and_then(|screen| self.tree.style(screen))
            .cloned()
            .unwrap_or_default();
        let canvas = self.env.config.canvas();
        let canvas_rect = Rect::new(0.0, 0.0, canvas.width, canvas.height);

        match style.colour("background") {
            Some(colour) => r.background(colour),
            None => r.clear(),
        }

        r.push();
        r.translate(self.view.offset.x, self.view.offset.y);
        r.scale(self.view.zoom);

        if let Some(screen) = self.screens.current() {
            self.tree.draw(screen, r, &self.env);
        }
        if let Some(overlay) = self.screens.top_overlay() {
            if let Some(backdrop) = self.tree.style(overlay).and_then(|s| s.colour("background")) {
                r.no_stroke();
                r.fill(backdrop);
                r.rect(canvas_rect);
            }
            self.tree.draw(overlay, r, &self.env);
        }
        if let Some(border) = style.colour("stroke") {
            r.no_fill();
            r.stroke(border, 4.0);
            r.rect(canvas_rect);
        }
        r.pop();

        if let Some(outer) = style.colour("outer") {
            self.draw_letterbox(r, outer);
        }

        if self.cursor.tooltip_ready(self.env.config.tooltip_delay)
            && let Some(text) = self
                .screens
                .active()
                .and_then(|active| self.tree.tooltip(active, &self.env))
        {
            self.draw_tooltip(r, &style, &text);
        }
    }

    fn draw_letterbox(&self, r: &mut dyn Renderer, colour: Color) {
        let Size { width, height } = self.window;
        let Vec2 { x, y } = self.view.offset;
        r.no_stroke();
        r.fill(colour);
        r.rect(Rect::new(0.0, 0.0, width, y));
        r.rect(Rect::new(0.0, height - y, width, y));
        r.rect(Rect::new(0.0, 0.0, x, height));
        r.rect(Rect::new(width - x, 0.0, x, height));
    }

    fn draw_tooltip(&self, r: &mut dyn Renderer, style: &Style, text: &str) {
        let config = &self.env.config;
        let size = config.tooltip_text_size();
        let padding = config.tooltip_padding;
        let origin = self.cursor.window_pos() + TOOLTIP_OFFSET;

        r.push();
        r.translate(origin.x, origin.y);
        r.scale(self.view.zoom);

        let fill = style.colour_only_in("fill", "tooltip");
        let stroke = style.colour_only_in("stroke", "tooltip");
        if fill.is_some() || stroke.is_some() {
            r.fill_opt(fill);
            r.stroke_opt(stroke, 1.0);
            let width = self.env.measure.text_width(text, size) + 2.0 * padding;
            r.rect(Rect::new(0.0, 0.0, width, config.tooltip_height));
        }

        r.no_stroke();
        r.fill_opt(style.colour_only_in("text", "tooltip"));
        r.text(
            text,
            Vec2::new(padding, padding + size * 5.0 / 6.0),
            size,
            TextAlign::Left,
        );
        r.pop();
    }
}
