//! The element model shared by every widget.
//!
//! A node in the arena couples a [`Widget`] (the per-kind behaviour) with
//! the state every element carries regardless of kind: local position,
//! visibility, resolved style, label, tooltip and user hooks. Floods hand
//! the widget a [`Cx`] (mutable passes) or a [`ViewCx`] (read-only passes)
//! scoped to its own node.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use smallvec::SmallVec;
use trellis_core::{
    Clipboard, Renderer, SoundPlayer, Style, TextMeasure, Theme, UiConfig, Vec2,
};

use crate::commands::Commands;
use crate::event::{CursorState, ScreenChange, UiEvent};

slotmap::new_key_type! {
    pub struct NodeId;
}

/// A value given either up front or computed each time it is read.
#[derive(Clone)]
pub enum Dynamic<T> {
    Static(T),
    Computed(Rc<dyn Fn() -> T>),
}

impl<T: Clone> Dynamic<T> {
    pub fn computed(f: impl Fn() -> T + 'static) -> Self {
        Dynamic::Computed(Rc::new(f))
    }

    pub fn get(&self) -> T {
        match self {
            Dynamic::Static(v) => v.clone(),
            Dynamic::Computed(f) => f(),
        }
    }
}

impl<T: Default> Default for Dynamic<T> {
    fn default() -> Self {
        Dynamic::Static(T::default())
    }
}

impl From<&str> for Dynamic<String> {
    fn from(s: &str) -> Self {
        Dynamic::Static(s.to_string())
    }
}

impl From<String> for Dynamic<String> {
    fn from(s: String) -> Self {
        Dynamic::Static(s)
    }
}

pub type EventHandler = Rc<dyn Fn(&UiEvent, &mut Cx)>;
pub type UpdateHook = Rc<dyn Fn(&mut Cx)>;
pub type DrawHook = Rc<dyn Fn(&mut dyn Renderer, &ViewCx)>;
pub type CursorHook = Rc<dyn Fn(&ViewCx) -> Option<CursorState>>;
pub type ChangeHook = Rc<dyn Fn(&ScreenChange, &mut Cx)>;

/// User callbacks run after the widget's own pass.
#[derive(Clone, Default)]
pub struct Hooks {
    pub update: Option<UpdateHook>,
    pub draw: Option<DrawHook>,
    pub post_draw: Option<DrawHook>,
    pub cursor_state: Option<CursorHook>,
    pub change_screen: Option<ChangeHook>,
}

impl Hooks {
    pub fn on_update(mut self, f: impl Fn(&mut Cx) + 'static) -> Self {
        self.update = Some(Rc::new(f));
        self
    }
    pub fn on_draw(mut self, f: impl Fn(&mut dyn Renderer, &ViewCx) + 'static) -> Self {
        self.draw = Some(Rc::new(f));
        self
    }
    pub fn on_post_draw(mut self, f: impl Fn(&mut dyn Renderer, &ViewCx) + 'static) -> Self {
        self.post_draw = Some(Rc::new(f));
        self
    }
    pub fn on_cursor_state(mut self, f: impl Fn(&ViewCx) -> Option<CursorState> + 'static) -> Self {
        self.cursor_state = Some(Rc::new(f));
        self
    }
    pub fn on_change_screen(mut self, f: impl Fn(&ScreenChange, &mut Cx) + 'static) -> Self {
        self.change_screen = Some(Rc::new(f));
        self
    }
}

/// Options every element accepts.
#[derive(Clone, Default)]
pub struct ElementOptions {
    pub position: Vec2,
    pub hidden: bool,
    /// Style name; inherited from the parent when `None`.
    pub style: Option<String>,
    pub label: Option<String>,
    pub tooltip: Option<Dynamic<String>>,
    pub hooks: Hooks,
}

impl ElementOptions {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..Default::default()
        }
    }
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
    pub fn style(mut self, name: impl Into<String>) -> Self {
        self.style = Some(name.into());
        self
    }
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
    pub fn tooltip(mut self, tooltip: impl Into<Dynamic<String>>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
    pub fn hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInfo {
    pub tick: u64,
    pub pointer_on_canvas: bool,
}

/// Services and per-frame data shared by every node during a flood.
pub struct Env {
    pub(crate) measure: Box<dyn TextMeasure>,
    pub(crate) clipboard: Box<dyn Clipboard>,
    pub(crate) sounds: Box<dyn SoundPlayer>,
    pub(crate) commands: Commands,
    pub(crate) config: UiConfig,
    pub(crate) frame: FrameInfo,
}

/// Mutable context for one node during `update`, `emit` and screen changes.
pub struct Cx<'a> {
    id: NodeId,
    mouse: Vec2,
    style: &'a Style,
    hidden: &'a mut bool,
    env: &'a mut Env,
}

impl<'a> Cx<'a> {
    pub(crate) fn new(
        id: NodeId,
        mouse: Vec2,
        style: &'a Style,
        hidden: &'a mut bool,
        env: &'a mut Env,
    ) -> Self {
        Self {
            id,
            mouse,
            style,
            hidden,
            env,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Pointer position relative to this node's origin, as of the last update.
    pub fn mouse(&self) -> Vec2 {
        self.mouse
    }

    pub fn style(&self) -> &Style {
        self.style
    }

    pub fn is_hidden(&self) -> bool {
        *self.hidden
    }

    /// Hides or shows this node. Takes effect from the next pass.
    pub fn set_hidden(&mut self, hidden: bool) {
        *self.hidden = hidden;
    }

    pub fn measure(&self) -> &dyn TextMeasure {
        &*self.env.measure
    }

    pub fn clipboard(&mut self) -> &mut dyn Clipboard {
        &mut *self.env.clipboard
    }

    pub fn play(&mut self, sound: &str) {
        self.env.sounds.play(sound);
    }

    pub fn commands(&mut self) -> &mut Commands {
        &mut self.env.commands
    }

    pub fn config(&self) -> &UiConfig {
        &self.env.config
    }

    pub fn tick(&self) -> u64 {
        self.env.frame.tick
    }

    pub fn pointer_on_canvas(&self) -> bool {
        self.env.frame.pointer_on_canvas
    }
}

/// Read-only context for one node during draw, cursor and tooltip passes.
pub struct ViewCx<'a> {
    id: NodeId,
    mouse: Vec2,
    style: &'a Style,
    env: &'a Env,
}

impl<'a> ViewCx<'a> {
    pub(crate) fn new(id: NodeId, mouse: Vec2, style: &'a Style, env: &'a Env) -> Self {
        Self {
            id,
            mouse,
            style,
            env,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
    pub fn mouse(&self) -> Vec2 {
        self.mouse
    }
    pub fn style(&self) -> &Style {
        self.style
    }
    pub fn measure(&self) -> &dyn TextMeasure {
        &*self.env.measure
    }
    pub fn config(&self) -> &UiConfig {
        &self.env.config
    }
    pub fn tick(&self) -> u64 {
        self.env.frame.tick
    }
    pub fn pointer_on_canvas(&self) -> bool {
        self.env.frame.pointer_on_canvas
    }
}

/// Per-kind behaviour of an element.
///
/// All methods default to doing nothing, so a widget only implements the
/// passes it cares about. Positions seen through the contexts are local:
/// the node's own offset has already been subtracted.
pub trait Widget: Any {
    /// Theme key styles are looked up under.
    fn kind(&self) -> &'static str;

    fn update(&mut self, _cx: &mut Cx) {}

    fn event(&mut self, _event: &UiEvent, _cx: &mut Cx) {}

    fn change_screen(&mut self, _change: &ScreenChange, _cx: &mut Cx) {}

    fn cursor_state(&self, _cx: &ViewCx) -> Option<CursorState> {
        None
    }

    fn is_hovered(&self, _cx: &ViewCx) -> bool {
        false
    }

    fn show(&self, _r: &mut dyn Renderer, _cx: &ViewCx) {}

    /// Paint pass that runs after the children have been drawn.
    fn post_show(&self, _r: &mut dyn Renderer, _cx: &ViewCx) {}

    /// Called after the node's own style was resolved, for widgets that
    /// embed styled parts of another kind.
    fn restyle(&mut self, _theme: Option<&Theme>, _style_name: &str) {}

    /// The text measurer was replaced; cached text layout must be redone.
    fn on_measure_changed(&mut self, _measure: &dyn TextMeasure) {}
}

/// Resolves `(kind, name)` against `theme`, warning on unknown styles.
pub(crate) fn resolve_style(theme: Option<&Theme>, kind: &str, name: &str) -> Style {
    let Some(theme) = theme else {
        return Style::none();
    };
    match theme.resolve(kind, name) {
        Ok(bag) => Style::from(bag),
        Err(e) => {
            log::warn!("Failed to get style: {e}");
            Style::none()
        }
    }
}

pub(crate) struct Node {
    pub(crate) widget: Box<dyn Widget>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
    pub(crate) position: Vec2,
    pub(crate) hidden: bool,
    pub(crate) mouse: Vec2,
    pub(crate) style_name: Option<String>,
    pub(crate) resolved_name: String,
    pub(crate) style: Style,
    pub(crate) label: Option<String>,
    pub(crate) tooltip: Option<Dynamic<String>>,
    pub(crate) hooks: Hooks,
    pub(crate) handlers: HashMap<String, EventHandler>,
}

impl Node {
    pub(crate) fn new(widget: Box<dyn Widget>, parent: Option<NodeId>, options: ElementOptions) -> Self {
        Self {
            widget,
            parent,
            children: SmallVec::new(),
            position: options.position,
            hidden: options.hidden,
            mouse: Vec2::ZERO,
            style_name: options.style,
            resolved_name: String::new(),
            style: Style::none(),
            label: options.label,
            tooltip: options.tooltip,
            hooks: options.hooks,
            handlers: HashMap::new(),
        }
    }
}
