use std::any::Any;
use std::fmt;
use std::rc::Rc;

use trellis_core::{KeyEvent, PointerButton, Vec2};

use crate::element::NodeId;

/// An event flooded through a screen's subtree.
///
/// Every visible node sees every event; widgets hit-test against their own
/// local pointer position to decide whether it concerns them.
#[derive(Clone)]
pub enum UiEvent {
    PointerDown(PointerButton),
    PointerUp(PointerButton),
    Wheel(Vec2),
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    KeyTyped(KeyEvent),
    Custom { name: String, payload: Rc<dyn Any> },
}

impl UiEvent {
    /// Name user handlers registered with `Ui::on` are keyed by.
    pub fn name(&self) -> &str {
        match self {
            UiEvent::PointerDown(_) => "pointer_down",
            UiEvent::PointerUp(_) => "pointer_up",
            UiEvent::Wheel(_) => "wheel",
            UiEvent::KeyDown(_) => "key_down",
            UiEvent::KeyUp(_) => "key_up",
            UiEvent::KeyTyped(_) => "key_typed",
            UiEvent::Custom { name, .. } => name,
        }
    }

    pub fn is_primary_down(&self) -> bool {
        matches!(self, UiEvent::PointerDown(PointerButton::Primary))
    }

    pub fn is_primary_up(&self) -> bool {
        matches!(self, UiEvent::PointerUp(PointerButton::Primary))
    }
}

impl fmt::Debug for UiEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiEvent::PointerDown(b) => f.debug_tuple("PointerDown").field(b).finish(),
            UiEvent::PointerUp(b) => f.debug_tuple("PointerUp").field(b).finish(),
            UiEvent::Wheel(d) => f.debug_tuple("Wheel").field(d).finish(),
            UiEvent::KeyDown(k) => f.debug_tuple("KeyDown").field(k).finish(),
            UiEvent::KeyUp(k) => f.debug_tuple("KeyUp").field(k).finish(),
            UiEvent::KeyTyped(k) => f.debug_tuple("KeyTyped").field(k).finish(),
            UiEvent::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
        }
    }
}

/// Notification delivered to a whole root subtree when the active screen
/// changes. `leaving` is true for the root losing input and paint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenChange {
    pub leaving: bool,
    pub from: Option<NodeId>,
    pub to: NodeId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CursorState {
    #[default]
    Default,
    Pointer,
    Text,
    Named(String),
}

impl CursorState {
    pub fn name(&self) -> &str {
        match self {
            CursorState::Default => "default",
            CursorState::Pointer => "pointer",
            CursorState::Text => "text",
            CursorState::Named(name) => name,
        }
    }
}
