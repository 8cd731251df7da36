use std::any::Any;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::Ui;

/// Controller operations requested from inside a flood.
///
/// Widgets and handlers only see their own node while an event is being
/// delivered; anything that touches the screen stack, the theme or another
/// element is queued here and applied once the flood returns.
pub enum Command {
    SetScreen(String),
    OpenOverlay { name: String, payload: Rc<dyn Any> },
    CloseOverlay,
    SetTheme(String),
    Defer(Box<dyn FnOnce(&mut Ui)>),
}

#[derive(Default)]
pub struct Commands {
    queue: VecDeque<Command>,
}

impl Commands {
    pub fn set_screen(&mut self, name: impl Into<String>) {
        self.queue.push_back(Command::SetScreen(name.into()));
    }

    pub fn open_overlay(&mut self, name: impl Into<String>, payload: impl Any) {
        self.queue.push_back(Command::OpenOverlay {
            name: name.into(),
            payload: Rc::new(payload),
        });
    }

    pub fn close_overlay(&mut self) {
        self.queue.push_back(Command::CloseOverlay);
    }

    pub fn set_theme(&mut self, name: impl Into<String>) {
        self.queue.push_back(Command::SetTheme(name.into()));
    }

    /// Runs `f` against the whole UI after the current flood.
    pub fn defer(&mut self, f: impl FnOnce(&mut Ui) + 'static) {
        self.queue.push_back(Command::Defer(Box::new(f)));
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn take(&mut self) -> VecDeque<Command> {
        std::mem::take(&mut self.queue)
    }
}
