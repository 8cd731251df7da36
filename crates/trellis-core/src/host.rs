use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::render_api::{MonospaceMeasure, TextMeasure};

/// Plays named sound effects ("hover", "click") requested by widgets.
pub trait SoundPlayer {
    fn play(&mut self, name: &str);
}

/// Sound player that ignores every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&mut self, _name: &str) {}
}

/// Host hook that swaps the OS cursor image.
pub trait CursorHost {
    fn set_cursor(&mut self, image: &str);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoCursor;

impl CursorHost for NoCursor {
    fn set_cursor(&mut self, _image: &str) {}
}

/// Capabilities injected into the UI by the host application.
pub struct Services {
    pub measure: Box<dyn TextMeasure>,
    pub clipboard: Box<dyn Clipboard>,
    pub sounds: Box<dyn SoundPlayer>,
    pub cursor: Box<dyn CursorHost>,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            measure: Box::new(MonospaceMeasure::default()),
            clipboard: Box::new(MemoryClipboard::new()),
            sounds: Box::new(Silent),
            cursor: Box::new(NoCursor),
        }
    }
}

impl Services {
    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }
    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }
    pub fn with_sounds(mut self, sounds: impl SoundPlayer + 'static) -> Self {
        self.sounds = Box::new(sounds);
        self
    }
    pub fn with_cursor(mut self, cursor: impl CursorHost + 'static) -> Self {
        self.cursor = Box::new(cursor);
        self
    }
}
