pub use crate::clipboard::{Clipboard, ClipboardRead, MemoryClipboard};
pub use crate::color::Color;
pub use crate::config::UiConfig;
pub use crate::error::{Result, UiError};
pub use crate::geometry::{Rect, Size, Vec2, ViewTransform};
pub use crate::host::{CursorHost, NoCursor, Services, Silent, SoundPlayer};
pub use crate::input::{InputEvent, Key, KeyEvent, Modifiers, PointerButton};
pub use crate::render_api::{MonospaceMeasure, Renderer, TextAlign, TextMeasure};
pub use crate::style::{Style, StyleBag, Theme};
