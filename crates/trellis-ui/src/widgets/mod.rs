//! Built-in widgets.

mod button;
mod chatbox;
mod checkbox;
mod container;
mod screen;
mod slider;
mod table;
mod textbox;

pub use button::*;
pub use chatbox::*;
pub use checkbox::*;
pub use container::*;
pub use screen::*;
pub use slider::*;
pub use table::*;
pub use textbox::*;

use std::borrow::Cow;

use trellis_core::TextMeasure;
use unicode_segmentation::UnicodeSegmentation;

/// Shortens `text` with a trailing "..." until it fits `max_width`.
pub(crate) fn fit_text<'a>(
    text: &'a str,
    max_width: f32,
    size: f32,
    m: &dyn TextMeasure,
) -> Cow<'a, str> {
    if m.text_width(text, size) <= max_width {
        return Cow::Borrowed(text);
    }
    let mut graphemes: Vec<&str> = text.graphemes(true).collect();
    while graphemes.pop().is_some() {
        let candidate = format!("{}...", graphemes.concat());
        if m.text_width(&candidate, size) <= max_width {
            return Cow::Owned(candidate);
        }
    }
    Cow::Borrowed("...")
}
