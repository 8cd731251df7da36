//! # Trellis core
//!
//! Plain data and host contracts shared by every Trellis crate:
//!
//! - geometry (`Vec2`, `Rect`, `ViewTransform`) and `Color`;
//! - themes and style resolution (`Theme`, `StyleBag`, `Style`);
//! - host input events (`InputEvent`);
//! - the capabilities the UI calls out to: `Renderer`/`TextMeasure`,
//!   `Clipboard`, `SoundPlayer`, `CursorHost`;
//! - `UiConfig` and `UiError`.
//!
//! Nothing here owns widgets; see `trellis-ui` for the element tree.

pub mod clipboard;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod input;
pub mod prelude;
pub mod render_api;
pub mod style;
pub mod tests;

pub use clipboard::*;
pub use color::*;
pub use config::*;
pub use error::*;
pub use geometry::*;
pub use host::*;
pub use input::*;
pub use render_api::*;
pub use style::*;
