//! # Trellis UI
//!
//! A retained-mode widget toolkit for canvas-rendered applications.
//!
//! Elements live in an arena ([`Tree`]) and are grouped under named roots:
//! screens, and overlays stacked on top of them. The [`Ui`] controller
//! routes host input to the active root, where every event is flooded to
//! every visible node and each widget hit-tests for itself.
//!
//! ```no_run
//! use trellis_core::{Services, UiConfig};
//! use trellis_ui::{ButtonOptions, ElementOptions, Ui};
//!
//! let mut ui = Ui::new(UiConfig::default(), Services::default())?;
//! let menu = ui.add_screen("menu", ElementOptions::default())?;
//! ui.add_button(
//!     menu,
//!     ButtonOptions {
//!         element: ElementOptions::at(450.0, 300.0),
//!         text: "Play".into(),
//!         ..Default::default()
//!     }
//!     .on_click(|cx| cx.commands().set_screen("game")),
//! )?;
//! ui.set_screen("menu");
//! # Ok::<(), trellis_core::UiError>(())
//! ```

pub mod commands;
pub mod cursor;
pub mod element;
pub mod event;
pub mod gesture;
pub mod screens;
pub mod scrollbar;
pub mod text_edit;
pub mod tree;
pub mod ui;
pub mod widgets;

pub use commands::{Command, Commands};
pub use cursor::CursorController;
pub use element::*;
pub use event::*;
pub use gesture::ClickCommit;
pub use screens::{RootKind, ScreenStack};
pub use scrollbar::{RowList, ScrollBinding, Scrollbar};
pub use text_edit::TextEdit;
pub use tree::Tree;
pub use ui::Ui;
pub use widgets::*;
