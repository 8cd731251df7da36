//! # Themes and style resolution
//!
//! A [`Theme`] maps `(element kind, style name)` to a [`StyleBag`]: a set of
//! named colours plus nested modifier bags (`hover`, `checked`, ...).
//!
//! Every element resolves its bag once per theme change and keeps it as a
//! [`Style`]. Paint code then asks the style for colours:
//!
//! ```rust
//! use trellis_core::*;
//!
//! let theme = Theme::new().with_style(
//!     "button",
//!     "default",
//!     StyleBag::new()
//!         .colour("fill", Color::gray(75))
//!         .modifier("hover", StyleBag::new().colour("fill", Color::gray(100))),
//! );
//!
//! let style = Style::from(theme.resolve("button", "default").unwrap());
//! assert_eq!(style.colour_in("fill", "hover"), Some(Color::gray(100)));
//! assert_eq!(style.colour_in("stroke", "hover"), None);
//! assert_eq!(style.colour_only_in("fill", "pressed"), None);
//! ```
//!
//! Resolution only ever reads the theme, so re-running it after a theme
//! switch always produces the same result.

use std::collections::HashMap;
use std::rc::Rc;

use serde::Deserialize;

use crate::Color;
use crate::error::{Result, UiError};

/// Colours for one `(kind, style)` pair, with optional modifier bags.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "HashMap<String, StyleEntry>")]
pub struct StyleBag {
    colours: HashMap<String, Color>,
    modifiers: HashMap<String, StyleBag>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StyleEntry {
    Colour(Color),
    Modifier(StyleBag),
}

impl From<HashMap<String, StyleEntry>> for StyleBag {
    fn from(entries: HashMap<String, StyleEntry>) -> Self {
        let mut bag = StyleBag::default();
        for (name, entry) in entries {
            match entry {
                StyleEntry::Colour(c) => {
                    bag.colours.insert(name, c);
                }
                StyleEntry::Modifier(m) => {
                    bag.modifiers.insert(name, m);
                }
            }
        }
        bag
    }
}

impl StyleBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colour(mut self, key: impl Into<String>, colour: Color) -> Self {
        self.colours.insert(key.into(), colour);
        self
    }

    pub fn modifier(mut self, name: impl Into<String>, bag: StyleBag) -> Self {
        self.modifiers.insert(name.into(), bag);
        self
    }

    pub fn get(&self, key: &str) -> Option<Color> {
        self.colours.get(key).copied()
    }

    pub fn get_modifier(&self, name: &str) -> Option<&StyleBag> {
        self.modifiers.get(name)
    }
}

type RawTheme = HashMap<String, HashMap<String, StyleBag>>;

/// A named set of styles, keyed by element kind and then style name.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "RawTheme")]
pub struct Theme {
    kinds: HashMap<String, HashMap<String, Rc<StyleBag>>>,
}

impl From<RawTheme> for Theme {
    fn from(raw: RawTheme) -> Self {
        let kinds = raw
            .into_iter()
            .map(|(kind, styles)| {
                let styles = styles
                    .into_iter()
                    .map(|(name, bag)| (name, Rc::new(bag)))
                    .collect();
                (kind, styles)
            })
            .collect();
        Theme { kinds }
    }
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(UiError::InvalidTheme)
    }

    pub fn with_style(
        mut self,
        kind: impl Into<String>,
        name: impl Into<String>,
        bag: StyleBag,
    ) -> Self {
        self.insert_style(kind, name, bag);
        self
    }

    pub fn insert_style(&mut self, kind: impl Into<String>, name: impl Into<String>, bag: StyleBag) {
        self.kinds
            .entry(kind.into())
            .or_default()
            .insert(name.into(), Rc::new(bag));
    }

    /// Looks up the bag for `(kind, name)`.
    ///
    /// A kind the theme does not mention resolves to `Ok(None)`; a known kind
    /// without the requested style is a configuration error.
    pub fn resolve(&self, kind: &str, name: &str) -> Result<Option<Rc<StyleBag>>> {
        let Some(styles) = self.kinds.get(kind) else {
            return Ok(None);
        };
        match styles.get(name) {
            Some(bag) => Ok(Some(bag.clone())),
            None => Err(UiError::UnknownStyle {
                kind: kind.to_string(),
                style: name.to_string(),
            }),
        }
    }
}

/// The style an element resolved against the active theme.
#[derive(Clone, Debug, Default)]
pub struct Style(Option<Rc<StyleBag>>);

impl From<Rc<StyleBag>> for Style {
    fn from(bag: Rc<StyleBag>) -> Self {
        Style(Some(bag))
    }
}

impl From<Option<Rc<StyleBag>>> for Style {
    fn from(bag: Option<Rc<StyleBag>>) -> Self {
        Style(bag)
    }
}

impl Style {
    pub fn none() -> Self {
        Style(None)
    }

    pub fn is_resolved(&self) -> bool {
        self.0.is_some()
    }

    /// Base colour for `key`.
    pub fn colour(&self, key: &str) -> Option<Color> {
        self.lookup(key, None, true)
    }

    /// Modifier colour for `key`, falling back to the base colour.
    pub fn colour_in(&self, key: &str, modifier: &str) -> Option<Color> {
        self.lookup(key, Some(modifier), true)
    }

    /// Modifier colour for `key` with no fallback to the base bag.
    pub fn colour_only_in(&self, key: &str, modifier: &str) -> Option<Color> {
        self.lookup(key, Some(modifier), false)
    }

    /// `colour_in` when `active`, otherwise `colour`.
    pub fn colour_if(&self, key: &str, modifier: &str, active: bool) -> Option<Color> {
        if active {
            self.colour_in(key, modifier)
        } else {
            self.colour(key)
        }
    }

    pub fn lookup(&self, key: &str, modifier: Option<&str>, allow_default: bool) -> Option<Color> {
        let bag = self.0.as_deref()?;

        if let Some(modifier) = modifier {
            if let Some(c) = bag.get_modifier(modifier).and_then(|m| m.get(key)) {
                return Some(c);
            }
            if !allow_default {
                return None;
            }
        }

        bag.get(key)
    }
}
