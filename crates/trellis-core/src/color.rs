use serde::Deserialize;

/// RGBA colour, 8 bits per channel.
///
/// Style lookups return `Option<Color>`: `None` is the "no colour" marker
/// that tells paint code to skip the operation, which is distinct from any
/// real colour including fully transparent black.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color(r, g, b, a)
    }
    pub fn gray(v: u8) -> Self {
        Color(v, v, v, 255)
    }
    pub fn gray_alpha(v: u8, a: u8) -> Self {
        Color(v, v, v, a)
    }

    /// Lenient hex parser: malformed input becomes opaque black.
    pub fn from_hex(hex: &str) -> Self {
        Self::parse_hex(hex).unwrap_or(Color::BLACK)
    }

    /// Strict hex parser for `#RRGGBB` / `#RRGGBBAA`.
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let s = hex.trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        match s.len() {
            6 => Some(Color(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Color(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }
}

/// Accepted spellings of a colour in theme files.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Gray(u8),
    Channels(Vec<u8>),
}

impl TryFrom<ColorRepr> for Color {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(s) => {
                Color::parse_hex(&s).ok_or_else(|| format!("invalid hex colour '{s}'"))
            }
            ColorRepr::Gray(v) => Ok(Color::gray(v)),
            ColorRepr::Channels(c) => match c.as_slice() {
                [v] => Ok(Color::gray(*v)),
                [v, a] => Ok(Color::gray_alpha(*v, *a)),
                [r, g, b] => Ok(Color::from_rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Color::from_rgba(*r, *g, *b, *a)),
                _ => Err(format!("colour needs 1 to 4 channels, got {}", c.len())),
            },
        }
    }
}
