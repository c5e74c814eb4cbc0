//! Colors for text overlay and solid fills.
//!
//! Accepts a small set of named colors and CSS-style hex strings:
//! `#rgb`, `#rgba`, `#rrggbb` and `#rrggbbaa`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a color string cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Unknown color name: {0}")]
    UnknownName(String),

    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
}

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("lime", Color::rgb(0, 255, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("orange", Color::rgb(255, 165, 0)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
];

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Resolve a named color or hex string.
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let value = value.trim();
        match value.strip_prefix('#') {
            Some(hex) => parse_hex(hex).ok_or_else(|| ColorError::InvalidHex(value.to_string())),
            None => {
                let lower = value.to_ascii_lowercase();
                NAMED_COLORS
                    .iter()
                    .find(|(name, _)| *name == lower)
                    .map(|(_, color)| *color)
                    .ok_or_else(|| ColorError::UnknownName(value.to_string()))
            }
        }
    }

    pub fn rgb8(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Components widened to 16 bits (0xff maps to 0xffff).
    pub fn rgb16(self) -> [u16; 3] {
        [widen(self.r), widen(self.g), widen(self.b)]
    }

    pub fn rgba16(self) -> [u16; 4] {
        [widen(self.r), widen(self.g), widen(self.b), widen(self.a)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

#[inline]
fn widen(value: u8) -> u16 {
    value as u16 * 257
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    // Short forms repeat each digit: "f80" == "ff8800".
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Color::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}
