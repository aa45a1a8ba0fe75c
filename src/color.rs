use std::fmt;
use std::str::FromStr;

use palette::{Hsl, IntoColor, Lighten, Srgb};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Color – one plot color, stored as 8-bit sRGB
// ---------------------------------------------------------------------------

/// A plot color.
///
/// Parsed from a single-letter code (`b r g c m y k w`), one of the full
/// names of those codes, a CSS color name, or a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(Srgb<u8>);

impl Color {
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Color(Srgb::new(red, green, blue))
    }

    pub fn red(&self) -> u8 {
        self.0.red
    }

    pub fn green(&self) -> u8 {
        self.0.green
    }

    pub fn blue(&self) -> u8 {
        self.0.blue
    }

    /// A lighter shade of this color, used for the inside of filled bands.
    pub fn fill_shade(&self) -> Color {
        let hsl: Hsl = self.0.into_format::<f32>().into_color();
        let light: Srgb = hsl.lighten(0.35).into_color();
        Color(light.into_format())
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let color = match name.as_str() {
            "b" | "blue" => Color::BLUE,
            "r" | "red" => Color::RED,
            "g" | "green" => Color::GREEN,
            "c" | "cyan" => Color::CYAN,
            "m" | "magenta" => Color::MAGENTA,
            "y" | "yellow" => Color::YELLOW,
            "k" | "black" => Color::BLACK,
            "w" | "white" => Color::WHITE,
            hex if hex.starts_with('#') => {
                parse_hex(hex).ok_or_else(|| ConfigError::UnknownColor(s.to_string()))?
            }
            other => palette::named::from_str(other)
                .map(Color)
                .ok_or_else(|| ConfigError::UnknownColor(s.to_string()))?,
        };
        Ok(color)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red(), self.green(), self.blue())
    }
}

// ---------------------------------------------------------------------------
// Palette – cyclic color assignment by position in a figure group
// ---------------------------------------------------------------------------

/// The default seven-color cycle.
pub fn default_palette() -> Vec<Color> {
    vec![
        Color::BLUE,
        Color::RED,
        Color::GREEN,
        Color::CYAN,
        Color::MAGENTA,
        Color::YELLOW,
        Color::BLACK,
    ]
}

/// An ordered, non-empty list of colors assigned by position, wrapping
/// around when a figure holds more outputs than colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Palette { colors })
    }

    /// Color for the `position`-th output of a figure group.
    pub fn color_for(&self, position: usize) -> Color {
        self.colors[position % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            colors: default_palette(),
        }
    }
}
