//! Layer color handling
//!
//! Colors are plain sRGB triples rendered as `#RRGGBB` hex strings, the
//! form the rendering surface's paint properties expect. Uploaded layers
//! draw their color from a fixed palette cycle; derived layers use the
//! per-operation defaults defined in [`crate::ops`].

use std::fmt;
use std::str::FromStr;

/// An sRGB color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Creates a color from its red, green, and blue channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Renders the color as an uppercase `#RRGGBB` hex string.
    pub fn to_hex(self) -> String {
        format!("{}", self)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Errors that can occur when parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Input was not of the form `#RRGGBB`.
    InvalidFormat(String),
    /// A channel contained non-hexadecimal characters.
    InvalidDigit(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::InvalidFormat(input) => {
                write!(f, "Invalid color format: '{}' (expected #RRGGBB)", input)
            }
            ColorParseError::InvalidDigit(input) => {
                write!(f, "Invalid hex digit in color: '{}'", input)
            }
        }
    }
}

impl std::error::Error for ColorParseError {}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parses a `#RRGGBB` hex string, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::InvalidFormat(s.to_string()))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ColorParseError::InvalidFormat(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))
        };

        Ok(Color {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl serde::Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: String = serde::Deserialize::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Palette assigned to uploaded layers, in cycle order.
pub const UPLOAD_PALETTE: [Color; 10] = [
    Color::rgb(0xFF, 0x63, 0x47), // tomato
    Color::rgb(0x46, 0x82, 0xB4), // steel blue
    Color::rgb(0x32, 0xCD, 0x32), // lime green
    Color::rgb(0xFF, 0xD7, 0x00), // gold
    Color::rgb(0x6A, 0x5A, 0xCD), // slate blue
    Color::rgb(0xFF, 0xA0, 0x7A), // light salmon
    Color::rgb(0x40, 0xE0, 0xD0), // turquoise
    Color::rgb(0xDA, 0x70, 0xD6), // orchid
    Color::rgb(0xF0, 0x80, 0x80), // light coral
    Color::rgb(0x20, 0xB2, 0xAA), // light sea green
];

/// Hands out upload colors by cycling [`UPLOAD_PALETTE`].
///
/// Each uploaded layer takes the next palette entry; after the tenth the
/// cycle wraps around. The position advances only when a color is taken
/// with [`next_color`](Self::next_color), so a document that fails to
/// parse does not burn a palette slot.
#[derive(Debug, Clone, Default)]
pub struct ColorWheel {
    position: usize,
}

impl ColorWheel {
    /// Creates a wheel positioned at the start of the palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// The color the next call to [`next_color`](Self::next_color) will
    /// hand out, without advancing the wheel.
    pub fn peek(&self) -> Color {
        UPLOAD_PALETTE[self.position % UPLOAD_PALETTE.len()]
    }

    /// Returns the next palette color and advances the wheel.
    pub fn next_color(&mut self) -> Color {
        let color = self.peek();
        self.position += 1;
        color
    }
}
