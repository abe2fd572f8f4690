//! RGB colors and the named plotting palette.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),
    #[error("Invalid rgb() color: {0:?}")]
    InvalidRgb(String),
}

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A named entry of the plotting palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Single-letter color code understood by the plotting language.
    pub code: &'static str,
    pub color: Rgb,
}

/// Named plotting colors, in lookup order. Ties resolve to the earlier entry.
pub const PALETTE: [PaletteEntry; 8] = [
    PaletteEntry { code: "w", color: Rgb::new(255, 255, 255) },
    PaletteEntry { code: "k", color: Rgb::new(0, 0, 0) },
    PaletteEntry { code: "r", color: Rgb::new(212, 0, 0) },
    PaletteEntry { code: "g", color: Rgb::new(0, 212, 0) },
    PaletteEntry { code: "b", color: Rgb::new(0, 0, 212) },
    PaletteEntry { code: "y", color: Rgb::new(212, 212, 0) },
    PaletteEntry { code: "m", color: Rgb::new(212, 0, 212) },
    PaletteEntry { code: "c", color: Rgb::new(0, 212, 212) },
];

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Encode as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Decode `#rrggbb` or `rrggbb` (case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidHex(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Decode a CSS computed color of the form `rgb(r, g, b)`.
    ///
    /// Channels above 255 are clamped.
    pub fn from_css_rgb(s: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidRgb(s.to_string());
        let inner = s
            .trim()
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let mut channels = [0u8; 3];
        let mut parts = inner.split(',');
        for channel in &mut channels {
            let part = parts.next().ok_or_else(invalid)?.trim();
            let value: u32 = part.parse().map_err(|_| invalid())?;
            *channel = value.min(255) as u8;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self::new(channels[0], channels[1], channels[2]))
    }

    /// Squared Euclidean distance between two colors.
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let d = |a: u8, b: u8| {
            let diff = a as i32 - b as i32;
            (diff * diff) as u32
        };
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }

    /// Nearest palette entry by squared distance.
    pub fn nearest_palette_entry(self) -> &'static PaletteEntry {
        let mut best = &PALETTE[0];
        let mut best_distance = u32::MAX;
        for entry in &PALETTE {
            let distance = self.distance_squared(entry.color);
            if distance < best_distance {
                best = entry;
                best_distance = distance;
            }
        }
        best
    }

    /// Single-letter plotting code of the nearest palette color.
    pub fn palette_code(self) -> &'static str {
        self.nearest_palette_entry().code
    }

    /// Highlight variant used while a history row is hovered.
    pub fn darkened(self) -> Rgb {
        let f = |c: u8| 127 - c / 2;
        Rgb::new(f(self.r), f(self.g), f(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim_start().starts_with("rgb(") {
            Self::from_css_rgb(s)
        } else {
            Self::from_hex(s)
        }
    }
}

impl From<Rgb> for Color {
    fn from(color: Rgb) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, 255)
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_encoding_pads_channels() {
        assert_eq!(Rgb::new(0, 10, 255).to_hex(), "#000aff");
        assert_eq!(Rgb::BLACK.to_hex(), "#000000");
    }

    #[test]
    fn test_hex_decoding() {
        assert_eq!(Rgb::from_hex("#d40000").unwrap(), Rgb::new(212, 0, 0));
        assert_eq!(Rgb::from_hex("00D4d4").unwrap(), Rgb::new(0, 212, 212));
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#12345g").is_err());
        assert!(Rgb::from_hex("").is_err());
    }

    #[test]
    fn test_css_rgb_decoding() {
        assert_eq!(Rgb::from_css_rgb("rgb(1, 2, 3)").unwrap(), Rgb::new(1, 2, 3));
        assert_eq!(Rgb::from_css_rgb("rgb(999, 0, 0)").unwrap(), Rgb::new(255, 0, 0));
        assert!(Rgb::from_css_rgb("rgb(1, 2)").is_err());
        assert!(Rgb::from_css_rgb("rgba(1, 2, 3, 4)").is_err());
        assert_eq!("rgb(4, 5, 6)".parse::<Rgb>().unwrap(), Rgb::new(4, 5, 6));
        assert_eq!("#040506".parse::<Rgb>().unwrap(), Rgb::new(4, 5, 6));
    }

    #[test]
    fn test_nearest_palette_red() {
        assert_eq!(Rgb::new(200, 10, 10).palette_code(), "r");
    }

    #[test]
    fn test_nearest_palette_exact_entries() {
        for entry in &PALETTE {
            assert_eq!(entry.color.palette_code(), entry.code);
        }
    }

    #[test]
    fn test_nearest_palette_tie_prefers_first() {
        // Equidistant from "r" and "m".
        assert_eq!(Rgb::new(212, 0, 106).palette_code(), "r");
        assert_eq!(Rgb::new(60, 60, 60).palette_code(), "k");
        assert_eq!(Rgb::new(240, 240, 240).palette_code(), "w");
    }

    #[test]
    fn test_darkened() {
        assert_eq!(Rgb::BLACK.darkened(), Rgb::new(127, 127, 127));
        assert_eq!(Rgb::WHITE.darkened(), Rgb::new(0, 0, 0));
        assert_eq!(Rgb::new(212, 1, 100).darkened(), Rgb::new(21, 127, 77));
    }

    #[test]
    fn test_display() {
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "(1,2,3)");
    }

    #[test]
    fn test_peniko_conversion() {
        let color: Color = Rgb::new(10, 20, 30).into();
        assert_eq!(Rgb::from(color), Rgb::new(10, 20, 30));
    }
}
