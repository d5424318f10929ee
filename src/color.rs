//! RGB color type, hex conversion and color naming.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ExtractError, Result};

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from normalized float channels, rounding each to 0-255.
    pub fn from_unit_floats(r: f32, g: f32, b: f32) -> Self {
        Self::new(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b))
    }

    /// Squared Euclidean distance in RGB space.
    pub fn distance_squared(&self, other: &Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Euclidean distance in RGB space.
    pub fn distance(&self, other: &Rgb) -> f32 {
        (self.distance_squared(other) as f32).sqrt()
    }

    /// Convert to a `palette` sRGB color.
    pub fn to_srgb(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Format as `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        rgb_to_hex(*self)
    }
}

fn unit_to_u8(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        hex_to_rgb(s)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Srgb<u8>> for Rgb {
    fn from(c: Srgb<u8>) -> Self {
        Self::new(c.red, c.green, c.blue)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex_to_rgb(&s).map_err(serde::de::Error::custom)
    }
}

/// Convert a color to an upper-case `#RRGGBB` string.
pub fn rgb_to_hex(color: Rgb) -> String {
    color.to_string()
}

/// Parse `#RRGGBB` or `RRGGBB` (either case).
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    let invalid = || ExtractError::InvalidHexColor {
        value: hex.to_string(),
    };

    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
    };
    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Fixed table used for naming colors. Order breaks distance ties.
pub const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("Red", Rgb::new(0xDC, 0x14, 0x3C)),
    ("Brown", Rgb::new(0x8B, 0x45, 0x13)),
    ("Green", Rgb::new(0x22, 0x8B, 0x22)),
    ("Blue", Rgb::new(0x00, 0x66, 0xCC)),
    ("Yellow", Rgb::new(0xFF, 0xD7, 0x00)),
    ("Orange", Rgb::new(0xFF, 0x8C, 0x00)),
    ("Purple", Rgb::new(0x80, 0x00, 0x80)),
    ("Pink", Rgb::new(0xFF, 0xC0, 0xCB)),
    ("White", Rgb::new(0xFF, 0xFF, 0xFF)),
    ("Black", Rgb::new(0x00, 0x00, 0x00)),
    ("Gray", Rgb::new(0x80, 0x80, 0x80)),
    ("Beige", Rgb::new(0xF5, 0xF5, 0xDC)),
    ("Cream", Rgb::new(0xFF, 0xFD, 0xD0)),
    ("Navy", Rgb::new(0x00, 0x00, 0x80)),
    ("Teal", Rgb::new(0x00, 0x80, 0x80)),
];

/// Name of the table entry closest to `color`.
pub fn nearest_color_name_rgb(color: Rgb) -> &'static str {
    let mut best = NAMED_COLORS[0];
    let mut best_dist = u32::MAX;
    for &(name, rgb) in NAMED_COLORS {
        let dist = color.distance_squared(&rgb);
        // Strict comparison keeps the first entry on ties.
        if dist < best_dist {
            best_dist = dist;
            best = (name, rgb);
        }
    }
    best.0
}

/// Name of the table entry closest to a hex color.
pub fn nearest_color_name(hex: &str) -> Result<&'static str> {
    Ok(nearest_color_name_rgb(hex_to_rgb(hex)?))
}

/// White, beige and cream. A palette made only of these triggers fallback.
pub const NEUTRAL_COLORS: [Rgb; 3] = [
    Rgb::new(0xFF, 0xFF, 0xFF),
    Rgb::new(0xF5, 0xF5, 0xDC),
    Rgb::new(0xFF, 0xFD, 0xD0),
];

/// Check whether a color lies within `tolerance` of the neutral set.
pub fn is_neutral(color: Rgb, tolerance: f32) -> bool {
    NEUTRAL_COLORS.iter().any(|n| {
        if tolerance <= 0.0 {
            *n == color
        } else {
            color.distance(n) <= tolerance
        }
    })
}
