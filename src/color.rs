//! Color helpers shared by every paint pass.

use ratatui::style::Color;
use serde::{
    de::{self, Deserializer},
    Deserialize, Serialize, Serializer,
};

use crate::error::{Error, Result};

/// A 24-bit terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// Interpolates between two channel values.
///
/// `t` is clamped to `[0, 1]`. The fractional part of the offset is dropped, so the
/// result always leans toward `a`; `t == 0` yields `a` and `t == 1` yields `b`.
pub fn lerp(a: u8, b: u8, t: f64) -> u8 {
    let t = t.clamp(0.0, 1.0);
    let delta = (f64::from(b) - f64::from(a)) * t;
    (f64::from(a) + delta.trunc()) as u8
}

pub fn lerp_color(a: Rgb, b: Rgb, t: f64) -> Rgb {
    Rgb { r: lerp(a.r, b.r, t), g: lerp(a.g, b.g, t), b: lerp(a.b, b.b, t) }
}

/// Pulls `color` toward white by `amount`.
pub fn lighten(color: Rgb, amount: f64) -> Rgb {
    lerp_color(color, Rgb::WHITE, amount)
}

/// Parses `#rrggbb`. The `#` is optional; anything else, whitespace included, is rejected.
pub fn hex_to_rgb(raw: &str) -> Result<Rgb> {
    let digits = raw.strip_prefix('#').unwrap_or(raw);
    if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::Format(raw.to_string()));
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| Error::Format(raw.to_string()));
    Ok(Rgb { r: channel(0)?, g: channel(2)?, b: channel(4)? })
}

pub fn rgb_to_hex(c: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        hex_to_rgb(&raw).map_err(de::Error::custom)
    }
}

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&rgb_to_hex(*self))
    }
}
