// File: crates/annotation-core/src/color.rs
// Summary: RGBA color with CSS-style parsing (hex, rgb(), rgba(), a few names).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::ColorError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::from_argb(0, 0, 0, 0);
    pub const BLACK: Color = Color::from_argb(255, 0, 0, 0);
    pub const WHITE: Color = Color::from_argb(255, 255, 255, 255);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(255, r, g, b)
    }

    /// Alpha as a 0..=1 fraction.
    pub fn alpha(&self) -> f64 {
        self.a as f64 / 255.0
    }

    fn named(name: &str) -> Option<Self> {
        let c = match name {
            "transparent" => Self::TRANSPARENT,
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::from_rgb(255, 0, 0),
            "green" => Self::from_rgb(0, 128, 0),
            "blue" => Self::from_rgb(0, 0, 255),
            "yellow" => Self::from_rgb(255, 255, 0),
            "orange" => Self::from_rgb(255, 165, 0),
            "purple" => Self::from_rgb(128, 0, 128),
            "gray" | "grey" => Self::from_rgb(128, 128, 128),
            _ => return None,
        };
        Some(c)
    }

    fn parse_hex(hex: &str) -> Result<Self, ColorError> {
        let bad = || ColorError::InvalidHex(format!("#{hex}"));
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        let parsed = match hex.len() {
            3 => (nibble(0), nibble(1), nibble(2), Ok(255)),
            4 => (nibble(0), nibble(1), nibble(2), nibble(3)),
            6 => (byte(0), byte(2), byte(4), Ok(255)),
            8 => (byte(0), byte(2), byte(4), byte(6)),
            _ => return Err(bad()),
        };
        match parsed {
            (Ok(r), Ok(g), Ok(b), Ok(a)) => Ok(Self { r, g, b, a }),
            _ => Err(bad()),
        }
    }

    fn parse_function(s: &str) -> Result<Self, ColorError> {
        let bad = || ColorError::InvalidFunction(s.to_string());
        let open = s.find('(').ok_or_else(bad)?;
        let inner = s[open + 1..].strip_suffix(')').ok_or_else(bad)?;
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let channel = |p: &str| -> Result<u8, ColorError> {
            let v = match p.strip_suffix('%') {
                Some(pct) => pct.parse::<f64>().map_err(|_| bad())? * 2.55,
                None => p.parse::<f64>().map_err(|_| bad())?,
            };
            Ok(v.round().clamp(0.0, 255.0) as u8)
        };
        let alpha = |p: &str| -> Result<u8, ColorError> {
            let v = p.parse::<f64>().map_err(|_| bad())?;
            Ok((v.clamp(0.0, 1.0) * 255.0).round() as u8)
        };
        match (&s[..open], parts.as_slice()) {
            ("rgb", [r, g, b]) => Ok(Self::from_rgb(channel(r)?, channel(g)?, channel(b)?)),
            ("rgba", [r, g, b, a]) => Ok(Self::from_argb(alpha(a)?, channel(r)?, channel(g)?, channel(b)?)),
            _ => Err(bad()),
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s.is_empty() {
            return Err(ColorError::Empty);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if s.contains('(') {
            return Self::parse_function(&s);
        }
        Self::named(&s).ok_or(ColorError::UnknownName(s))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.alpha())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
