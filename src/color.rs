//! Line color parsing and normalization.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque RGB color.
///
/// Serialized as canonical lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB`, `#RRGGBB`, or `rgb(r, g, b)` / `rgba(r, g, b, a)`.
    ///
    /// The functional form is what browsers hand back from a node's computed
    /// background color, so persisted lists may carry either form.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex);
        }
        parse_functional(trimmed)
    }

    /// Parse `raw`, falling back to `fallback` when it is not a color.
    #[must_use]
    pub fn parse_or(raw: &str, fallback: Self) -> Self {
        Self::parse(raw).unwrap_or(fallback)
    }

    /// Canonical lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Text color readable on top of this color, by YIQ luma.
    #[must_use]
    pub fn contrast_text(self) -> &'static str {
        let yiq = (u32::from(self.r) * 299 + u32::from(self.g) * 587 + u32::from(self.b) * 114) / 1000;
        if yiq >= 128 { "black" } else { "white" }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("not a color: {value}"))
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => Some(Rgb {
            r: hex_channel(&hex[0..1].repeat(2))?,
            g: hex_channel(&hex[1..2].repeat(2))?,
            b: hex_channel(&hex[2..3].repeat(2))?,
        }),
        6 => Some(Rgb { r: hex_channel(&hex[0..2])?, g: hex_channel(&hex[2..4])?, b: hex_channel(&hex[4..6])? }),
        _ => None,
    }
}

fn parse_functional(raw: &str) -> Option<Rgb> {
    let lower = raw.to_ascii_lowercase();
    let inner = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let r = decimal_channel(parts.next()?)?;
    let g = decimal_channel(parts.next()?)?;
    let b = decimal_channel(parts.next()?)?;
    Some(Rgb { r, g, b })
}

// `from_str_radix` tolerates a leading sign; channels are bare digits only.
fn hex_channel(digits: &str) -> Option<u8> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match u8::from_str_radix(digits, 16) {
        Ok(v) => Some(v),
        Err(_) => None,
    }
}

fn decimal_channel(digits: &str) -> Option<u8> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match digits.parse::<u8>() {
        Ok(v) => Some(v),
        Err(_) => None,
    }
}
