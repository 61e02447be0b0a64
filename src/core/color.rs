//! Hex color parsing and brightness adjustment.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors produced while parsing color notation
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ColorError {
    #[error("Invalid hex color '{0}', expected #RGB, #RGBA, #RRGGBB or #RRGGBBAA")]
    InvalidHex(String),
}

/// An sRGB color with an optional alpha channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: Option<u8>,
}

impl Color {
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: None,
        }
    }

    pub fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: Some(alpha),
        }
    }

    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`.
    ///
    /// Short forms repeat each digit, so `#f80` equals `#ff8800`.
    ///
    /// ```rust
    /// use segue::core::Color;
    ///
    /// assert_eq!(Color::from_hex("#f80").unwrap(), Color::rgb(255, 136, 0));
    /// assert_eq!(Color::from_hex("#00000080").unwrap().alpha, Some(128));
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channels: Vec<u8> = match digits.len() {
            3 | 4 => digits
                .chars()
                .map(|c| c.to_digit(16).map(|d| (d * 17) as u8))
                .collect::<Option<_>>()
                .ok_or_else(invalid)?,
            6 | 8 => (0..digits.len())
                .step_by(2)
                .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).ok())
                .collect::<Option<_>>()
                .ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };

        Ok(Self {
            red: channels[0],
            green: channels[1],
            blue: channels[2],
            alpha: channels.get(3).copied(),
        })
    }

    /// Shift brightness by `delta` on the RGB channels.
    ///
    /// Without `hold_ratio` every channel moves by `delta` and saturates at
    /// the 0..=255 bounds independently. With `hold_ratio` all three channels
    /// move by the same amount, reduced so that none of them saturates, which
    /// keeps the differences between channels intact. Alpha is untouched.
    pub fn lighten(self, delta: i16, hold_ratio: bool) -> Self {
        let channels = [self.red, self.green, self.blue];
        let shift = if hold_ratio {
            let headroom = if delta >= 0 {
                channels.iter().map(|c| 255 - i16::from(*c)).min().unwrap_or(0)
            } else {
                channels.iter().map(|c| i16::from(*c)).min().unwrap_or(0)
            };
            delta.signum() * delta.abs().min(headroom)
        } else {
            delta
        };

        let apply = |c: u8| (i16::from(c) + shift).clamp(0, 255) as u8;
        Self {
            red: apply(self.red),
            green: apply(self.green),
            blue: apply(self.blue),
            alpha: self.alpha,
        }
    }

    /// Lowercase `#rrggbb`, or `#rrggbbaa` when alpha is present.
    pub fn to_hex(&self) -> String {
        match self.alpha {
            Some(a) => format!("#{:02x}{:02x}{:02x}{:02x}", self.red, self.green, self.blue, a),
            None => format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Parse `hex`, lighten it and format it back.
///
/// Convenience for building color targets in style change sets.
pub fn lighten_hex(hex: &str, delta: i16, hold_ratio: bool) -> Result<String, ColorError> {
    Ok(Color::from_hex(hex)?.lighten(delta, hold_ratio).to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_supported_lengths() {
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::rgb(255, 255, 255));
        assert_eq!(Color::from_hex("#0f08").unwrap(), Color::rgba(0, 255, 0, 136));
        assert_eq!(Color::from_hex("#1a2B3c").unwrap(), Color::rgb(26, 43, 60));
        assert_eq!(
            Color::from_hex("#1a2b3c4d").unwrap(),
            Color::rgba(26, 43, 60, 77)
        );
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["fff", "#ff", "#fffff", "#ggg", "#12345678a", "", "#"] {
            assert_eq!(
                Color::from_hex(bad),
                Err(ColorError::InvalidHex(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn lighten_saturates_each_channel() {
        let color = Color::rgb(250, 100, 5).lighten(20, false);
        assert_eq!(color, Color::rgb(255, 120, 25));

        let darker = Color::rgb(250, 100, 5).lighten(-20, false);
        assert_eq!(darker, Color::rgb(230, 80, 0));
    }

    #[test]
    fn lighten_with_held_ratio_stops_at_headroom() {
        let color = Color::rgb(250, 100, 5).lighten(20, true);
        assert_eq!(color, Color::rgb(255, 105, 10));

        let darker = Color::rgb(250, 100, 5).lighten(-20, true);
        assert_eq!(darker, Color::rgb(245, 95, 0));
    }

    #[test]
    fn lighten_keeps_alpha() {
        let color = Color::rgba(0, 0, 0, 64).lighten(16, false);
        assert_eq!(color.alpha, Some(64));
        assert_eq!(color.to_hex(), "#10101040");
    }

    #[test]
    fn to_hex_zero_pads() {
        assert_eq!(Color::rgb(0, 8, 255).to_hex(), "#0008ff");
        assert_eq!(lighten_hex("#000", 1, false).unwrap(), "#010101");
    }
}
