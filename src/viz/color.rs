//! Colors: hex parsing and the default series palette.

use crate::config::ChartConfig;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let s = hex.trim().trim_start_matches('#');
        if s.len() != 6 || !s.is_ascii() {
            return Err(Error::InvalidColor(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| Error::InvalidColor(hex.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Microsoft Office (2013+) chart colors used as defaults.
pub const OFFICE_BLUE: Rgb8 = Rgb8::new(68, 114, 196); // #4472C4
pub const OFFICE_ORANGE: Rgb8 = Rgb8::new(237, 125, 49); // #ED7D31
pub const OFFICE_GREEN: Rgb8 = Rgb8::new(112, 173, 71); // #70AD47

/// Resolved colors for one render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartColors {
    pub bar: Rgb8,
    pub highlight: Rgb8,
    pub area: Rgb8,
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            bar: OFFICE_GREEN,
            highlight: OFFICE_BLUE,
            area: OFFICE_ORANGE,
        }
    }
}

impl ChartColors {
    pub fn from_config(config: &ChartConfig) -> Result<Self> {
        Ok(Self {
            bar: Rgb8::from_hex(&config.bar_color)?,
            highlight: Rgb8::from_hex(&config.highlight_color)?,
            area: Rgb8::from_hex(&config.area_color)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_and_defaults() {
        assert_eq!(Rgb8::from_hex("#70ad47").unwrap(), OFFICE_GREEN);
        assert_eq!(OFFICE_BLUE.to_hex(), "#4472C4");
        assert!(Rgb8::from_hex("#12345").is_err());
        assert!(Rgb8::from_hex("#GG0000").is_err());
        assert_eq!(
            ChartColors::from_config(&ChartConfig::default()).unwrap(),
            ChartColors::default()
        );
    }
}
