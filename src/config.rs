//! Chart configuration: canvas geometry, colors, tooltip offset and labels.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```json
//! { "width": 1800, "locale": "de", "highlight_color": "#264478" }
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Wide canvas variant (`--wide`).
pub const WIDE_WIDTH: u32 = 1800;

/// Space around the plotting area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 70,
            right: 70,
            bottom: 70,
            left: 70,
        }
    }
}

/// Where the tooltip panel sits relative to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipOffset {
    /// Pixels to the left of the pointer.
    pub left: f64,
    /// Pixels above the pointer; keeps the panel clear of the hovered bar.
    pub up: f64,
}

impl Default for TooltipOffset {
    fn default() -> Self {
        Self {
            left: 20.0,
            up: 110.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    /// Band padding fraction, applied both between and around bars.
    pub bar_padding: f64,
    /// Multiplier on `max(value_area)` for the area axis, so the area sits above the bars.
    pub area_headroom: f64,
    /// Show every n-th x label (the first label is never shown).
    pub x_tick_every: usize,
    /// Approximate tick count for both y axes.
    pub y_ticks: usize,
    pub bar_color: String,
    pub highlight_color: String,
    pub area_color: String,
    pub area_opacity: f64,
    pub tooltip_offset: TooltipOffset,
    /// Number formatting locale tag (`en`, `de`, `fr`, ...).
    pub locale: String,
    pub reset_label: String,
    pub tick_font_px: u32,
    pub axis_title_font_px: u32,
    /// TTF used for text in bitmap exports.
    pub font_path: Option<PathBuf>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1440,
            height: 760,
            margin: Margin::default(),
            bar_padding: 0.2,
            area_headroom: 2.0,
            x_tick_every: 10,
            y_ticks: 10,
            bar_color: "#70AD47".into(),
            highlight_color: "#4472C4".into(),
            area_color: "#ED7D31".into(),
            area_opacity: 0.8,
            tooltip_offset: TooltipOffset::default(),
            locale: "en".into(),
            reset_label: "Reset".into(),
            tick_font_px: 12,
            axis_title_font_px: 30,
            font_path: None,
        }
    }
}

impl ChartConfig {
    /// The 1800px-wide layout.
    pub fn wide() -> Self {
        Self {
            width: WIDE_WIDTH,
            ..Self::default()
        }
    }

    /// Load from a JSON file; missing keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Width of the plotting area (canvas minus left/right margins).
    pub fn chart_width(&self) -> f64 {
        self.width
            .saturating_sub(self.margin.left + self.margin.right) as f64
    }

    /// Height of the plotting area (canvas minus top/bottom margins).
    pub fn chart_height(&self) -> f64 {
        self.height
            .saturating_sub(self.margin.top + self.margin.bottom) as f64
    }
}
