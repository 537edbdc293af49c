//! Declarative chart scene: every mark with its computed geometry.
//!
//! A [`Scene`] is pure data. Backends (annotated SVG, plotters, egui) only read
//! it, and pointer hit-testing runs against it, so layout is testable without
//! any drawing surface.

use crate::config::ChartConfig;
use crate::error::Result;
use crate::format::format_thousands;
use crate::models::ChartPoint;

use super::color::{ChartColors, Rgb8};
use super::scale::{BandScale, LinearScale};

/// Accessibility role of a drawn element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Bar,
    Area,
    XAxis,
    YAxisBar,
    YAxisArea,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Bar => "bar",
            Role::Area => "area",
            Role::XAxis => "x-axis",
            Role::YAxisBar => "y-axis-bar",
            Role::YAxisArea => "y-axis-area",
        }
    }
}

/// Axis-aligned rectangle in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarMark {
    pub index: usize,
    pub label: String,
    pub point: ChartPoint,
    pub rect: Rect,
    pub fill: Rgb8,
    pub highlighted: bool,
}

/// Filled region between `baseline` and the upper edge `top`.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaMark {
    pub top: Vec<(f64, f64)>,
    pub baseline: f64,
    pub fill: Rgb8,
    pub opacity: f64,
}

impl AreaMark {
    /// SVG path data: along the top edge, back along the baseline, closed.
    /// Empty when there are no points.
    pub fn path_data(&self) -> String {
        if self.top.is_empty() {
            return String::new();
        }
        let mut d = String::new();
        for (i, (x, y)) in self.top.iter().enumerate() {
            d.push(if i == 0 { 'M' } else { 'L' });
            d.push_str(&format!("{},{}", fmt_px(*x), fmt_px(*y)));
        }
        for (x, _) in self.top.iter().rev() {
            d.push_str(&format!("L{},{}", fmt_px(*x), fmt_px(self.baseline)));
        }
        d.push('Z');
        d
    }

    /// Closed outline (top edge then baseline reversed).
    pub fn polygon(&self) -> Vec<(f64, f64)> {
        let mut poly = self.top.clone();
        poly.extend(self.top.iter().rev().map(|(x, _)| (*x, self.baseline)));
        poly
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub text: String,
    /// Position along the axis, in plot coordinates.
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTitle {
    pub text: String,
    pub color: Rgb8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisMark {
    pub role: Role,
    pub orient: AxisOrient,
    /// Translation of the axis origin inside the plot.
    pub translate: (f64, f64),
    pub length: f64,
    pub ticks: Vec<Tick>,
    pub title: Option<AxisTitle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    /// Top-left corner of the plot inside the canvas (left and top margins).
    pub origin: (f64, f64),
    pub chart_width: f64,
    pub chart_height: f64,
    pub bars: Vec<BarMark>,
    pub area: AreaMark,
    pub axes: Vec<AxisMark>,
    pub tick_font_px: u32,
    pub axis_title_font_px: u32,
}

impl Scene {
    /// Lay out the chart for `labels`/`points` (paired by index) with the bars of
    /// region `highlighted` emphasized. An empty `highlighted` emphasizes nothing.
    pub fn compose(
        labels: &[String],
        points: &[ChartPoint],
        highlighted: &str,
        config: &ChartConfig,
    ) -> Result<Self> {
        let colors = ChartColors::from_config(config)?;
        let chart_width = config.chart_width();
        let chart_height = config.chart_height();
        let n = labels.len().min(points.len());
        let labels = &labels[..n];
        let points = &points[..n];

        let x = BandScale::new(labels.iter().cloned(), (0.0, chart_width), config.bar_padding);
        let y_bar = LinearScale::from_max(
            points.iter().map(|p| p.value_bar),
            1.0,
            (chart_height, 0.0),
        );
        let y_area = LinearScale::from_max(
            points.iter().map(|p| p.value_area),
            config.area_headroom,
            (chart_height, 0.0),
        );

        // Negative values hang below the zero line.
        let bar_baseline = y_bar.scale(0.0);
        let bars = labels
            .iter()
            .zip(points)
            .enumerate()
            .map(|(index, (label, point))| {
                let value_y = y_bar.scale(point.value_bar);
                let highlighted = !highlighted.is_empty() && point.id == highlighted;
                BarMark {
                    index,
                    label: label.clone(),
                    point: point.clone(),
                    rect: Rect {
                        x: x.position(label).unwrap_or(0.0),
                        y: value_y.min(bar_baseline),
                        width: x.bandwidth(),
                        height: (bar_baseline - value_y).abs(),
                    },
                    fill: if highlighted {
                        colors.highlight
                    } else {
                        colors.bar
                    },
                    highlighted,
                }
            })
            .collect();

        let area = AreaMark {
            top: labels
                .iter()
                .zip(points)
                .map(|(label, point)| {
                    (
                        x.center(label).unwrap_or(0.0),
                        y_area.scale(point.value_area),
                    )
                })
                .collect(),
            baseline: y_area.scale(0.0),
            fill: colors.area,
            opacity: config.area_opacity,
        };

        let every = config.x_tick_every.max(1);
        let x_ticks = labels
            .iter()
            .enumerate()
            .filter(|(i, _)| *i > 0 && i % every == 0)
            .map(|(_, label)| Tick {
                text: label.clone(),
                offset: x.center(label).unwrap_or(0.0),
            })
            .collect();

        let value_ticks = |scale: &LinearScale| -> Vec<Tick> {
            scale
                .ticks(config.y_ticks)
                .into_iter()
                .map(|v| Tick {
                    text: format_thousands(v, &config.locale),
                    offset: scale.scale(v),
                })
                .collect()
        };

        let axes = vec![
            AxisMark {
                role: Role::XAxis,
                orient: AxisOrient::Bottom,
                translate: (0.0, chart_height),
                length: chart_width,
                ticks: x_ticks,
                title: None,
            },
            AxisMark {
                role: Role::YAxisArea,
                orient: AxisOrient::Left,
                translate: (0.0, 0.0),
                length: chart_height,
                ticks: value_ticks(&y_area),
                title: Some(AxisTitle {
                    text: "area".into(),
                    color: colors.area,
                }),
            },
            AxisMark {
                role: Role::YAxisBar,
                orient: AxisOrient::Right,
                translate: (chart_width, 0.0),
                length: chart_height,
                ticks: value_ticks(&y_bar),
                title: Some(AxisTitle {
                    text: "bar".into(),
                    color: colors.bar,
                }),
            },
        ];

        Ok(Self {
            width: config.width,
            height: config.height,
            origin: (config.margin.left as f64, config.margin.top as f64),
            chart_width,
            chart_height,
            bars,
            area,
            axes,
            tick_font_px: config.tick_font_px,
            axis_title_font_px: config.axis_title_font_px,
        })
    }

    /// The bar under a canvas-space point, if any.
    pub fn bar_at(&self, x: f64, y: f64) -> Option<&BarMark> {
        let (px, py) = (x - self.origin.0, y - self.origin.1);
        self.bars.iter().find(|b| b.rect.contains(px, py))
    }

    pub fn bar(&self, index: usize) -> Option<&BarMark> {
        self.bars.get(index)
    }

    /// Canvas-space center of a bar, used to aim synthetic pointer events.
    pub fn bar_center(&self, index: usize) -> Option<(f64, f64)> {
        self.bar(index).map(|b| {
            let (cx, cy) = b.rect.center();
            (cx + self.origin.0, cy + self.origin.1)
        })
    }

    pub fn axis(&self, role: Role) -> Option<&AxisMark> {
        self.axes.iter().find(|a| a.role == role)
    }

    pub fn bar_fills(&self) -> Vec<Rgb8> {
        self.bars.iter().map(|b| b.fill).collect()
    }
}

/// Pixel coordinate text: at most two decimals, no trailing zeros.
pub(crate) fn fmt_px(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_formatting() {
        assert_eq!(fmt_px(12.0), "12");
        assert_eq!(fmt_px(12.346), "12.35");
        assert_eq!(fmt_px(-0.001), "0");
        assert_eq!(fmt_px(3.10), "3.1");
    }

    #[test]
    fn single_point_area_is_closed() {
        let area = AreaMark {
            top: vec![(10.0, 5.0)],
            baseline: 100.0,
            fill: Rgb8::new(0, 0, 0),
            opacity: 1.0,
        };
        assert_eq!(area.path_data(), "M10,5L10,100Z");
        assert_eq!(area.polygon(), vec![(10.0, 5.0), (10.0, 100.0)]);
    }
}
