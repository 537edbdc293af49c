//! Visualization: chart scene layout and its backends.
//!
//! - [`scale`]: band and linear scales (d3 semantics, nice ticks)
//! - [`scene`]: pure geometry for bars, the area path and three axes
//! - [`surface`]: the single drawing surface, cleared before every redraw
//! - [`svg`]: annotated SVG/HTML with accessibility roles
//! - [`export`]: SVG/PNG images through plotters

pub mod color;
pub mod export;
pub mod scale;
pub mod scene;
pub mod surface;
pub mod svg;

pub use color::{ChartColors, Rgb8};
pub use export::{export_image, register_font_file};
pub use scene::{AreaMark, AxisMark, AxisOrient, BarMark, Role, Scene, Tick};
pub use surface::{RenderDeps, Surface};
pub use svg::{render_page, render_svg};
