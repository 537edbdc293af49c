//! regionviz
//!
//! A lightweight Rust library for rendering a combined bar-and-area chart from a
//! dataset keyed by region/time, with interactive region highlighting. Pairs with
//! the `regionviz` CLI and the `regionviz-gui` desktop dashboard.
//!
//! ### Features
//! - Load datasets from JSON (`label -> {id, value_bar, value_area}`), order preserved
//! - Pure chart geometry: band/linear scales, bars, area path and axes as a [`viz::Scene`]
//! - Highlight a region by filter button or by clicking a bar
//! - Hover tooltips with locale-aware thousands separators
//! - Annotated SVG/HTML output with accessibility roles, or SVG/PNG images via plotters
//!
//! ### Example
//! ```no_run
//! use regionviz::{ChartConfig, Dashboard, storage};
//!
//! let dataset = storage::load_dataset("data/sample.json")?;
//! let mut dashboard = Dashboard::new(dataset, ChartConfig::default())?;
//! dashboard.select_region("Gangnam")?;
//! dashboard.hover_bar(3, (400.0, 300.0))?;
//! std::fs::write("dashboard.html", regionviz::viz::render_page(&dashboard))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod models;
pub mod provider;
pub mod selection;
pub mod storage;
pub mod tooltip;
pub mod viz;

pub use config::ChartConfig;
pub use dashboard::{ButtonAction, Dashboard, FilterButton, PointerInput, UiEvent};
pub use error::{Error, Result};
pub use models::{ChartPoint, Dataset};
pub use selection::{Selection, SelectionController};
