//! The dashboard page: filter buttons, the chart and their shared selection.
//!
//! The dashboard owns the [`SelectionController`] and the [`ChartProvider`].
//! Every user event goes through [`Dashboard::handle`]; a selection change is
//! pushed into the provider and the chart redraws before `handle` returns.

use log::debug;

use crate::config::ChartConfig;
use crate::error::{Error, Result};
use crate::models::Dataset;
use crate::provider::{ChartProvider, mount_chart};
use crate::selection::{Selection, SelectionController};
use crate::tooltip::{DefaultAction, TooltipState};
use crate::viz::Scene;

pub use crate::provider::PointerInput;

/// What a filter button does when clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    Reset,
    Region(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    pub label: String,
    pub action: ButtonAction,
    /// Drawn as the active selection.
    pub primary: bool,
}

impl FilterButton {
    pub fn region(&self) -> Option<&str> {
        match &self.action {
            ButtonAction::Region(id) => Some(id),
            ButtonAction::Reset => None,
        }
    }

    /// CSS classes: size plus `color-primary` or `color-secondary`.
    pub fn class_name(&self) -> &'static str {
        if self.primary {
            "size-medium color-primary"
        } else {
            "size-medium color-secondary"
        }
    }
}

/// User input, in the order a host delivers it.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Button(ButtonAction),
    PointerMove(PointerInput),
    /// Pointer left the chart canvas.
    PointerLeave,
    Click(PointerInput),
    TouchStart(PointerInput),
}

/// Result of handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventOutcome {
    pub default_action: DefaultAction,
    /// The chart surface was redrawn.
    pub redrawn: bool,
}

impl EventOutcome {
    fn allow(redrawn: bool) -> Self {
        Self {
            default_action: DefaultAction::Allow,
            redrawn,
        }
    }
}

#[derive(Debug)]
pub struct Dashboard {
    dataset: Dataset,
    regions: Vec<String>,
    selection: SelectionController,
    chart: ChartProvider,
}

impl Dashboard {
    /// Build the page and draw the chart once.
    pub fn new(dataset: Dataset, config: ChartConfig) -> Result<Self> {
        let regions = dataset.regions();
        let selection = SelectionController::new();
        let chart = ChartProvider::new(&dataset, selection.highlighted_region(), config);
        let mut dashboard = Self {
            dataset,
            regions,
            selection,
            chart,
        };
        dashboard.sync_chart()?;
        Ok(dashboard)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &ChartConfig {
        self.chart.config()
    }

    /// Distinct region ids in order of first appearance.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn selection(&self) -> &Selection {
        self.selection.state()
    }

    pub fn highlighted_region(&self) -> &str {
        self.selection.highlighted_region()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.chart.scene()
    }

    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.chart.tooltip()
    }

    pub fn draw_count(&self) -> usize {
        self.chart.draw_count()
    }

    /// The reset button first, then one button per region.
    pub fn buttons(&self) -> Vec<FilterButton> {
        let mut out = Vec::with_capacity(self.regions.len() + 1);
        out.push(FilterButton {
            label: self.config().reset_label.clone(),
            action: ButtonAction::Reset,
            primary: false,
        });
        out.extend(self.regions.iter().map(|id| FilterButton {
            label: id.clone(),
            action: ButtonAction::Region(id.clone()),
            primary: self.selection.is_active(id),
        }));
        out
    }

    /// Replace the dataset; the region list is rebuilt and the chart redrawn.
    /// The selection is kept even if its region disappears.
    pub fn set_dataset(&mut self, dataset: Dataset) -> Result<bool> {
        self.regions = dataset.regions();
        self.chart.set_data(&dataset);
        self.dataset = dataset;
        self.sync_chart()
    }

    pub fn handle(&mut self, event: UiEvent) -> Result<EventOutcome> {
        match event {
            UiEvent::Button(ButtonAction::Reset) => {
                self.selection.reset();
                Ok(EventOutcome::allow(self.sync_chart()?))
            }
            UiEvent::Button(ButtonAction::Region(id)) => {
                self.selection.select(id);
                Ok(EventOutcome::allow(self.sync_chart()?))
            }
            UiEvent::PointerMove(input) => {
                self.chart.scope().use_chart_actions()?.pointer(input)?;
                Ok(EventOutcome::allow(false))
            }
            UiEvent::PointerLeave => {
                self.chart.scope().use_chart_actions()?.hidden_tooltip();
                Ok(EventOutcome::allow(false))
            }
            UiEvent::Click(input) => {
                let clicked = self.chart.scope().use_chart_actions()?.click(input);
                match clicked {
                    Some(point) => {
                        self.selection.select(point.id);
                        Ok(EventOutcome::allow(self.sync_chart()?))
                    }
                    None => Ok(EventOutcome::allow(false)),
                }
            }
            UiEvent::TouchStart(input) => {
                let default_action = self.chart.scope().use_chart_actions()?.touch(input);
                Ok(EventOutcome {
                    default_action,
                    redrawn: false,
                })
            }
        }
    }

    pub fn select_region(&mut self, region: &str) -> Result<EventOutcome> {
        self.handle(UiEvent::Button(ButtonAction::Region(region.to_string())))
    }

    pub fn reset(&mut self) -> Result<EventOutcome> {
        self.handle(UiEvent::Button(ButtonAction::Reset))
    }

    /// Click bar `index` at its center.
    pub fn click_bar(&mut self, index: usize) -> Result<EventOutcome> {
        let canvas = self.bar_center(index)?;
        self.handle(UiEvent::Click(PointerInput::new(canvas, canvas)))
    }

    /// Hover bar `index`, with the pointer at `client` in screen coordinates.
    pub fn hover_bar(&mut self, index: usize, client: (f64, f64)) -> Result<EventOutcome> {
        let canvas = self.bar_center(index)?;
        self.handle(UiEvent::PointerMove(PointerInput::new(canvas, client)))
    }

    pub fn unhover(&mut self) -> Result<EventOutcome> {
        self.handle(UiEvent::PointerLeave)
    }

    fn bar_center(&self, index: usize) -> Result<(f64, f64)> {
        let scene = self.scene();
        scene.and_then(|s| s.bar_center(index)).ok_or(Error::UnknownBar {
            index,
            len: scene.map_or(0, |s| s.bars.len()),
        })
    }

    // Push the selection into the provider, then let the chart redraw if needed.
    fn sync_chart(&mut self) -> Result<bool> {
        self.chart
            .set_highlighted(self.selection.highlighted_region());
        let redrawn = mount_chart(&mut self.chart.scope())?;
        if redrawn {
            debug!("chart redrawn (highlight={:?})", self.highlighted_region());
        }
        Ok(redrawn)
    }
}
