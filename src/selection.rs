//! Highlighted-region state shared by the filter buttons and the chart.

use log::debug;

/// `Unselected --select(y)--> Selected(y)`, `Selected(x) --select(y)--> Selected(y)`,
/// `any --reset--> Unselected`. There is no terminal state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(String),
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: Selection,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlight `region`. Selecting the current region keeps it selected; an
    /// empty id is the same as [`reset`](Self::reset).
    pub fn select(&mut self, region: impl Into<String>) {
        let region = region.into();
        if region.is_empty() {
            self.reset();
            return;
        }
        debug!("select region {region:?}");
        self.state = Selection::Selected(region);
    }

    pub fn reset(&mut self) {
        debug!("reset selection");
        self.state = Selection::Unselected;
    }

    pub fn state(&self) -> &Selection {
        &self.state
    }

    /// The selected region id, or `""` when nothing is selected.
    pub fn highlighted_region(&self) -> &str {
        match &self.state {
            Selection::Unselected => "",
            Selection::Selected(id) => id,
        }
    }

    pub fn is_active(&self, region: &str) -> bool {
        matches!(&self.state, Selection::Selected(id) if id == region)
    }
}
