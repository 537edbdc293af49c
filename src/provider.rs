//! Chart data provider: derives axis data from a dataset and hands it, plus the
//! chart actions, to consumers through an explicit [`Scope`].
//!
//! Consumers never reach the provider through globals. A component receives a
//! `Scope`; inside [`ChartProvider::scope`] the hooks resolve, while a
//! [`Scope::root`] (no provider above it) fails with
//! [`Error::OutsideProvider`].

use log::debug;

use crate::config::ChartConfig;
use crate::error::{Error, Result};
use crate::models::{ChartPoint, Dataset};
use crate::tooltip::{DefaultAction, ScreenPos, TooltipController, TooltipState};
use crate::viz::{RenderDeps, Scene, Surface};

/// Values shared with chart consumers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartVal {
    /// Dataset labels in order (x axis).
    pub x_axis_data: Vec<String>,
    /// Dataset points in order (y axes).
    pub y_axis_data: Vec<ChartPoint>,
    /// Region whose bars are emphasized; empty for none.
    pub highlighted_bar_val: String,
}

impl ChartVal {
    pub fn from_dataset(dataset: &Dataset, highlighted: &str) -> Self {
        Self {
            x_axis_data: dataset.labels(),
            y_axis_data: dataset.points(),
            highlighted_bar_val: highlighted.to_string(),
        }
    }

    fn deps(&self) -> RenderDeps {
        RenderDeps {
            labels: self.x_axis_data.clone(),
            points: self.y_axis_data.clone(),
            highlighted: self.highlighted_bar_val.clone(),
        }
    }
}

/// A pointer event: canvas coordinates for hit-testing, client coordinates for
/// placing the tooltip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub canvas: (f64, f64),
    pub client: ScreenPos,
}

impl PointerInput {
    pub fn new(canvas: (f64, f64), client: (f64, f64)) -> Self {
        Self {
            canvas,
            client: client.into(),
        }
    }
}

#[derive(Debug)]
pub struct ChartProvider {
    val: ChartVal,
    config: ChartConfig,
    tooltip: TooltipController,
    surface: Surface,
}

impl ChartProvider {
    pub fn new(dataset: &Dataset, highlighted: &str, config: ChartConfig) -> Self {
        Self {
            val: ChartVal::from_dataset(dataset, highlighted),
            tooltip: TooltipController::new(config.tooltip_offset),
            config,
            surface: Surface::new(),
        }
    }

    /// Swap the dataset. The hovered point may no longer exist, so the tooltip closes.
    pub fn set_data(&mut self, dataset: &Dataset) {
        let highlighted = std::mem::take(&mut self.val.highlighted_bar_val);
        self.val = ChartVal::from_dataset(dataset, &highlighted);
        self.tooltip.hide();
    }

    pub fn set_highlighted(&mut self, region: &str) {
        self.val.highlighted_bar_val = region.to_string();
    }

    pub fn val(&self) -> &ChartVal {
        &self.val
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.tooltip.state()
    }

    pub fn tooltip_controller(&self) -> &TooltipController {
        &self.tooltip
    }

    /// Currently drawn scene.
    pub fn scene(&self) -> Option<&Scene> {
        self.surface.scene()
    }

    pub fn draw_count(&self) -> usize {
        self.surface.draw_count()
    }

    /// Open a scope in which the chart hooks resolve to this provider.
    pub fn scope(&mut self) -> Scope<'_> {
        Scope {
            provider: Some(self),
        }
    }
}

/// Handle passed down the component tree.
#[derive(Debug)]
pub struct Scope<'a> {
    provider: Option<&'a mut ChartProvider>,
}

impl<'a> Scope<'a> {
    /// A scope with no provider above it.
    pub fn root() -> Self {
        Self { provider: None }
    }

    pub fn use_chart_val(&self) -> Result<&ChartVal> {
        self.provider
            .as_deref()
            .map(|p| &p.val)
            .ok_or(Error::OutsideProvider {
                hook: "use_chart_val",
                provider: "ChartProvider",
            })
    }

    pub fn use_chart_actions(&mut self) -> Result<ChartActions<'_>> {
        self.provider
            .as_deref_mut()
            .map(|provider| ChartActions { provider })
            .ok_or(Error::OutsideProvider {
                hook: "use_chart_actions",
                provider: "ChartProvider",
            })
    }
}

/// Mutating operations on the chart, available inside a provider scope.
#[derive(Debug)]
pub struct ChartActions<'p> {
    provider: &'p mut ChartProvider,
}

impl ChartActions<'_> {
    /// Remove the previous drawing.
    pub fn init_chart(&mut self) {
        self.provider.surface.clear();
    }

    /// Compose the scene from the current values and draw it.
    pub fn draw_chart(&mut self) -> Result<()> {
        let val = &self.provider.val;
        let scene = Scene::compose(
            &val.x_axis_data,
            &val.y_axis_data,
            &val.highlighted_bar_val,
            &self.provider.config,
        )?;
        let deps = val.deps();
        self.provider.surface.draw(scene, deps);
        Ok(())
    }

    /// Clear and redraw when labels, points or highlight changed since the
    /// last draw. Returns whether a redraw happened.
    pub fn sync(&mut self) -> Result<bool> {
        if !self.provider.surface.is_stale(&self.provider.val.deps()) {
            return Ok(false);
        }
        self.init_chart();
        self.draw_chart()?;
        Ok(true)
    }

    /// Pointer entered bar `index`.
    pub fn pointer_enter(&mut self, index: usize) -> Result<()> {
        let val = &self.provider.val;
        let len = val.x_axis_data.len().min(val.y_axis_data.len());
        if index >= len {
            return Err(Error::UnknownBar { index, len });
        }
        self.provider
            .tooltip
            .pointer_enter(index, &val.x_axis_data[index], &val.y_axis_data[index]);
        Ok(())
    }

    pub fn pointer_moved(&mut self, client: ScreenPos) {
        self.provider.tooltip.pointer_moved(client);
    }

    pub fn hidden_tooltip(&mut self) {
        self.provider.tooltip.hide();
    }

    pub fn touch_start(&self) -> DefaultAction {
        self.provider.tooltip.touch_start()
    }

    /// Route a pointer position to enter/move/leave on the bar under it.
    /// Returns the hovered bar index.
    pub fn pointer(&mut self, input: PointerInput) -> Result<Option<usize>> {
        let hit = self.hit(input.canvas);
        let current = self.provider.tooltip.hovered_index();
        if hit != current {
            if current.is_some() {
                self.hidden_tooltip();
            }
            if let Some(index) = hit {
                self.pointer_enter(index)?;
            }
        }
        if hit.is_some() {
            self.pointer_moved(input.client);
        }
        Ok(hit)
    }

    /// The point of the bar under a click, if any.
    pub fn click(&self, input: PointerInput) -> Option<ChartPoint> {
        let (x, y) = input.canvas;
        let point = self
            .provider
            .surface
            .scene()
            .and_then(|s| s.bar_at(x, y))
            .map(|b| b.point.clone());
        if let Some(p) = &point {
            debug!("bar click on region {:?}", p.id);
        }
        point
    }

    /// Touch on a bar suppresses the default; elsewhere it is left alone.
    pub fn touch(&self, input: PointerInput) -> DefaultAction {
        match self.hit(input.canvas) {
            Some(_) => self.touch_start(),
            None => DefaultAction::Allow,
        }
    }

    fn hit(&self, (x, y): (f64, f64)) -> Option<usize> {
        self.provider
            .surface
            .scene()
            .and_then(|s| s.bar_at(x, y))
            .map(|b| b.index)
    }
}

/// The chart component: redraws the provider's surface whenever its inputs change.
pub fn mount_chart(scope: &mut Scope<'_>) -> Result<bool> {
    scope.use_chart_actions()?.sync()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hooks_fail_outside_provider() {
        let mut root = Scope::root();
        let err = root.use_chart_val().unwrap_err();
        assert_eq!(
            err.to_string(),
            "use_chart_val should be used within ChartProvider"
        );
        let err = root.use_chart_actions().unwrap_err();
        assert_eq!(
            err.to_string(),
            "use_chart_actions should be used within ChartProvider"
        );
        assert!(mount_chart(&mut root).is_err());
    }
}
