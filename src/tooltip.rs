//! Hover tooltip state and positioning.

use log::debug;

use crate::config::TooltipOffset;
use crate::format::format_thousands;
use crate::models::ChartPoint;

/// Screen-space position (client coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPos {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for ScreenPos {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// What the host should do with the browser/OS default for an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAction {
    Allow,
    Prevent,
}

/// The hovered bar and, once the pointer has moved, where its panel sits.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState {
    pub index: usize,
    pub label: String,
    pub point: ChartPoint,
    pub position: Option<ScreenPos>,
}

impl TooltipState {
    /// The panel is shown only after a position is known.
    pub fn is_visible(&self) -> bool {
        self.position.is_some()
    }
}

/// Text rows of the tooltip panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipLines {
    pub title: String,
    pub bar: String,
    pub area: String,
}

impl TooltipLines {
    pub fn for_point(point: &ChartPoint, locale: &str) -> Self {
        Self {
            title: format!("id: {}", point.id),
            bar: format!("bar: {}", format_thousands(point.value_bar, locale)),
            area: format!("area: {}", format_thousands(point.value_area, locale)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TooltipController {
    offset: TooltipOffset,
    state: Option<TooltipState>,
}

impl TooltipController {
    pub fn new(offset: TooltipOffset) -> Self {
        Self {
            offset,
            state: None,
        }
    }

    /// Pointer entered bar `index`.
    pub fn pointer_enter(&mut self, index: usize, label: &str, point: &ChartPoint) {
        debug!("tooltip enter #{index} ({})", point.id);
        self.state = Some(TooltipState {
            index,
            label: label.to_string(),
            point: point.clone(),
            position: None,
        });
    }

    /// Pointer moved over the hovered bar; the panel follows the cursor.
    /// Ignored when nothing is hovered.
    pub fn pointer_moved(&mut self, client: ScreenPos) {
        if let Some(state) = self.state.as_mut() {
            state.position = Some(ScreenPos {
                x: client.x - self.offset.left,
                y: client.y - self.offset.up,
            });
        }
    }

    /// Pointer left the bar: drop the hovered point and hide the panel.
    pub fn hide(&mut self) {
        if self.state.take().is_some() {
            debug!("tooltip hidden");
        }
    }

    /// Touch-start on a bar suppresses the default so the synthetic pointer
    /// events that follow do not fire twice.
    pub fn touch_start(&self) -> DefaultAction {
        DefaultAction::Prevent
    }

    pub fn state(&self) -> Option<&TooltipState> {
        self.state.as_ref()
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.index)
    }

    pub fn lines(&self, locale: &str) -> Option<TooltipLines> {
        self.state
            .as_ref()
            .map(|s| TooltipLines::for_point(&s.point, locale))
    }
}
