//! The single drawing surface owned by the chart renderer.

use log::debug;

use crate::models::ChartPoint;

use super::scene::Scene;

/// Inputs a drawn scene depends on. A change to any of them forces a redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDeps {
    pub labels: Vec<String>,
    pub points: Vec<ChartPoint>,
    pub highlighted: String,
}

/// Holds whatever is currently drawn. Drawing always clears first, so repeated
/// draws never stack overlays.
#[derive(Debug, Default)]
pub struct Surface {
    scene: Option<Scene>,
    deps: Option<RenderDeps>,
    draws: usize,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove everything drawn so far.
    pub fn clear(&mut self) {
        self.scene = None;
        self.deps = None;
    }

    /// Replace the surface content with `scene`.
    pub fn draw(&mut self, scene: Scene, deps: RenderDeps) {
        self.clear();
        self.draws += 1;
        debug!(
            "draw #{}: {} bars, highlight={:?}",
            self.draws,
            scene.bars.len(),
            deps.highlighted
        );
        self.scene = Some(scene);
        self.deps = Some(deps);
    }

    /// Whether `deps` differs from what is drawn now.
    pub fn is_stale(&self, deps: &RenderDeps) -> bool {
        self.deps.as_ref() != Some(deps)
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Number of draws since creation.
    pub fn draw_count(&self) -> usize {
        self.draws
    }
}
