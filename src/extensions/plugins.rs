use serde::{Deserialize, Serialize};

use crate::core::{ChartType, Viewport};
use crate::interaction::{HitTestElement, TooltipState};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    /// Kind of the last render, `None` before the first one or after a
    /// widget render.
    pub chart_type: Option<ChartType>,
    pub element_count: usize,
    pub tooltip_visible: bool,
}

/// Event stream exposed to plugins. `Hover` and `ElementClicked` are the
/// engine's outward hover/click notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    Rendered { element_count: usize },
    Hover(TooltipState),
    PointerLeft,
    ElementClicked(HitTestElement),
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe events and read engine context without mutating engine
/// internals.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &ChartEvent, context: PluginContext);
}
