use crate::extensions::{ChartEvent, PluginContext};
use crate::render::DrawingSurface;

use super::ChartEngine;

impl<S: DrawingSurface> ChartEngine<S> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.viewport,
            chart_type: self.last_chart_type,
            element_count: self.controller.elements().len(),
            tooltip_visible: self.controller.tooltip().visible,
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: &ChartEvent) {
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(event, context);
        }
    }
}
