use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::charts::draw_chart;
use crate::core::{ChartConfig, ChartType, Row, Viewport};
use crate::error::ChartResult;
use crate::extensions::{ChartEvent, ChartPlugin};
use crate::interaction::{HitTestElement, TooltipController, TooltipState};
use crate::render::DrawingSurface;
use crate::widgets::{AgingWidget, CashFlowWidget};

use super::ChartEngineConfig;

/// Everything one render needs. Supplied fresh on every call; the engine
/// keeps no reference to it afterwards.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub dataset: &'a [Row],
    pub config: &'a ChartConfig,
    pub chart_type: ChartType,
    pub title: Option<&'a str>,
    pub viewport: Viewport,
}

impl<'a> RenderRequest<'a> {
    #[must_use]
    pub fn new(
        dataset: &'a [Row],
        config: &'a ChartConfig,
        chart_type: ChartType,
        viewport: Viewport,
    ) -> Self {
        Self {
            dataset,
            config,
            chart_type,
            title: None,
            viewport,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }
}

/// Main orchestration facade consumed by host applications.
///
/// One engine per chart instance: it owns the drawing surface, the hit-test
/// list of the last render, the tooltip state and the registered plugins.
/// Rendering is an explicit call made by the host on data or size change.
pub struct ChartEngine<S: DrawingSurface> {
    pub(super) surface: S,
    pub(super) config: ChartEngineConfig,
    pub(super) controller: TooltipController,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
    pub(super) viewport: Viewport,
    pub(super) last_chart_type: Option<ChartType>,
}

impl<S: DrawingSurface> ChartEngine<S> {
    pub fn new(surface: S, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        let controller = TooltipController::new(config.hit_tolerance_px);
        Ok(Self {
            surface,
            config,
            controller,
            plugins: Vec::new(),
            viewport: Viewport::new(0, 0),
            last_chart_type: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    /// Replaces the config; the next render picks up the new theme.
    pub fn set_config(&mut self, config: ChartEngineConfig) -> ChartResult<()> {
        config.validate()?;
        self.controller.set_point_tolerance_px(config.hit_tolerance_px);
        self.config = config;
        Ok(())
    }

    /// Clears the surface, draws the chart and replaces the hit-test list.
    pub fn render(&mut self, request: &RenderRequest<'_>) -> &[HitTestElement] {
        debug!(
            chart_type = %request.chart_type,
            rows = request.dataset.len(),
            width = request.viewport.width,
            height = request.viewport.height,
            "render chart"
        );
        let elements = draw_chart(
            &mut self.surface,
            request.dataset,
            request.config,
            request.chart_type,
            request.title,
            request.viewport,
            &self.config.theme,
        );
        self.finish_render(elements, request.viewport, Some(request.chart_type))
    }

    /// Renders the cash-flow widget; `today` drives year correction.
    pub fn render_cash_flow(
        &mut self,
        widget: &CashFlowWidget,
        dataset: &[Row],
        viewport: Viewport,
        today: NaiveDate,
    ) -> &[HitTestElement] {
        debug!(window = %widget.window, rows = dataset.len(), "render cash-flow widget");
        let elements = widget.draw(&mut self.surface, dataset, viewport, &self.config.theme, today);
        self.finish_render(elements, viewport, None)
    }

    pub fn render_aging(
        &mut self,
        widget: &AgingWidget,
        dataset: &[Row],
        viewport: Viewport,
    ) -> &[HitTestElement] {
        debug!(rows = dataset.len(), "render aging widget");
        let elements = widget.draw(&mut self.surface, dataset, viewport, &self.config.theme);
        self.finish_render(elements, viewport, None)
    }

    fn finish_render(
        &mut self,
        elements: Vec<HitTestElement>,
        viewport: Viewport,
        chart_type: Option<ChartType>,
    ) -> &[HitTestElement] {
        let element_count = elements.len();
        self.viewport = viewport;
        self.last_chart_type = chart_type;
        self.controller
            .replace_elements(elements, self.config.clear_tooltip_on_render);
        trace!(element_count, "render finished");
        self.emit_plugin_event(&ChartEvent::Rendered { element_count });
        self.controller.elements()
    }

    /// Updates the tooltip from the element under the pointer. Never redraws.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> TooltipState {
        let tooltip = self.controller.on_pointer_move(x, y).clone();
        self.emit_plugin_event(&ChartEvent::Hover(tooltip.clone()));
        tooltip
    }

    /// Hides the tooltip.
    pub fn pointer_leave(&mut self) -> TooltipState {
        let tooltip = self.controller.on_pointer_leave().clone();
        self.emit_plugin_event(&ChartEvent::Hover(tooltip.clone()));
        self.emit_plugin_event(&ChartEvent::PointerLeft);
        tooltip
    }

    /// Returns the element under the pointer and notifies plugins of the
    /// click when there is one.
    pub fn click(&mut self, x: f64, y: f64) -> Option<HitTestElement> {
        let element = self.controller.element_at(x, y).cloned()?;
        debug!(label = %element.label, "element clicked");
        self.emit_plugin_event(&ChartEvent::ElementClicked(element.clone()));
        Some(element)
    }

    #[must_use]
    pub fn elements(&self) -> &[HitTestElement] {
        self.controller.elements()
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        self.controller.tooltip()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }
}
