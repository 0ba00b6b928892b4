//! Chart strategies: one renderer per chart kind, selected through a
//! dispatch table.
//!
//! Every strategy draws through [`DrawingSurface`] and returns the
//! hit-test elements for the shapes it drew, in draw order.

mod clustered_bar;
pub(crate) mod common;
mod funnel;
mod horizontal_bar;
mod line;
mod pareto;
mod pie;
mod theme;
mod vertical_bar;

use tracing::{debug, trace};

use crate::core::{ChartConfig, ChartType, ResolvedColumns, Row, Viewport, resolve_columns};
use crate::interaction::HitTestElement;
use crate::render::DrawingSurface;

pub use clustered_bar::ClusteredBarRenderer;
pub use funnel::FunnelRenderer;
pub use horizontal_bar::HorizontalBarRenderer;
pub use line::LineRenderer;
pub use pareto::ParetoRenderer;
pub use pie::PieRenderer;
pub use theme::ChartTheme;
pub use vertical_bar::VerticalBarRenderer;

/// Inputs shared by every strategy for one render pass.
#[derive(Debug, Clone, Copy)]
pub struct ChartInput<'a> {
    pub dataset: &'a [Row],
    pub config: &'a ChartConfig,
    pub columns: &'a ResolvedColumns,
    pub viewport: Viewport,
    pub has_title: bool,
    pub theme: &'a ChartTheme,
}

/// Per-kind layout + drawing algorithm.
pub trait ChartRenderer: Sync {
    fn draw(&self, surface: &mut dyn DrawingSurface, input: &ChartInput<'_>)
    -> Vec<HitTestElement>;
}

static HORIZONTAL_BAR: HorizontalBarRenderer = HorizontalBarRenderer;
static VERTICAL_BAR: VerticalBarRenderer = VerticalBarRenderer;
static LINE: LineRenderer = LineRenderer::line();
static AREA: LineRenderer = LineRenderer::area();
static PARETO: ParetoRenderer = ParetoRenderer;
static PIE: PieRenderer = PieRenderer;
static CLUSTERED_BAR: ClusteredBarRenderer = ClusteredBarRenderer;
static FUNNEL: FunnelRenderer = FunnelRenderer;

/// Dispatch table. Stacked bars have no dedicated layout and share the
/// vertical-bar strategy, which is also the fallback for unknown tags.
#[must_use]
pub fn renderer_for(chart_type: ChartType) -> &'static dyn ChartRenderer {
    match chart_type {
        ChartType::HorizontalBar => &HORIZONTAL_BAR,
        ChartType::Line => &LINE,
        ChartType::Area => &AREA,
        ChartType::Pareto => &PARETO,
        ChartType::Pie => &PIE,
        ChartType::ClusteredBar => &CLUSTERED_BAR,
        ChartType::Funnel => &FUNNEL,
        ChartType::VerticalBar | ChartType::StackedBar => &VERTICAL_BAR,
    }
}

/// One full clear-and-redraw: clears the surface, draws the title, resolves
/// columns and runs the strategy for `chart_type`.
///
/// Empty datasets and invalid viewports clear the surface and return no
/// elements.
pub fn draw_chart(
    surface: &mut dyn DrawingSurface,
    dataset: &[Row],
    config: &ChartConfig,
    chart_type: ChartType,
    title: Option<&str>,
    viewport: Viewport,
    theme: &ChartTheme,
) -> Vec<HitTestElement> {
    surface.clear(viewport.width_px(), viewport.height_px(), theme.background);

    if !viewport.is_valid() {
        debug!(width = viewport.width, height = viewport.height, "skip render: empty viewport");
        return Vec::new();
    }
    if dataset.is_empty() {
        debug!(%chart_type, "skip render: empty dataset");
        return Vec::new();
    }

    let title = title
        .or(config.title.as_deref())
        .map(str::trim)
        .filter(|title| !title.is_empty());
    if let Some(title) = title {
        common::draw_title(surface, theme, viewport, title);
    }

    let columns = resolve_columns(dataset, config, chart_type);
    let input = ChartInput {
        dataset,
        config,
        columns: &columns,
        viewport,
        has_title: title.is_some(),
        theme,
    };
    let elements = renderer_for(chart_type).draw(surface, &input);
    trace!(
        %chart_type,
        rows = dataset.len(),
        elements = elements.len(),
        "chart strategy finished"
    );
    elements
}
