use std::f64::consts::TAU;

use crate::charts::ChartTheme;
use crate::core::{
    LinearScale, PlotRect, ResolvedColumns, Row, Viewport, format_value, row::column_numbers,
    row::column_texts, truncate_label,
};
use crate::render::{
    Color, CornerRadii, DrawingSurface, FontSpec, StrokeStyle, TextBaseline, TextHAlign,
    TextStyle,
};

/// Gridline intervals on vertical value axes.
pub(crate) const VALUE_GRID_INTERVALS: usize = 5;
/// Gridline intervals on the horizontal-bar value axis.
pub(crate) const HORIZONTAL_GRID_INTERVALS: usize = 4;
/// Rotation applied to category labels under vertical bars (−30°).
pub(crate) const CATEGORY_LABEL_ROTATION: f64 = -std::f64::consts::PI / 6.0;

const TITLE_BASELINE_Y: f64 = 22.0;
const TICK_LABEL_GAP_PX: f64 = 8.0;

/// Parallel label/value columns for single-series charts.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategorySeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl CategorySeries {
    pub(crate) fn extract(dataset: &[Row], columns: &ResolvedColumns) -> Self {
        Self {
            labels: column_texts(dataset, columns.label.as_deref()),
            values: column_numbers(dataset, columns.value.as_deref()),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }
}

pub(crate) fn text_style(size_px: f64, color: Color) -> TextStyle {
    TextStyle::new(FontSpec::regular(size_px), color)
}

pub(crate) fn draw_title(
    surface: &mut dyn DrawingSurface,
    theme: &ChartTheme,
    viewport: Viewport,
    title: &str,
) {
    let style = TextStyle::new(FontSpec::bold(theme.title_font_px), theme.text)
        .aligned(TextHAlign::Center)
        .with_baseline(TextBaseline::Middle);
    surface.fill_text(title, viewport.width_px() / 2.0, TITLE_BASELINE_Y, &style);
}

/// Horizontal gridlines with tick labels on the left of the plot.
pub(crate) fn draw_horizontal_gridlines(
    surface: &mut dyn DrawingSurface,
    theme: &ChartTheme,
    plot: PlotRect,
    scale: LinearScale,
    intervals: usize,
) {
    let label_style = text_style(theme.label_font_px, theme.muted_text)
        .aligned(TextHAlign::Right)
        .with_baseline(TextBaseline::Middle);
    for tick in scale.ticks(intervals) {
        let y = scale.map(tick);
        surface.begin_path();
        surface.move_to(plot.x, y);
        surface.line_to(plot.right(), y);
        surface.stroke(StrokeStyle::new(1.0, theme.grid));
        surface.fill_text(
            &format_value(tick),
            plot.x - TICK_LABEL_GAP_PX,
            y,
            &label_style,
        );
    }
}

/// Vertical gridlines with tick labels under the plot.
pub(crate) fn draw_vertical_gridlines(
    surface: &mut dyn DrawingSurface,
    theme: &ChartTheme,
    plot: PlotRect,
    scale: LinearScale,
    intervals: usize,
) {
    let label_style = text_style(theme.label_font_px, theme.muted_text)
        .aligned(TextHAlign::Center)
        .with_baseline(TextBaseline::Top);
    for tick in scale.ticks(intervals) {
        let x = scale.map(tick);
        surface.begin_path();
        surface.move_to(x, plot.y);
        surface.line_to(x, plot.bottom());
        surface.stroke(StrokeStyle::new(1.0, theme.grid));
        surface.fill_text(
            &format_value(tick),
            x,
            plot.bottom() + TICK_LABEL_GAP_PX / 2.0,
            &label_style,
        );
    }
}

/// Fills a rounded bar; degenerate sizes draw nothing.
pub(crate) fn fill_rounded_bar(
    surface: &mut dyn DrawingSurface,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radii: CornerRadii,
    color: Color,
) {
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    surface.begin_path();
    surface.round_rect(x, y, width, height, radii);
    surface.fill(color);
}

/// Category label under a vertical bar, rotated around its anchor.
pub(crate) fn draw_rotated_category_label(
    surface: &mut dyn DrawingSurface,
    theme: &ChartTheme,
    text: &str,
    x: f64,
    y: f64,
    budget: usize,
) {
    let style = text_style(theme.label_font_px, theme.text)
        .aligned(TextHAlign::Right)
        .with_baseline(TextBaseline::Middle);
    surface.save();
    surface.translate(x, y);
    surface.rotate(CATEGORY_LABEL_ROTATION);
    surface.fill_text(&truncate_label(text, budget), 0.0, 0.0, &style);
    surface.restore();
}

/// Value annotation centered above a bar top.
pub(crate) fn draw_value_above(
    surface: &mut dyn DrawingSurface,
    theme: &ChartTheme,
    text: &str,
    center_x: f64,
    top_y: f64,
) {
    let style = text_style(theme.value_font_px, theme.text)
        .aligned(TextHAlign::Center)
        .with_baseline(TextBaseline::Bottom);
    surface.fill_text(text, center_x, top_y - 4.0, &style);
}

/// Data point marker: white ring with a colored core.
pub(crate) fn draw_point_marker(
    surface: &mut dyn DrawingSurface,
    theme: &ChartTheme,
    x: f64,
    y: f64,
    color: Color,
) {
    surface.begin_path();
    surface.arc(x, y, theme.point_radius + 2.0, 0.0, TAU);
    surface.fill(theme.background);
    surface.begin_path();
    surface.arc(x, y, theme.point_radius, 0.0, TAU);
    surface.fill(color);
}

/// Strokes an open polyline; fewer than two points draws nothing.
pub(crate) fn stroke_polyline(
    surface: &mut dyn DrawingSurface,
    points: &[(f64, f64)],
    style: StrokeStyle,
) {
    let Some(((first_x, first_y), rest)) = points.split_first() else {
        return;
    };
    if rest.is_empty() {
        return;
    }
    surface.begin_path();
    surface.move_to(*first_x, *first_y);
    for (x, y) in rest {
        surface.line_to(*x, *y);
    }
    surface.stroke(style);
}

/// Index step so that at most `max_labels` category labels are drawn.
pub(crate) fn label_stride(count: usize, max_labels: usize) -> usize {
    if max_labels == 0 {
        return count.max(1);
    }
    count.div_ceil(max_labels).max(1)
}
