use smallvec::SmallVec;

use crate::charts::common::CategorySeries;
use crate::charts::{ChartInput, ChartRenderer};
use crate::core::scale::max_value;
use crate::core::{
    ChartType, PlotRect, clamp_denominator, format_value, layout, truncate_label,
};
use crate::interaction::HitTestElement;
use crate::render::{DrawingSurface, FontSpec, TextBaseline, TextHAlign, TextStyle};

/// The last stage narrows to this share of its own top width.
pub const LAST_STAGE_TAPER: f64 = 0.8;

const STAGE_GAP_PX: f64 = 4.0;
const STAGE_LABEL_CHARS: usize = 24;
const LINE_OFFSET_PX: f64 = 8.0;

pub(crate) type Trapezoid = SmallVec<[(f64, f64); 4]>;

/// Vertices clockwise from the top-left corner, centered on the plot.
pub(crate) fn trapezoid(plot: PlotRect, top_y: f64, height: f64, top_width: f64, bottom_width: f64) -> Trapezoid {
    let center = plot.center_x();
    let bottom_y = top_y + height;
    let mut vertices = Trapezoid::new();
    vertices.push((center - top_width / 2.0, top_y));
    vertices.push((center + top_width / 2.0, top_y));
    vertices.push((center + bottom_width / 2.0, bottom_y));
    vertices.push((center - bottom_width / 2.0, bottom_y));
    vertices
}

/// Stages stacked top to bottom. Each trapezoid's top edge tracks its own
/// value and its bottom edge tracks the next stage's value.
#[derive(Debug, Clone, Copy, Default)]
pub struct FunnelRenderer;

impl ChartRenderer for FunnelRenderer {
    fn draw(
        &self,
        surface: &mut dyn DrawingSurface,
        input: &ChartInput<'_>,
    ) -> Vec<HitTestElement> {
        let theme = input.theme;
        let series = CategorySeries::extract(input.dataset, input.columns);
        let plot = layout::plot_rect(ChartType::Funnel, input.viewport, input.has_title);
        let count = series.len();

        let max = clamp_denominator(max_value(&series.values).unwrap_or(0.0));
        let widths: Vec<f64> = series
            .values
            .iter()
            .map(|value| value.max(0.0) / max * plot.width)
            .collect();
        let slot = plot.height / count.max(1) as f64;
        let stage_height = (slot - STAGE_GAP_PX).max(0.0);

        let label_style = TextStyle::new(FontSpec::bold(theme.label_font_px), theme.background)
            .aligned(TextHAlign::Center)
            .with_baseline(TextBaseline::Middle);
        let value_style = TextStyle::new(FontSpec::regular(theme.value_font_px), theme.background)
            .aligned(TextHAlign::Center)
            .with_baseline(TextBaseline::Middle);

        let mut elements = Vec::with_capacity(count);
        for (index, (label, value)) in series.labels.iter().zip(&series.values).enumerate() {
            let top_width = widths[index];
            let bottom_width = widths
                .get(index + 1)
                .copied()
                .unwrap_or(top_width * LAST_STAGE_TAPER);
            let top_y = plot.y + index as f64 * slot;
            let vertices = trapezoid(plot, top_y, stage_height, top_width, bottom_width);

            if stage_height > 0.0 && (top_width > 0.0 || bottom_width > 0.0) {
                surface.begin_path();
                surface.move_to(vertices[0].0, vertices[0].1);
                for (x, y) in &vertices[1..] {
                    surface.line_to(*x, *y);
                }
                surface.close_path();
                surface.fill(theme.series_color(index));
            }

            let center_y = top_y + stage_height / 2.0;
            let formatted = format_value(*value);
            surface.fill_text(
                &truncate_label(label, STAGE_LABEL_CHARS),
                plot.center_x(),
                center_y - LINE_OFFSET_PX,
                &label_style,
            );
            surface.fill_text(&formatted, plot.center_x(), center_y + LINE_OFFSET_PX, &value_style);

            let bounding_width = top_width.max(bottom_width);
            elements.push(HitTestElement::bar(
                plot.center_x() - bounding_width / 2.0,
                top_y,
                bounding_width,
                stage_height,
                label.clone(),
                formatted,
            ));
        }
        elements
    }
}
