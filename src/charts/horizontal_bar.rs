use ordered_float::OrderedFloat;

use crate::charts::common::{
    CategorySeries, HORIZONTAL_GRID_INTERVALS, draw_vertical_gridlines, fill_rounded_bar,
    text_style,
};
use crate::charts::{ChartInput, ChartRenderer};
use crate::core::layout::{self, BandLayout, HORIZONTAL_BAR_RATIO};
use crate::core::{
    ChartType, LinearScale, PlotRect, format_value, truncate_label, value_axis_max,
};
use crate::interaction::HitTestElement;
use crate::render::{CornerRadii, DrawingSurface, FontSpec, TextBaseline, TextHAlign};

/// Character budget for category labels left of the bars.
pub const HORIZONTAL_LABEL_CHARS: usize = 20;

const LABEL_GAP_PX: f64 = 8.0;
const VALUE_GAP_PX: f64 = 6.0;

/// Bars growing rightwards from the plot's left edge, labels right-aligned
/// in a left gutter sized to the longest label.
#[derive(Debug, Clone, Copy, Default)]
pub struct HorizontalBarRenderer;

impl ChartRenderer for HorizontalBarRenderer {
    fn draw(
        &self,
        surface: &mut dyn DrawingSurface,
        input: &ChartInput<'_>,
    ) -> Vec<HitTestElement> {
        let theme = input.theme;
        let series = CategorySeries::extract(input.dataset, input.columns);
        let labels: Vec<String> = series
            .labels
            .iter()
            .map(|label| truncate_label(label, HORIZONTAL_LABEL_CHARS))
            .collect();

        let font = FontSpec::regular(theme.label_font_px);
        let longest = labels
            .iter()
            .map(|label| OrderedFloat(surface.measure_text(label, font)))
            .max()
            .map_or(0.0, OrderedFloat::into_inner);
        let mut padding = layout::padding_profile(ChartType::HorizontalBar, input.has_title);
        padding.left = layout::dynamic_left_padding(longest, input.viewport);
        let plot = PlotRect::from_padding(input.viewport, padding);

        let max = value_axis_max(&series.values);
        let scale = LinearScale::new((0.0, max), (plot.x, plot.right()));
        draw_vertical_gridlines(surface, theme, plot, scale, HORIZONTAL_GRID_INTERVALS);

        let bands = BandLayout::new(plot.y, plot.height, series.len());
        let bar_height = bands.bar_width(HORIZONTAL_BAR_RATIO);
        let radii = CornerRadii::right(theme.bar_corner_radius);
        let label_style = text_style(theme.label_font_px, theme.text)
            .aligned(TextHAlign::Right)
            .with_baseline(TextBaseline::Middle);
        let value_style = text_style(theme.value_font_px, theme.muted_text)
            .with_baseline(TextBaseline::Middle);

        let mut elements = Vec::with_capacity(series.len());
        for (index, value) in series.values.iter().enumerate() {
            let length = value.max(0.0) / max * plot.width;
            let y = bands.bar_start(index, HORIZONTAL_BAR_RATIO);
            let center_y = bands.slot_center(index);
            let formatted = format_value(*value);

            fill_rounded_bar(
                surface,
                plot.x,
                y,
                length,
                bar_height,
                radii,
                theme.series_color(index),
            );
            surface.fill_text(&labels[index], plot.x - LABEL_GAP_PX, center_y, &label_style);
            surface.fill_text(
                &formatted,
                plot.x + length + VALUE_GAP_PX,
                center_y,
                &value_style,
            );

            elements.push(HitTestElement::bar(
                plot.x,
                y,
                length,
                bar_height,
                series.labels[index].clone(),
                formatted,
            ));
        }
        elements
    }
}
