use crate::charts::common::{
    CategorySeries, VALUE_GRID_INTERVALS, draw_horizontal_gridlines, draw_rotated_category_label,
    draw_value_above, fill_rounded_bar,
};
use crate::charts::{ChartInput, ChartRenderer};
use crate::core::layout::{self, BandLayout, VERTICAL_BAR_RATIO};
use crate::core::{
    ChartType, LinearScale, format_value, value_axis_max, vertical_bar_label_budget,
};
use crate::interaction::HitTestElement;
use crate::render::{CornerRadii, DrawingSurface};

const CATEGORY_LABEL_OFFSET_PX: f64 = 12.0;

/// Bars rising from the baseline, rounded top corners, value above each
/// positive bar and category labels rotated under the axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerticalBarRenderer;

impl ChartRenderer for VerticalBarRenderer {
    fn draw(
        &self,
        surface: &mut dyn DrawingSurface,
        input: &ChartInput<'_>,
    ) -> Vec<HitTestElement> {
        let theme = input.theme;
        let series = CategorySeries::extract(input.dataset, input.columns);
        let plot = layout::plot_rect(ChartType::VerticalBar, input.viewport, input.has_title);

        let max = value_axis_max(&series.values);
        let scale = LinearScale::new((0.0, max), (plot.bottom(), plot.y));
        draw_horizontal_gridlines(surface, theme, plot, scale, VALUE_GRID_INTERVALS);

        let bands = BandLayout::new(plot.x, plot.width, series.len());
        let bar_width = bands.bar_width(VERTICAL_BAR_RATIO);
        let label_budget = vertical_bar_label_budget(bands.slot);
        let radii = CornerRadii::top(theme.bar_corner_radius);

        let mut elements = Vec::with_capacity(series.len());
        for (index, (label, value)) in series.labels.iter().zip(&series.values).enumerate() {
            let height = value.max(0.0) / max * plot.height;
            let x = bands.bar_start(index, VERTICAL_BAR_RATIO);
            let y = plot.bottom() - height;
            let formatted = format_value(*value);

            fill_rounded_bar(
                surface,
                x,
                y,
                bar_width,
                height,
                radii,
                theme.series_color(index),
            );
            if *value > 0.0 {
                draw_value_above(surface, theme, &formatted, x + bar_width / 2.0, y);
            }
            draw_rotated_category_label(
                surface,
                theme,
                label,
                bands.slot_center(index),
                plot.bottom() + CATEGORY_LABEL_OFFSET_PX,
                label_budget,
            );

            elements.push(HitTestElement::bar(
                x,
                y,
                bar_width,
                height,
                label.clone(),
                formatted,
            ));
        }
        elements
    }
}
