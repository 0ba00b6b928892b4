use crate::charts::common::{
    CategorySeries, VALUE_GRID_INTERVALS, draw_horizontal_gridlines, draw_point_marker,
    draw_rotated_category_label, fill_rounded_bar, stroke_polyline, text_style,
};
use crate::charts::{ChartInput, ChartRenderer};
use crate::core::layout::{self, BandLayout, VERTICAL_BAR_RATIO};
use crate::core::row::column_numbers;
use crate::core::{
    ChartType, LinearScale, format_percentage, format_value, value_axis_max,
    vertical_bar_label_budget,
};
use crate::interaction::HitTestElement;
use crate::render::{CornerRadii, DrawingSurface, StrokeStyle, TextBaseline, TextHAlign};

/// The cumulative axis always spans `[0, 100]` percent.
pub const CUMULATIVE_DOMAIN: (f64, f64) = (0.0, 100.0);

const CATEGORY_LABEL_OFFSET_PX: f64 = 12.0;
const RIGHT_AXIS_GAP_PX: f64 = 8.0;

/// Bars on the value axis plus a cumulative-percentage polyline on a fixed
/// secondary axis drawn on the right.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParetoRenderer;

/// Running share of the total, in percent. An all-zero series yields zeros.
pub(crate) fn running_percentages(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().map(|value| value.max(0.0)).sum();
    if total <= 0.0 {
        return vec![0.0; values.len()];
    }
    let mut running = 0.0;
    values
        .iter()
        .map(|value| {
            running += value.max(0.0);
            running / total * 100.0
        })
        .collect()
}

impl ChartRenderer for ParetoRenderer {
    fn draw(
        &self,
        surface: &mut dyn DrawingSurface,
        input: &ChartInput<'_>,
    ) -> Vec<HitTestElement> {
        let theme = input.theme;
        let series = CategorySeries::extract(input.dataset, input.columns);
        let cumulative = match input.columns.cumulative.as_deref() {
            Some(column) => column_numbers(input.dataset, Some(column)),
            None => running_percentages(&series.values),
        };
        let plot = layout::plot_rect(ChartType::Pareto, input.viewport, input.has_title);

        let max = value_axis_max(&series.values);
        let primary = LinearScale::new((0.0, max), (plot.bottom(), plot.y));
        let secondary = LinearScale::new(CUMULATIVE_DOMAIN, (plot.bottom(), plot.y));
        draw_horizontal_gridlines(surface, theme, plot, primary, VALUE_GRID_INTERVALS);

        let right_style = text_style(theme.label_font_px, theme.cumulative_line)
            .with_baseline(TextBaseline::Middle);
        for tick in secondary.ticks(VALUE_GRID_INTERVALS) {
            surface.fill_text(
                &format!("{tick:.0}%"),
                plot.right() + RIGHT_AXIS_GAP_PX,
                secondary.map(tick),
                &right_style,
            );
        }

        let bands = BandLayout::new(plot.x, plot.width, series.len());
        let bar_width = bands.bar_width(VERTICAL_BAR_RATIO);
        let label_budget = vertical_bar_label_budget(bands.slot);
        let radii = CornerRadii::top(theme.bar_corner_radius);

        let mut elements = Vec::with_capacity(series.len() * 2);
        for (index, (label, value)) in series.labels.iter().zip(&series.values).enumerate() {
            let height = value.max(0.0) / max * plot.height;
            let x = bands.bar_start(index, VERTICAL_BAR_RATIO);
            let y = plot.bottom() - height;
            fill_rounded_bar(
                surface,
                x,
                y,
                bar_width,
                height,
                radii,
                theme.series_color(index),
            );
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
                format_value(*value),
            ));
        }

        if cumulative.iter().all(|percent| *percent == 0.0) {
            return elements;
        }

        let points: Vec<(f64, f64)> = cumulative
            .iter()
            .enumerate()
            .map(|(index, percent)| {
                let clamped = percent.clamp(CUMULATIVE_DOMAIN.0, CUMULATIVE_DOMAIN.1);
                (bands.slot_center(index), secondary.map(clamped))
            })
            .collect();
        stroke_polyline(
            surface,
            &points,
            StrokeStyle::rounded(theme.line_width, theme.cumulative_line),
        );

        let point_style = text_style(theme.value_font_px, theme.cumulative_line)
            .aligned(TextHAlign::Center)
            .with_baseline(TextBaseline::Bottom);
        for ((x, y), (label, percent)) in points.iter().zip(series.labels.iter().zip(&cumulative)) {
            let formatted = format_percentage(*percent);
            draw_point_marker(surface, theme, *x, *y, theme.cumulative_line);
            surface.fill_text(&formatted, *x, *y - theme.point_radius - 4.0, &point_style);
            elements.push(HitTestElement::point(
                *x,
                *y,
                format!("{label} (Cumulative)"),
                formatted,
            ));
        }
        elements
    }
}
