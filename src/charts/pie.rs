use std::f64::consts::{FRAC_PI_2, TAU};

use crate::charts::common::{CategorySeries, text_style};
use crate::charts::{ChartInput, ChartRenderer};
use crate::core::{
    ChartType, PlotRect, format_percentage, format_value, layout, truncate_label,
};
use crate::interaction::{HitShape, HitTestElement};
use crate::render::{DrawingSurface, FontSpec, StrokeStyle, TextBaseline, TextStyle};

/// Slices narrower than this (radians) carry no inline percentage.
pub const MIN_LABELED_SLICE_RADIANS: f64 = 0.3;
/// Slices start at 12 o'clock.
pub const PIE_START_ANGLE: f64 = -FRAC_PI_2;

const LEGEND_MAX_WIDTH_PX: f64 = 220.0;
const LEGEND_WIDTH_RATIO: f64 = 0.4;
const LEGEND_ROW_PX: f64 = 20.0;
const LEGEND_SWATCH_PX: f64 = 12.0;
const LEGEND_LABEL_CHARS: usize = 18;
const RADIUS_FILL_RATIO: f64 = 0.9;
const INLINE_LABEL_RADIUS_RATIO: f64 = 0.65;

/// One computed slice, angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SliceAngles {
    pub start: f64,
    pub end: f64,
    pub percent: f64,
}

/// Sequential slice angles from 12 o'clock. Negative values count as zero;
/// when the total is positive the last slice ends at exactly one turn.
pub(crate) fn slice_angles(values: &[f64]) -> Vec<SliceAngles> {
    let total: f64 = values.iter().map(|value| value.max(0.0)).sum();
    let denominator = if total > 0.0 { total } else { 1.0 };
    let mut running = 0.0;
    values
        .iter()
        .map(|value| {
            let share = value.max(0.0) / denominator;
            let start = PIE_START_ANGLE + running / denominator * TAU;
            running += value.max(0.0);
            let end = PIE_START_ANGLE + running / denominator * TAU;
            SliceAngles {
                start,
                end,
                percent: share * 100.0,
            }
        })
        .collect()
}

/// Slices drawn clockwise with a vertically centered legend on the left.
#[derive(Debug, Clone, Copy, Default)]
pub struct PieRenderer;

impl ChartRenderer for PieRenderer {
    fn draw(
        &self,
        surface: &mut dyn DrawingSurface,
        input: &ChartInput<'_>,
    ) -> Vec<HitTestElement> {
        let theme = input.theme;
        let series = CategorySeries::extract(input.dataset, input.columns);
        let plot = layout::plot_rect(ChartType::Pie, input.viewport, input.has_title);

        let legend_width = (plot.width * LEGEND_WIDTH_RATIO).min(LEGEND_MAX_WIDTH_PX);
        let pie_area = PlotRect {
            x: plot.x + legend_width,
            y: plot.y,
            width: (plot.width - legend_width).max(0.0),
            height: plot.height,
        };
        let radius = pie_area.width.min(pie_area.height) / 2.0 * RADIUS_FILL_RATIO;
        let (cx, cy) = (pie_area.center_x(), pie_area.center_y());

        let angles = slice_angles(&series.values);
        let inline_style = TextStyle::new(FontSpec::bold(theme.value_font_px), theme.background)
            .aligned(crate::render::TextHAlign::Center)
            .with_baseline(TextBaseline::Middle);

        let mut elements = Vec::with_capacity(series.len());
        for (index, (slice, (label, value))) in angles
            .iter()
            .zip(series.labels.iter().zip(&series.values))
            .enumerate()
        {
            let color = theme.series_color(index);
            let span = slice.end - slice.start;
            if span > 0.0 && radius > 0.0 {
                surface.begin_path();
                surface.move_to(cx, cy);
                surface.arc(cx, cy, radius, slice.start, slice.end);
                surface.close_path();
                surface.fill(color);
                surface.stroke(StrokeStyle::new(1.5, theme.background));
            }

            let percent_text = format_percentage(slice.percent);
            if span > MIN_LABELED_SLICE_RADIANS {
                let mid = (slice.start + slice.end) / 2.0;
                let distance = radius * INLINE_LABEL_RADIUS_RATIO;
                surface.fill_text(
                    &percent_text,
                    cx + mid.cos() * distance,
                    cy + mid.sin() * distance,
                    &inline_style,
                );
            }

            elements.push(HitTestElement::new(
                HitShape::Slice {
                    cx,
                    cy,
                    radius,
                    start_angle: slice.start,
                    end_angle: slice.end,
                },
                label.clone(),
                format!("{} ({percent_text})", format_value(*value)),
            ));
        }

        draw_legend(surface, input, &series, &angles, plot);
        elements
    }
}

fn draw_legend(
    surface: &mut dyn DrawingSurface,
    input: &ChartInput<'_>,
    series: &CategorySeries,
    angles: &[SliceAngles],
    plot: PlotRect,
) {
    let theme = input.theme;
    let block_height = series.len() as f64 * LEGEND_ROW_PX;
    let top = plot.center_y() - block_height / 2.0;
    let style = text_style(theme.legend_font_px, theme.text).with_baseline(TextBaseline::Middle);

    for (index, (label, slice)) in series.labels.iter().zip(angles).enumerate() {
        let row_center = top + index as f64 * LEGEND_ROW_PX + LEGEND_ROW_PX / 2.0;
        surface.fill_rect(
            plot.x,
            row_center - LEGEND_SWATCH_PX / 2.0,
            LEGEND_SWATCH_PX,
            LEGEND_SWATCH_PX,
            theme.series_color(index),
        );
        let text = format!(
            "{}: {} ({})",
            truncate_label(label, LEGEND_LABEL_CHARS),
            format_value(series.values[index]),
            format_percentage(slice.percent)
        );
        surface.fill_text(&text, plot.x + LEGEND_SWATCH_PX + 6.0, row_center, &style);
    }
}
