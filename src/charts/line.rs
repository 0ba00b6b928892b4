use crate::charts::common::{
    CategorySeries, VALUE_GRID_INTERVALS, draw_horizontal_gridlines, draw_point_marker,
    label_stride, stroke_polyline, text_style,
};
use crate::charts::{ChartInput, ChartRenderer};
use crate::core::{ChartType, LinearScale, PlotRect, format_value, layout, line_domain, truncate_label};
use crate::interaction::HitTestElement;
use crate::render::{DrawingSurface, StrokeStyle, TextBaseline, TextHAlign};

const AREA_FILL_ALPHA: f64 = 0.15;
const X_LABEL_CHARS: usize = 12;
const MIN_X_LABEL_SPACING_PX: f64 = 60.0;
const X_LABEL_OFFSET_PX: f64 = 10.0;

/// Polyline through evenly spaced points; the area variant also fills down
/// to the baseline.
#[derive(Debug, Clone, Copy)]
pub struct LineRenderer {
    filled: bool,
}

impl LineRenderer {
    #[must_use]
    pub const fn line() -> Self {
        Self { filled: false }
    }

    #[must_use]
    pub const fn area() -> Self {
        Self { filled: true }
    }

    #[must_use]
    pub const fn is_area(self) -> bool {
        self.filled
    }
}

/// `x = left + i / (n - 1) * width`; a lone point sits at the center.
pub(crate) fn point_x(plot: PlotRect, index: usize, count: usize) -> f64 {
    if count <= 1 {
        return plot.center_x();
    }
    plot.x + index as f64 / (count - 1) as f64 * plot.width
}

/// Closed polygon between the line and the baseline.
pub(crate) fn area_polygon(points: &[(f64, f64)], baseline_y: f64) -> Vec<(f64, f64)> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    let mut polygon = Vec::with_capacity(points.len() + 2);
    polygon.push((first.0, baseline_y));
    polygon.extend_from_slice(points);
    polygon.push((last.0, baseline_y));
    polygon
}

impl ChartRenderer for LineRenderer {
    fn draw(
        &self,
        surface: &mut dyn DrawingSurface,
        input: &ChartInput<'_>,
    ) -> Vec<HitTestElement> {
        let theme = input.theme;
        let chart_type = if self.filled {
            ChartType::Area
        } else {
            ChartType::Line
        };
        let series = CategorySeries::extract(input.dataset, input.columns);
        let plot = layout::plot_rect(chart_type, input.viewport, input.has_title);

        let scale = LinearScale::new(line_domain(&series.values), (plot.bottom(), plot.y));
        draw_horizontal_gridlines(surface, theme, plot, scale, VALUE_GRID_INTERVALS);

        let count = series.len();
        let points: Vec<(f64, f64)> = series
            .values
            .iter()
            .enumerate()
            .map(|(index, value)| (point_x(plot, index, count), scale.map(*value)))
            .collect();
        let color = theme.series_color(0);

        if self.filled {
            let polygon = area_polygon(&points, plot.bottom());
            if let Some(((start_x, start_y), rest)) = polygon.split_first() {
                surface.begin_path();
                surface.move_to(*start_x, *start_y);
                for (x, y) in rest {
                    surface.line_to(*x, *y);
                }
                surface.close_path();
                surface.fill(color.with_alpha(AREA_FILL_ALPHA));
            }
        }
        stroke_polyline(surface, &points, StrokeStyle::rounded(theme.line_width, color));

        let max_labels = (plot.width / MIN_X_LABEL_SPACING_PX).floor() as usize;
        let stride = label_stride(count, max_labels.max(1));
        let label_style = text_style(theme.label_font_px, theme.muted_text)
            .aligned(TextHAlign::Center)
            .with_baseline(TextBaseline::Top);

        let mut elements = Vec::with_capacity(count);
        for (index, ((x, y), (label, value))) in points
            .iter()
            .zip(series.labels.iter().zip(&series.values))
            .enumerate()
        {
            draw_point_marker(surface, theme, *x, *y, color);
            if index % stride == 0 {
                surface.fill_text(
                    &truncate_label(label, X_LABEL_CHARS),
                    *x,
                    plot.bottom() + X_LABEL_OFFSET_PX,
                    &label_style,
                );
            }
            elements.push(HitTestElement::point(
                *x,
                *y,
                label.clone(),
                format_value(*value),
            ));
        }
        elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_span_the_plot_width() {
        let plot = PlotRect {
            x: 50.0,
            y: 0.0,
            width: 300.0,
            height: 100.0,
        };
        assert_eq!(point_x(plot, 0, 4), 50.0);
        assert_eq!(point_x(plot, 3, 4), 350.0);
        assert_eq!(point_x(plot, 0, 1), 200.0);
    }

    #[test]
    fn area_polygon_closes_on_baseline() {
        let polygon = area_polygon(&[(10.0, 5.0), (20.0, 8.0)], 100.0);
        assert_eq!(
            polygon,
            vec![(10.0, 100.0), (10.0, 5.0), (20.0, 8.0), (20.0, 100.0)]
        );
        assert!(area_polygon(&[], 100.0).is_empty());
    }
}
