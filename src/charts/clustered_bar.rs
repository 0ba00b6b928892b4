use indexmap::IndexMap;
use indexmap::IndexSet;

use crate::charts::common::{
    VALUE_GRID_INTERVALS, draw_horizontal_gridlines, draw_rotated_category_label,
    fill_rounded_bar, text_style,
};
use crate::charts::{ChartInput, ChartRenderer};
use crate::core::layout::{self, BandLayout, CLUSTER_GROUP_RATIO};
use crate::core::{
    ChartType, LinearScale, PlotRect, Row, cell_number, cell_text, format_value, truncate_label,
    value_axis_max, vertical_bar_label_budget,
};
use crate::interaction::HitTestElement;
use crate::render::{CornerRadii, DrawingSurface, TextBaseline};

const CATEGORY_LABEL_OFFSET_PX: f64 = 12.0;
const LEGEND_OFFSET_PX: f64 = 60.0;
const LEGEND_SWATCH_PX: f64 = 10.0;
const LEGEND_ITEM_GAP_PX: f64 = 16.0;
const LEGEND_LABEL_CHARS: usize = 16;

/// Category × cluster grid of summed values. Both axes keep first-seen order
/// and every combination exists, missing ones as zero.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ClusterGrid {
    pub categories: Vec<String>,
    pub clusters: Vec<String>,
    /// `values[category][cluster]`
    pub values: Vec<Vec<f64>>,
}

impl ClusterGrid {
    pub(crate) fn build(
        dataset: &[Row],
        category_column: Option<&str>,
        cluster_column: Option<&str>,
        value_column: Option<&str>,
    ) -> Self {
        let mut sums: IndexMap<String, IndexMap<String, f64>> = IndexMap::new();
        let mut clusters: IndexSet<String> = IndexSet::new();
        for row in dataset {
            let category = cell_text(category_column.and_then(|column| row.get(column)));
            let cluster = cell_text(cluster_column.and_then(|column| row.get(column)));
            let value = cell_number(value_column.and_then(|column| row.get(column)));
            clusters.insert(cluster.clone());
            *sums.entry(category).or_default().entry(cluster).or_insert(0.0) += value;
        }

        let values = sums
            .values()
            .map(|by_cluster| {
                clusters
                    .iter()
                    .map(|cluster| by_cluster.get(cluster).copied().unwrap_or(0.0))
                    .collect()
            })
            .collect();
        Self {
            categories: sums.into_keys().collect(),
            clusters: clusters.into_iter().collect(),
            values,
        }
    }

    fn max_value(&self) -> f64 {
        let flat: Vec<f64> = self.values.iter().flatten().copied().collect();
        value_axis_max(&flat)
    }
}

/// Category slots subdivided into one bar per cluster, with a cluster legend
/// under the category labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClusteredBarRenderer;

impl ChartRenderer for ClusteredBarRenderer {
    fn draw(
        &self,
        surface: &mut dyn DrawingSurface,
        input: &ChartInput<'_>,
    ) -> Vec<HitTestElement> {
        let theme = input.theme;
        let grid = ClusterGrid::build(
            input.dataset,
            input.columns.label.as_deref(),
            input.columns.cluster.as_deref(),
            input.columns.value.as_deref(),
        );
        let plot = layout::plot_rect(ChartType::ClusteredBar, input.viewport, input.has_title);

        let max = grid.max_value();
        let scale = LinearScale::new((0.0, max), (plot.bottom(), plot.y));
        draw_horizontal_gridlines(surface, theme, plot, scale, VALUE_GRID_INTERVALS);

        let bands = BandLayout::new(plot.x, plot.width, grid.categories.len());
        let group_width = bands.bar_width(CLUSTER_GROUP_RATIO);
        let bar_width = group_width / grid.clusters.len().max(1) as f64;
        let label_budget = vertical_bar_label_budget(bands.slot);
        let radii = CornerRadii::top(theme.bar_corner_radius);

        let mut elements = Vec::with_capacity(grid.categories.len() * grid.clusters.len());
        for (category_index, (category, row)) in
            grid.categories.iter().zip(&grid.values).enumerate()
        {
            let group_start = bands.bar_start(category_index, CLUSTER_GROUP_RATIO);
            for (cluster_index, (cluster, value)) in grid.clusters.iter().zip(row).enumerate() {
                let height = value.max(0.0) / max * plot.height;
                let x = group_start + cluster_index as f64 * bar_width;
                let y = plot.bottom() - height;
                fill_rounded_bar(
                    surface,
                    x,
                    y,
                    bar_width,
                    height,
                    radii,
                    theme.series_color(cluster_index),
                );
                let label = if cluster.is_empty() {
                    category.clone()
                } else {
                    format!("{category} / {cluster}")
                };
                elements.push(HitTestElement::bar(
                    x,
                    y,
                    bar_width,
                    height,
                    label,
                    format_value(*value),
                ));
            }
            draw_rotated_category_label(
                surface,
                theme,
                category,
                bands.slot_center(category_index),
                plot.bottom() + CATEGORY_LABEL_OFFSET_PX,
                label_budget,
            );
        }

        draw_cluster_legend(surface, input, &grid.clusters, plot);
        elements
    }
}

fn draw_cluster_legend(
    surface: &mut dyn DrawingSurface,
    input: &ChartInput<'_>,
    clusters: &[String],
    plot: PlotRect,
) {
    let theme = input.theme;
    let style = text_style(theme.legend_font_px, theme.text).with_baseline(TextBaseline::Middle);
    let y = plot.bottom() + LEGEND_OFFSET_PX;
    let mut x = plot.x;
    for (index, cluster) in clusters.iter().enumerate() {
        if cluster.is_empty() {
            continue;
        }
        let text = truncate_label(cluster, LEGEND_LABEL_CHARS);
        surface.fill_rect(
            x,
            y - LEGEND_SWATCH_PX / 2.0,
            LEGEND_SWATCH_PX,
            LEGEND_SWATCH_PX,
            theme.series_color(index),
        );
        let text_x = x + LEGEND_SWATCH_PX + 4.0;
        surface.fill_text(&text, text_x, y, &style);
        x = text_x + surface.measure_text(&text, style.font) + LEGEND_ITEM_GAP_PX;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset_from_json;

    #[test]
    fn grid_fills_missing_combinations_with_zero() {
        let dataset = dataset_from_json(
            r#"[
                {"region": "North", "quarter": "Q1", "sales": 10},
                {"region": "North", "quarter": "Q2", "sales": 20},
                {"region": "South", "quarter": "Q1", "sales": 5},
                {"region": "North", "quarter": "Q1", "sales": 1}
            ]"#,
        )
        .expect("dataset");
        let grid = ClusterGrid::build(&dataset, Some("region"), Some("quarter"), Some("sales"));
        assert_eq!(grid.categories, vec!["North", "South"]);
        assert_eq!(grid.clusters, vec!["Q1", "Q2"]);
        assert_eq!(grid.values, vec![vec![11.0, 20.0], vec![5.0, 0.0]]);
    }
}
