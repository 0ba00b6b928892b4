use serde_json::Value;
use tracing::{debug, trace};

use crate::core::row::{Row, cell_number};
use crate::core::{ChartConfig, ChartType};

/// Concrete column names selected for one render.
///
/// `None` means the role could not be resolved; consumers read such a role
/// as an all-zero (values) or empty (labels) column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub label: Option<String>,
    pub value: Option<String>,
    pub cluster: Option<String>,
    pub cumulative: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Text,
    Number,
}

/// Picks the label/value/cluster/cumulative columns `chart_type` needs.
///
/// Each role tries its explicit config fields first, then the first column of
/// the expected kind in the first row, then (labels only) the first column.
/// Resolution never fails.
#[must_use]
pub fn resolve_columns(
    dataset: &[Row],
    config: &ChartConfig,
    chart_type: ChartType,
) -> ResolvedColumns {
    let Some(first_row) = dataset.first() else {
        return ResolvedColumns::default();
    };

    let label = resolve_label(first_row, config, chart_type);
    let cumulative = if chart_type == ChartType::Pareto {
        resolve_cumulative(first_row, config)
    } else {
        None
    };

    let mut excluded: Vec<&str> = Vec::with_capacity(2);
    excluded.extend(label.as_deref());
    excluded.extend(cumulative.as_deref());
    let mut value = resolve_value(first_row, config, chart_type, &excluded);

    if chart_type == ChartType::HorizontalBar {
        value = second_chance_value(dataset, value, &excluded);
    }

    let cluster = if chart_type == ChartType::ClusteredBar {
        resolve_cluster(first_row, config, label.as_deref())
    } else {
        None
    };

    let resolved = ResolvedColumns {
        label,
        value,
        cluster,
        cumulative,
    };
    trace!(%chart_type, ?resolved, "resolved chart columns");
    resolved
}

fn resolve_label(row: &Row, config: &ChartConfig, chart_type: ChartType) -> Option<String> {
    let explicit = match chart_type {
        ChartType::Pie => [
            configured(config.category_col_name.as_deref()),
            configured(config.x_axis_col_name.as_deref()),
            None,
        ],
        ChartType::Funnel => [
            configured(config.stages_col_name.as_deref()),
            configured(config.category_col_name.as_deref()),
            configured(config.x_axis_col_name.as_deref()),
        ],
        _ => [
            configured(config.x_axis_col_name.as_deref()),
            configured(config.category_col_name.as_deref()),
            None,
        ],
    };
    if let Some(name) = explicit.into_iter().flatten().next() {
        return Some(name.to_owned());
    }

    let fallback = first_column_of_kind(row, CellKind::Text, &[])
        .or_else(|| row.keys().next().map(String::as_str))
        .map(str::to_owned);
    debug!(%chart_type, column = ?fallback, "label column fell back to row inspection");
    fallback
}

fn resolve_value(
    row: &Row,
    config: &ChartConfig,
    chart_type: ChartType,
    excluded: &[&str],
) -> Option<String> {
    let y_axis = config.y_axis_column();
    let value_col = configured(config.value_col_name.as_deref());
    let explicit = match chart_type {
        ChartType::Pie | ChartType::Funnel => value_col.or(y_axis),
        _ => y_axis.or(value_col),
    };
    if let Some(name) = explicit {
        return Some(name.to_owned());
    }

    let fallback = first_column_of_kind(row, CellKind::Number, excluded).map(str::to_owned);
    debug!(%chart_type, column = ?fallback, "value column fell back to first numeric column");
    fallback
}

/// Swaps an all-zero value column for the first other numeric column that
/// carries any non-zero value.
fn second_chance_value(
    dataset: &[Row],
    value: Option<String>,
    excluded: &[&str],
) -> Option<String> {
    if value
        .as_deref()
        .is_some_and(|column| column_has_signal(dataset, column))
    {
        return value;
    }

    let Some(first_row) = dataset.first() else {
        return value;
    };
    let replacement = first_row
        .iter()
        .filter(|(name, cell)| {
            matches!(cell, Value::Number(_))
                && !excluded.contains(&name.as_str())
                && value.as_deref() != Some(name.as_str())
        })
        .map(|(name, _)| name)
        .find(|name| column_has_signal(dataset, name));

    match replacement {
        Some(name) => {
            debug!(
                configured = ?value,
                replacement = %name,
                "value column is empty; using first non-zero numeric column"
            );
            Some(name.clone())
        }
        None => value,
    }
}

fn resolve_cluster(row: &Row, config: &ChartConfig, label: Option<&str>) -> Option<String> {
    if let Some(name) = configured(config.cluster_by.as_deref()) {
        return Some(name.to_owned());
    }
    let excluded: Vec<&str> = label.into_iter().collect();
    let fallback = first_column_of_kind(row, CellKind::Text, &excluded).map(str::to_owned);
    debug!(column = ?fallback, "cluster column fell back to second text column");
    fallback
}

fn resolve_cumulative(row: &Row, config: &ChartConfig) -> Option<String> {
    if let Some(name) = configured(config.cumulative_line.as_deref()) {
        return Some(name.to_owned());
    }
    row.keys()
        .find(|name| name.to_ascii_lowercase().contains("cumulative"))
        .cloned()
}

fn column_has_signal(dataset: &[Row], column: &str) -> bool {
    dataset
        .iter()
        .any(|row| cell_number(row.get(column)) != 0.0)
}

fn first_column_of_kind<'a>(row: &'a Row, kind: CellKind, excluded: &[&str]) -> Option<&'a str> {
    row.iter()
        .filter(|(name, _)| !excluded.contains(&name.as_str()))
        .find(|(_, cell)| match kind {
            CellKind::Text => matches!(cell, Value::String(_)),
            CellKind::Number => matches!(cell, Value::Number(_)),
        })
        .map(|(name, _)| name.as_str())
}

fn configured(name: Option<&str>) -> Option<&str> {
    name.filter(|name| !name.trim().is_empty())
}
