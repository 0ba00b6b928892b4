use dashboard_charts::core::{
    ChartConfig, ChartType, ColumnSelection, ResolvedColumns, dataset_from_json, resolve_columns,
};

fn sales_rows() -> dashboard_charts::core::Dataset {
    dataset_from_json(
        r#"[
            {"region": "North", "segment": "Retail", "units": 0, "revenue": 120, "cumulative_pct": 40},
            {"region": "South", "segment": "Online", "units": 0, "revenue": 90, "cumulative_pct": 70},
            {"region": "East", "segment": "Retail", "units": 0, "revenue": 90, "cumulative_pct": 100}
        ]"#,
    )
    .expect("dataset")
}

#[test]
fn explicit_config_wins() {
    let config = ChartConfig::default()
        .with_x_axis("segment")
        .with_y_axis("units");
    let columns = resolve_columns(&sales_rows(), &config, ChartType::VerticalBar);
    assert_eq!(columns.label.as_deref(), Some("segment"));
    assert_eq!(columns.value.as_deref(), Some("units"));
    assert_eq!(columns.cluster, None);
}

#[test]
fn y_axis_array_uses_first_entry() {
    let config = ChartConfig {
        y_axis_col_name: Some(ColumnSelection::Many(vec![
            "revenue".to_owned(),
            "units".to_owned(),
        ])),
        ..ChartConfig::default()
    };
    let columns = resolve_columns(&sales_rows(), &config, ChartType::Line);
    assert_eq!(columns.value.as_deref(), Some("revenue"));
}

#[test]
fn falls_back_to_first_text_and_numeric_columns() {
    let columns = resolve_columns(&sales_rows(), &ChartConfig::default(), ChartType::Line);
    assert_eq!(columns.label.as_deref(), Some("region"));
    assert_eq!(columns.value.as_deref(), Some("units"));
}

#[test]
fn horizontal_bar_skips_all_zero_value_column() {
    let config = ChartConfig::default().with_y_axis("units");
    let columns = resolve_columns(&sales_rows(), &config, ChartType::HorizontalBar);
    assert_eq!(columns.value.as_deref(), Some("revenue"));

    let vertical = resolve_columns(&sales_rows(), &config, ChartType::VerticalBar);
    assert_eq!(vertical.value.as_deref(), Some("units"));
}

#[test]
fn pie_prefers_category_and_value_fields() {
    let config = ChartConfig::default()
        .with_x_axis("region")
        .with_y_axis("units")
        .with_category("segment")
        .with_value("revenue");
    let columns = resolve_columns(&sales_rows(), &config, ChartType::Pie);
    assert_eq!(columns.label.as_deref(), Some("segment"));
    assert_eq!(columns.value.as_deref(), Some("revenue"));
}

#[test]
fn funnel_prefers_stage_column() {
    let config = ChartConfig::default()
        .with_category("region")
        .with_stages("segment");
    let columns = resolve_columns(&sales_rows(), &config, ChartType::Funnel);
    assert_eq!(columns.label.as_deref(), Some("segment"));
}

#[test]
fn clustered_bar_uses_second_text_column_as_cluster() {
    let columns = resolve_columns(&sales_rows(), &ChartConfig::default(), ChartType::ClusteredBar);
    assert_eq!(columns.label.as_deref(), Some("region"));
    assert_eq!(columns.cluster.as_deref(), Some("segment"));

    let config = ChartConfig::default().with_cluster_by("region").with_x_axis("segment");
    let explicit = resolve_columns(&sales_rows(), &config, ChartType::ClusteredBar);
    assert_eq!(explicit.cluster.as_deref(), Some("region"));
}

#[test]
fn pareto_detects_cumulative_column_and_excludes_it_from_values() {
    let config = ChartConfig::default().with_x_axis("region");
    let columns = resolve_columns(&sales_rows(), &config, ChartType::Pareto);
    assert_eq!(columns.cumulative.as_deref(), Some("cumulative_pct"));
    assert_eq!(columns.value.as_deref(), Some("units"));
}

#[test]
fn empty_dataset_resolves_nothing() {
    let columns = resolve_columns(&[], &ChartConfig::default(), ChartType::Pie);
    assert_eq!(columns, ResolvedColumns::default());
}

#[test]
fn numeric_only_rows_use_first_key_as_label() {
    let dataset = dataset_from_json(r#"[{"year": 2024, "total": 5}]"#).expect("dataset");
    let columns = resolve_columns(&dataset, &ChartConfig::default(), ChartType::VerticalBar);
    assert_eq!(columns.label.as_deref(), Some("year"));
    assert_eq!(columns.value.as_deref(), Some("total"));
}
