use dashboard_charts::api::{ChartEngine, ChartEngineConfig, RenderRequest};
use dashboard_charts::core::{ChartConfig, ChartType, Dataset, Viewport, dataset_from_json};
use dashboard_charts::interaction::{HitKind, HitShape, HitTestElement};
use dashboard_charts::render::{DrawCommand, RecordingSurface};

fn engine() -> ChartEngine<RecordingSurface> {
    ChartEngine::new(RecordingSurface::new(), ChartEngineConfig::default()).expect("engine init")
}

fn viewport() -> Viewport {
    Viewport::new(800, 400)
}

fn monthly_rows() -> Dataset {
    dataset_from_json(
        r#"[
            {"month": "Jan", "revenue": 1200},
            {"month": "Feb", "revenue": 3400},
            {"month": "Mar", "revenue": 2500},
            {"month": "Apr", "revenue": 0}
        ]"#,
    )
    .expect("dataset")
}

fn render(
    engine: &mut ChartEngine<RecordingSurface>,
    dataset: &Dataset,
    config: &ChartConfig,
    chart_type: ChartType,
) -> Vec<HitTestElement> {
    engine
        .render(&RenderRequest::new(dataset, config, chart_type, viewport()))
        .to_vec()
}

#[test]
fn single_series_kinds_emit_one_element_per_row() {
    let dataset = monthly_rows();
    let config = ChartConfig::default();
    let mut engine = engine();
    for chart_type in [
        ChartType::HorizontalBar,
        ChartType::VerticalBar,
        ChartType::StackedBar,
        ChartType::Line,
        ChartType::Area,
        ChartType::Pie,
        ChartType::Funnel,
    ] {
        let elements = render(&mut engine, &dataset, &config, chart_type);
        assert_eq!(elements.len(), dataset.len(), "{chart_type}");
        let labels: Vec<&str> = elements.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan", "Feb", "Mar", "Apr"], "{chart_type}");
        assert_eq!(engine.surface().non_finite_calls(), 0, "{chart_type}");
    }
}

#[test]
fn element_kinds_follow_chart_kind() {
    let dataset = monthly_rows();
    let config = ChartConfig::default();
    let mut engine = engine();
    let expectations = [
        (ChartType::VerticalBar, HitKind::Bar),
        (ChartType::HorizontalBar, HitKind::Bar),
        (ChartType::Line, HitKind::Point),
        (ChartType::Area, HitKind::Point),
        (ChartType::Pie, HitKind::Slice),
        (ChartType::Funnel, HitKind::Bar),
    ];
    for (chart_type, kind) in expectations {
        let elements = render(&mut engine, &dataset, &config, chart_type);
        assert!(elements.iter().all(|element| element.kind() == kind), "{chart_type}");
    }
}

#[test]
fn vertical_bar_values_are_formatted_at_draw_time() {
    let mut engine = engine();
    let elements = render(
        &mut engine,
        &monthly_rows(),
        &ChartConfig::default(),
        ChartType::VerticalBar,
    );
    let values: Vec<&str> = elements.iter().map(|e| e.formatted_value.as_str()).collect();
    assert_eq!(values, vec!["1K", "3K", "3K", "0"]);

    let texts = engine.surface().texts();
    assert!(texts.contains(&"3K"));
    // zero bar has no value annotation above it
    assert_eq!(texts.iter().filter(|text| **text == "0").count(), 1);
}

#[test]
fn unknown_chart_tag_renders_as_vertical_bar() {
    let dataset = monthly_rows();
    let config = ChartConfig::default();
    let mut engine = engine();
    let fallback = render(
        &mut engine,
        &dataset,
        &config,
        ChartType::parse_or_default("sankey_chart"),
    );
    let vertical = render(&mut engine, &dataset, &config, ChartType::VerticalBar);
    assert_eq!(fallback, vertical);
}

#[test]
fn clustered_bar_emits_full_category_cluster_grid() {
    let dataset = dataset_from_json(
        r#"[
            {"region": "North", "quarter": "Q1", "sales": 10},
            {"region": "North", "quarter": "Q2", "sales": 20},
            {"region": "South", "quarter": "Q1", "sales": 5},
            {"region": "West", "quarter": "Q3", "sales": 7}
        ]"#,
    )
    .expect("dataset");
    let mut engine = engine();
    let elements = render(
        &mut engine,
        &dataset,
        &ChartConfig::default(),
        ChartType::ClusteredBar,
    );
    assert_eq!(elements.len(), 3 * 3);
    assert_eq!(elements[0].label, "North / Q1");
    assert_eq!(elements[3].label, "South / Q1");

    let missing = elements
        .iter()
        .find(|element| element.label == "South / Q2")
        .expect("missing combination still has an element");
    assert_eq!(missing.formatted_value, "0");
    match missing.shape {
        HitShape::Bar { height, width, .. } => {
            assert_eq!(height, 0.0);
            assert!(width > 0.0);
        }
        other => panic!("unexpected shape {other:?}"),
    }
}

#[test]
fn pareto_doubles_elements_when_cumulative_is_present() {
    let dataset = dataset_from_json(
        r#"[
            {"defect": "Scratch", "count": 50},
            {"defect": "Dent", "count": 30},
            {"defect": "Crack", "count": 20}
        ]"#,
    )
    .expect("dataset");
    let mut engine = engine();
    let elements = render(&mut engine, &dataset, &ChartConfig::default(), ChartType::Pareto);
    assert_eq!(elements.len(), dataset.len() * 2);
    assert_eq!(elements[3].label, "Scratch (Cumulative)");
    assert_eq!(elements[3].formatted_value, "50.0%");
    assert_eq!(elements[5].formatted_value, "100.0%");
    assert_eq!(elements[5].kind(), HitKind::Point);
}

#[test]
fn pareto_with_zero_cumulative_keeps_only_bars() {
    let dataset = dataset_from_json(
        r#"[
            {"defect": "Scratch", "count": 50, "cumulative": 0},
            {"defect": "Dent", "count": 30, "cumulative": 0}
        ]"#,
    )
    .expect("dataset");
    let mut engine = engine();
    let elements = render(&mut engine, &dataset, &ChartConfig::default(), ChartType::Pareto);
    assert_eq!(elements.len(), dataset.len());
    assert!(elements.iter().all(|element| element.kind() == HitKind::Bar));
}

#[test]
fn all_zero_values_render_flat_bars_without_nan() {
    let dataset = dataset_from_json(
        r#"[
            {"name": "a", "value": 0},
            {"name": "b", "value": null},
            {"name": "c", "value": "n/a"}
        ]"#,
    )
    .expect("dataset");
    let mut engine = engine();
    for chart_type in [ChartType::VerticalBar, ChartType::HorizontalBar, ChartType::Pareto] {
        let elements = render(&mut engine, &dataset, &ChartConfig::default(), chart_type);
        assert_eq!(elements.len(), 3, "{chart_type}");
        for element in &elements {
            match element.shape {
                HitShape::Bar { width, height, .. } => {
                    let extent = if chart_type == ChartType::HorizontalBar {
                        width
                    } else {
                        height
                    };
                    assert_eq!(extent, 0.0, "{chart_type}");
                }
                other => panic!("unexpected shape {other:?}"),
            }
        }
        assert_eq!(engine.surface().non_finite_calls(), 0, "{chart_type}");
    }
}

#[test]
fn rendering_twice_is_idempotent() {
    let dataset = monthly_rows();
    let config = ChartConfig::default().with_title("Revenue");
    let mut engine = engine();
    for chart_type in ChartType::ALL {
        let first = render(&mut engine, &dataset, &config, chart_type);
        let first_commands = engine.surface().drawing_commands().to_vec();
        let second = render(&mut engine, &dataset, &config, chart_type);
        assert_eq!(first, second, "{chart_type}");
        assert_eq!(first_commands, engine.surface().drawing_commands(), "{chart_type}");
    }
}

#[test]
fn empty_dataset_clears_and_draws_nothing() {
    let mut engine = engine();
    let elements = render(&mut engine, &Vec::new(), &ChartConfig::default(), ChartType::Pie);
    assert!(elements.is_empty());
    assert!(engine.surface().drawing_commands().is_empty());
    assert!(matches!(
        engine.surface().commands().last(),
        Some(DrawCommand::Clear { .. })
    ));
}

#[test]
fn zero_sized_canvas_yields_no_elements() {
    let mut engine = engine();
    let dataset = monthly_rows();
    let config = ChartConfig::default();
    let elements = engine
        .render(&RenderRequest::new(
            &dataset,
            &config,
            ChartType::Line,
            Viewport::new(0, 300),
        ))
        .len();
    assert_eq!(elements, 0);
}

#[test]
fn title_is_drawn_and_shifts_the_plot_down() {
    let dataset = monthly_rows();
    let untitled = ChartConfig::default();
    let mut engine = engine();
    let plain = render(&mut engine, &dataset, &untitled, ChartType::Line);

    let request = RenderRequest::new(&dataset, &untitled, ChartType::Line, viewport())
        .with_title("  Monthly revenue  ");
    let titled = engine.render(&request).to_vec();
    assert_eq!(engine.surface().texts().first(), Some(&"Monthly revenue"));

    let top = |elements: &[HitTestElement]| {
        elements
            .iter()
            .map(|element| element.shape.anchor().1)
            .fold(f64::INFINITY, f64::min)
    };
    assert!(top(&titled) > top(&plain));
}

#[test]
fn long_horizontal_labels_are_truncated_in_drawing_only() {
    let dataset = dataset_from_json(
        r#"[{"customer": "Extremely Long Customer Name Pvt Ltd", "due": 10}]"#,
    )
    .expect("dataset");
    let mut engine = engine();
    let elements = render(
        &mut engine,
        &dataset,
        &ChartConfig::default(),
        ChartType::HorizontalBar,
    );
    assert_eq!(elements[0].label, "Extremely Long Customer Name Pvt Ltd");
    assert!(engine.surface().texts().contains(&"Extremely Long Cust…"));
}

#[test]
fn funnel_stages_share_edges_and_last_stage_tapers() {
    let dataset = dataset_from_json(
        r#"[
            {"stage": "Visited", "users": 100},
            {"stage": "Signed up", "users": 50}
        ]"#,
    )
    .expect("dataset");
    let mut engine = engine();
    engine.render(&RenderRequest::new(
        &dataset,
        &ChartConfig::default(),
        ChartType::Funnel,
        Viewport::new(400, 300),
    ));

    let mut stages: Vec<Vec<(f64, f64)>> = Vec::new();
    for command in engine.surface().commands() {
        match *command {
            DrawCommand::MoveTo { x, y } => stages.push(vec![(x, y)]),
            DrawCommand::LineTo { x, y } => {
                if let Some(stage) = stages.last_mut() {
                    stage.push((x, y));
                }
            }
            _ => {}
        }
    }

    assert_eq!(
        stages,
        vec![
            vec![(40.0, 20.0), (360.0, 20.0), (280.0, 146.0), (120.0, 146.0)],
            vec![(120.0, 150.0), (280.0, 150.0), (264.0, 276.0), (136.0, 276.0)],
        ]
    );
    let first_bottom = stages[0][2].0 - stages[0][3].0;
    let second_top = stages[1][1].0 - stages[1][0].0;
    assert_eq!(first_bottom, second_top);
    let last_bottom = stages[1][2].0 - stages[1][3].0;
    assert_eq!(last_bottom, second_top * 0.8);
}
