use std::f64::consts::{FRAC_PI_2, TAU};

use approx::assert_abs_diff_eq;
use dashboard_charts::api::{ChartEngine, ChartEngineConfig, RenderRequest};
use dashboard_charts::core::{ChartConfig, ChartType, Viewport, dataset_from_json};
use dashboard_charts::interaction::HitShape;
use dashboard_charts::render::RecordingSurface;

fn slices(shapes: &[HitShape]) -> Vec<(f64, f64)> {
    shapes
        .iter()
        .map(|shape| match *shape {
            HitShape::Slice {
                start_angle,
                end_angle,
                ..
            } => (start_angle, end_angle),
            other => panic!("expected slice, got {other:?}"),
        })
        .collect()
}

fn render_pie(json: &str) -> (Vec<HitShape>, Vec<String>, RecordingSurface) {
    let dataset = dataset_from_json(json).expect("dataset");
    let config = ChartConfig::default()
        .with_category("channel")
        .with_value("share");
    let mut engine = ChartEngine::new(RecordingSurface::new(), ChartEngineConfig::default())
        .expect("engine init");
    let elements = engine
        .render(&RenderRequest::new(
            &dataset,
            &config,
            ChartType::Pie,
            Viewport::new(640, 360),
        ))
        .to_vec();
    let shapes = elements.iter().map(|element| element.shape).collect();
    let values = elements
        .into_iter()
        .map(|element| element.formatted_value)
        .collect();
    (shapes, values, engine.into_surface())
}

#[test]
fn slices_start_at_twelve_and_sum_to_full_turn() {
    let (shapes, _, _) = render_pie(
        r#"[
            {"channel": "Direct", "share": 45},
            {"channel": "Search", "share": 30},
            {"channel": "Social", "share": 15},
            {"channel": "Email", "share": 10}
        ]"#,
    );
    let angles = slices(&shapes);
    assert_eq!(angles[0].0, -FRAC_PI_2);
    let swept: f64 = angles.iter().map(|(start, end)| end - start).sum();
    assert_abs_diff_eq!(swept, TAU, epsilon = 1e-12);
    for pair in angles.windows(2) {
        assert_eq!(pair[0].1, pair[1].0);
    }
}

#[test]
fn slice_values_carry_percentages() {
    let (_, values, surface) = render_pie(
        r#"[
            {"channel": "Direct", "share": 3000},
            {"channel": "Search", "share": 1000}
        ]"#,
    );
    assert_eq!(values, vec!["3K (75.0%)", "1K (25.0%)"]);
    let texts = surface.texts();
    assert!(texts.contains(&"75.0%"));
    assert!(texts.contains(&"Direct: 3K (75.0%)"));
}

#[test]
fn thin_slices_have_no_inline_label() {
    let (shapes, _, surface) = render_pie(
        r#"[
            {"channel": "Direct", "share": 99},
            {"channel": "Fax", "share": 1}
        ]"#,
    );
    let angles = slices(&shapes);
    assert!(angles[1].1 - angles[1].0 < 0.3);
    let texts = surface.texts();
    assert!(texts.contains(&"99.0%"));
    assert!(!texts.contains(&"1.0%"));
    assert!(texts.contains(&"Fax: 1 (1.0%)"));
}

#[test]
fn zero_total_draws_no_slices_but_keeps_elements() {
    let (shapes, values, surface) = render_pie(
        r#"[
            {"channel": "Direct", "share": 0},
            {"channel": "Search", "share": 0}
        ]"#,
    );
    assert_eq!(shapes.len(), 2);
    assert_eq!(values, vec!["0 (0.0%)", "0 (0.0%)"]);
    assert_eq!(surface.non_finite_calls(), 0);
}

#[test]
fn pointer_inside_slice_hits_it() {
    let dataset = dataset_from_json(
        r#"[
            {"channel": "Direct", "share": 50},
            {"channel": "Search", "share": 50}
        ]"#,
    )
    .expect("dataset");
    let config = ChartConfig::default();
    let mut engine = ChartEngine::new(RecordingSurface::new(), ChartEngineConfig::default())
        .expect("engine init");
    let elements = engine
        .render(&RenderRequest::new(
            &dataset,
            &config,
            ChartType::Pie,
            Viewport::new(640, 360),
        ))
        .to_vec();
    let HitShape::Slice { cx, cy, radius, .. } = elements[0].shape else {
        panic!("expected slice");
    };

    // first slice spans 12 o'clock to 6 o'clock through the right side
    let right = engine.pointer_move(cx + radius * 0.5, cy);
    assert!(right.visible);
    assert_eq!(right.label, "Direct");

    let left = engine.pointer_move(cx - radius * 0.5, cy);
    assert_eq!(left.label, "Search");

    let outside = engine.pointer_move(cx + radius * 1.2, cy);
    assert!(!outside.visible);
}

#[test]
fn zero_value_slice_does_not_shadow_the_full_slice() {
    let dataset = dataset_from_json(
        r#"[
            {"channel": "Fax", "share": 0},
            {"channel": "Direct", "share": 5}
        ]"#,
    )
    .expect("dataset");
    let config = ChartConfig::default()
        .with_category("channel")
        .with_value("share");
    let mut engine = ChartEngine::new(RecordingSurface::new(), ChartEngineConfig::default())
        .expect("engine init");
    let elements = engine
        .render(&RenderRequest::new(
            &dataset,
            &config,
            ChartType::Pie,
            Viewport::new(640, 360),
        ))
        .to_vec();
    let HitShape::Slice { cx, cy, radius, .. } = elements[0].shape else {
        panic!("expected slice");
    };

    // 12 o'clock lies on the empty slice's ray
    let hover = engine.pointer_move(cx, cy - radius * 0.5);
    assert!(hover.visible);
    assert_eq!(hover.label, "Direct");
    assert_eq!(hover.formatted_value, "5 (100.0%)");
}
