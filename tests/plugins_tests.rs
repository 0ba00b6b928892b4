use std::cell::RefCell;
use std::rc::Rc;

use dashboard_charts::ChartError;
use dashboard_charts::api::{ChartEngine, ChartEngineConfig, RenderRequest};
use dashboard_charts::core::{ChartConfig, ChartType, Viewport, dataset_from_json};
use dashboard_charts::extensions::{ChartEvent, ChartPlugin, PluginContext};
use dashboard_charts::interaction::HitShape;
use dashboard_charts::render::RecordingSurface;

#[derive(Clone)]
struct RecordingPlugin {
    id: String,
    events: Rc<RefCell<Vec<(ChartEvent, PluginContext)>>>,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, events: Rc<RefCell<Vec<(ChartEvent, PluginContext)>>>) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl ChartPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &ChartEvent, context: PluginContext) {
        self.events.borrow_mut().push((event.clone(), context));
    }
}

fn event_kind(event: &ChartEvent) -> &'static str {
    match event {
        ChartEvent::Rendered { .. } => "rendered",
        ChartEvent::Hover(_) => "hover",
        ChartEvent::PointerLeft => "pointer_leave",
        ChartEvent::ElementClicked(_) => "click",
    }
}

#[test]
fn plugin_receives_deterministic_event_sequence() {
    let dataset = dataset_from_json(
        r#"[{"stage": "Visited", "users": 900}, {"stage": "Signed up", "users": 300}]"#,
    )
    .expect("dataset");
    let config = ChartConfig::default();
    let mut engine = ChartEngine::new(RecordingSurface::new(), ChartEngineConfig::default())
        .expect("engine init");

    let events = Rc::new(RefCell::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    let elements = engine
        .render(&RenderRequest::new(
            &dataset,
            &config,
            ChartType::Funnel,
            Viewport::new(500, 400),
        ))
        .to_vec();
    let HitShape::Bar {
        x,
        y,
        width,
        height,
    } = elements[0].shape
    else {
        panic!("expected funnel stage bounds");
    };
    engine.pointer_move(x + width / 2.0, y + height / 2.0);
    engine.click(x + width / 2.0, y + height / 2.0);
    engine.click(-10.0, -10.0);
    engine.pointer_leave();

    let events = events.borrow();
    let kinds: Vec<&'static str> = events.iter().map(|(event, _)| event_kind(event)).collect();
    assert_eq!(
        kinds,
        vec!["rendered", "hover", "click", "hover", "pointer_leave"]
    );

    assert_eq!(events[0].0, ChartEvent::Rendered { element_count: 2 });
    assert_eq!(events[0].1.chart_type, Some(ChartType::Funnel));
    assert_eq!(events[0].1.element_count, 2);

    match &events[1].0 {
        ChartEvent::Hover(tooltip) => {
            assert!(tooltip.visible);
            assert_eq!(tooltip.label, "Visited");
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(events[1].1.tooltip_visible);

    match &events[2].0 {
        ChartEvent::ElementClicked(element) => assert_eq!(element.formatted_value, "900"),
        other => panic!("unexpected event {other:?}"),
    }
    assert!(!events[4].1.tooltip_visible);
}

#[test]
fn plugin_registration_rejects_empty_and_duplicate_ids() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut engine = ChartEngine::new(RecordingSurface::new(), ChartEngineConfig::default())
        .expect("engine init");

    let err = engine
        .register_plugin(Box::new(RecordingPlugin::new("", events.clone())))
        .expect_err("empty id must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));

    engine
        .register_plugin(Box::new(RecordingPlugin::new("drilldown", events.clone())))
        .expect("first registration");
    let err = engine
        .register_plugin(Box::new(RecordingPlugin::new("drilldown", events)))
        .expect_err("duplicate id must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));

    assert_eq!(engine.plugin_count(), 1);
    assert!(engine.has_plugin("drilldown"));
    assert!(engine.unregister_plugin("drilldown"));
    assert!(!engine.unregister_plugin("drilldown"));
    assert_eq!(engine.plugin_count(), 0);
}
