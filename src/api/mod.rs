//! Host-facing facade: the per-chart engine, its config and JSON contracts.

mod engine;
mod engine_config;
mod json_contract;
mod plugin_dispatch;
mod plugin_registry;

pub use engine::{ChartEngine, RenderRequest};
pub use engine_config::ChartEngineConfig;
pub use json_contract::{ChartPayload, HIT_TEST_SNAPSHOT_JSON_SCHEMA_V1, HitTestSnapshot};
