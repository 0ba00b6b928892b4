//! dashboard-charts: a charting engine for analytics dashboards.
//!
//! Turns tabular rows plus a loosely-typed chart configuration into drawing
//! calls on an abstract 2D surface for nine chart kinds, and keeps a
//! hit-test list per chart for pointer tooltips. Two specialized widgets
//! (cash flow, receivables aging) reuse the same primitives.

pub mod api;
pub mod charts;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;
pub mod widgets;

pub use api::{ChartEngine, ChartEngineConfig, ChartPayload, RenderRequest};
pub use error::{ChartError, ChartResult};
