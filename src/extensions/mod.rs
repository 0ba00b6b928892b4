//! Observer hooks for hosts that react to renders, hovers and clicks.

pub mod plugins;

pub use plugins::{ChartEvent, ChartPlugin, PluginContext};
