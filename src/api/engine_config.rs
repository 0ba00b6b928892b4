use serde::{Deserialize, Serialize};

use crate::charts::ChartTheme;
use crate::error::{ChartError, ChartResult};
use crate::interaction::DEFAULT_POINT_TOLERANCE_PX;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    #[serde(default)]
    pub theme: ChartTheme,
    /// Per-axis pointer tolerance for point elements.
    #[serde(default = "default_hit_tolerance_px")]
    pub hit_tolerance_px: f64,
    /// Hide the tooltip whenever the hit-test list is rebuilt.
    #[serde(default = "default_clear_tooltip_on_render")]
    pub clear_tooltip_on_render: bool,
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self {
            theme: ChartTheme::default(),
            hit_tolerance_px: default_hit_tolerance_px(),
            clear_tooltip_on_render: default_clear_tooltip_on_render(),
        }
    }
}

impl ChartEngineConfig {
    #[must_use]
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_hit_tolerance_px(mut self, tolerance_px: f64) -> Self {
        self.hit_tolerance_px = tolerance_px;
        self
    }

    #[must_use]
    pub fn with_clear_tooltip_on_render(mut self, clear: bool) -> Self {
        self.clear_tooltip_on_render = clear;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.hit_tolerance_px.is_finite() || self.hit_tolerance_px <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "hit tolerance must be finite and > 0, got {}",
                self.hit_tolerance_px
            )));
        }
        self.theme.validate()
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Parses and validates config from JSON. Missing fields take defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_hit_tolerance_px() -> f64 {
    DEFAULT_POINT_TOLERANCE_PX
}

fn default_clear_tooltip_on_render() -> bool {
    true
}
