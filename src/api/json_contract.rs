use serde::{Deserialize, Serialize};

use crate::core::{ChartConfig, ChartType, Dataset, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::HitTestElement;
use crate::render::DrawingSurface;

use super::{ChartEngine, RenderRequest};

pub const HIT_TEST_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Render input as exchanged with the dashboard: rows, loose config, chart
/// tag and optional title. Unknown chart tags read as vertical bars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    #[serde(default)]
    pub dataset: Dataset,
    #[serde(default, alias = "chartConfig")]
    pub chart_config: ChartConfig,
    #[serde(default, alias = "chartType")]
    pub chart_type: ChartType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<Viewport>,
}

impl ChartPayload {
    /// Parses a payload; a `canvas` entry, when present, must be non-empty.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let payload: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart payload: {e}")))?;
        if let Some(canvas) = payload.canvas {
            canvas.validate()?;
        }
        Ok(payload)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart payload: {e}")))
    }

    /// Borrows the payload as a render request on `viewport`.
    #[must_use]
    pub fn request(&self, viewport: Viewport) -> RenderRequest<'_> {
        RenderRequest {
            dataset: &self.dataset,
            config: &self.chart_config,
            chart_type: self.chart_type,
            title: self.title.as_deref(),
            viewport,
        }
    }
}

/// Versioned hit-test list of the last render, for diffing and tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitTestSnapshot {
    pub schema_version: u32,
    pub chart_type: Option<ChartType>,
    pub canvas: Viewport,
    pub elements: Vec<HitTestElement>,
}

impl HitTestSnapshot {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize hit-test snapshot: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let snapshot: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse hit-test snapshot: {e}"))
        })?;
        if snapshot.schema_version != HIT_TEST_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported hit-test snapshot schema version: {}",
                snapshot.schema_version
            )));
        }
        Ok(snapshot)
    }
}

impl<S: DrawingSurface> ChartEngine<S> {
    #[must_use]
    pub fn hit_test_snapshot(&self) -> HitTestSnapshot {
        HitTestSnapshot {
            schema_version: HIT_TEST_SNAPSHOT_JSON_SCHEMA_V1,
            chart_type: self.last_chart_type,
            canvas: self.viewport,
            elements: self.controller.elements().to_vec(),
        }
    }

    pub fn hit_test_snapshot_json_pretty(&self) -> ChartResult<String> {
        self.hit_test_snapshot().to_json_pretty()
    }
}
