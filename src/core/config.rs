use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Closed set of chart kinds understood by the engine.
///
/// Parsing never fails: unrecognized tags map to [`ChartType::VerticalBar`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChartType {
    HorizontalBar,
    #[default]
    VerticalBar,
    StackedBar,
    Line,
    Area,
    Pareto,
    Pie,
    ClusteredBar,
    Funnel,
}

impl ChartType {
    pub const ALL: [ChartType; 9] = [
        ChartType::HorizontalBar,
        ChartType::VerticalBar,
        ChartType::StackedBar,
        ChartType::Line,
        ChartType::Area,
        ChartType::Pareto,
        ChartType::Pie,
        ChartType::ClusteredBar,
        ChartType::Funnel,
    ];

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::HorizontalBar => "horizontal_bar_chart",
            Self::VerticalBar => "vertical_bar_chart",
            Self::StackedBar => "stacked_bar_chart",
            Self::Line => "line_chart",
            Self::Area => "area_chart",
            Self::Pareto => "pareto_chart",
            Self::Pie => "pie_chart",
            Self::ClusteredBar => "clustered_bar_chart",
            Self::Funnel => "funnel_chart",
        }
    }

    /// Exact tag lookup; `None` for anything outside the enumeration.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag.trim())
    }

    /// Tag lookup with the vertical-bar fallback.
    #[must_use]
    pub fn parse_or_default(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or(Self::VerticalBar)
    }
}

impl FromStr for ChartType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_or_default(s))
    }
}

impl From<String> for ChartType {
    fn from(value: String) -> Self {
        Self::parse_or_default(&value)
    }
}

impl From<ChartType> for String {
    fn from(value: ChartType) -> Self {
        value.tag().to_owned()
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// `y_axis_col_name` accepts either a single column or a list (first wins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSelection {
    One(String),
    Many(Vec<String>),
}

impl ColumnSelection {
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(name) => Some(name.as_str()),
            Self::Many(names) => names.first().map(String::as_str),
        }
    }
}

/// Loosely-typed description of which columns play which visual role.
///
/// Every field is optional; missing fields are filled by the column resolver.
/// Unknown keys in incoming JSON are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis_col_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_col_name: Option<ColumnSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_col_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_col_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stages_col_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ChartConfig {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse chart config: {e}")))
    }

    #[must_use]
    pub fn with_x_axis(mut self, column: impl Into<String>) -> Self {
        self.x_axis_col_name = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, column: impl Into<String>) -> Self {
        self.y_axis_col_name = Some(ColumnSelection::One(column.into()));
        self
    }

    #[must_use]
    pub fn with_category(mut self, column: impl Into<String>) -> Self {
        self.category_col_name = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, column: impl Into<String>) -> Self {
        self.value_col_name = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_cluster_by(mut self, column: impl Into<String>) -> Self {
        self.cluster_by = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_stages(mut self, column: impl Into<String>) -> Self {
        self.stages_col_name = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_cumulative_line(mut self, column: impl Into<String>) -> Self {
        self.cumulative_line = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// First configured y column, ignoring blank names.
    #[must_use]
    pub fn y_axis_column(&self) -> Option<&str> {
        self.y_axis_col_name
            .as_ref()
            .and_then(ColumnSelection::first)
            .filter(|name| !name.trim().is_empty())
    }
}
