use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Colors, fonts and sizes shared by every chart strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    /// Series colors, picked with `palette[i % palette.len()]`.
    pub palette: Vec<Color>,
    /// Aging bucket ramp, clamped to its last entry.
    pub aging_ramp: Vec<Color>,
    pub background: Color,
    pub text: Color,
    pub muted_text: Color,
    pub grid: Color,
    pub cumulative_line: Color,
    pub inflow: Color,
    pub outflow: Color,
    pub net_flow: Color,
    pub title_font_px: f64,
    pub label_font_px: f64,
    pub value_font_px: f64,
    pub legend_font_px: f64,
    pub bar_corner_radius: f64,
    pub line_width: f64,
    pub point_radius: f64,
    pub currency_symbol: String,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            palette: vec![
                Color::rgb8(0x3b, 0x82, 0xf6),
                Color::rgb8(0x10, 0xb9, 0x81),
                Color::rgb8(0xf5, 0x9e, 0x0b),
                Color::rgb8(0xef, 0x44, 0x44),
                Color::rgb8(0x8b, 0x5c, 0xf6),
                Color::rgb8(0xec, 0x48, 0x99),
                Color::rgb8(0x06, 0xb6, 0xd4),
                Color::rgb8(0x84, 0xcc, 0x16),
                Color::rgb8(0xf9, 0x73, 0x16),
                Color::rgb8(0x63, 0x66, 0xf1),
            ],
            aging_ramp: vec![
                Color::rgb8(0x10, 0xb9, 0x81),
                Color::rgb8(0x84, 0xcc, 0x16),
                Color::rgb8(0xea, 0xb3, 0x08),
                Color::rgb8(0xf9, 0x73, 0x16),
                Color::rgb8(0xef, 0x44, 0x44),
                Color::rgb8(0x99, 0x1b, 0x1b),
            ],
            background: Color::rgb(1.0, 1.0, 1.0),
            text: Color::rgb8(0x1f, 0x29, 0x37),
            muted_text: Color::rgb8(0x6b, 0x72, 0x80),
            grid: Color::rgb8(0x9c, 0xa3, 0xaf).with_alpha(0.25),
            cumulative_line: Color::rgb8(0xdc, 0x26, 0x26),
            inflow: Color::rgb8(0x10, 0xb9, 0x81),
            outflow: Color::rgb8(0xef, 0x44, 0x44),
            net_flow: Color::rgb8(0x3b, 0x82, 0xf6),
            title_font_px: 16.0,
            label_font_px: 11.0,
            value_font_px: 11.0,
            legend_font_px: 12.0,
            bar_corner_radius: 4.0,
            line_width: 2.5,
            point_radius: 4.0,
            currency_symbol: "₹".to_owned(),
        }
    }
}

const FALLBACK_SERIES_COLOR: Color = Color::rgb(0.23, 0.51, 0.96);

impl ChartTheme {
    #[must_use]
    pub fn series_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return FALLBACK_SERIES_COLOR;
        }
        self.palette[index % self.palette.len()]
    }

    #[must_use]
    pub fn ramp_color(&self, index: usize) -> Color {
        match self.aging_ramp.len() {
            0 => self.series_color(index),
            len => self.aging_ramp[index.min(len - 1)],
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.palette.is_empty() {
            return Err(ChartError::InvalidConfig(
                "theme palette must not be empty".to_owned(),
            ));
        }
        if self.aging_ramp.is_empty() {
            return Err(ChartError::InvalidConfig(
                "theme aging ramp must not be empty".to_owned(),
            ));
        }
        for (name, value) in [
            ("title_font_px", self.title_font_px),
            ("label_font_px", self.label_font_px),
            ("value_font_px", self.value_font_px),
            ("legend_font_px", self.legend_font_px),
            ("line_width", self.line_width),
            ("point_radius", self.point_radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "theme `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.bar_corner_radius.is_finite() || self.bar_corner_radius < 0.0 {
            return Err(ChartError::InvalidConfig(
                "theme `bar_corner_radius` must be finite and >= 0".to_owned(),
            ));
        }
        for color in self.palette.iter().chain(&self.aging_ramp).chain([
            &self.background,
            &self.text,
            &self.muted_text,
            &self.grid,
            &self.cumulative_line,
            &self.inflow,
            &self.outflow,
            &self.net_flow,
        ]) {
            color
                .validate()
                .map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
        }
        Ok(())
    }
}
