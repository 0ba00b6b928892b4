use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::charts::ChartTheme;
use crate::charts::common::{
    VALUE_GRID_INTERVALS, draw_horizontal_gridlines, draw_point_marker, fill_rounded_bar,
    label_stride, stroke_polyline, text_style,
};
use crate::core::layout::{BandLayout, CLUSTER_GROUP_RATIO};
use crate::core::scale::{VALUE_AXIS_HEADROOM, max_value, min_value};
use crate::core::{
    LinearScale, Padding, PlotRect, Row, Viewport, cell_number, cell_text, clamp_denominator,
    format_currency, truncate_label,
};
use crate::error::ChartError;
use crate::interaction::HitTestElement;
use crate::render::{CornerRadii, DrawingSurface, StrokeStyle, TextBaseline, TextHAlign};

const CASH_FLOW_PADDING: Padding = Padding::new(30.0, 20.0, 60.0, 70.0);
const MONTH_LABEL_CHARS: usize = 10;
const MIN_MONTH_LABEL_SPACING_PX: f64 = 56.0;
const LEGEND_SWATCH_PX: f64 = 10.0;

/// Which slice of the month series a cash-flow widget shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeWindow {
    /// Latest month only.
    Last30Days,
    /// Latest three months.
    Last90Days,
    /// Months whose corrected year is the current calendar year.
    YearToDate,
    #[default]
    All,
}

impl TimeWindow {
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Last30Days => "30d",
            Self::Last90Days => "90d",
            Self::YearToDate => "ytd",
            Self::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for TimeWindow {
    type Err = ChartError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "30d" => Ok(Self::Last30Days),
            "90d" => Ok(Self::Last90Days),
            "ytd" => Ok(Self::YearToDate),
            "all" => Ok(Self::All),
            other => Err(ChartError::InvalidConfig(format!(
                "unknown time window `{other}` (expected 30d, 90d, ytd or all)"
            ))),
        }
    }
}

impl TryFrom<String> for TimeWindow {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeWindow> for String {
    fn from(value: TimeWindow) -> Self {
        value.tag().to_owned()
    }
}

/// Parses `"<Mon> <Year>"` (`"Dec 2025"`, `"december 2025"`).
#[must_use]
pub fn parse_month_label(label: &str) -> Option<(Month, i32)> {
    let mut parts = label.split_whitespace();
    let month = parts.next()?.parse::<Month>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((month, year))
}

/// Moves a month label that lies after the current month back by one year.
/// Labels not shaped like `"<Mon> <Year>"` are returned unchanged.
///
/// Only a single year is ever subtracted, so labels more than a year in the
/// future stay in the future.
#[must_use]
pub fn correct_month_label(label: &str, today: NaiveDate) -> String {
    let Some((month, year)) = parse_month_label(label) else {
        return label.to_owned();
    };
    let current = (today.year(), today.month());
    if (year, month.number_from_month()) <= current {
        return label.to_owned();
    }
    let month_token = label.split_whitespace().next().unwrap_or_default();
    let corrected = format!("{month_token} {}", year - 1);
    debug!(original = label, corrected = %corrected, "year rollover correction");
    corrected
}

/// Column names read by the cash-flow widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashFlowColumns {
    pub month: String,
    pub inflow: String,
    pub outflow: String,
}

impl Default for CashFlowColumns {
    fn default() -> Self {
        Self {
            month: "month".to_owned(),
            inflow: "inflow".to_owned(),
            outflow: "outflow".to_owned(),
        }
    }
}

/// One month after year correction.
#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowMonth {
    pub label: String,
    pub year: Option<i32>,
    pub inflow: f64,
    /// Stored as a magnitude; sign in the source cell is ignored.
    pub outflow: f64,
}

impl CashFlowMonth {
    #[must_use]
    pub fn net(&self) -> f64 {
        self.inflow - self.outflow
    }
}

/// Reads months in row order and applies the year-rollover correction.
#[must_use]
pub fn cash_flow_months(
    dataset: &[Row],
    columns: &CashFlowColumns,
    today: NaiveDate,
) -> Vec<CashFlowMonth> {
    dataset
        .iter()
        .map(|row| {
            let label = correct_month_label(&cell_text(row.get(&columns.month)), today);
            let year = parse_month_label(&label).map(|(_, year)| year);
            CashFlowMonth {
                label,
                year,
                inflow: cell_number(row.get(&columns.inflow)),
                outflow: cell_number(row.get(&columns.outflow)).abs(),
            }
        })
        .collect()
}

/// Applies `window` to months already in chronological order.
#[must_use]
pub fn apply_time_window(
    months: Vec<CashFlowMonth>,
    window: TimeWindow,
    today: NaiveDate,
) -> Vec<CashFlowMonth> {
    let keep_last = |months: Vec<CashFlowMonth>, count: usize| -> Vec<CashFlowMonth> {
        let skip = months.len().saturating_sub(count);
        months.into_iter().skip(skip).collect()
    };
    match window {
        TimeWindow::Last30Days => keep_last(months, 1),
        TimeWindow::Last90Days => keep_last(months, 3),
        TimeWindow::YearToDate => months
            .into_iter()
            .filter(|month| month.year == Some(today.year()))
            .collect(),
        TimeWindow::All => months,
    }
}

/// Monthly inflow/outflow bars with a net-flow line.
///
/// Each month contributes three hit-test elements in order: inflow bar,
/// outflow bar, net point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CashFlowWidget {
    pub columns: CashFlowColumns,
    pub window: TimeWindow,
}

impl CashFlowWidget {
    #[must_use]
    pub fn new(window: TimeWindow) -> Self {
        Self {
            columns: CashFlowColumns::default(),
            window,
        }
    }

    #[must_use]
    pub fn with_columns(mut self, columns: CashFlowColumns) -> Self {
        self.columns = columns;
        self
    }

    /// Corrected and windowed months, as they would be drawn.
    #[must_use]
    pub fn months(&self, dataset: &[Row], today: NaiveDate) -> Vec<CashFlowMonth> {
        apply_time_window(cash_flow_months(dataset, &self.columns, today), self.window, today)
    }

    /// Full clear-and-redraw. `today` drives year correction and `ytd`.
    pub fn draw(
        &self,
        surface: &mut dyn DrawingSurface,
        dataset: &[Row],
        viewport: Viewport,
        theme: &ChartTheme,
        today: NaiveDate,
    ) -> Vec<HitTestElement> {
        surface.clear(viewport.width_px(), viewport.height_px(), theme.background);
        if !viewport.is_valid() {
            return Vec::new();
        }
        let months = self.months(dataset, today);
        if months.is_empty() {
            debug!(window = %self.window, rows = dataset.len(), "skip cash-flow render: no months");
            return Vec::new();
        }

        let plot = PlotRect::from_padding(viewport, CASH_FLOW_PADDING);
        let scale = value_scale(&months, plot);
        draw_horizontal_gridlines(surface, theme, plot, scale, VALUE_GRID_INTERVALS);
        let zero_y = scale.map(0.0);

        let bands = BandLayout::new(plot.x, plot.width, months.len());
        let bar_width = bands.bar_width(CLUSTER_GROUP_RATIO) / 2.0;
        let radii = CornerRadii::top(theme.bar_corner_radius);
        let symbol = theme.currency_symbol.as_str();

        let mut elements = Vec::with_capacity(months.len() * 3);
        let mut net_points = Vec::with_capacity(months.len());
        for (index, month) in months.iter().enumerate() {
            let start = bands.bar_start(index, CLUSTER_GROUP_RATIO);
            for (offset, amount, color, kind) in [
                (0.0, month.inflow, theme.inflow, "Inflow"),
                (bar_width, month.outflow, theme.outflow, "Outflow"),
            ] {
                let height = (zero_y - scale.map(amount.max(0.0))).max(0.0);
                let x = start + offset;
                fill_rounded_bar(surface, x, zero_y - height, bar_width, height, radii, color);
                elements.push(HitTestElement::bar(
                    x,
                    zero_y - height,
                    bar_width,
                    height,
                    format!("{} {kind}", month.label),
                    format_currency(amount, symbol),
                ));
            }
            let point = (bands.slot_center(index), scale.map(month.net()));
            net_points.push(point);
            elements.push(HitTestElement::point(
                point.0,
                point.1,
                format!("{} Net", month.label),
                format_currency(month.net(), symbol),
            ));
        }

        stroke_polyline(
            surface,
            &net_points,
            StrokeStyle::rounded(theme.line_width, theme.net_flow),
        );
        for (x, y) in &net_points {
            draw_point_marker(surface, theme, *x, *y, theme.net_flow);
        }
        draw_month_labels(surface, theme, &months, bands, plot);
        draw_legend(surface, theme, plot);

        trace!(months = months.len(), elements = elements.len(), "cash-flow render finished");
        elements
    }
}

/// Value axis spanning every inflow, outflow and net value, always
/// including zero.
fn value_scale(months: &[CashFlowMonth], plot: PlotRect) -> LinearScale {
    let values: Vec<f64> = months
        .iter()
        .flat_map(|month| [month.inflow, month.outflow, month.net()])
        .collect();
    let high = clamp_denominator(max_value(&values).unwrap_or(0.0) * VALUE_AXIS_HEADROOM);
    let low = min_value(&values).unwrap_or(0.0).min(0.0) * VALUE_AXIS_HEADROOM;
    LinearScale::new((low, high), (plot.bottom(), plot.y))
}

fn draw_month_labels(
    surface: &mut dyn DrawingSurface,
    theme: &ChartTheme,
    months: &[CashFlowMonth],
    bands: BandLayout,
    plot: PlotRect,
) {
    let max_labels = (plot.width / MIN_MONTH_LABEL_SPACING_PX).floor() as usize;
    let stride = label_stride(months.len(), max_labels.max(1));
    let style = text_style(theme.label_font_px, theme.muted_text)
        .aligned(TextHAlign::Center)
        .with_baseline(TextBaseline::Top);
    for (index, month) in months.iter().enumerate().step_by(stride) {
        surface.fill_text(
            &truncate_label(&month.label, MONTH_LABEL_CHARS),
            bands.slot_center(index),
            plot.bottom() + 8.0,
            &style,
        );
    }
}

fn draw_legend(surface: &mut dyn DrawingSurface, theme: &ChartTheme, plot: PlotRect) {
    let style = text_style(theme.legend_font_px, theme.text).with_baseline(TextBaseline::Middle);
    let y = plot.bottom() + 40.0;
    let mut x = plot.x;
    for (name, color) in [
        ("Inflow", theme.inflow),
        ("Outflow", theme.outflow),
        ("Net", theme.net_flow),
    ] {
        surface.fill_rect(x, y - LEGEND_SWATCH_PX / 2.0, LEGEND_SWATCH_PX, LEGEND_SWATCH_PX, color);
        let text_x = x + LEGEND_SWATCH_PX + 4.0;
        surface.fill_text(name, text_x, y, &style);
        x = text_x + surface.measure_text(name, style.font) + 16.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn april_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 15).expect("valid date")
    }

    #[test]
    fn future_month_rolls_back_one_year() {
        assert_eq!(correct_month_label("Dec 2026", april_2025()), "Dec 2025");
        assert_eq!(correct_month_label("Jan 2025", april_2025()), "Jan 2025");
        assert_eq!(correct_month_label("Apr 2025", april_2025()), "Apr 2025");
        assert_eq!(correct_month_label("May 2025", april_2025()), "May 2024");
        assert_eq!(correct_month_label("Q1 2025", april_2025()), "Q1 2025");
    }

    #[test]
    fn window_tags_parse() {
        assert_eq!("30d".parse::<TimeWindow>().expect("30d"), TimeWindow::Last30Days);
        assert_eq!(" YTD ".parse::<TimeWindow>().expect("ytd"), TimeWindow::YearToDate);
        assert!("7d".parse::<TimeWindow>().is_err());
    }
}
