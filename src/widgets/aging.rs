use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::charts::ChartTheme;
use crate::charts::common::{
    HORIZONTAL_GRID_INTERVALS, draw_vertical_gridlines, fill_rounded_bar, text_style,
};
use crate::core::layout::{BandLayout, HORIZONTAL_BAR_RATIO, dynamic_left_padding};
use crate::core::{
    LinearScale, Padding, PlotRect, Row, Viewport, cell_number, cell_text, format_currency,
    format_percentage, value_axis_max,
};
use crate::interaction::HitTestElement;
use crate::render::{CornerRadii, DrawingSurface, FontSpec, TextBaseline, TextHAlign};

const AGING_PADDING: Padding = Padding::new(20.0, 110.0, 30.0, 60.0);
const LABEL_GAP_PX: f64 = 8.0;
const VALUE_GAP_PX: f64 = 6.0;

/// Column names read by the aging widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgingColumns {
    pub bucket: String,
    pub amount: String,
}

impl Default for AgingColumns {
    fn default() -> Self {
        Self {
            bucket: "bucket".to_owned(),
            amount: "amount_inr".to_owned(),
        }
    }
}

/// One aggregated bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct AgingBucket {
    /// Source label, used for ordering (`"1. 0-30"`).
    pub key: String,
    /// Display label with the ordinal prefix removed (`"0-30"`).
    pub label: String,
    pub amount: Decimal,
    /// Share of the grand total in percent; `0` when the total is zero.
    pub percent: f64,
}

impl AgingBucket {
    #[must_use]
    pub fn amount_f64(&self) -> f64 {
        self.amount.to_f64().unwrap_or(0.0)
    }
}

/// Removes a leading `"<digits>. "` ordinal.
#[must_use]
pub fn strip_ordinal_prefix(label: &str) -> &str {
    let trimmed = label.trim_start();
    match trimmed.split_once(". ") {
        Some((head, rest)) if !head.is_empty() && head.chars().all(|c| c.is_ascii_digit()) => {
            rest
        }
        _ => label,
    }
}

fn decimal_amount(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Groups rows by bucket, sums amounts exactly and sorts buckets by their
/// source label.
#[must_use]
pub fn aggregate_buckets(dataset: &[Row], columns: &AgingColumns) -> Vec<AgingBucket> {
    let mut sums: IndexMap<String, Decimal> = IndexMap::new();
    for row in dataset {
        let key = cell_text(row.get(&columns.bucket));
        let amount = decimal_amount(cell_number(row.get(&columns.amount)));
        *sums.entry(key).or_insert(Decimal::ZERO) += amount;
    }
    sums.sort_keys();

    let total: Decimal = sums.values().copied().sum();
    sums.into_iter()
        .map(|(key, amount)| {
            let percent = if total.is_zero() {
                0.0
            } else {
                (amount / total * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0)
            };
            AgingBucket {
                label: strip_ordinal_prefix(&key).to_owned(),
                key,
                amount,
                percent,
            }
        })
        .collect()
}

/// Receivables aging: one horizontal bar per bucket, colored along the
/// theme's aging ramp by sorted position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgingWidget {
    pub columns: AgingColumns,
}

impl AgingWidget {
    #[must_use]
    pub fn new(columns: AgingColumns) -> Self {
        Self { columns }
    }

    #[must_use]
    pub fn buckets(&self, dataset: &[Row]) -> Vec<AgingBucket> {
        aggregate_buckets(dataset, &self.columns)
    }

    /// Full clear-and-redraw; returns one bar element per bucket.
    pub fn draw(
        &self,
        surface: &mut dyn DrawingSurface,
        dataset: &[Row],
        viewport: Viewport,
        theme: &ChartTheme,
    ) -> Vec<HitTestElement> {
        surface.clear(viewport.width_px(), viewport.height_px(), theme.background);
        if !viewport.is_valid() || dataset.is_empty() {
            debug!(rows = dataset.len(), "skip aging render");
            return Vec::new();
        }
        let buckets = self.buckets(dataset);

        let font = FontSpec::regular(theme.label_font_px);
        let longest = buckets
            .iter()
            .map(|bucket| OrderedFloat(surface.measure_text(&bucket.label, font)))
            .max()
            .map_or(0.0, OrderedFloat::into_inner);
        let mut padding = AGING_PADDING;
        padding.left = dynamic_left_padding(longest, viewport);
        let plot = PlotRect::from_padding(viewport, padding);

        let amounts: Vec<f64> = buckets.iter().map(AgingBucket::amount_f64).collect();
        let max = value_axis_max(&amounts);
        let scale = LinearScale::new((0.0, max), (plot.x, plot.right()));
        draw_vertical_gridlines(surface, theme, plot, scale, HORIZONTAL_GRID_INTERVALS);

        let bands = BandLayout::new(plot.y, plot.height, buckets.len());
        let bar_height = bands.bar_width(HORIZONTAL_BAR_RATIO);
        let radii = CornerRadii::right(theme.bar_corner_radius);
        let label_style = text_style(theme.label_font_px, theme.text)
            .aligned(TextHAlign::Right)
            .with_baseline(TextBaseline::Middle);
        let value_style = text_style(theme.value_font_px, theme.muted_text)
            .with_baseline(TextBaseline::Middle);

        let mut elements = Vec::with_capacity(buckets.len());
        for (index, (bucket, amount)) in buckets.iter().zip(&amounts).enumerate() {
            let length = amount.max(0.0) / max * plot.width;
            let y = bands.bar_start(index, HORIZONTAL_BAR_RATIO);
            let center_y = bands.slot_center(index);
            let formatted = format!(
                "{} ({})",
                format_currency(*amount, &theme.currency_symbol),
                format_percentage(bucket.percent)
            );

            fill_rounded_bar(
                surface,
                plot.x,
                y,
                length,
                bar_height,
                radii,
                theme.ramp_color(index),
            );
            surface.fill_text(&bucket.label, plot.x - LABEL_GAP_PX, center_y, &label_style);
            surface.fill_text(&formatted, plot.x + length + VALUE_GAP_PX, center_y, &value_style);
            elements.push(HitTestElement::bar(
                plot.x,
                y,
                length,
                bar_height,
                bucket.label.clone(),
                formatted,
            ));
        }
        trace!(buckets = buckets.len(), "aging render finished");
        elements
    }
}
