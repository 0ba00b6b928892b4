use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Headroom applied above the largest value on a value axis.
pub const VALUE_AXIS_HEADROOM: f64 = 1.1;

/// Linear map from a data domain to a pixel range.
///
/// The range may be inverted (`range_start > range_end`) for y axes that grow
/// upwards. A zero-width or non-finite domain is widened to a span of `1` so
/// mapping never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let domain_start = finite_or_zero(domain.0);
        let mut domain_end = finite_or_zero(domain.1);
        if domain_end == domain_start {
            domain_end = domain_start + 1.0;
        }
        Self {
            domain_start,
            domain_end,
            range_start: finite_or_zero(range.0),
            range_end: finite_or_zero(range.1),
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let value = finite_or_zero(value);
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 || !pixel.is_finite() {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Evenly spaced domain values from start to end, inclusive.
    #[must_use]
    pub fn ticks(self, intervals: usize) -> Vec<f64> {
        let intervals = intervals.max(1);
        (0..=intervals)
            .map(|i| {
                self.domain_start
                    + (self.domain_end - self.domain_start) * (i as f64 / intervals as f64)
            })
            .collect()
    }
}

/// Value-axis maximum: `max(values) * 1.1`, clamped to at least `1`.
#[must_use]
pub fn value_axis_max(values: &[f64]) -> f64 {
    let peak = max_value(values).unwrap_or(0.0);
    clamp_denominator(peak * VALUE_AXIS_HEADROOM)
}

/// Line/area y domain `[min * 0.9, max * 1.1]`.
#[must_use]
pub fn line_domain(values: &[f64]) -> (f64, f64) {
    let low = min_value(values).unwrap_or(0.0) * 0.9;
    let high = max_value(values).unwrap_or(0.0) * VALUE_AXIS_HEADROOM;
    if high > low { (low, high) } else { (low, low + 1.0) }
}

/// Replaces zero, negative-or-tiny and `NaN` denominators with `1`.
#[must_use]
pub fn clamp_denominator(value: f64) -> f64 {
    if value >= 1.0 { value } else { 1.0 }
}

#[must_use]
pub fn max_value(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .map(OrderedFloat)
        .max()
        .map(OrderedFloat::into_inner)
}

#[must_use]
pub fn min_value(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .map(OrderedFloat)
        .min()
        .map(OrderedFloat::into_inner)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_and_inverts_on_flipped_range() {
        let scale = LinearScale::new((0.0, 100.0), (400.0, 0.0));
        assert_eq!(scale.map(0.0), 400.0);
        assert_eq!(scale.map(100.0), 0.0);
        assert_eq!(scale.map(25.0), 300.0);
        assert_eq!(scale.invert(300.0), 25.0);
    }

    #[test]
    fn degenerate_domain_is_widened() {
        let scale = LinearScale::new((5.0, 5.0), (0.0, 10.0));
        assert_eq!(scale.domain(), (5.0, 6.0));
        assert!(scale.map(5.5).is_finite());
    }

    #[test]
    fn value_axis_max_clamps_to_one() {
        assert_eq!(value_axis_max(&[0.0, 0.0]), 1.0);
        assert_eq!(value_axis_max(&[]), 1.0);
        assert_eq!(value_axis_max(&[f64::NAN]), 1.0);
        assert!((value_axis_max(&[100.0, 50.0]) - 110.0).abs() < 1e-9);
    }

    #[test]
    fn line_domain_adds_margins() {
        let (low, high) = line_domain(&[10.0, 20.0]);
        assert!((low - 9.0).abs() < 1e-9);
        assert!((high - 22.0).abs() < 1e-9);
        assert_eq!(line_domain(&[0.0, 0.0]), (0.0, 1.0));
    }
}
