//! Value and label text used for tick labels, bar annotations and tooltips.

pub const ELLIPSIS: char = '…';

/// Minimum character budget for vertical-bar category labels.
pub const MIN_VERTICAL_LABEL_CHARS: usize = 8;

/// Abbreviates a number with `K`/`M`/`B` suffixes.
///
/// - `|n| >= 1e9` → one decimal + `B`
/// - `|n| >= 1e6` → one decimal + `M`
/// - `|n| >= 1e3` → no decimals + `K`
/// - otherwise the rounded integer
///
/// Non-finite input is treated as `0`. Ties round away from zero, so
/// `2_500` formats as `"3K"`.
#[must_use]
pub fn format_value(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let magnitude = value.abs();
    if magnitude >= 1e9 {
        format!("{}B", fixed(value / 1e9, 1))
    } else if magnitude >= 1e6 {
        format!("{}M", fixed(value / 1e6, 1))
    } else if magnitude >= 1e3 {
        format!("{}K", fixed(value / 1e3, 0))
    } else {
        fixed(value, 0)
    }
}

/// Abbreviated amount prefixed with a currency symbol; the sign stays in front.
#[must_use]
pub fn format_currency(value: f64, symbol: &str) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    if value < 0.0 {
        format!("-{symbol}{}", format_value(-value))
    } else {
        format!("{symbol}{}", format_value(value))
    }
}

/// Percentage with one decimal, e.g. `50.0%`.
#[must_use]
pub fn format_percentage(percent: f64) -> String {
    let percent = if percent.is_finite() { percent } else { 0.0 };
    format!("{}%", fixed(percent, 1))
}

/// Cuts `text` to `max_chars` characters, replacing the tail with an
/// ellipsis. Budgets below two characters only keep the ellipsis.
#[must_use]
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_owned();
    }
    let keep = max_chars.saturating_sub(1);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push(ELLIPSIS);
    truncated
}

/// Character budget for a vertical-bar label given its slot width in pixels.
#[must_use]
pub fn vertical_bar_label_budget(slot_width_px: f64) -> usize {
    if !slot_width_px.is_finite() || slot_width_px <= 0.0 {
        return MIN_VERTICAL_LABEL_CHARS;
    }
    ((slot_width_px / 5.0).floor() as usize).max(MIN_VERTICAL_LABEL_CHARS)
}

/// Fixed-point text with half-away-from-zero rounding and no negative zero.
fn fixed(value: f64, decimals: i32) -> String {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor + 0.0;
    format!("{rounded:.prec$}", prec = decimals.max(0) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviates_by_magnitude() {
        assert_eq!(format_value(1_234_567_890.0), "1.2B");
        assert_eq!(format_value(2_500.0), "3K");
        assert_eq!(format_value(42.0), "42");
        assert_eq!(format_value(3_460_000.0), "3.5M");
        assert_eq!(format_value(-12_400.0), "-12K");
        assert_eq!(format_value(999.6), "1000");
        assert_eq!(format_value(f64::NAN), "0");
        assert_eq!(format_value(-0.2), "0");
    }

    #[test]
    fn currency_keeps_sign_before_symbol() {
        assert_eq!(format_currency(2e9, "₹"), "₹2.0B");
        assert_eq!(format_currency(-1_500_000.0, "$"), "-$1.5M");
    }

    #[test]
    fn percentage_uses_one_decimal() {
        assert_eq!(format_percentage(50.0), "50.0%");
        assert_eq!(format_percentage(33.333), "33.3%");
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate_label("Operations", 20), "Operations");
        assert_eq!(truncate_label("Northern Territories", 8), "Norther…");
        assert_eq!(truncate_label("abc", 0), "…");
    }

    #[test]
    fn vertical_budget_has_floor() {
        assert_eq!(vertical_bar_label_budget(20.0), 8);
        assert_eq!(vertical_bar_label_budget(100.0), 20);
        assert_eq!(vertical_bar_label_budget(f64::NAN), 8);
    }
}
