use dashboard_charts::core::{
    format_currency, format_percentage, format_value, truncate_label, vertical_bar_label_budget,
};

#[test]
fn abbreviates_by_magnitude() {
    assert_eq!(format_value(1_234_567_890.0), "1.2B");
    assert_eq!(format_value(2_500.0), "3K");
    assert_eq!(format_value(42.0), "42");
    assert_eq!(format_value(999.4), "999");
    assert_eq!(format_value(1_000_000.0), "1.0M");
    assert_eq!(format_value(-3_460_000.0), "-3.5M");
    assert_eq!(format_value(-12_400.0), "-12K");
}

#[test]
fn non_finite_values_format_as_zero() {
    assert_eq!(format_value(f64::NAN), "0");
    assert_eq!(format_value(f64::INFINITY), "0");
    assert_eq!(format_value(-0.2), "0");
}

#[test]
fn currency_and_percentage_text() {
    assert_eq!(format_currency(2_000_000_000.0, "₹"), "₹2.0B");
    assert_eq!(format_currency(-1_500.0, "$"), "-$2K");
    assert_eq!(format_percentage(50.0), "50.0%");
    assert_eq!(format_percentage(33.333), "33.3%");
}

#[test]
fn truncation_appends_ellipsis_within_budget() {
    assert_eq!(truncate_label("Revenue", 20), "Revenue");
    assert_eq!(truncate_label("Quarterly Revenue Growth", 10), "Quarterly…");
    assert_eq!(truncate_label("Quarterly Revenue Growth", 10).chars().count(), 10);
    assert_eq!(truncate_label("Café au lait", 5), "Café…");
}

#[test]
fn vertical_label_budget_tracks_slot_width() {
    assert_eq!(vertical_bar_label_budget(100.0), 20);
    assert_eq!(vertical_bar_label_budget(12.0), 8);
    assert_eq!(vertical_bar_label_budget(f64::NAN), 8);
}
