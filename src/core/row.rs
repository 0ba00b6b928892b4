use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

/// One tabular record. Column order is preserved because positional
/// fallbacks ("first column") depend on it.
pub type Row = IndexMap<String, Value>;

/// Ordered rows handed to the engine for a single render.
pub type Dataset = Vec<Row>;

/// Parses a JSON array of objects into a [`Dataset`], keeping column order.
pub fn dataset_from_json(input: &str) -> ChartResult<Dataset> {
    serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse dataset json: {e}")))
}

/// Numeric view of a cell with `Number(cell) || 0` semantics: anything that
/// does not coerce to a finite number becomes `0`.
#[must_use]
pub fn cell_number(cell: Option<&Value>) -> f64 {
    let raw = match cell {
        None | Some(Value::Null) => 0.0,
        Some(Value::Bool(flag)) => f64::from(u8::from(*flag)),
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => parse_numeric_text(text),
        Some(Value::Array(_) | Value::Object(_)) => 0.0,
    };
    if raw.is_finite() { raw } else { 0.0 }
}

fn parse_numeric_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(0.0)
}

/// Display text of a cell used for category labels.
#[must_use]
pub fn cell_text(cell: Option<&Value>) -> String {
    match cell {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => match number.as_f64() {
            Some(value) if value.fract() == 0.0 && value.abs() < 1e21 => format!("{value:.0}"),
            Some(value) => value.to_string(),
            None => number.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

/// Reads `column` from every row as a number.
#[must_use]
pub fn column_numbers(dataset: &[Row], column: Option<&str>) -> Vec<f64> {
    dataset
        .iter()
        .map(|row| cell_number(column.and_then(|name| row.get(name))))
        .collect()
}

/// Reads `column` from every row as display text.
#[must_use]
pub fn column_texts(dataset: &[Row], column: Option<&str>) -> Vec<String> {
    dataset
        .iter()
        .map(|row| cell_text(column.and_then(|name| row.get(name))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_like_a_numeric_cast() {
        assert_eq!(cell_number(Some(&json!(12.5))), 12.5);
        assert_eq!(cell_number(Some(&json!(" 42 "))), 42.0);
        assert_eq!(cell_number(Some(&json!("n/a"))), 0.0);
        assert_eq!(cell_number(Some(&json!(""))), 0.0);
        assert_eq!(cell_number(Some(&json!(true))), 1.0);
        assert_eq!(cell_number(Some(&Value::Null)), 0.0);
        assert_eq!(cell_number(None), 0.0);
        assert_eq!(cell_number(Some(&json!("NaN"))), 0.0);
    }

    #[test]
    fn renders_integral_numbers_without_fraction() {
        assert_eq!(cell_text(Some(&json!(2024.0))), "2024");
        assert_eq!(cell_text(Some(&json!(1.5))), "1.5");
        assert_eq!(cell_text(Some(&json!("North"))), "North");
        assert_eq!(cell_text(None), "");
    }

    #[test]
    fn renders_integral_numbers_beyond_i64_range() {
        assert_eq!(cell_text(Some(&json!(1e20))), "100000000000000000000");
        assert_eq!(cell_text(Some(&json!(-3e19))), "-30000000000000000000");
    }

    #[test]
    fn dataset_json_keeps_column_order() {
        let dataset = dataset_from_json(r#"[{"zeta": 1, "alpha": "a"}]"#).expect("dataset");
        let keys: Vec<&str> = dataset[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}
