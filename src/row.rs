//! Tabular row representation and coordinate field access.

use std::ops::RangeInclusive;

use serde_json::Value as Json;

use crate::error::{Error, Result};

/// A single tabular record: named fields carrying JSON values.
///
/// Stands in for one row of whatever table the caller holds. Annotation only
/// ever reads the two coordinate fields and writes the label field; everything
/// else passes through untouched.
pub type Row = serde_json::Map<String, Json>;

/// Read a named numeric field from a row, enforcing presence, numeric type,
/// finiteness and the valid coordinate range.
pub(crate) fn numeric_field(
    row: &Row,
    field: &str,
    row_idx: usize,
    range: RangeInclusive<f64>,
) -> Result<f64> {
    let value = row.get(field).ok_or_else(|| Error::InvalidCoordinate {
        row: row_idx,
        field: field.to_string(),
        reason: "field is missing".to_string(),
    })?;

    let number = value.as_f64().ok_or_else(|| Error::InvalidCoordinate {
        row: row_idx,
        field: field.to_string(),
        reason: format!("expected a number, got {value}"),
    })?;

    if !number.is_finite() || !range.contains(&number) {
        return Err(Error::InvalidCoordinate {
            row: row_idx,
            field: field.to_string(),
            reason: format!("{number} outside valid range {range:?}"),
        });
    }

    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Json) -> Row {
        let mut row = Row::new();
        row.insert("lat".to_string(), value);
        row
    }

    #[test]
    fn reads_integer_and_float_fields() {
        let range = -90.0..=90.0;
        assert_eq!(
            numeric_field(&row(json!(45)), "lat", 0, range.clone()).unwrap(),
            45.0
        );
        assert_eq!(
            numeric_field(&row(json!(-12.5)), "lat", 0, range).unwrap(),
            -12.5
        );
    }

    #[test]
    fn missing_field_is_invalid() {
        let err = numeric_field(&Row::new(), "lat", 3, -90.0..=90.0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidCoordinate { row: 3, .. }
        ));
    }

    #[test]
    fn non_numeric_field_is_invalid() {
        for value in [json!("53.3"), json!(null), json!(true)] {
            let err = numeric_field(&row(value), "lat", 0, -90.0..=90.0).unwrap_err();
            assert!(matches!(err, Error::InvalidCoordinate { .. }));
        }
    }

    #[test]
    fn out_of_range_field_is_invalid() {
        let err = numeric_field(&row(json!(91.0)), "lat", 0, -90.0..=90.0).unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinate { .. }));
    }
}
