//! Polars value and dtype helpers.
//!
//! Datasets reach the test adapters as Polars `DataFrame`s. These helpers
//! decide which dtypes count as numeric, turn cells into `f64` samples
//! (treating null and NaN as missing), and render grouping values as
//! labels that can be matched against user-supplied strings.

use polars::prelude::{AnyValue, DataType};

/// Returns true for integer and floating-point dtypes.
///
/// Booleans, strings, dates and categoricals are not numeric samples.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Converts a numeric cell to `f64`.
///
/// Returns `None` for null, NaN, and non-numeric values; callers count
/// those as missing observations.
pub fn numeric_value(value: AnyValue<'_>) -> Option<f64> {
    let number = match value {
        AnyValue::Int8(v) => f64::from(v),
        AnyValue::Int16(v) => f64::from(v),
        AnyValue::Int32(v) => f64::from(v),
        AnyValue::Int64(v) => v as f64,
        AnyValue::UInt8(v) => f64::from(v),
        AnyValue::UInt16(v) => f64::from(v),
        AnyValue::UInt32(v) => f64::from(v),
        AnyValue::UInt64(v) => v as f64,
        AnyValue::Float32(v) => f64::from(v),
        AnyValue::Float64(v) => v,
        _ => return None,
    };
    if number.is_nan() { None } else { Some(number) }
}

/// Renders a cell as a group label.
///
/// Returns an empty string for `Null`. Floats drop trailing zeros so a
/// grouping column read as `1.0` still matches the label `"1"`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use hypo_common::label_value;
///
/// assert_eq!(label_value(AnyValue::Null), "");
/// assert_eq!(label_value(AnyValue::Float64(2.0)), "2");
/// assert_eq!(label_value(AnyValue::String("control")), "control");
/// ```
pub fn label_value(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.trim().to_string(),
        AnyValue::StringOwned(s) => s.trim().to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number without trailing zeros.
///
/// # Examples
///
/// ```
/// use hypo_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Short dtype name for error messages.
pub fn dtype_name(dtype: &DataType) -> String {
    match dtype {
        DataType::String => "string".to_string(),
        DataType::Boolean => "boolean".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float32));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_numeric_value() {
        assert_eq!(numeric_value(AnyValue::Null), None);
        assert_eq!(numeric_value(AnyValue::Int32(42)), Some(42.0));
        assert_eq!(numeric_value(AnyValue::UInt8(7)), Some(7.0));
        assert_eq!(numeric_value(AnyValue::Float64(2.5)), Some(2.5));
        assert_eq!(numeric_value(AnyValue::Float64(f64::NAN)), None);
        assert_eq!(numeric_value(AnyValue::String("2.5")), None);
    }

    #[test]
    fn test_label_value() {
        assert_eq!(label_value(AnyValue::Int64(3)), "3");
        assert_eq!(label_value(AnyValue::Float64(1.5)), "1.5");
        assert_eq!(label_value(AnyValue::String("  treated ")), "treated");
        assert_eq!(label_value(AnyValue::Boolean(true)), "true");
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(10.0), "10");
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(-0.0), "0");
        assert_eq!(format_numeric(2.25), "2.25");
    }
}
