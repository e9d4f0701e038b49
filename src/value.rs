//! Shared value utilities: quote stripping and the one-time coercion of
//! custom-field values into their final wire type.

use serde::Serialize;

use crate::segment::is_quote;

/// Removes exactly one layer of surrounding quotes, when present.
///
/// Only a matching pair is stripped; a lone quote or a mismatched pair is
/// left alone. Inner quotes always survive.
///
/// ```
/// use docsearch_query::remove_quotes;
///
/// assert_eq!(remove_quotes(r#""Invoice Total""#), "Invoice Total");
/// assert_eq!(remove_quotes("'urgent'"), "urgent");
/// assert_eq!(remove_quotes(r#""'nested'""#), "'nested'");
/// assert_eq!(remove_quotes(r#""half"#), r#""half"#);
/// ```
pub fn remove_quotes(s: &str) -> &str {
    let mut chars = s.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return s;
    };
    if first == last && is_quote(first) {
        &s[first.len_utf8()..s.len() - last.len_utf8()]
    } else {
        s
    }
}

/// A custom-field value after coercion. Serializes untagged, so the wire
/// shape is the bare JSON scalar the backend expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Largest float that still identifies an exact integer.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0; // 2^53

/// Coerces a raw string value into its final wire type.
///
/// Runs exactly once, on the token-to-filter boundary. The rules mirror
/// what a search backend expects from a web client:
/// - case-insensitive `true`/`false` become booleans;
/// - a leading zero followed by a digit (`001`, invoice codes) pins the
///   value to a string;
/// - integer-valued numbers (including scientific notation such as `1e5`)
///   become integers, other finite numbers become floats;
/// - anything else (dates, free text) is kept verbatim.
///
/// ```
/// use docsearch_query::{convert_value, FilterValue};
///
/// assert_eq!(convert_value("true"), FilterValue::Bool(true));
/// assert_eq!(convert_value("100"), FilterValue::Int(100));
/// assert_eq!(convert_value("1e5"), FilterValue::Int(100_000));
/// assert_eq!(convert_value("99.99"), FilterValue::Float(99.99));
/// assert_eq!(convert_value("001"), FilterValue::Text("001".into()));
/// assert_eq!(convert_value("2024-01-01"), FilterValue::Text("2024-01-01".into()));
/// ```
pub fn convert_value(raw: &str) -> FilterValue {
    if raw.eq_ignore_ascii_case("true") {
        return FilterValue::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return FilterValue::Bool(false);
    }
    if has_leading_zero(raw) {
        return FilterValue::Text(raw.to_string());
    }
    if let Ok(int) = raw.parse::<i64>() {
        return FilterValue::Int(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
        if float.is_finite() {
            // 100000.0 from `1e5` round-trips as the integer the user meant.
            if float.fract() == 0.0 && float.abs() <= MAX_SAFE_INTEGER {
                return FilterValue::Int(float as i64);
            }
            return FilterValue::Float(float);
        }
    }
    FilterValue::Text(raw.to_string())
}

fn has_leading_zero(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 2 && bytes[0] == b'0' && bytes[1].is_ascii_digit()
}
