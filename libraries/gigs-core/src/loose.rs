//! Lenient decoders for profile records.
//!
//! The backend stores profiles in SQL columns and serializes them as-is, so
//! a DECIMAL rating arrives as `"4.50"`, a TINYINT flag as `1`, and a JSON
//! column either as an array or as the encoded string. Every decoder here
//! accepts `null` and never fails on a well-formed but unexpected shape;
//! it falls back to the zero value instead.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Number from a number, a numeric string, or null. Parse failure yields `0`.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(match value {
        Some(Scalar::Number(n)) if n.is_finite() => n,
        Some(Scalar::Text(s)) => parse_number(&s),
        Some(Scalar::Bool(b)) => f64::from(u8::from(b)),
        _ => 0.0,
    })
}

/// Non-negative count; fractional and negative values are clamped.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = number(deserializer)?;
    Ok(n.max(0.0).min(f64::from(u32::MAX)) as u32)
}

/// Flag from `true/false`, `0/1`, `"0"/"1"`, `"true"/"false"`, or null.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(match value {
        Some(Scalar::Bool(b)) => b,
        Some(Scalar::Number(n)) => n != 0.0,
        Some(Scalar::Text(s)) => matches!(s.trim(), "1" | "true" | "TRUE" | "True"),
        _ => false,
    })
}

/// Optional text; numbers are rendered, anything else becomes `None`.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(match value {
        Some(Scalar::Text(s)) => Some(s),
        Some(Scalar::Number(n)) => Some(format_number(n)),
        _ => None,
    })
}

/// List of strings from an array, a JSON-encoded array string, or null.
/// Non-string and empty members are dropped.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => collect_strings(items),
        Some(serde_json::Value::String(encoded)) => {
            match serde_json::from_str::<serde_json::Value>(&encoded) {
                Ok(serde_json::Value::Array(items)) => collect_strings(items),
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    })
}

fn collect_strings(items: Vec<serde_json::Value>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|item| match item {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        })
        .collect()
}

/// Parse a user- or server-supplied number, `0` on failure.
pub fn parse_number(s: &str) -> f64 {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Render a number the way the backend expects it in form fields:
/// integral values without a fractional part.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
