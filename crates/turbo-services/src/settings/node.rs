//! Lenient accessors over the settings tree.
//!
//! Settings come from loosely-typed sources (TypoScript, TOML, JSON) where
//! numbers are often strings and absence is expressed as an empty value.
//! These helpers give that data one consistent reading.

use serde_json::Value;

/// Shared null node returned for missing keys.
pub static NULL: Value = Value::Null;

/// Look up `key` in a mapping node. Lists are indexed by their position.
///
/// Anything missing resolves to [`NULL`], so lookups can be chained.
pub fn get<'a>(node: &'a Value, key: &str) -> &'a Value {
    match node {
        Value::Object(map) => map.get(key).unwrap_or(&NULL),
        Value::Array(list) => key
            .parse::<usize>()
            .ok()
            .and_then(|index| list.get(index))
            .unwrap_or(&NULL),
        _ => &NULL,
    }
}

/// Whether the node is a mapping or a list.
pub fn is_structure(node: &Value) -> bool {
    matches!(node, Value::Object(_) | Value::Array(_))
}

/// The node itself when it is a mapping or list with at least one entry.
pub fn non_empty_structure(node: &Value) -> Option<&Value> {
    match node {
        Value::Object(map) if !map.is_empty() => Some(node),
        Value::Array(list) if !list.is_empty() => Some(node),
        _ => None,
    }
}

/// Keyed entries of a mapping or list, in document order.
///
/// Returns `None` for scalars and null.
pub fn entries(node: &Value) -> Option<Vec<(String, &Value)>> {
    match node {
        Value::Object(map) => Some(map.iter().map(|(k, v)| (k.clone(), v)).collect()),
        Value::Array(list) => Some(
            list.iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        ),
        _ => None,
    }
}

/// Truthiness of a settings value.
///
/// Null, `false`, zero, the empty string, `"0"` and empty structures are
/// falsy; everything else is truthy.
pub fn is_truthy(node: &Value) -> bool {
    match node {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(list) => !list.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Permissive float coercion.
///
/// Strings contribute their leading numeric prefix (`"5.5 EUR"` is 5.5);
/// anything without one is 0. Non-empty structures count as 1.
pub fn to_float(node: &Value) -> f64 {
    match node {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_float_prefix(s),
        Value::Array(_) | Value::Object(_) => f64::from(u8::from(is_truthy(node))),
    }
}

/// Text form of a scalar node. Null and structures have none.
pub fn scalar_text(node: &Value) -> Option<String> {
    match node {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Text form of a scalar node, empty when there is none.
pub fn text(node: &Value) -> String {
    scalar_text(node).unwrap_or_default()
}

/// Parse the longest leading decimal number of `input`, ignoring leading
/// whitespace. Returns 0 when there is no numeric prefix.
pub fn parse_float_prefix(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(0.0)
}
