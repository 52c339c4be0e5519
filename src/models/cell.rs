//! Lenient decoding of spreadsheet cells.
//!
//! The gateway serializes cells with whatever JSON type the sheet inferred, so a
//! count typed into a form as `"25"` may come back as `25`.

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Read any cell as a string. Null and missing cells become empty.
pub fn cell_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(value_to_string).unwrap_or_default())
}

/// Read an optional cell; empty strings count as absent.
pub fn cell_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = cell_string(deserializer)?;
    Ok(if value.trim().is_empty() { None } else { Some(value) })
}

/// Read a flag the way a loosely-typed client would test it for truthiness.
pub fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    })
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(&n),
        other => other.to_string(),
    }
}

fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Numeric value of a count cell. Anything unparseable counts as zero.
pub fn count(cell: &str) -> u64 {
    let trimmed = cell.trim();
    if let Ok(n) = trimmed.parse::<u64>() {
        return n;
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() && f > 0.0 => f.trunc() as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "cell_string")]
        value: String,
        #[serde(default, deserialize_with = "cell_opt_string")]
        stamp: Option<String>,
        #[serde(default, deserialize_with = "truthy")]
        flag: bool,
    }

    fn row(json: &str) -> Row {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numbers_read_as_digit_strings() {
        assert_eq!(row(r#"{"value": 25}"#).value, "25");
        assert_eq!(row(r#"{"value": 25.0}"#).value, "25");
        assert_eq!(row(r#"{"value": 2.5}"#).value, "2.5");
    }

    #[test]
    fn test_missing_and_null_cells_are_empty() {
        let r = row(r#"{"value": null}"#);
        assert_eq!(r.value, "");
        assert!(r.stamp.is_none());

        let r = row(r#"{"stamp": "  "}"#);
        assert!(r.stamp.is_none());
    }

    #[test]
    fn test_truthiness() {
        assert!(row(r#"{"flag": true}"#).flag);
        assert!(row(r#"{"flag": 1}"#).flag);
        assert!(row(r#"{"flag": "yes"}"#).flag);
        assert!(!row(r#"{"flag": false}"#).flag);
        assert!(!row(r#"{"flag": 0}"#).flag);
        assert!(!row(r#"{"flag": ""}"#).flag);
        assert!(!row(r#"{}"#).flag);
    }

    #[test]
    fn test_count() {
        assert_eq!(count("120"), 120);
        assert_eq!(count(" 7 "), 7);
        assert_eq!(count(""), 0);
        assert_eq!(count("abc"), 0);
        assert_eq!(count("3.9"), 3);
    }
}
