//! Validation of user-supplied model parameters.
//!
//! Parameters reach the backend as an opaque JSON object. The only
//! client-side rule is that the user's text must actually be a JSON
//! object; the backend owns everything beyond that.

use serde_json::Value;
use simtwin_core::gateway::Params;
use simtwin_core::{Result, TwinError};

/// Parses user-entered parameter text.
///
/// Blank text means "no parameters". Valid JSON that is not an object
/// (array, number, string, bool, null) is rejected.
pub fn parse_params(text: &str) -> Result<Option<Params>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parsed: Value = serde_json::from_str(trimmed)
        .map_err(|_| TwinError::invalid_params("Invalid JSON in parameters"))?;

    match parsed {
        Value::Object(map) => Ok(Some(map)),
        _ => Err(TwinError::invalid_params("Parameters must be a JSON object")),
    }
}

/// Builds the `{"initial": value}` shortcut object.
pub fn initial_params(value: f64) -> Result<Params> {
    let number = serde_json::Number::from_f64(value)
        .ok_or_else(|| TwinError::invalid_params("Initial value must be a finite number"))?;
    let mut params = Params::new();
    params.insert("initial".to_string(), Value::Number(number));
    Ok(params)
}

/// Resolves the parameter inputs a form offers: the structured initial
/// value wins over raw JSON text when both are provided.
pub fn resolve_params(initial: Option<f64>, raw_json: Option<&str>) -> Result<Option<Params>> {
    if let Some(value) = initial {
        return Ok(Some(initial_params(value)?));
    }
    match raw_json {
        Some(text) => parse_params(text),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_text_means_no_params() {
        assert_eq!(parse_params("").unwrap(), None);
        assert_eq!(parse_params("   \n").unwrap(), None);
    }

    #[test]
    fn object_text_parses() {
        let params = parse_params(r#"{"initial": 10, "leak": 0.5}"#).unwrap().unwrap();
        assert_eq!(params.get("initial"), Some(&json!(10)));
        assert_eq!(params.get("leak"), Some(&json!(0.5)));
    }

    #[test]
    fn malformed_json_is_rejected_with_fixed_message() {
        let err = parse_params("{not json").unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON in parameters");
    }

    #[test]
    fn non_object_json_is_rejected() {
        for text in ["[1, 2]", "42", "\"hi\"", "null", "true"] {
            let err = parse_params(text).unwrap_err();
            assert_eq!(err.to_string(), "Parameters must be a JSON object");
        }
    }

    #[test]
    fn initial_value_wins_over_raw_json() {
        let params = resolve_params(Some(10.0), Some(r#"{"initial": 99}"#))
            .unwrap()
            .unwrap();
        assert_eq!(params.get("initial"), Some(&json!(10.0)));
    }

    #[test]
    fn non_finite_initial_value_is_rejected() {
        assert!(initial_params(f64::NAN).is_err());
        assert!(initial_params(f64::INFINITY).is_err());
    }
}
