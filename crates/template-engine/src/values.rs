//! Decoding variable values supplied as JSON

use crate::errors::{Result, TemplateError};
use oscal_types::VariableValues;
use serde_json::Value;

/// Parse a JSON object of variable values.
///
/// Strings are taken as-is, numbers and booleans are stringified and
/// `null` becomes an empty (unfilled) value. Nested arrays or objects are
/// rejected.
pub fn values_from_json(json: &str) -> Result<VariableValues> {
    let value: Value = serde_json::from_str(json)?;
    values_from_value(value)
}

pub fn values_from_value(value: Value) -> Result<VariableValues> {
    let Value::Object(map) = value else {
        return Err(TemplateError::InvalidValues(
            "expected an object of name/value pairs".to_string(),
        ));
    };

    let mut values = VariableValues::new();
    for (name, value) in map {
        let text = match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(TemplateError::InvalidValues(format!(
                    "value for '{}' must be a string",
                    name
                )))
            }
        };
        values.set(name, text);
    }
    Ok(values)
}
