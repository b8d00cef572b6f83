//! JSON list shape
//!
//! Success responses are a bare array of row objects. Errors are the
//! envelope object with `request_args` as a list of key/value pairs.

use serde_json::{json, Map, Value};

use super::typing::ResultSet;
use super::ErrorEnvelope;

/// Render typed rows as a JSON array of objects.
pub fn render_result_set(result: &ResultSet) -> String {
    let rows: Vec<Value> = result.rows.iter().cloned().map(Value::Object).collect();
    Value::Array(rows).to_string()
}

/// Render the error envelope as a JSON object.
pub fn render_error(envelope: &ErrorEnvelope) -> String {
    let args: Vec<Value> = envelope
        .request_args
        .iter()
        .map(|(key, value)| {
            let mut arg = Map::new();
            arg.insert("key".to_string(), Value::String(key.clone()));
            arg.insert("value".to_string(), Value::String(value.clone()));
            Value::Object(arg)
        })
        .collect();

    json!({
        "error_code": envelope.error_code,
        "error_msg": envelope.error_msg,
        "request_args": args,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FqlError;
    use serde_json::json;

    #[test]
    fn test_rows_render_as_bare_array() {
        let mut row = Map::new();
        row.insert("uid".to_string(), json!(1234));
        row.insert("name".to_string(), json!("Chuck Norris"));
        let result = ResultSet {
            table: "user".to_string(),
            rows: vec![row],
        };
        assert_eq!(
            render_result_set(&result),
            r#"[{"uid":1234,"name":"Chuck Norris"}]"#
        );
    }

    #[test]
    fn test_empty_result_is_empty_array() {
        let result = ResultSet {
            table: "user".to_string(),
            rows: vec![],
        };
        assert_eq!(render_result_set(&result), "[]");
    }

    #[test]
    fn test_error_envelope_shape() {
        let envelope = ErrorEnvelope::new(
            &FqlError::InvalidFunction("rand".to_string()),
            vec![
                ("method".to_string(), "fql.query".to_string()),
                ("query".to_string(), "SELECT rand() FROM user".to_string()),
            ],
        );
        let rendered: Value = serde_json::from_str(&render_error(&envelope)).unwrap();
        assert_eq!(rendered["error_code"], json!(605));
        assert_eq!(rendered["error_msg"], json!("rand is not a valid function name."));
        assert_eq!(rendered["request_args"][0]["key"], json!("method"));
        assert_eq!(rendered["request_args"][0]["value"], json!("fql.query"));
        assert_eq!(rendered["request_args"][1]["key"], json!("query"));
    }
}
