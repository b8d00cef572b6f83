//! Result typing
//!
//! The store returns untyped values; the catalog says what they mean.
//! Booleans are stored as 0/1, arrays and objects as serialized JSON
//! text. Everything else passes through as returned. Columns the catalog
//! does not know (computed expressions like `length(username)`) pass
//! through untyped.

use serde_json::{Map, Value};

use crate::schema::{Column, FqlType, Schema};
use crate::store::{RawRow, RawValue};

/// Typed result rows for one query, in store-returned order
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    /// The queried table; names each row's tag in the XML shape
    pub table: String,
    /// One ordered map per row
    pub rows: Vec<Map<String, Value>>,
}

/// Type raw rows against the catalog entry for `table`.
pub fn type_rows(raw: &[RawRow], table: &str, schema: &Schema) -> ResultSet {
    let rows = raw
        .iter()
        .map(|row| {
            row.columns
                .iter()
                .map(|(name, value)| {
                    let column = schema.lookup_column(table, name);
                    (name.clone(), typed_value(value, column))
                })
                .collect()
        })
        .collect();

    ResultSet {
        table: table.to_string(),
        rows,
    }
}

fn typed_value(raw: &RawValue, column: Option<&Column>) -> Value {
    match column.map(|c| c.fql_type) {
        Some(FqlType::Bool) => match raw {
            RawValue::Integer(n) => Value::Bool(*n != 0),
            RawValue::Text(t) => Value::Bool(t != "0" && !t.is_empty()),
            other => passthrough(other),
        },
        Some(FqlType::Array) | Some(FqlType::Object) => match raw {
            // Stored as serialized text; unparseable text stays a string
            RawValue::Text(t) => serde_json::from_str(t).unwrap_or_else(|_| Value::String(t.clone())),
            other => passthrough(other),
        },
        _ => passthrough(raw),
    }
}

fn passthrough(raw: &RawValue) -> Value {
    match raw {
        RawValue::Null => Value::Null,
        RawValue::Integer(n) => Value::from(*n),
        RawValue::Real(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        RawValue::Text(t) => Value::String(t.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(columns: Vec<(&str, RawValue)>) -> RawRow {
        RawRow {
            columns: columns
                .into_iter()
                .map(|(n, v)| (n.to_string(), v))
                .collect(),
        }
    }

    #[test]
    fn test_bool_columns_render_as_booleans() {
        let schema = Schema::builtin();
        let raw = vec![row(vec![
            ("is_app_user", RawValue::Integer(1)),
            ("has_added_app", RawValue::Integer(0)),
        ])];
        let result = type_rows(&raw, "user", &schema);
        assert_eq!(result.rows[0]["is_app_user"], json!(true));
        assert_eq!(result.rows[0]["has_added_app"], json!(false));
    }

    #[test]
    fn test_structured_columns_parse_back() {
        let schema = Schema::builtin();
        let raw = vec![row(vec![
            ("affiliations", RawValue::Text("[{\"nid\": 5}]".into())),
            (
                "current_location",
                RawValue::Text("{\"city\": \"Palo Alto\"}".into()),
            ),
        ])];
        let result = type_rows(&raw, "user", &schema);
        assert_eq!(result.rows[0]["affiliations"], json!([{"nid": 5}]));
        assert_eq!(
            result.rows[0]["current_location"],
            json!({"city": "Palo Alto"})
        );
    }

    #[test]
    fn test_unparseable_structured_text_stays_a_string() {
        let schema = Schema::builtin();
        let raw = vec![row(vec![("coords", RawValue::Text("not json".into()))])];
        let result = type_rows(&raw, "checkin", &schema);
        assert_eq!(result.rows[0]["coords"], json!("not json"));
    }

    #[test]
    fn test_unknown_columns_pass_through() {
        let schema = Schema::builtin();
        let raw = vec![row(vec![("length(username)", RawValue::Integer(5))])];
        let result = type_rows(&raw, "user", &schema);
        assert_eq!(result.rows[0]["length(username)"], json!(5));
    }

    #[test]
    fn test_column_order_preserved() {
        let schema = Schema::builtin();
        let raw = vec![row(vec![
            ("username", RawValue::Text("chuck".into())),
            ("uid", RawValue::Integer(1)),
        ])];
        let result = type_rows(&raw, "user", &schema);
        let keys: Vec<&String> = result.rows[0].keys().collect();
        assert_eq!(keys, vec!["username", "uid"]);
    }

    #[test]
    fn test_retyping_typed_values_is_lossless() {
        // Serialize typed bool/array/object values back to their storage
        // forms and re-type; nothing may change
        let schema = Schema::builtin();
        let raw = vec![row(vec![
            ("is_app_user", RawValue::Integer(1)),
            ("affiliations", RawValue::Text("[1, 2, 3]".into())),
            ("uid", RawValue::Integer(42)),
        ])];
        let first = type_rows(&raw, "user", &schema);

        let restored = vec![row(vec![
            (
                "is_app_user",
                RawValue::Integer(first.rows[0]["is_app_user"].as_bool().unwrap() as i64),
            ),
            (
                "affiliations",
                RawValue::Text(first.rows[0]["affiliations"].to_string()),
            ),
            ("uid", RawValue::Integer(42)),
        ])];
        let second = type_rows(&restored, "user", &schema);
        assert_eq!(first, second);
    }
}
