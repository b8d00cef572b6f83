//! XML tagged-tree shape
//!
//! Each row becomes a tag named after the table, with one child tag per
//! column. A sequence value renders as a tag marked `list="true"` with
//! one child per element; the child tag is the column name with a
//! trailing `s` stripped when present. Nested structured values recurse.

use std::fmt::Write as _;

use serde_json::Value;

use super::typing::ResultSet;
use super::ErrorEnvelope;

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Render typed rows as the tagged tree.
pub fn render_result_set(result: &ResultSet) -> String {
    let mut out = String::from(XML_HEADER);
    out.push_str("<fql_query_response list=\"true\">\n");
    for row in &result.rows {
        let _ = writeln!(out, "<{}>", result.table);
        for (column, value) in row {
            write_value(&mut out, column, value);
        }
        let _ = writeln!(out, "</{}>", result.table);
    }
    out.push_str("</fql_query_response>\n");
    out
}

/// Render the error envelope as the tagged tree.
pub fn render_error(envelope: &ErrorEnvelope) -> String {
    let mut out = String::from(XML_HEADER);
    out.push_str("<error_response>\n");
    let _ = writeln!(out, "<error_code>{}</error_code>", envelope.error_code);
    let _ = writeln!(out, "<error_msg>{}</error_msg>", escape(&envelope.error_msg));
    out.push_str("<request_args list=\"true\">\n");
    for (key, value) in &envelope.request_args {
        out.push_str("<arg>\n");
        let _ = writeln!(out, "<key>{}</key>", escape(key));
        let _ = writeln!(out, "<value>{}</value>", escape(value));
        out.push_str("</arg>\n");
    }
    out.push_str("</request_args>\n");
    out.push_str("</error_response>\n");
    out
}

fn write_value(out: &mut String, tag: &str, value: &Value) {
    match value {
        Value::Array(elements) => {
            let _ = writeln!(out, "<{tag} list=\"true\">");
            let child = singular(tag);
            for element in elements {
                write_value(out, child, element);
            }
            let _ = writeln!(out, "</{tag}>");
        }
        Value::Object(fields) => {
            let _ = writeln!(out, "<{tag}>");
            for (name, field) in fields {
                write_value(out, name, field);
            }
            let _ = writeln!(out, "</{tag}>");
        }
        Value::Null => {
            let _ = writeln!(out, "<{tag}/>");
        }
        scalar => {
            let _ = writeln!(out, "<{tag}>{}</{tag}>", escape(&scalar_text(scalar)));
        }
    }
}

/// Child tag name for list elements: the column name minus a trailing `s`
fn singular(tag: &str) -> &str {
    tag.strip_suffix('s').filter(|s| !s.is_empty()).unwrap_or(tag)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}
