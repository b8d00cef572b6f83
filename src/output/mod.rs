//! Result typing and serialization
//!
//! Raw store rows are typed against the catalog and rendered in one of
//! two shapes: a JSON list of row objects, or an XML tagged tree. Errors
//! render in both shapes through a fixed envelope that echoes back every
//! original request parameter.

pub mod json;
pub mod typing;
pub mod xml;

pub use typing::{type_rows, ResultSet};

use crate::error::FqlError;

/// Output format requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    Json,
    /// The historical default when no format is given
    #[default]
    Xml,
}

impl ResponseFormat {
    /// Parse the request's `format` parameter. Unrecognized or absent
    /// values fall back to XML.
    pub fn from_param(param: Option<&str>) -> ResponseFormat {
        match param {
            Some(p) if p.eq_ignore_ascii_case("json") => ResponseFormat::Json,
            _ => ResponseFormat::Xml,
        }
    }

    /// Content type a transport should pair with this format
    pub fn content_type(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "application/json",
            ResponseFormat::Xml => "text/xml",
        }
    }
}

/// The fixed error envelope.
///
/// `request_args` carries every original request parameter, including the
/// method name, so callers can see exactly what request failed.
#[derive(Debug, Clone)]
pub struct ErrorEnvelope {
    pub error_code: i32,
    pub error_msg: String,
    pub request_args: Vec<(String, String)>,
}

impl ErrorEnvelope {
    /// Build the envelope for an error and the request parameters that
    /// produced it
    pub fn new(error: &FqlError, request_args: Vec<(String, String)>) -> Self {
        Self {
            error_code: error.code(),
            error_msg: error.to_string(),
            request_args,
        }
    }

    /// Render in the given format
    pub fn render(&self, format: ResponseFormat) -> String {
        match format {
            ResponseFormat::Json => json::render_error(self),
            ResponseFormat::Xml => xml::render_error(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing_defaults_to_xml() {
        assert_eq!(ResponseFormat::from_param(None), ResponseFormat::Xml);
        assert_eq!(ResponseFormat::from_param(Some("JSON")), ResponseFormat::Json);
        assert_eq!(ResponseFormat::from_param(Some("json")), ResponseFormat::Json);
        assert_eq!(ResponseFormat::from_param(Some("yaml")), ResponseFormat::Xml);
    }

    #[test]
    fn test_content_types() {
        assert_eq!(ResponseFormat::Json.content_type(), "application/json");
        assert_eq!(ResponseFormat::Xml.content_type(), "text/xml");
    }

    #[test]
    fn test_envelope_carries_code_and_args() {
        let envelope = ErrorEnvelope::new(
            &FqlError::NotIndexable,
            vec![
                ("method".into(), "fql.query".into()),
                ("query".into(), "SELECT pic FROM user WHERE pic = 'x'".into()),
            ],
        );
        assert_eq!(envelope.error_code, 604);
        assert_eq!(envelope.request_args.len(), 2);
    }
}
