//! Query requests as received from a transport
//!
//! A request is a flat bag of key/value parameters. The engine cares
//! about `query` and `format`; every pair (including the method name) is
//! kept so the error envelope can echo the original request back.

use crate::error::{FqlError, FqlResult};
use crate::output::ResponseFormat;

/// A decoded query request
#[derive(Debug, Clone)]
pub struct QueryRequest {
    /// The FQL text, if the caller supplied one
    pub query: Option<String>,
    /// Requested output format
    pub format: ResponseFormat,
    /// Every original request parameter, in received order
    pub params: Vec<(String, String)>,
}

impl QueryRequest {
    /// Build a request directly from query text
    pub fn new(query: impl Into<String>, format: ResponseFormat) -> Self {
        let query = query.into();
        Self {
            query: Some(query.clone()),
            format,
            params: vec![
                ("method".to_string(), "fql.query".to_string()),
                ("query".to_string(), query),
            ],
        }
    }

    /// Build a request from transport-decoded parameters.
    ///
    /// All pairs are retained for the error envelope; `query` and
    /// `format` are additionally picked out.
    pub fn from_params(params: Vec<(String, String)>) -> Self {
        let query = params
            .iter()
            .find(|(k, _)| k == "query")
            .map(|(_, v)| v.clone());
        let format = ResponseFormat::from_param(
            params
                .iter()
                .find(|(k, _)| k == "format")
                .map(|(_, v)| v.as_str()),
        );
        Self {
            query,
            format,
            params,
        }
    }

    /// The query text, or the missing-parameter error
    pub fn query_text(&self) -> FqlResult<&str> {
        match self.query.as_deref() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(FqlError::MissingParameter("query".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_params_extracts_query_and_format() {
        let req = QueryRequest::from_params(vec![
            ("method".to_string(), "fql.query".to_string()),
            ("query".to_string(), "SELECT uid FROM user WHERE uid = 1".to_string()),
            ("format".to_string(), "json".to_string()),
        ]);
        assert_eq!(req.query_text().unwrap(), "SELECT uid FROM user WHERE uid = 1");
        assert_eq!(req.format, ResponseFormat::Json);
        assert_eq!(req.params.len(), 3);
    }

    #[test]
    fn test_missing_query_parameter() {
        let req = QueryRequest::from_params(vec![(
            "method".to_string(),
            "fql.query".to_string(),
        )]);
        let err = req.query_text().unwrap_err();
        assert!(matches!(err, FqlError::MissingParameter(ref p) if p == "query"));
        assert_eq!(err.code(), -1);
    }

    #[test]
    fn test_blank_query_counts_as_missing() {
        let req = QueryRequest::from_params(vec![("query".to_string(), "   ".to_string())]);
        assert!(req.query_text().is_err());
    }

    #[test]
    fn test_format_defaults_to_xml() {
        let req = QueryRequest::from_params(vec![(
            "query".to_string(),
            "SELECT uid FROM user WHERE uid = 1".to_string(),
        )]);
        assert_eq!(req.format, ResponseFormat::Xml);
    }
}
