//! The query engine entry point
//!
//! Ties the pipeline together: parse, validate, rewrite, assemble,
//! execute, type. Each query runs synchronously end-to-end on the
//! calling thread; there is no internal suspension point and no
//! cross-call ordering guarantee.
//!
//! `run_query` never lets an error escape: the caller always receives a
//! well-formed body in the requested format, plus an HTTP status hint
//! for the transport.

use crate::context::ExecutionContext;
use crate::error::{FqlError, FqlResult};
use crate::fql;
use crate::output::{self, type_rows, ErrorEnvelope, ResponseFormat, ResultSet};
use crate::request::QueryRequest;
use crate::schema::Schema;
use crate::store::Store;

/// Default bound on group nesting
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Engine tuning knobs
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum group-nesting depth accepted by the parser, validator,
    /// and rewriter
    pub max_depth: usize,
    /// Replace raw store error text with a fixed message. Off by
    /// default: forwarding the store's message verbatim is the
    /// historical behavior, at the cost of leaking store internals.
    pub redact_store_errors: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            redact_store_errors: false,
        }
    }
}

impl EngineConfig {
    /// Set the nesting depth bound
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable store error redaction
    pub fn with_redacted_store_errors(mut self, redact: bool) -> Self {
        self.redact_store_errors = redact;
        self
    }
}

/// A rendered response ready for a transport to serve
#[derive(Debug, Clone)]
pub struct QueryResponse {
    /// Rendered body in the requested format
    pub body: String,
    /// Format the body is rendered in
    pub format: ResponseFormat,
    /// The error this response reports, if any
    pub error: Option<FqlError>,
}

impl QueryResponse {
    /// HTTP status hint for the transport
    pub fn status_code(&self) -> u16 {
        self.error.as_ref().map(|e| e.status_code()).unwrap_or(200)
    }

    /// Content type hint for the transport
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// The FQL query engine.
///
/// Holds the immutable catalog and the backing store. Safe to share
/// across threads; per-call state travels in the [`ExecutionContext`].
pub struct FqlEngine<S: Store> {
    schema: Schema,
    store: S,
    config: EngineConfig,
}

impl<S: Store> FqlEngine<S> {
    /// Create an engine with default configuration
    pub fn new(schema: Schema, store: S) -> Self {
        Self::with_config(schema, store, EngineConfig::default())
    }

    /// Create an engine with explicit configuration
    pub fn with_config(schema: Schema, store: S, config: EngineConfig) -> Self {
        Self {
            schema,
            store,
            config,
        }
    }

    /// The catalog this engine validates against
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Run one query end-to-end: parse, validate, rewrite, assemble,
    /// execute, type. Fail-fast: the first violated rule wins.
    pub fn query(&self, text: &str, ctx: &ExecutionContext) -> FqlResult<ResultSet> {
        tracing::debug!(request_id = %ctx.request_id, query = text, "received query");

        let mut stmt = fql::parse(text, self.config.max_depth)?;
        fql::validate(&stmt, &self.schema, self.config.max_depth)?;
        fql::rewrite(&mut stmt, ctx, self.config.max_depth)?;

        // The validator has already required a table
        let table = stmt
            .table
            .clone()
            .ok_or_else(|| FqlError::UnexpectedToken(fql::Keyword::Where.to_string()))?;

        let sql = fql::assemble(&stmt);
        tracing::debug!(request_id = %ctx.request_id, sql = %sql, "assembled statement");

        let raw = self.store.run(&sql).map_err(|e| {
            if self.config.redact_store_errors {
                FqlError::Execution("query execution failed".to_string())
            } else {
                FqlError::Execution(e.to_string())
            }
        })?;

        tracing::debug!(
            request_id = %ctx.request_id,
            rows = raw.len(),
            elapsed_ms = %ctx.elapsed_ms(),
            "query completed"
        );
        Ok(type_rows(&raw, &table, &self.schema))
    }

    /// Run a decoded request and render the outcome.
    ///
    /// Never panics or returns an error past this boundary: the result
    /// is always a well-formed body in the requested format.
    pub fn run_query(&self, request: &QueryRequest, ctx: &ExecutionContext) -> QueryResponse {
        let outcome = request
            .query_text()
            .and_then(|text| self.query(text, ctx));

        match outcome {
            Ok(result) => {
                let body = match request.format {
                    ResponseFormat::Json => output::json::render_result_set(&result),
                    ResponseFormat::Xml => output::xml::render_result_set(&result),
                };
                QueryResponse {
                    body,
                    format: request.format,
                    error: None,
                }
            }
            Err(error) => {
                tracing::warn!(
                    request_id = %ctx.request_id,
                    code = error.code(),
                    error = %error,
                    "query failed"
                );
                self.failure_response(&error, request)
            }
        }
    }

    /// Render an error through the envelope.
    ///
    /// Public so a transport can report failures it detects itself (a
    /// bad credential, for instance) in the same shape.
    pub fn failure_response(&self, error: &FqlError, request: &QueryRequest) -> QueryResponse {
        let envelope = ErrorEnvelope::new(error, request.params.clone());
        QueryResponse {
            body: envelope.render(request.format),
            format: request.format,
            error: Some(error.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;

    fn test_engine() -> FqlEngine<SqliteStore> {
        let schema = Schema::builtin();
        let store = SqliteStore::open_in_memory().unwrap();
        store.provision(&schema).unwrap();
        store
            .execute_batch(
                "INSERT INTO \"user\" (uid, username, name) VALUES (1234, 'chuck', 'Chuck');",
            )
            .unwrap();
        FqlEngine::new(schema, store)
    }

    #[test]
    fn test_query_end_to_end() {
        let engine = test_engine();
        let ctx = ExecutionContext::new(1);
        let result = engine
            .query("SELECT uid, username FROM user WHERE uid = 1234", &ctx)
            .unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0]["username"], "chuck");
    }

    #[test]
    fn test_run_query_renders_success() {
        let engine = test_engine();
        let ctx = ExecutionContext::new(1);
        let request = QueryRequest::new(
            "SELECT uid FROM user WHERE uid = 1234",
            ResponseFormat::Json,
        );
        let response = engine.run_query(&request, &ctx);
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.content_type(), "application/json");
        assert_eq!(response.body, r#"[{"uid":1234}]"#);
    }

    #[test]
    fn test_run_query_never_errors_past_the_boundary() {
        let engine = test_engine();
        let ctx = ExecutionContext::new(1);
        let request = QueryRequest::new("SELECT * FROM user WHERE uid = 1", ResponseFormat::Json);
        let response = engine.run_query(&request, &ctx);
        assert_eq!(response.status_code(), 400);
        assert!(response.body.contains("\"error_code\":601"));
    }

    #[test]
    fn test_store_errors_forward_verbatim_by_default() {
        let engine = test_engine();
        let ctx = ExecutionContext::new(1);
        // Valid FQL, but the expression trips the store
        let err = engine
            .query("SELECT nonexistent FROM user WHERE uid = 1", &ctx)
            .unwrap_err();
        assert_eq!(err.code(), -1);
        assert!(err.to_string().contains("no such column"));
    }

    #[test]
    fn test_store_errors_redact_under_config() {
        let schema = Schema::builtin();
        let store = SqliteStore::open_in_memory().unwrap();
        store.provision(&schema).unwrap();
        let engine = FqlEngine::with_config(
            schema,
            store,
            EngineConfig::default().with_redacted_store_errors(true),
        );
        let ctx = ExecutionContext::new(1);
        let err = engine
            .query("SELECT nonexistent FROM user WHERE uid = 1", &ctx)
            .unwrap_err();
        assert_eq!(err.to_string(), "query execution failed");
    }
}
