//! # Query Engine Errors
//!
//! The numerically-coded error taxonomy shared by every stage of the
//! pipeline. Codes follow the FQL convention:
//!
//! - 601: parser errors (unexpected token, unexpected end, wildcard select)
//! - 604: predicate on a non-indexable column
//! - 605: invalid or unsupported function usage
//! - 606: wrong argument count for a known function
//! - 190: invalid credential (raised by transports, rendered here)
//! - −1: execution and missing-parameter errors
//!
//! Every error is terminal: the first violated rule wins and nothing is
//! retried. The engine never lets an error escape `run_query` un-rendered.

use thiserror::Error;

/// Result type for query engine operations
pub type FqlResult<T> = Result<T, FqlError>;

/// Errors produced while translating or executing an FQL statement
#[derive(Debug, Clone, Error)]
pub enum FqlError {
    // ==================
    // Parser errors (601)
    // ==================
    /// Statement does not start with SELECT, or a predicate exists with no
    /// table to apply it to
    #[error("Parser error: unexpected '{0}'.")]
    UnexpectedToken(String),

    /// The statement ended before a required clause appeared
    #[error("Parser error: unexpected end of query.")]
    UnexpectedEnd,

    /// `SELECT *` is not part of the language
    #[error("Parser error: SELECT * is not supported. Please manually list the columns you are interested in.")]
    Wildcard,

    /// Parenthesized groups nested past the engine's depth bound
    #[error("Parser error: the query is nested too deeply.")]
    NestingTooDeep,

    // ==================
    // Validation errors
    // ==================
    /// The WHERE clause references a column that is not indexable
    #[error("Your statement is not indexable. The WHERE clause must contain an indexable column. Such columns are marked with * in the tables linked from http://developers.facebook.com/docs/reference/fql")]
    NotIndexable,

    // ==================
    // Function errors
    // ==================
    /// Function name is not in the registry
    #[error("{0} is not a valid function name.")]
    InvalidFunction(String),

    /// A registered function received an argument form it cannot rewrite
    #[error("{function} only supports literal arguments.")]
    UnsupportedArgument { function: String },

    /// A registered function received the wrong number of arguments
    #[error("{name} function expects {expected} parameters; {actual} given.")]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    // ==================
    // Execution and transport errors
    // ==================
    /// The backing store rejected the assembled statement; the store's
    /// message is forwarded verbatim
    #[error("{0}")]
    Execution(String),

    /// A required caller-supplied parameter is absent
    #[error("The parameter {0} is required")]
    MissingParameter(String),

    /// Caller-supplied credential failed validation. Checked by the
    /// transport layer, surfaced through this taxonomy.
    #[error("Invalid OAuth access token.")]
    InvalidCredential,
}

impl FqlError {
    /// Create an arity mismatch error for a known function
    pub fn arity_mismatch(name: impl Into<String>, expected: usize, actual: usize) -> Self {
        FqlError::ArityMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }

    /// Create an unsupported-argument error for a known function
    pub fn unsupported_argument(function: impl Into<String>) -> Self {
        FqlError::UnsupportedArgument {
            function: function.into(),
        }
    }

    /// Returns the numeric error code used in the error envelope
    pub fn code(&self) -> i32 {
        match self {
            FqlError::UnexpectedToken(_) => 601,
            FqlError::UnexpectedEnd => 601,
            FqlError::Wildcard => 601,
            FqlError::NestingTooDeep => 601,
            FqlError::NotIndexable => 604,
            FqlError::InvalidFunction(_) => 605,
            FqlError::UnsupportedArgument { .. } => 605,
            FqlError::ArityMismatch { .. } => 606,
            FqlError::Execution(_) => -1,
            FqlError::MissingParameter(_) => -1,
            FqlError::InvalidCredential => 190,
        }
    }

    /// Returns the HTTP status a transport should pair with this error.
    ///
    /// The engine itself is transport-agnostic; this is a hint, mapped the
    /// same way for every output format.
    pub fn status_code(&self) -> u16 {
        match self {
            FqlError::InvalidCredential => 401,
            _ => 400,
        }
    }
}
