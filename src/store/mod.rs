//! Backing store seam
//!
//! The engine consumes exactly one capability from the store: run a
//! statement, get rows or a message back. Everything else about the
//! store (on-disk format, transactions, pooling) lives behind this
//! trait.

mod sqlite;

use std::fmt;

pub use sqlite::SqliteStore;

/// A raw value as returned by the store, before schema typing
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

/// One result row: ordered (column name, raw value) pairs
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub columns: Vec<(String, RawValue)>,
}

/// A failure reported by the store. The message is carried verbatim and
/// forwarded to the caller unless the engine is configured to redact it.
#[derive(Debug, Clone)]
pub struct StoreError(pub String);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for StoreError {}

/// Query execution contract the engine depends on.
///
/// One statement, one round trip; read queries need no explicit
/// transaction. Implementations must be safe to share across threads.
pub trait Store: Send + Sync {
    /// Run the statement and return every row it produces.
    fn run(&self, sql: &str) -> Result<Vec<RawRow>, StoreError>;
}
