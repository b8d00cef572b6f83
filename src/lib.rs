//! fqlite - an FQL-to-SQL query engine
//!
//! Accepts a text query in a small SQL-like language (FQL), validates it
//! against a static table catalog, rewrites the built-in functions,
//! translates it into SQLite text, runs it, and types the rows back into
//! catalog-declared values for JSON or XML serialization.
//!
//! The pipeline is strictly ordered and fail-fast:
//! parse → validate → rewrite → assemble → execute → type.
//!
//! ```no_run
//! use fqlite::{ExecutionContext, FqlEngine, Schema, SqliteStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::builtin();
//! let store = SqliteStore::open("fql.db")?;
//! let engine = FqlEngine::new(schema, store);
//!
//! let ctx = ExecutionContext::new(1234);
//! let result = engine.query("SELECT uid2 FROM friend WHERE uid1 = me()", &ctx)?;
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod fql;
pub mod output;
pub mod request;
pub mod schema;
pub mod store;

pub use context::{ExecutionContext, UserId};
pub use engine::{EngineConfig, FqlEngine, QueryResponse};
pub use error::{FqlError, FqlResult};
pub use output::{ErrorEnvelope, ResponseFormat, ResultSet};
pub use request::QueryRequest;
pub use schema::Schema;
pub use store::{SqliteStore, Store};
