//! SQLite-backed store
//!
//! A single connection serialized behind a mutex. Queries are read-only
//! round trips, so no explicit transactions are needed. An optional
//! wall-clock bound interrupts statements that run past their deadline.

use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rusqlite::types::ValueRef;
use rusqlite::Connection;

use crate::schema::Schema;

use super::{RawRow, RawValue, Store, StoreError};

/// Number of SQLite VM ops between deadline checks
const PROGRESS_OPS: i32 = 1000;

/// SQLite store with one mutex-serialized connection
pub struct SqliteStore {
    conn: Mutex<Connection>,
    timeout: Option<Duration>,
}

impl SqliteStore {
    /// Open a store backed by a database file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| StoreError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
            timeout: None,
        })
    }

    /// Open an in-memory store
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| StoreError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
            timeout: None,
        })
    }

    /// Bound statement wall time. A statement past its deadline is
    /// interrupted and reported as a store error.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Create every table in the catalog
    pub fn provision(&self, schema: &Schema) -> Result<(), StoreError> {
        self.execute_batch(&schema.create_tables_sql())
    }

    /// Run raw statements. Used for provisioning and fixture loading,
    /// never for query execution.
    pub fn execute_batch(&self, sql: &str) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute_batch(sql).map_err(|e| StoreError(e.to_string()))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError("store connection lock poisoned".to_string()))
    }
}

impl Store for SqliteStore {
    fn run(&self, sql: &str) -> Result<Vec<RawRow>, StoreError> {
        let conn = self.lock()?;

        if let Some(timeout) = self.timeout {
            let deadline = Instant::now() + timeout;
            conn.progress_handler(PROGRESS_OPS, Some(move || Instant::now() >= deadline));
        }

        let result = run_statement(&conn, sql);

        if self.timeout.is_some() {
            conn.progress_handler(0, None::<fn() -> bool>);
        }

        result
    }
}

fn run_statement(conn: &Connection, sql: &str) -> Result<Vec<RawRow>, StoreError> {
    let mut stmt = conn.prepare(sql).map_err(|e| StoreError(e.to_string()))?;
    let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

    let mut rows = stmt.query([]).map_err(|e| StoreError(e.to_string()))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next().map_err(|e| StoreError(e.to_string()))? {
        let mut columns = Vec::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            let value = row.get_ref(i).map_err(|e| StoreError(e.to_string()))?;
            columns.push((name.clone(), raw_value(value)));
        }
        out.push(RawRow { columns });
    }
    Ok(out)
}

fn raw_value(value: ValueRef<'_>) -> RawValue {
    match value {
        ValueRef::Null => RawValue::Null,
        ValueRef::Integer(n) => RawValue::Integer(n),
        ValueRef::Real(f) => RawValue::Real(f),
        ValueRef::Text(bytes) => RawValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => RawValue::Text(String::from_utf8_lossy(bytes).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.provision(&Schema::builtin()).unwrap();
        store
            .execute_batch(
                "INSERT INTO \"user\" (uid, username, name, is_app_user) \
                 VALUES (1234, 'chuck', 'Chuck Norris', 1);",
            )
            .unwrap();
        store
    }

    #[test]
    fn test_rows_come_back_in_column_order() {
        let store = seeded_store();
        let rows = store
            .run("SELECT uid, username FROM \"user\" WHERE uid = 1234")
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].columns,
            vec![
                ("uid".to_string(), RawValue::Integer(1234)),
                ("username".to_string(), RawValue::Text("chuck".to_string())),
            ]
        );
    }

    #[test]
    fn test_missing_values_are_null() {
        let store = seeded_store();
        let rows = store
            .run("SELECT pic_big FROM \"user\" WHERE uid = 1234")
            .unwrap();
        assert_eq!(rows[0].columns[0].1, RawValue::Null);
    }

    #[test]
    fn test_store_error_message_is_verbatim() {
        let store = seeded_store();
        let err = store.run("SELECT zip FROM \"nosuch\"").unwrap_err();
        assert!(err.to_string().contains("no such table"));
    }

    #[test]
    fn test_timeout_interrupts_runaway_statement() {
        let store = seeded_store().with_timeout(Duration::from_millis(50));
        let err = store
            .run(
                "WITH RECURSIVE c(x) AS (VALUES(1) UNION ALL SELECT x + 1 FROM c) \
                 SELECT count(*) FROM c",
            )
            .unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_on_disk_store_round_trip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("fql.db");
        let store = SqliteStore::open(&path).unwrap();
        store.provision(&Schema::builtin()).unwrap();
        store
            .execute_batch("INSERT INTO friend (uid1, uid2) VALUES (1, 2);")
            .unwrap();

        let reopened = SqliteStore::open(&path).unwrap();
        let rows = reopened.run("SELECT uid2 FROM friend WHERE uid1 = 1").unwrap();
        assert_eq!(rows[0].columns[0].1, RawValue::Integer(2));
    }
}
