//! Schema type definitions for the FQL catalog
//!
//! Supported semantic types:
//! - string: UTF-8 string
//! - int: 64-bit signed integer
//! - float: 64-bit floating point
//! - bool: stored as 0/1, rendered as boolean
//! - array: stored as serialized JSON text, rendered as a list
//! - object: stored as serialized JSON text, rendered as a structure

use serde::{Deserialize, Serialize};

/// Semantic column types declared in the FQL catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FqlType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean, stored as 0/1
    Bool,
    /// List value, stored as serialized JSON text
    Array,
    /// Structured value, stored as serialized JSON text
    Object,
}

impl FqlType {
    /// Returns the type name for error messages and tooling
    pub fn type_name(&self) -> &'static str {
        match self {
            FqlType::String => "string",
            FqlType::Int => "int",
            FqlType::Float => "float",
            FqlType::Bool => "bool",
            FqlType::Array => "array",
            FqlType::Object => "object",
        }
    }

    /// Returns the storage affinity the backing store uses for this type
    pub fn storage_type(&self) -> &'static str {
        match self {
            FqlType::String => "TEXT",
            FqlType::Int => "INTEGER",
            FqlType::Float => "REAL",
            FqlType::Bool => "INTEGER",
            FqlType::Array => "TEXT",
            FqlType::Object => "TEXT",
        }
    }
}

/// A single column declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name as it appears in queries and results
    pub name: String,
    /// Semantic type used when typing result rows
    pub fql_type: FqlType,
    /// Storage affinity in the backing store
    pub storage_type: String,
    /// Whether this column may appear in a WHERE clause
    pub indexable: bool,
}

impl Column {
    /// Create a non-indexable column
    pub fn new(name: impl Into<String>, fql_type: FqlType) -> Self {
        Self {
            name: name.into(),
            fql_type,
            storage_type: fql_type.storage_type().to_string(),
            indexable: false,
        }
    }

    /// Create an indexable column
    pub fn indexed(name: impl Into<String>, fql_type: FqlType) -> Self {
        Self {
            indexable: true,
            ..Self::new(name, fql_type)
        }
    }
}

/// An ordered table declaration.
///
/// Column order is preserved: it determines result-row shape and matches
/// the declared documentation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
    /// Table name as it appears after FROM
    pub name: String,
    /// Columns in declaration order
    pub columns: Vec<Column>,
}

impl TableDef {
    /// Create a table definition
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// The complete, immutable table catalog.
///
/// Built once at process start and never mutated afterward, so concurrent
/// reads need no synchronization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    tables: Vec<TableDef>,
}

impl Schema {
    /// Create a schema from table definitions
    pub fn new(tables: Vec<TableDef>) -> Self {
        Self { tables }
    }

    /// Look up a table by name
    pub fn table(&self, name: &str) -> Option<&TableDef> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Look up a column in a table
    pub fn lookup_column(&self, table: &str, name: &str) -> Option<&Column> {
        self.table(table).and_then(|t| t.column(name))
    }

    /// Table names in declaration order. Used by tooling, not the hot path.
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    /// CREATE TABLE text for provisioning a backing store with this catalog
    pub fn create_tables_sql(&self) -> String {
        let mut sql = String::new();
        for table in &self.tables {
            sql.push_str(&format!("CREATE TABLE IF NOT EXISTS \"{}\" (", table.name));
            for (i, col) in table.columns.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(&format!("\"{}\" {}", col.name, col.storage_type));
            }
            sql.push_str(");\n");
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_table_schema() -> Schema {
        Schema::new(vec![
            TableDef::new(
                "user",
                vec![
                    Column::indexed("uid", FqlType::Int),
                    Column::new("pic", FqlType::String),
                ],
            ),
            TableDef::new("friend", vec![Column::indexed("uid1", FqlType::Int)]),
        ])
    }

    #[test]
    fn test_column_lookup() {
        let schema = two_table_schema();
        assert!(schema.lookup_column("user", "uid").is_some());
        assert!(schema.lookup_column("user", "uid1").is_none());
        assert!(schema.lookup_column("missing", "uid").is_none());
    }

    #[test]
    fn test_indexable_flags() {
        let schema = two_table_schema();
        assert!(schema.lookup_column("user", "uid").unwrap().indexable);
        assert!(!schema.lookup_column("user", "pic").unwrap().indexable);
    }

    #[test]
    fn test_storage_type_follows_semantic_type() {
        assert_eq!(Column::new("flag", FqlType::Bool).storage_type, "INTEGER");
        assert_eq!(Column::new("tags", FqlType::Array).storage_type, "TEXT");
        assert_eq!(Column::new("lat", FqlType::Float).storage_type, "REAL");
    }

    #[test]
    fn test_create_tables_sql_quotes_identifiers() {
        let schema = two_table_schema();
        let sql = schema.create_tables_sql();
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS \"user\""));
        assert!(sql.contains("\"uid\" INTEGER"));
        assert!(sql.contains("\"pic\" TEXT"));
    }

    #[test]
    fn test_table_order_preserved() {
        let schema = two_table_schema();
        let names: Vec<&str> = schema.tables().collect();
        assert_eq!(names, vec!["user", "friend"]);
    }
}
