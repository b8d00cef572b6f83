//! Table catalog subsystem for fqlite
//!
//! Static, read-only table/column metadata with per-column semantic type
//! and indexability flag. Leaf dependency for the whole pipeline.
//!
//! # Design Principles
//!
//! - Built once at process start, never mutated
//! - Safe for unsynchronized concurrent reads
//! - Column order preserved (it determines result-row shape)
//! - Indexability is declared here and enforced by the validator

mod catalog;
mod types;

pub use types::{Column, FqlType, Schema, TableDef};
