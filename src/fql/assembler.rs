//! Statement assembly
//!
//! Serializes a validated, rewritten statement back into executable SQL
//! text. The table identifier is double-quoted because the catalog has
//! tables named after SQL keywords (`group`). No validation happens
//! here; the earlier stages have already succeeded.

use std::fmt::Write as _;

use super::ast::{write_sequence, Node, ParsedStatement};

/// Serialize the statement, quoting the table identifier.
pub fn assemble(stmt: &ParsedStatement) -> String {
    let mut out = String::new();
    for (i, node) in stmt.nodes.iter().enumerate() {
        if i > 0 && !matches!(node, Node::Symbol(',')) {
            out.push(' ');
        }
        if stmt.table_index == Some(i) {
            // The table node itself is replaced by its quoted name; a
            // grouping wrapper around it is dropped.
            if let Some(table) = stmt.table.as_deref() {
                let _ = write!(out, "\"{table}\"");
                continue;
            }
        }
        let mut piece = String::new();
        write_sequence(&mut piece, std::slice::from_ref(node));
        out.push_str(&piece);
    }
    out
}
