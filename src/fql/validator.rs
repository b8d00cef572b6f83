//! Semantic validation of parsed statements
//!
//! Pure function of the statement and the catalog; no side effects. The
//! checks run in a fixed order so a given malformed input always produces
//! the same error:
//!
//! 1. The statement starts with SELECT
//! 2. The token after SELECT is not `*`
//! 3. A predicate is present
//! 4. A table is present
//! 5. Every column referenced in the predicate is indexable
//!
//! The first violated rule wins; nothing after it runs.

use crate::error::{FqlError, FqlResult};
use crate::schema::Schema;

use super::ast::{Node, ParsedStatement, StatementKind};
use super::token::Keyword;

/// Validate a parsed statement against the catalog.
pub fn validate(stmt: &ParsedStatement, schema: &Schema, max_depth: usize) -> FqlResult<()> {
    let first = match stmt.nodes.first() {
        Some(node) => node,
        None => return Err(FqlError::UnexpectedEnd),
    };
    if stmt.kind() != Some(StatementKind::Select) {
        return Err(FqlError::UnexpectedToken(first.to_string()));
    }

    if matches!(stmt.nodes.get(1), Some(Node::Wildcard)) {
        return Err(FqlError::Wildcard);
    }

    let predicate = match stmt.predicate() {
        Some(nodes) if !nodes.is_empty() => nodes,
        _ => return Err(FqlError::UnexpectedEnd),
    };

    let table = match stmt.table.as_deref() {
        Some(table) => table,
        // A predicate exists but nothing to apply it to
        None => return Err(FqlError::UnexpectedToken(Keyword::Where.to_string())),
    };

    check_indexable(predicate, table, schema, 0, max_depth)
}

/// Walk the predicate and require every column reference to be indexable.
///
/// Identifiers inside string literals never reach this walk (literals are
/// opaque tokens), and identifiers inside function argument lists are
/// function input, not column filters. A name absent from the catalog
/// counts as not indexable.
fn check_indexable(
    nodes: &[Node],
    table: &str,
    schema: &Schema,
    depth: usize,
    max_depth: usize,
) -> FqlResult<()> {
    if depth > max_depth {
        return Err(FqlError::NestingTooDeep);
    }

    for node in nodes {
        check_node(node, table, schema, depth, max_depth)?;
    }
    Ok(())
}

fn check_node(
    node: &Node,
    table: &str,
    schema: &Schema,
    depth: usize,
    max_depth: usize,
) -> FqlResult<()> {
    if depth > max_depth {
        return Err(FqlError::NestingTooDeep);
    }

    match node {
        Node::Identifier(name) => {
            let indexable = schema
                .lookup_column(table, name)
                .map(|c| c.indexable)
                .unwrap_or(false);
            if !indexable {
                return Err(FqlError::NotIndexable);
            }
            Ok(())
        }
        Node::Comparison { left, op: _, right } => {
            check_node(left, table, schema, depth + 1, max_depth)?;
            check_node(right, table, schema, depth + 1, max_depth)
        }
        Node::Group(children) => {
            check_indexable(children, table, schema, depth + 1, max_depth)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fql::parser::parse;

    const DEPTH: usize = 32;

    fn check(text: &str) -> FqlResult<()> {
        let stmt = parse(text, DEPTH).unwrap();
        validate(&stmt, &Schema::builtin(), DEPTH)
    }

    #[test]
    fn test_valid_statement_passes() {
        assert!(check("SELECT name FROM user WHERE uid = 1234").is_ok());
    }

    #[test]
    fn test_non_select_is_unexpected_token() {
        let err = check("UPDATE user SET name = 'x' WHERE uid = 1").unwrap_err();
        assert!(matches!(err, FqlError::UnexpectedToken(ref t) if t == "UPDATE"));
    }

    #[test]
    fn test_wildcard_rejected_even_when_otherwise_valid() {
        let err = check("SELECT * FROM user WHERE uid = 1234").unwrap_err();
        assert!(matches!(err, FqlError::Wildcard));
    }

    #[test]
    fn test_missing_predicate_is_unexpected_end() {
        let err = check("SELECT uid FROM user").unwrap_err();
        assert!(matches!(err, FqlError::UnexpectedEnd));
    }

    #[test]
    fn test_missing_table_reports_where() {
        let err = check("SELECT uid WHERE uid = 1").unwrap_err();
        assert!(matches!(err, FqlError::UnexpectedToken(ref t) if t == "WHERE"));
    }

    #[test]
    fn test_check_order_wildcard_before_missing_predicate() {
        // Both rules are violated; the wildcard check runs first
        let err = check("SELECT * FROM user").unwrap_err();
        assert!(matches!(err, FqlError::Wildcard));
    }

    #[test]
    fn test_non_indexable_column_rejected() {
        let err = check("SELECT uid FROM user WHERE pic_big = 'x'").unwrap_err();
        assert!(matches!(err, FqlError::NotIndexable));
        assert_eq!(err.code(), 604);
    }

    #[test]
    fn test_unknown_column_counts_as_not_indexable() {
        let err = check("SELECT uid FROM user WHERE zipcode = 12345").unwrap_err();
        assert!(matches!(err, FqlError::NotIndexable));
    }

    #[test]
    fn test_column_name_inside_string_literal_is_ignored() {
        // The literal value spells non-indexable column names; it must
        // stay opaque
        assert!(check("SELECT uid FROM user WHERE username = \"pic pic_big type\"").is_ok());
    }

    #[test]
    fn test_descends_into_groups() {
        let err = check("SELECT uid FROM user WHERE (uid = 1 OR pic = 'x')").unwrap_err();
        assert!(matches!(err, FqlError::NotIndexable));
    }

    #[test]
    fn test_order_by_columns_are_not_predicate_columns() {
        assert!(check("SELECT name FROM user WHERE uid = 1 ORDER BY pic_big").is_ok());
    }
}
