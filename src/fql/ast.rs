//! Token tree for parsed FQL statements
//!
//! The parser produces a generic node tree rather than a full SQL AST:
//! enough structure to locate the statement kind, the queried table, and
//! the predicate subtree, while preserving original token order so the
//! assembler can serialize the statement back to executable text.

use std::fmt;
use std::fmt::Write as _;

use super::token::{unquote, Keyword};

/// Statement kinds the engine understands. FQL is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
}

/// One node of the token tree.
///
/// Literal nodes carry raw source text (quotes included for strings) so
/// serialization reproduces the original spelling.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Keyword(Keyword),
    Identifier(String),
    /// String literal, raw text including quotes. Opaque to every later
    /// stage except function evaluation.
    StringLiteral(String),
    /// Number literal, raw text
    NumberLiteral(String),
    /// `SELECT *` marker
    Wildcard,
    /// Comparison operator text
    Op(String),
    /// Passed-through punctuation, including `,`
    Symbol(char),
    /// Folded `left op right`
    Comparison {
        left: Box<Node>,
        op: String,
        right: Box<Node>,
    },
    /// Parenthesized group
    Group(Vec<Node>),
    /// `name(arg, arg, ...)` with separators dropped
    FunctionCall { name: String, args: Vec<Node> },
}

impl Node {
    /// Decoded value of a string literal node
    pub fn string_value(&self) -> Option<String> {
        match self {
            Node::StringLiteral(raw) => unquote(raw),
            _ => None,
        }
    }

    /// Integer value of a number literal node
    pub fn integer_value(&self) -> Option<i64> {
        match self {
            Node::NumberLiteral(raw) => raw.parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Keyword(k) => write!(f, "{k}"),
            Node::Identifier(s) => write!(f, "{s}"),
            Node::StringLiteral(s) => write!(f, "{s}"),
            Node::NumberLiteral(s) => write!(f, "{s}"),
            Node::Wildcard => write!(f, "*"),
            Node::Op(s) => write!(f, "{s}"),
            Node::Symbol(c) => write!(f, "{c}"),
            Node::Comparison { left, op, right } => write!(f, "{left} {op} {right}"),
            Node::Group(children) => {
                let mut inner = String::new();
                write_sequence(&mut inner, children);
                write!(f, "({inner})")
            }
            Node::FunctionCall { name, args } => {
                let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{name}({})", rendered.join(", "))
            }
        }
    }
}

/// Serialize a node sequence with single spaces between nodes, except that
/// a comma attaches to the node before it.
pub fn write_sequence(out: &mut String, nodes: &[Node]) {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 && !matches!(node, Node::Symbol(',')) {
            out.push(' ');
        }
        let _ = write!(out, "{node}");
    }
}

/// A structurally parsed statement.
///
/// Holds the full top-level node sequence plus the positions the later
/// stages need. A missing table and a missing predicate are both legal
/// here; the validator turns them into errors.
#[derive(Debug, Clone)]
pub struct ParsedStatement {
    /// Top-level nodes in original order
    pub nodes: Vec<Node>,
    /// Table name following the top-level FROM, unwrapped from one level
    /// of grouping if present
    pub table: Option<String>,
    /// Index in `nodes` of the table node
    pub table_index: Option<usize>,
    /// Index in `nodes` of the top-level WHERE keyword
    pub where_index: Option<usize>,
    /// One past the last predicate node (predicate stops at a top-level
    /// ORDER or LIMIT)
    pub predicate_end: usize,
}

impl ParsedStatement {
    /// The statement kind, if recognizable from the first token
    pub fn kind(&self) -> Option<StatementKind> {
        match self.nodes.first() {
            Some(Node::Keyword(Keyword::Select)) => Some(StatementKind::Select),
            _ => None,
        }
    }

    /// The predicate subtree, if a top-level WHERE is present
    pub fn predicate(&self) -> Option<&[Node]> {
        self.where_index
            .map(|w| &self.nodes[w + 1..self.predicate_end])
    }

    /// Mutable access to the predicate subtree
    pub fn predicate_mut(&mut self) -> Option<&mut [Node]> {
        let end = self.predicate_end;
        self.where_index
            .map(move |w| &mut self.nodes[w + 1..end])
    }
}
