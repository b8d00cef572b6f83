//! Structural parser for FQL
//!
//! Builds the token tree and extracts the statement's structure: the
//! queried table (the token after the top-level FROM, unwrapped from one
//! level of grouping) and the predicate (the top-level WHERE subtree, up
//! to a trailing ORDER or LIMIT clause).
//!
//! The grammar here is deliberately permissive. Missing tables and
//! missing predicates are legal parse outcomes; the validator owns the
//! semantics. The only hard failures are an unterminated string literal
//! and groups nested past the engine's depth bound.

use crate::error::{FqlError, FqlResult};

use super::ast::{Node, ParsedStatement};
use super::token::{tokenize, Keyword, Token};

/// Parse query text into a structured statement.
///
/// `max_depth` bounds group nesting so adversarial input cannot exhaust
/// the stack during later recursive passes.
pub fn parse(text: &str, max_depth: usize) -> FqlResult<ParsedStatement> {
    let tokens = tokenize(text)?;
    let mut pos = 0;
    let nodes = build_sequence(&tokens, &mut pos, 0, max_depth)?;
    let nodes = fold_comparisons(nodes);

    let mut table = None;
    let mut table_index = None;
    let mut where_index = None;

    for (i, node) in nodes.iter().enumerate() {
        match node {
            Node::Keyword(Keyword::From) if table_index.is_none() => {
                match nodes.get(i + 1) {
                    Some(Node::Identifier(name)) => {
                        table = Some(name.clone());
                        table_index = Some(i + 1);
                    }
                    // One level of grouping around the table name is legal
                    Some(Node::Group(children)) if children.len() == 1 => {
                        if let Node::Identifier(name) = &children[0] {
                            table = Some(name.clone());
                            table_index = Some(i + 1);
                        }
                    }
                    _ => {}
                }
            }
            Node::Keyword(Keyword::Where) if where_index.is_none() => {
                where_index = Some(i);
            }
            _ => {}
        }
    }

    // The predicate stops at a top-level ORDER or LIMIT; anything after
    // passes through to the store untouched.
    let predicate_end = match where_index {
        Some(w) => nodes[w + 1..]
            .iter()
            .position(|n| {
                matches!(
                    n,
                    Node::Keyword(Keyword::Order) | Node::Keyword(Keyword::Limit)
                )
            })
            .map(|off| w + 1 + off)
            .unwrap_or(nodes.len()),
        None => nodes.len(),
    };

    Ok(ParsedStatement {
        nodes,
        table,
        table_index,
        where_index,
        predicate_end,
    })
}

/// Build a node sequence from the token stream.
///
/// At depth zero this consumes the whole stream; inside a group it stops
/// at the matching close paren. An unclosed group simply ends at the end
/// of input, and a stray close paren at the top level passes through as a
/// symbol.
fn build_sequence(
    tokens: &[Token],
    pos: &mut usize,
    depth: usize,
    max_depth: usize,
) -> FqlResult<Vec<Node>> {
    if depth > max_depth {
        return Err(FqlError::NestingTooDeep);
    }

    let mut nodes = Vec::new();
    while *pos < tokens.len() {
        let token = tokens[*pos].clone();
        *pos += 1;
        match token {
            Token::RParen => {
                if depth > 0 {
                    return Ok(nodes);
                }
                nodes.push(Node::Symbol(')'));
            }
            Token::LParen => {
                let children = build_sequence(tokens, pos, depth + 1, max_depth)?;
                nodes.push(Node::Group(children));
            }
            Token::Identifier(name) => {
                if matches!(tokens.get(*pos), Some(Token::LParen)) {
                    *pos += 1;
                    let inner = build_sequence(tokens, pos, depth + 1, max_depth)?;
                    // Separators are dropped; each remaining node is one
                    // argument token, which is exactly what arity checking
                    // counts.
                    let args = inner
                        .into_iter()
                        .filter(|n| !matches!(n, Node::Symbol(',')))
                        .collect();
                    nodes.push(Node::FunctionCall { name, args });
                } else {
                    nodes.push(Node::Identifier(name));
                }
            }
            Token::Keyword(k) => nodes.push(Node::Keyword(k)),
            Token::StringLit(raw) => nodes.push(Node::StringLiteral(raw)),
            Token::NumberLit(raw) => nodes.push(Node::NumberLiteral(raw)),
            Token::Star => nodes.push(Node::Wildcard),
            Token::Op(op) => nodes.push(Node::Op(op)),
            Token::Comma => nodes.push(Node::Symbol(',')),
            Token::Symbol(c) => nodes.push(Node::Symbol(c)),
        }
    }
    Ok(nodes)
}

fn is_operand(node: &Node) -> bool {
    matches!(
        node,
        Node::Identifier(_)
            | Node::StringLiteral(_)
            | Node::NumberLiteral(_)
            | Node::Group(_)
            | Node::FunctionCall { .. }
    )
}

/// Fold `operand op operand` triples into comparison nodes, recursing
/// into groups. Function arguments are left unfolded so arity counting
/// sees the original tokens.
fn fold_comparisons(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    let mut iter = nodes.into_iter().peekable();

    while let Some(node) = iter.next() {
        let node = match node {
            Node::Group(children) => Node::Group(fold_comparisons(children)),
            other => other,
        };

        if let Node::Op(op) = &node {
            let left_ready = out.last().map(is_operand).unwrap_or(false);
            let right_ready = iter.peek().map(is_operand).unwrap_or(false);
            if left_ready && right_ready {
                let op = op.clone();
                let left = out.pop().unwrap_or(Node::Symbol('?'));
                let right = match iter.next() {
                    Some(Node::Group(children)) => Node::Group(fold_comparisons(children)),
                    Some(other) => other,
                    None => Node::Symbol('?'),
                };
                out.push(Node::Comparison {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                });
                continue;
            }
        }

        out.push(node);
    }
    out
}
