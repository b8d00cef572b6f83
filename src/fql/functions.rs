//! Built-in function registry and rewriter
//!
//! FQL carries a fixed, closed set of functions. Each one is rewritten
//! in place before the statement reaches the store: some into the
//! store's own functions, some evaluated eagerly into literals. The
//! registry is an exhaustive enum, so "is every function handled?" is a
//! compile-time property rather than a string-lookup one.
//!
//! This stage never touches the database. It is a tree-to-tree transform
//! plus a pure string computation for `strpos`.

use chrono::Utc;

use crate::context::ExecutionContext;
use crate::error::{FqlError, FqlResult};

use super::ast::{Node, ParsedStatement};

/// The closed set of FQL built-in functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `me()`: the calling user's id
    Me,
    /// `now()`: current Unix timestamp
    Now,
    /// `strlen(x)`: string length, maps to the store's `length`
    Strlen,
    /// `substr(s, start, len)`: 0-based substring
    Substr,
    /// `strpos(s, sub)`: 0-based position of `sub` in `s`, or -1
    Strpos,
}

impl Builtin {
    /// Look up a function by name. Names are exact; there are no aliases.
    pub fn resolve(name: &str) -> Option<Builtin> {
        match name {
            "me" => Some(Builtin::Me),
            "now" => Some(Builtin::Now),
            "strlen" => Some(Builtin::Strlen),
            "substr" => Some(Builtin::Substr),
            "strpos" => Some(Builtin::Strpos),
            _ => None,
        }
    }

    /// Required argument count
    pub fn arity(&self) -> usize {
        match self {
            Builtin::Me => 0,
            Builtin::Now => 0,
            Builtin::Strlen => 1,
            Builtin::Substr => 3,
            Builtin::Strpos => 2,
        }
    }
}

/// Rewrite every function call in the statement, depth-first.
///
/// Arguments are rewritten before the call that holds them, so nested
/// calls resolve inside-out.
pub fn rewrite(
    stmt: &mut ParsedStatement,
    ctx: &ExecutionContext,
    max_depth: usize,
) -> FqlResult<()> {
    for node in stmt.nodes.iter_mut() {
        rewrite_node(node, ctx, 0, max_depth)?;
    }
    Ok(())
}

fn rewrite_node(
    node: &mut Node,
    ctx: &ExecutionContext,
    depth: usize,
    max_depth: usize,
) -> FqlResult<()> {
    if depth > max_depth {
        return Err(FqlError::NestingTooDeep);
    }

    match node {
        Node::Group(children) => {
            for child in children.iter_mut() {
                rewrite_node(child, ctx, depth + 1, max_depth)?;
            }
            Ok(())
        }
        Node::Comparison { left, right, .. } => {
            rewrite_node(left, ctx, depth + 1, max_depth)?;
            rewrite_node(right, ctx, depth + 1, max_depth)?;
            Ok(())
        }
        Node::FunctionCall { name, args } => {
            for arg in args.iter_mut() {
                rewrite_node(arg, ctx, depth + 1, max_depth)?;
            }

            let builtin = match Builtin::resolve(name) {
                Some(b) => b,
                None => return Err(FqlError::InvalidFunction(name.clone())),
            };
            if args.len() != builtin.arity() {
                return Err(FqlError::arity_mismatch(
                    name.clone(),
                    builtin.arity(),
                    args.len(),
                ));
            }

            let replacement = apply(builtin, args, ctx)?;
            *node = replacement;
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Produce the replacement node for a validated call.
fn apply(builtin: Builtin, args: &mut Vec<Node>, ctx: &ExecutionContext) -> FqlResult<Node> {
    match builtin {
        Builtin::Me => Ok(Node::NumberLiteral(ctx.current_user_id.to_string())),

        Builtin::Now => Ok(Node::NumberLiteral(Utc::now().timestamp().to_string())),

        Builtin::Strlen => Ok(Node::FunctionCall {
            name: "length".to_string(),
            args: std::mem::take(args),
        }),

        Builtin::Substr => {
            // FQL offsets are 0-based; the store's substr is 1-based.
            // Only a literal start offset can be shifted at rewrite time.
            let start = match args[1].integer_value() {
                Some(n) => n,
                None => return Err(FqlError::unsupported_argument("substr")),
            };
            let mut rewritten = std::mem::take(args);
            rewritten[1] = Node::NumberLiteral((start + 1).to_string());
            Ok(Node::FunctionCall {
                name: "substr".to_string(),
                args: rewritten,
            })
        }

        Builtin::Strpos => {
            // Evaluated eagerly; both operands must be string literals
            let (haystack, needle) = match (args[0].string_value(), args[1].string_value()) {
                (Some(h), Some(n)) => (h, n),
                _ => return Err(FqlError::unsupported_argument("strpos")),
            };
            let position = haystack
                .find(&needle)
                .map(|byte| haystack[..byte].chars().count() as i64)
                .unwrap_or(-1);
            Ok(Node::NumberLiteral(position.to_string()))
        }
    }
}
