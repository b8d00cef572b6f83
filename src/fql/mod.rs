//! The FQL language pipeline
//!
//! Text goes in one end and executable SQL comes out the other, in four
//! strictly ordered stages:
//!
//! 1. Tokenize/parse into a token tree ([`parser::parse`])
//! 2. Validate against the catalog ([`validator::validate`])
//! 3. Rewrite built-in functions ([`functions::rewrite`])
//! 4. Assemble executable text ([`assembler::assemble`])
//!
//! Each stage is a pure function; the first violated rule wins and no
//! later stage runs.

mod assembler;
mod ast;
mod functions;
mod parser;
mod token;
mod validator;

pub use assembler::assemble;
pub use ast::{Node, ParsedStatement, StatementKind};
pub use functions::{rewrite, Builtin};
pub use parser::parse;
pub use token::{tokenize, Keyword, Token};
pub use validator::validate;
