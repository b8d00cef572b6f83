//! Tokenizer for FQL query text
//!
//! Converts raw query text into a flat token stream. The tokenizer is
//! deliberately permissive: anything it does not recognize passes through
//! as a `Symbol` token so the grammar stays open and all semantics live in
//! the validator.
//!
//! String literals are opaque. Their contents are carried verbatim
//! (quotes included) and are never re-inspected by later stages, so a
//! literal value that happens to spell a column name can never trigger
//! column matching.

use std::fmt;

use crate::error::{FqlError, FqlResult};

/// Keywords the structural parser cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Select,
    From,
    Where,
    And,
    Or,
    Not,
    In,
    Order,
    By,
    Limit,
    Asc,
    Desc,
}

impl Keyword {
    /// Case-insensitive keyword lookup
    pub fn resolve(word: &str) -> Option<Keyword> {
        match word.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Keyword::Select),
            "FROM" => Some(Keyword::From),
            "WHERE" => Some(Keyword::Where),
            "AND" => Some(Keyword::And),
            "OR" => Some(Keyword::Or),
            "NOT" => Some(Keyword::Not),
            "IN" => Some(Keyword::In),
            "ORDER" => Some(Keyword::Order),
            "BY" => Some(Keyword::By),
            "LIMIT" => Some(Keyword::Limit),
            "ASC" => Some(Keyword::Asc),
            "DESC" => Some(Keyword::Desc),
            _ => None,
        }
    }

    /// Canonical text used when re-serializing the statement
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::Where => "WHERE",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
            Keyword::In => "IN",
            Keyword::Order => "ORDER",
            Keyword::By => "BY",
            Keyword::Limit => "LIMIT",
            Keyword::Asc => "ASC",
            Keyword::Desc => "DESC",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tokens produced by the tokenizer.
///
/// Literal tokens carry their raw source text (quotes included for
/// strings) so re-serialization preserves the original spelling.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Keyword(Keyword),
    Identifier(String),
    /// String literal, raw text including the surrounding quotes
    StringLit(String),
    /// Number literal, raw text
    NumberLit(String),
    /// Comparison operator: = != <> < <= > >=
    Op(String),
    LParen,
    RParen,
    Comma,
    Star,
    /// Any other character, passed through untouched
    Symbol(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(k) => write!(f, "{k}"),
            Token::Identifier(s) => write!(f, "{s}"),
            Token::StringLit(s) => write!(f, "{s}"),
            Token::NumberLit(s) => write!(f, "{s}"),
            Token::Op(s) => write!(f, "{s}"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Star => write!(f, "*"),
            Token::Symbol(c) => write!(f, "{c}"),
        }
    }
}

/// Tokenize query text.
///
/// Fails only on an unterminated string literal; every other input
/// tokenizes (possibly into `Symbol` tokens).
pub fn tokenize(text: &str) -> FqlResult<Vec<Token>> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        if c == '\'' || c == '"' {
            let (lit, next) = read_string(&chars, pos, c)?;
            tokens.push(Token::StringLit(lit));
            pos = next;
            continue;
        }

        if c.is_ascii_digit() {
            let start = pos;
            while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '.') {
                pos += 1;
            }
            tokens.push(Token::NumberLit(chars[start..pos].iter().collect()));
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let start = pos;
            while pos < chars.len()
                && (chars[pos].is_alphanumeric() || chars[pos] == '_' || chars[pos] == '.')
            {
                pos += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            match Keyword::resolve(&word) {
                Some(k) => tokens.push(Token::Keyword(k)),
                None => tokens.push(Token::Identifier(word)),
            }
            continue;
        }

        match c {
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            ',' => tokens.push(Token::Comma),
            '*' => tokens.push(Token::Star),
            '=' => tokens.push(Token::Op("=".into())),
            '<' | '>' | '!' => {
                let mut op = String::from(c);
                if pos + 1 < chars.len() && matches!(chars[pos + 1], '=' | '>') {
                    op.push(chars[pos + 1]);
                    pos += 1;
                }
                tokens.push(Token::Op(op));
            }
            other => tokens.push(Token::Symbol(other)),
        }
        pos += 1;
    }

    Ok(tokens)
}

/// Read a quoted string starting at `start` (which holds the quote).
///
/// A doubled quote character inside the literal is an escaped quote. The
/// returned text includes the surrounding quotes. Returns the literal and
/// the position just past the closing quote.
fn read_string(chars: &[char], start: usize, quote: char) -> FqlResult<(String, usize)> {
    let mut lit = String::from(quote);
    let mut pos = start + 1;

    while pos < chars.len() {
        let c = chars[pos];
        if c == quote {
            if pos + 1 < chars.len() && chars[pos + 1] == quote {
                lit.push(quote);
                lit.push(quote);
                pos += 2;
                continue;
            }
            lit.push(quote);
            return Ok((lit, pos + 1));
        }
        lit.push(c);
        pos += 1;
    }

    Err(FqlError::UnexpectedEnd)
}

/// Decode the raw text of a string literal (quotes stripped, doubled
/// quotes collapsed). Returns `None` if the text is not a quoted string.
pub fn unquote(raw: &str) -> Option<String> {
    let mut chars = raw.chars();
    let quote = chars.next()?;
    if (quote != '\'' && quote != '"') || !raw.ends_with(quote) || raw.len() < 2 {
        return None;
    }
    let inner = &raw[quote.len_utf8()..raw.len() - quote.len_utf8()];
    Some(inner.replace(&format!("{quote}{quote}"), &quote.to_string()))
}
