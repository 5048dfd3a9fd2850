//! Tokens produced by the scanner.

use crate::syntax_kind::TokenKind;
use lox_core::text::TextSpan;
use serde::Serialize;
use std::fmt;

/// The decoded value of a literal token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Number(f64),
    /// The text between the quotes, with no escape processing.
    String(String),
}

impl Literal {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Literal::Number(value) => Some(*value),
            Literal::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(value) => Some(value),
            Literal::Number(_) => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Debug keeps the fractional part, so 1 prints as 1.0
            Literal::Number(value) => write!(f, "{:?}", value),
            Literal::String(value) => f.write_str(value),
        }
    }
}

/// A scanned token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The exact source text of the token. Empty for end-of-file.
    pub lexeme: String,
    /// The decoded value for string and number tokens.
    pub literal: Option<Literal>,
    /// The 1-based line on which the token starts.
    pub line: u32,
    /// Byte span of the lexeme in the source text.
    pub span: TextSpan,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, span: TextSpan) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
            span,
        }
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    /// The end-of-file sentinel at the given offset and line.
    pub fn eof(pos: u32, line: u32) -> Self {
        Self::new(TokenKind::Eof, String::new(), line, TextSpan::empty(pos))
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.kind, self.lexeme)?;
        match &self.literal {
            Some(literal) => write!(f, "{}", literal),
            None => f.write_str("nil"),
        }
    }
}
