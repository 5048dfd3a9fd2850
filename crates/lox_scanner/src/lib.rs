//! lox_scanner: Lexer/tokenizer for Lox source code.
//!
//! Turns source text into a flat list of tokens for a parser:
//! - single and double character operators
//! - string literals (multi-line, no escapes)
//! - number literals, always decoded as `f64`
//! - identifiers and the sixteen reserved words
//!
//! Lexical errors are handed to a caller-supplied
//! [`lox_diagnostics::DiagnosticReporter`]; scanning always runs to the end.

mod char_codes;
mod scanner;
mod syntax_kind;
mod token;

pub use scanner::{scan_tokens, scan_with_diagnostics};
pub use syntax_kind::TokenKind;
pub use token::{Literal, Token};
