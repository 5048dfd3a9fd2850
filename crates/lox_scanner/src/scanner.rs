//! The Lox scanner.
//!
//! Converts source text into a token list in a single forward pass. All
//! cursor state lives in a private `Scanner` that is created and consumed
//! inside one [`scan_tokens`] call.

use crate::char_codes::*;
use crate::syntax_kind::TokenKind;
use crate::token::{Literal, Token};
use lox_core::text::{TextPos, TextSpan};
use lox_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticReporter};
use tracing::{debug, instrument, trace};

/// Scan `source` into tokens, reporting lexical errors to `reporter`.
///
/// Scanning never stops early: a character that starts no lexeme and an
/// unterminated string are reported and contribute no token. The result
/// always ends with exactly one end-of-file token.
#[instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn scan_tokens<R>(source: &str, reporter: &mut R) -> Vec<Token>
where
    R: DiagnosticReporter + ?Sized,
{
    let tokens = Scanner::new(source, reporter).run();
    trace!(token_count = tokens.len(), "scan complete");
    tokens
}

/// Scan `source`, collecting diagnostics into a fresh [`DiagnosticCollection`].
pub fn scan_with_diagnostics(source: &str) -> (Vec<Token>, DiagnosticCollection) {
    let mut diagnostics = DiagnosticCollection::new();
    let tokens = scan_tokens(source, &mut diagnostics);
    (tokens, diagnostics)
}

struct Scanner<'src, 'r, R: ?Sized> {
    /// The source text being scanned.
    source: &'src str,
    bytes: &'src [u8],
    /// Start of the lexeme being scanned.
    start: usize,
    /// Next unconsumed byte.
    current: usize,
    /// Current 1-based line.
    line: u32,
    /// Line on which the current lexeme started.
    start_line: u32,
    tokens: Vec<Token>,
    reporter: &'r mut R,
}

impl<'src, 'r, R> Scanner<'src, 'r, R>
where
    R: DiagnosticReporter + ?Sized,
{
    fn new(source: &'src str, reporter: &'r mut R) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
            tokens: Vec::new(),
            reporter,
        }
    }

    fn run(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.scan_token();
        }
        self.tokens.push(Token::eof(self.current as TextPos, self.line));
        self.tokens
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    #[inline]
    fn is_at_end(&self) -> bool {
        self.current >= self.bytes.len()
    }

    /// Consume one byte. Only called when not at the end.
    #[inline]
    fn advance(&mut self) -> u8 {
        let ch = self.bytes[self.current];
        self.current += 1;
        ch
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.current).copied()
    }

    #[inline]
    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.current + 1).copied()
    }

    /// Consume the next byte only if it is `expected`.
    #[inline]
    fn match_byte(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn lexeme_span(&self) -> TextSpan {
        TextSpan::from_bounds(self.start as TextPos, self.current as TextPos)
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    fn scan_token(&mut self) {
        let ch = self.advance();
        match ch {
            LINE_FEED => self.line += 1,
            c if is_white_space_single_line(c) => {}

            b'(' => self.add_token(TokenKind::LeftParen),
            b')' => self.add_token(TokenKind::RightParen),
            b'{' => self.add_token(TokenKind::LeftBrace),
            b'}' => self.add_token(TokenKind::RightBrace),
            b',' => self.add_token(TokenKind::Comma),
            b'.' => self.add_token(TokenKind::Dot),
            b'-' => self.add_token(TokenKind::Minus),
            b'+' => self.add_token(TokenKind::Plus),
            b';' => self.add_token(TokenKind::Semicolon),
            b'*' => self.add_token(TokenKind::Star),

            b'!' => self.add_either(TokenKind::BangEqual, TokenKind::Bang),
            b'=' => self.add_either(TokenKind::EqualEqual, TokenKind::Equal),
            b'<' => self.add_either(TokenKind::LessEqual, TokenKind::Less),
            b'>' => self.add_either(TokenKind::GreaterEqual, TokenKind::Greater),

            SLASH => {
                if self.match_byte(SLASH) {
                    self.skip_line_comment();
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            DOUBLE_QUOTE => self.scan_string(),
            c if is_digit(c) => self.scan_number(),
            c if is_identifier_start(c) => self.scan_identifier(),

            _ => self.unexpected_character(),
        }
    }

    /// Pick the two-character kind when the next byte is `=`.
    fn add_either(&mut self, with_equals: TokenKind, alone: TokenKind) {
        let kind = if self.match_byte(EQUALS) { with_equals } else { alone };
        self.add_token(kind);
    }

    /// Skip to the next line feed, leaving it for the main loop to count.
    fn skip_line_comment(&mut self) {
        self.current = match memchr::memchr(LINE_FEED, &self.bytes[self.current..]) {
            Some(offset) => self.current + offset,
            None => self.bytes.len(),
        };
    }

    fn scan_string(&mut self) {
        let body_start = self.current;
        let rest = &self.bytes[body_start..];
        match memchr::memchr(DOUBLE_QUOTE, rest) {
            Some(offset) => {
                let body_end = body_start + offset;
                self.line += count_line_feeds(&rest[..offset]);
                let value = self.source[body_start..body_end].to_string();
                self.current = body_end + 1; // closing quote
                self.add_literal_token(TokenKind::String, Literal::String(value));
            }
            None => {
                self.line += count_line_feeds(rest);
                self.current = self.bytes.len();
                let diagnostic = Diagnostic::new(self.line, &messages::UNTERMINATED_STRING, &[])
                    .with_span(self.lexeme_span());
                self.report(diagnostic);
            }
        }
    }

    fn scan_number(&mut self) {
        self.skip_digits();
        if self.peek() == Some(DOT) && self.peek_next().is_some_and(is_digit) {
            self.current += 1;
            self.skip_digits();
        }
        // Digits with an optional fraction are always valid float syntax.
        let value = self.source[self.start..self.current]
            .parse::<f64>()
            .unwrap_or(f64::NAN);
        self.add_literal_token(TokenKind::Number, Literal::Number(value));
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(is_digit) {
            self.current += 1;
        }
    }

    fn scan_identifier(&mut self) {
        while self.peek().is_some_and(is_identifier_part) {
            self.current += 1;
        }
        let text = &self.source[self.start..self.current];
        let kind = TokenKind::from_keyword(text).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    /// Report the character at `start` and step over all of its bytes.
    fn unexpected_character(&mut self) {
        let ch = self.source[self.start..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        self.current = self.start + ch.len_utf8();
        let text = ch.to_string();
        let diagnostic = Diagnostic::new(self.line, &messages::UNEXPECTED_CHARACTER_0, &[&text])
            .with_span(self.lexeme_span());
        self.report(diagnostic);
    }

    // ========================================================================
    // Output
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind) {
        let token = Token::new(
            kind,
            &self.source[self.start..self.current],
            self.start_line,
            self.lexeme_span(),
        );
        self.tokens.push(token);
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: Literal) {
        self.add_token(kind);
        if let Some(token) = self.tokens.last_mut() {
            token.literal = Some(literal);
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        debug!(line = diagnostic.line, message = %diagnostic.message_text, "lexical error");
        self.reporter.report(diagnostic);
    }
}

fn count_line_feeds(bytes: &[u8]) -> u32 {
    memchr::memchr_iter(LINE_FEED, bytes).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let (tokens, _) = scan_with_diagnostics(source);
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_scan_simple_tokens() {
        assert_eq!(
            kinds("( ) { } , . - + ; *"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Minus,
                TokenKind::Plus,
                TokenKind::Semicolon,
                TokenKind::Star,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_scan_operators() {
        assert_eq!(
            kinds("! != = == < <= > >= /"),
            vec![
                TokenKind::Bang,
                TokenKind::BangEqual,
                TokenKind::Equal,
                TokenKind::EqualEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Slash,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_scan_operators_without_spaces() {
        assert_eq!(
            kinds("!==<=>"),
            vec![
                TokenKind::BangEqual,
                TokenKind::Equal,
                TokenKind::LessEqual,
                TokenKind::Greater,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_scan_identifier_and_keyword() {
        let (tokens, diagnostics) = scan_with_diagnostics("var x = 42;");
        assert!(diagnostics.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::Var);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "x");
        assert_eq!(tokens[1].literal, None);
        assert_eq!(tokens[2].kind, TokenKind::Equal);
        assert_eq!(tokens[3].kind, TokenKind::Number);
        assert_eq!(tokens[3].literal, Some(Literal::Number(42.0)));
        assert_eq!(tokens[4].kind, TokenKind::Semicolon);
        assert_eq!(tokens[5].kind, TokenKind::Eof);
    }

    #[test]
    fn test_scan_string_literal() {
        let (tokens, _) = scan_with_diagnostics("\"hello\"");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "\"hello\"");
        assert_eq!(tokens[0].literal, Some(Literal::String("hello".into())));
    }

    #[test]
    fn test_scan_comment_produces_nothing() {
        assert_eq!(kinds("// just a comment"), vec![TokenKind::Eof]);
        assert_eq!(kinds("1 // two\n3"), vec![TokenKind::Number, TokenKind::Number, TokenKind::Eof]);
    }

    #[test]
    fn test_comment_line_feed_is_counted() {
        let (tokens, _) = scan_with_diagnostics("// one\n// two\nx");
        assert_eq!(tokens[0].line, 3);
    }

    #[test]
    fn test_eof_carries_final_line() {
        let (tokens, _) = scan_with_diagnostics("a\nb\n");
        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.line, 3);
        assert_eq!(eof.span, TextSpan::empty(4));
    }

    #[test]
    fn test_unexpected_non_ascii_character() {
        let (tokens, diagnostics) = scan_with_diagnostics("a é b");
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["a", "b", ""]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.diagnostics()[0].message_text, "Unexpected character: é");
        assert_eq!(diagnostics.diagnostics()[0].span, Some(TextSpan::new(2, 2)));
    }

    #[test]
    fn test_string_with_non_ascii_body() {
        let (tokens, diagnostics) = scan_with_diagnostics("\"héllo ✓\"");
        assert!(diagnostics.is_empty());
        assert_eq!(tokens[0].literal, Some(Literal::String("héllo ✓".into())));
    }
}
