//! lox_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! The scanner never fails outright. It hands each lexical error to a
//! [`DiagnosticReporter`] supplied by the caller and keeps going, so the
//! caller decides what "an error happened" means for the run.

use lox_core::text::TextSpan;
use std::fmt;

/// A diagnostic message template with a code.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticMessage {
    /// The diagnostic error code (e.g., 1001).
    pub code: u32,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The 1-based line on which the error was detected.
    pub line: u32,
    /// The source text span the diagnostic refers to, if any.
    pub span: Option<TextSpan>,
    /// The resolved message text.
    pub message_text: String,
    /// The code of the message template, absent for free-form messages.
    pub code: Option<u32>,
}

impl Diagnostic {
    /// Create a diagnostic from a message template.
    pub fn new(line: u32, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            line,
            span: None,
            message_text: format_message(message.message, args),
            code: Some(message.code),
        }
    }

    /// Create a diagnostic carrying a plain message and no code.
    pub fn from_text(line: u32, message: &str) -> Self {
        Self {
            line,
            span: None,
            message_text: message.to_string(),
            code: None,
        }
    }

    /// Attach the source span the diagnostic refers to.
    pub fn with_span(mut self, span: TextSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Whether this diagnostic was produced from the given message template.
    pub fn is(&self, message: &DiagnosticMessage) -> bool {
        self.code == Some(message.code)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error: {}", self.line, self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// Receives diagnostics as they are detected.
///
/// Reporting is a side channel: implementations must not expect the caller
/// to stop or change course after a call.
pub trait DiagnosticReporter {
    /// Accept one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);

    /// Report a free-form error message at a 1-based line.
    fn report_error(&mut self, line: u32, message: &str) {
        self.report(Diagnostic::from_text(line, message));
    }
}

impl<R: DiagnosticReporter + ?Sized> DiagnosticReporter for &mut R {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// A reporter that accumulates every diagnostic it receives.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn clear(&mut self) {
        self.diagnostics.clear();
    }
}

impl DiagnosticReporter for DiagnosticCollection {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.add(diagnostic);
    }
}

// ============================================================================
// Diagnostic messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $msg:expr) => {
            DiagnosticMessage { code: $code, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors (1000-1099)
    // ========================================================================
    pub const UNEXPECTED_CHARACTER_0: DiagnosticMessage = diag!(1001, "Unexpected character: {0}");
    pub const UNTERMINATED_STRING: DiagnosticMessage = diag!(1002, "Unterminated string.");
}
