//! Console reporting of lexical errors.

use std::io::{self, IsTerminal, Write};

use lox_diagnostics::{Diagnostic, DiagnosticReporter};

// ANSI color codes
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Prints each diagnostic as it arrives and remembers whether any arrived.
pub struct ConsoleReporter<W> {
    out: W,
    use_color: bool,
    had_error: bool,
}

impl ConsoleReporter<io::Stderr> {
    /// A reporter writing to stderr, colored when stderr is a terminal.
    pub fn stderr() -> Self {
        let out = io::stderr();
        let use_color = out.is_terminal();
        Self::new(out, use_color)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            had_error: false,
        }
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Forget earlier errors, e.g. between prompt lines.
    pub fn reset(&mut self) {
        self.had_error = false;
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DiagnosticReporter for ConsoleReporter<W> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.had_error = true;
        // A closed stderr must not abort the scan.
        let _ = if self.use_color {
            writeln!(
                self.out,
                "[line {}] {}{}Error{}: {}",
                diagnostic.line, BOLD, RED, RESET, diagnostic.message_text
            )
        } else {
            writeln!(self.out, "{}", diagnostic)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lox_diagnostics::messages;

    #[test]
    fn test_plain_output() {
        let mut reporter = ConsoleReporter::new(Vec::new(), false);
        assert!(!reporter.had_error());
        reporter.report(Diagnostic::new(4, &messages::UNEXPECTED_CHARACTER_0, &["@"]));
        reporter.report_error(5, "Unterminated string.");
        assert!(reporter.had_error());
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            text,
            "[line 4] Error: Unexpected character: @\n[line 5] Error: Unterminated string.\n"
        );
    }

    #[test]
    fn test_colored_output() {
        let mut reporter = ConsoleReporter::new(Vec::new(), true);
        reporter.report_error(1, "boom");
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.starts_with("[line 1] "));
        assert!(text.contains(RED));
        assert!(text.ends_with(": boom\n"));
    }

    #[test]
    fn test_reset_clears_error_flag() {
        let mut reporter = ConsoleReporter::new(io::sink(), false);
        reporter.report_error(1, "boom");
        reporter.reset();
        assert!(!reporter.had_error());
    }
}
