//! Errors raised by the shell around the scanner.
//!
//! Lexical errors are never represented here: they are diagnostics handed to
//! a reporter. These cover the ways a run can fail before scanning starts.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum LoxError {
    /// The script named on the command line could not be read.
    #[error("could not read script '{}'", .path.display())]
    #[diagnostic(code(lox::io), help("check that the file exists and is valid UTF-8"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Too many positional arguments.
    #[error("Usage: lox [script]")]
    #[diagnostic(code(lox::usage))]
    Usage,

    /// Standard output could not be written.
    #[error("failed to write output")]
    #[diagnostic(code(lox::output))]
    Write(#[source] std::io::Error),

    /// Tokens could not be encoded for output.
    #[error("failed to encode tokens as JSON")]
    #[diagnostic(code(lox::output))]
    Json(#[from] serde_json::Error),
}

impl LoxError {
    /// Process exit status for this error, following the sysexits convention.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoxError::Usage => 64,
            LoxError::Io { .. } => 66,
            LoxError::Json(_) => 70,
            LoxError::Write(_) => 74,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoxError>;
