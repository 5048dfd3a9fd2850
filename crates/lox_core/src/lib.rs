//! lox_core: Core utilities shared by the Lox front end.
//!
//! Provides source spans, line lookup, and the error type used by the
//! command-line shell.

pub mod error;
pub mod text;

pub use error::{LoxError, Result};
pub use text::{LineMap, TextPos, TextSpan};
