//! Diagnostic system for parse error reporting.
//!
//! A [`Diagnostic`] carries:
//! - An error code for searchability
//! - A clear message (what went wrong)
//! - A source [`Snippet`] (where it went wrong)
//! - A caret label and optional notes
//!
//! Diagnostics are plain data. Rendering lives in [`emitter`], so the same
//! record can go to a terminal, a log line, or a test buffer.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Snippet};
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use error_code::ErrorCode;
