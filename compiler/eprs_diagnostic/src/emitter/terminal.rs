//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.
//!
//! ```text
//! error[E1002]: expected 'b'
//!   --> input:1:2
//!    |
//!  1 | ac
//!    |  ^ expected 'b'
//! ```

use std::io::Write;

use crate::{Diagnostic, Snippet};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const BOLD: &str = "\x1b[1m";
    pub const GUTTER: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean based on terminal detection.
    ///
    /// For `Auto` mode, `is_tty` determines whether colors should be used.
    /// This parameter is ignored for `Always` and `Never` modes.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    ///
    /// `is_tty` is only consulted for `ColorMode::Auto`.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Create a plain-text emitter, for logs and tests.
    pub fn plain(writer: W) -> Self {
        Self::with_color_mode(writer, ColorMode::Never, false)
    }

    /// Consume the emitter and return its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write text with optional ANSI color codes.
    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_level(&mut self) {
        self.write_colored("error", colors::ERROR);
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    fn write_snippet(&mut self, snippet: &Snippet, label: &str) {
        let line_no = snippet.line.to_string();
        let pad = " ".repeat(line_no.len() + 1);

        // --> file:line:col
        self.write_colored(&format!("{pad}-->"), colors::GUTTER);
        let _ = writeln!(
            self.writer,
            " {}:{}:{}",
            snippet.file, snippet.line, snippet.column
        );

        self.write_colored(&format!("{pad} |"), colors::GUTTER);
        let _ = writeln!(self.writer);

        self.write_colored(&format!(" {line_no} |"), colors::GUTTER);
        let _ = writeln!(self.writer, " {}", snippet.line_text);

        // Caret row: reuse tabs from the source line so the caret lines up.
        self.write_colored(&format!("{pad} |"), colors::GUTTER);
        let indent = caret_indent(&snippet.line_text, snippet.column);
        let carets = "^".repeat(snippet.width.max(1) as usize);
        let _ = write!(self.writer, " {indent}");
        if label.is_empty() {
            self.write_colored(&carets, colors::ERROR);
        } else {
            self.write_colored(&format!("{carets} {label}"), colors::ERROR);
        }
        let _ = writeln!(self.writer);
    }
}

/// Whitespace that brings a caret under the 1-based byte `column` of `line`.
///
/// One character of indent per source character, so multi-byte UTF-8 text
/// before the column does not push the caret right. Tabs are copied.
fn caret_indent(line: &str, column: u32) -> String {
    let target = column.saturating_sub(1) as usize;
    let upto = target.min(line.len());
    let mut indent: String = line
        .char_indices()
        .take_while(|&(i, _)| i < upto)
        .map(|(_, c)| if c == '\t' { '\t' } else { ' ' })
        .collect();
    indent.extend(std::iter::repeat(' ').take(target - upto));
    indent
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: error[CODE]: message
        self.write_level();
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        if let Some(snippet) = &diagnostic.snippet {
            self.write_snippet(snippet, &diagnostic.label);
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            if self.colors {
                let _ = write!(self.writer, "{}note{}", colors::BOLD, colors::RESET);
            } else {
                let _ = write!(self.writer, "note");
            }
            let _ = writeln!(self.writer, ": {note}");
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
