use std::fmt;

use crate::ErrorCode;

/// The source excerpt a diagnostic points into.
///
/// Carries everything the emitter needs, so rendering never has to go back
/// to the lexer.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Snippet {
    /// File name as supplied by the caller.
    pub file: String,
    /// 1-based line number.
    pub line: u32,
    /// 1-based byte column.
    pub column: u32,
    /// Full text of the line, without its terminator.
    pub line_text: String,
    /// Number of carets to draw; at least one is always drawn.
    pub width: u32,
}

impl Snippet {
    /// Create a snippet pointing at a single column.
    pub fn new(file: impl Into<String>, line: u32, column: u32, line_text: impl Into<String>) -> Self {
        Snippet {
            file: file.into(),
            line,
            column,
            line_text: line_text.into(),
            width: 1,
        }
    }

    /// Underline `width` bytes instead of one.
    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }
}

/// A single reportable error.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Main message.
    pub message: String,
    /// Where it went wrong, if known.
    pub snippet: Option<Snippet>,
    /// Short text drawn next to the caret.
    pub label: String,
    /// Additional notes providing context.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            snippet: None,
            label: String::new(),
            notes: Vec::new(),
        }
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Point the diagnostic at a source location.
    pub fn with_snippet(mut self, snippet: Snippet) -> Self {
        self.snippet = Some(snippet);
        self
    }

    /// Set the caret label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    /// Single-line form: `error[E1002]: expected 'b' at input:1:2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)?;
        if let Some(snippet) = &self.snippet {
            write!(f, " at {}:{}:{}", snippet.file, snippet.line, snippet.column)?;
        }
        Ok(())
    }
}
