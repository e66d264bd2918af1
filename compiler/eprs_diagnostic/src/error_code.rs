use std::fmt;

/// Error codes for all parse diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E1xxx: Parser errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Expected a token of some category
    E1001,
    /// Expected literal text
    E1002,
    /// Rule reference does not resolve to a rule with a production
    E1003,
    /// Input left over after the start rule matched
    E1004,
    /// Grammar nesting exceeded the recursion limit
    E1005,
    /// Parse failed without recording any failure position
    E9001,
}

impl ErrorCode {
    /// Get the numeric code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E9001 => "E9001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
