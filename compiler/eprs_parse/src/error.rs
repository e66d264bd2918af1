//! Parse errors.

use eprs_estx::{RuleId, TermId};
use thiserror::Error;

/// The furthest point the parser reached before giving up.
///
/// A new candidate replaces the recorded one when it sits at the same
/// token or later, so among failures at the deepest position the last
/// one attempted wins.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    /// Rule being parsed when the failure was recorded.
    pub rule: RuleId,
    /// Token offset of the failed match.
    pub token: u32,
    /// Grammar term that failed to match.
    pub term: TermId,
}

/// Why a parse failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The start rule did not match.
    #[error("input does not match the start rule")]
    NoMatch,
    /// The start rule matched a strict prefix of the input.
    #[error("start rule matched {consumed} of {total} tokens")]
    TrailingInput { consumed: u32, total: u32 },
    /// Nesting exceeded [`ParseConfig::max_depth`](crate::ParseConfig).
    #[error("recursion limit of {limit} exceeded")]
    RecursionLimit { limit: usize },
}

/// A failed parse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} (at token {offset})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Token offset the error points at: the furthest failure for
    /// [`ParseErrorKind::NoMatch`], otherwise where parsing stopped.
    pub offset: u32,
    /// Furthest failure recorded during the parse.
    pub failure: Option<Failure>,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, offset: u32, failure: Option<Failure>) -> Self {
        ParseError {
            kind,
            offset,
            failure,
        }
    }

    /// The recorded failure, if it is at or beyond the error offset and so
    /// better describes what went wrong than the error kind alone.
    pub fn expectation(&self) -> Option<Failure> {
        self.failure.filter(|failure| failure.token >= self.offset)
    }
}
