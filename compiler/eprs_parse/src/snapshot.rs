//! Parser snapshots for backtracking.
//!
//! The parser state that backtracking must undo is two integers: the token
//! offset and the node-arena length. A [`Mark`] captures both and
//! `Parser::reset` restores them together. Nodes appended after the mark
//! are truncated away. The furthest-failure record is not part of a mark.

use crate::Parser;

/// Saved cursor position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Mark {
    /// Token offset.
    pub offset: u32,
    /// Number of nodes in the arena.
    pub nodes: u32,
}

impl Parser<'_> {
    /// Capture the current position.
    #[inline]
    pub(crate) fn mark(&self) -> Mark {
        Mark {
            offset: self.pos,
            nodes: self.tree.mark_len(),
        }
    }

    /// Restore a position captured by [`mark`](Self::mark).
    #[inline]
    pub(crate) fn reset(&mut self, mark: Mark) {
        self.pos = mark.offset;
        self.tree.truncate(mark.nodes);
    }

    /// Check whether anything was consumed since `mark`.
    #[inline]
    pub(crate) fn progressed_since(&self, mark: Mark) -> bool {
        self.pos > mark.offset
    }
}
