//! Token and literal matching.

use eprs_estx::{TermId, Text};
use eprs_lexer::{Span, TokenType};

use super::{Attempt, Stop};
use crate::tree::{ParseNodeKind, TokenRange};
use crate::Parser;

impl Parser<'_> {
    /// Match the current token against a category mask.
    ///
    /// Requesting `EOF` matches the end of input without consuming or
    /// emitting anything.
    pub(super) fn match_token(&mut self, term: TermId, ty: TokenType) -> Attempt {
        let tok = self.lexer.get_token(self.pos as usize);
        if tok.ty.is_eof() {
            if ty.contains(TokenType::EOF) {
                return Ok(());
            }
        } else if tok.ty.intersects(ty) {
            let start = self.pos;
            self.tree.push_leaf(
                ParseNodeKind::Token { ty: tok.ty },
                term,
                self.parent,
                TokenRange::new(start, start + 1),
                tok.span(),
            );
            self.pos += 1;
            return Ok(());
        }
        self.record_failure(term);
        Err(Stop::Mismatch)
    }

    /// Match literal text against consecutive tokens.
    ///
    /// The literal may cover several tokens but has to end exactly on a
    /// token boundary: `"ab"` matches the tokens `a` `b`, not the single
    /// word token `abc`.
    pub(super) fn match_literal(&mut self, term: TermId, text: Text) -> Attempt {
        let literal = self.grammar.text(text).as_bytes();
        let start = self.pos;
        let mut index = start;
        let mut matched = 0;

        while matched < literal.len() {
            let bytes = self.lexer.token_bytes(index as usize);
            if bytes.is_empty() || !literal[matched..].starts_with(bytes) {
                self.record_failure(term);
                return Err(Stop::Mismatch);
            }
            matched += bytes.len();
            index += 1;
        }

        let span = self.token_span(start, index);
        self.tree.push_leaf(
            ParseNodeKind::Literal,
            term,
            self.parent,
            TokenRange::new(start, index),
            span,
        );
        self.pos = index;
        Ok(())
    }

    /// Byte span of the tokens `start..end`. Empty at the start token when
    /// the range is empty.
    pub(crate) fn token_span(&self, start: u32, end: u32) -> Span {
        let first = self.lexer.get_token(start as usize);
        if end <= start {
            return Span::point(first.start);
        }
        let last = self.lexer.get_token(end as usize - 1);
        Span::new(first.start, last.end())
    }
}
