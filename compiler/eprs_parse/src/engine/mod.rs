//! Grammar interpreter.
//!
//! One method per term kind, all mutually recursive:
//!
//! - `terminal.rs`: token categories and literal text
//! - `compound.rs`: rule references, alternation, sequences and groups
//!
//! Every attempt returns an [`Attempt`]. A [`Stop::Mismatch`] is ordinary
//! backtracking: the caller restores its mark and tries something else.
//! A [`Stop::RecursionLimit`] aborts the whole parse; optional terms and
//! alternations pass it through instead of absorbing it.

mod compound;
mod terminal;

use eprs_estx::{GrammarNode, Occurrence, TermId};

use crate::stack::ensure_sufficient_stack;
use crate::{Failure, Parser};

/// Why an attempt did not succeed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Stop {
    /// The term does not match here.
    Mismatch,
    /// Nesting exceeded the configured limit.
    RecursionLimit,
}

/// Result of attempting one term.
pub(crate) type Attempt = Result<(), Stop>;

impl<'a> Parser<'a> {
    /// Parse one term, honoring its occurrence.
    pub(crate) fn parse_term(&mut self, term: TermId) -> Attempt {
        let grammar = self.grammar;
        let Some(node) = grammar.node(term) else {
            tracing::warn!(%term, "term does not exist");
            self.record_failure(term);
            return Err(Stop::Mismatch);
        };

        let occurrence = node.occurrence();
        if occurrence.is_repeated() {
            self.parse_repeated(term, node, occurrence)
        } else {
            let mark = self.mark();
            match self.parse_once(term, node) {
                Ok(()) => Ok(()),
                Err(Stop::Mismatch) if occurrence.is_optional() => {
                    self.reset(mark);
                    Ok(())
                }
                Err(stop) => {
                    self.reset(mark);
                    Err(stop)
                }
            }
        }
    }

    /// `REP` and `STAR`: loop until an attempt fails or stops consuming.
    fn parse_repeated(
        &mut self,
        term: TermId,
        node: &'a GrammarNode,
        occurrence: Occurrence,
    ) -> Attempt {
        let mut mark = self.mark();
        match self.parse_once(term, node) {
            Ok(()) => {}
            Err(Stop::Mismatch) if occurrence.is_optional() => {
                self.reset(mark);
                return Ok(());
            }
            Err(stop) => {
                self.reset(mark);
                return Err(stop);
            }
        }

        loop {
            if !self.progressed_since(mark) {
                tracing::warn!(
                    %term,
                    offset = self.pos,
                    "repetition matched without consuming input; stopping"
                );
                return Ok(());
            }
            mark = self.mark();
            match self.parse_once(term, node) {
                Ok(()) => {}
                Err(Stop::Mismatch) => {
                    self.reset(mark);
                    return Ok(());
                }
                Err(stop) => {
                    self.reset(mark);
                    return Err(stop);
                }
            }
        }
    }

    /// A single match of `node`, ignoring its occurrence.
    fn parse_once(&mut self, term: TermId, node: &'a GrammarNode) -> Attempt {
        match node {
            GrammarNode::TermTok { ty, .. } => self.match_token(term, *ty),
            GrammarNode::TermLit { text, .. } => self.match_literal(term, *text),
            GrammarNode::TermRule { target, .. } => self.parse_rule_ref(term, *target),
            GrammarNode::TermAlt { children } => self.parse_alt(children),
            GrammarNode::TermCon { children } => self.parse_seq(children),
            GrammarNode::TermGroup { children, .. } => self.nested(|p| p.parse_seq(children)),
            GrammarNode::Rule { .. } => {
                tracing::warn!(%term, "rule used as a term");
                self.record_failure(term);
                Err(Stop::Mismatch)
            }
        }
    }

    /// Run `f` one nesting level deeper.
    fn nested(&mut self, f: impl FnOnce(&mut Self) -> Attempt) -> Attempt {
        if self.depth >= self.config.max_depth {
            tracing::debug!(
                depth = self.depth,
                offset = self.pos,
                "recursion limit reached"
            );
            return Err(Stop::RecursionLimit);
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    /// Offer a failure at the current offset as the furthest one.
    #[cold]
    pub(crate) fn record_failure(&mut self, term: TermId) {
        let candidate = Failure {
            rule: self.rule,
            token: self.pos,
            term,
        };
        match self.failure {
            Some(recorded) if recorded.token > candidate.token => {}
            _ => self.failure = Some(candidate),
        }
    }
}
