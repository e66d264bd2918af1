//! Rule references, alternation, sequences and groups.

use eprs_estx::{RuleId, TermId};

use super::{Attempt, Stop};
use crate::tree::ParseNodeKind;
use crate::Parser;

impl Parser<'_> {
    /// Parse `target` into a fresh rule node under the current parent.
    pub(super) fn parse_rule_ref(&mut self, term: TermId, target: RuleId) -> Attempt {
        self.nested(|p| {
            let mark = p.mark();
            let node = p.tree.open(
                ParseNodeKind::Rule { rule: target },
                Some(term),
                Some(p.parent),
                p.pos,
            );

            let parent = std::mem::replace(&mut p.parent, node);
            let result = p.parse_rule_body(term, target);
            p.parent = parent;

            match result {
                Ok(()) => {
                    let span = p.token_span(mark.offset, p.pos);
                    p.tree.close(node, p.pos, span);
                    Ok(())
                }
                Err(stop) => {
                    p.reset(mark);
                    Err(stop)
                }
            }
        })
    }

    /// Parse the production of `rule` into the current parent.
    ///
    /// `term` is what failed if the rule cannot be resolved: the reference
    /// for nested rules, the rule itself for the start rule.
    pub(crate) fn parse_rule_body(&mut self, term: TermId, rule: RuleId) -> Attempt {
        let grammar = self.grammar;
        let Some(name) = grammar.rule_name(rule) else {
            tracing::warn!(node = %TermId::from(rule), "reference to a node that is not a rule");
            self.record_failure(term);
            return Err(Stop::Mismatch);
        };
        let Some(production) = grammar.production(rule) else {
            tracing::warn!(rule = name, "rule has no production");
            self.record_failure(term);
            return Err(Stop::Mismatch);
        };

        tracing::trace!(rule = name, offset = self.pos, "enter rule");
        let outer = std::mem::replace(&mut self.rule, rule);
        let result = self.parse_term(production);
        self.rule = outer;
        result
    }

    /// Ordered choice: the first child that matches wins.
    pub(super) fn parse_alt(&mut self, children: &[TermId]) -> Attempt {
        for &child in children {
            let mark = self.mark();
            match self.parse_term(child) {
                Ok(()) => return Ok(()),
                Err(Stop::Mismatch) => self.reset(mark),
                Err(stop) => {
                    self.reset(mark);
                    return Err(stop);
                }
            }
        }
        Err(Stop::Mismatch)
    }

    /// All children in order; any failure undoes the whole sequence.
    pub(super) fn parse_seq(&mut self, children: &[TermId]) -> Attempt {
        let mark = self.mark();
        for &child in children {
            if let Err(stop) = self.parse_term(child) {
                self.reset(mark);
                return Err(stop);
            }
        }
        Ok(())
    }
}
