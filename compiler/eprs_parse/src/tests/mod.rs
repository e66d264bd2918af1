#![allow(clippy::unwrap_used)]

//! Parser tests.
//!
//! - `end_to_end`: whole parses through `Parser::parse` and `parse`
//! - `queries`: `get_rule`, `rules` and `get_str` over real parse trees

mod end_to_end;
mod queries;

use eprs_estx::{Grammar, Occurrence, RuleId};

/// `rule = "a" "b"+ "c"?`
pub(super) fn abc_grammar() -> (Grammar, RuleId) {
    let mut grammar = Grammar::new();
    let rule = grammar.add_rule("rule");
    let con = grammar.term_con();
    let a = grammar.term_lit("a", Occurrence::ONE);
    let b = grammar.term_lit("b", Occurrence::REP);
    let c = grammar.term_lit("c", Occurrence::OPT);
    for term in [a, b, c] {
        grammar.attach(con, term).unwrap();
    }
    grammar.attach(rule, con).unwrap();
    (grammar, rule)
}
