//! Turn parse errors into diagnostics.
//!
//! The message names what the parser expected at the furthest position it
//! reached: a token category (`expected DIGIT`), literal text
//! (`expected ';'`) or a rule. Trailing input that no attempt got past is
//! reported as such.

use eprs_diagnostic::{Diagnostic, ErrorCode, Snippet};
use eprs_estx::{Grammar, GrammarNode, RuleId, TermId};
use eprs_lexer::Lexer;

use crate::{Failure, ParseError, ParseErrorKind};

/// Build the diagnostic for `error`.
pub fn to_diagnostic(error: &ParseError, lexer: &Lexer, grammar: &Grammar) -> Diagnostic {
    match (error.kind, error.expectation()) {
        (ParseErrorKind::RecursionLimit { limit }, _) => {
            let message = format!("recursion limit of {limit} exceeded");
            Diagnostic::error(ErrorCode::E1005)
                .with_message(message.clone())
                .with_snippet(snippet(lexer, error.offset, 1))
                .with_label(message)
                .with_note("left-recursive rules are not supported")
        }
        (ParseErrorKind::NoMatch | ParseErrorKind::TrailingInput { .. }, Some(failure)) => {
            expected(&failure, lexer, grammar)
        }
        (ParseErrorKind::TrailingInput { .. }, None) => {
            let width = lexer.get_token(error.offset as usize).len;
            Diagnostic::error(ErrorCode::E1004)
                .with_message("unexpected trailing input")
                .with_snippet(snippet(lexer, error.offset, width))
                .with_label("not matched by the start rule")
        }
        (ParseErrorKind::NoMatch, None) => Diagnostic::error(ErrorCode::E9001)
            .with_message("parse failed")
            .with_note("no failure position was recorded"),
    }
}

/// Diagnostic for a failed match at the furthest position.
fn expected(failure: &Failure, lexer: &Lexer, grammar: &Grammar) -> Diagnostic {
    let (code, message) = describe(failure.term, grammar);
    let mut diag = Diagnostic::error(code)
        .with_message(message.clone())
        .with_snippet(snippet(lexer, failure.token, 1))
        .with_label(message);
    if let Some(rule) = grammar.rule_name(failure.rule) {
        diag = diag.with_note(format!("while parsing rule `{rule}`"));
    }
    diag
}

/// Error code and message for a term that failed to match.
fn describe(term: TermId, grammar: &Grammar) -> (ErrorCode, String) {
    match grammar.node(term) {
        Some(GrammarNode::TermTok { ty, .. }) => (ErrorCode::E1001, format!("expected {ty}")),
        Some(GrammarNode::TermLit { text, .. }) => (
            ErrorCode::E1002,
            format!("expected '{}'", grammar.text(*text)),
        ),
        Some(GrammarNode::TermRule { target, .. }) => (ErrorCode::E1003, expected_rule(*target, grammar)),
        Some(GrammarNode::Rule { .. }) => (
            ErrorCode::E1003,
            expected_rule(RuleId::from_raw(term.raw()), grammar),
        ),
        Some(node) => (
            ErrorCode::E9001,
            format!("unexpected failure in {} {term}", node.kind_name()),
        ),
        None => (ErrorCode::E1003, format!("expected rule {term}")),
    }
}

fn expected_rule(rule: RuleId, grammar: &Grammar) -> String {
    match grammar.rule_name(rule) {
        Some(name) => format!("expected rule `{name}`, which has no production"),
        None => format!("expected rule {}", TermId::from(rule)),
    }
}

/// Source snippet with a caret under the token at `index`.
fn snippet(lexer: &Lexer, index: u32, width: u32) -> Snippet {
    let loc = lexer.get_token_loc(index as usize);
    Snippet::new(
        lexer.file_name(),
        loc.line_number,
        loc.display_column(),
        lexer.line_text(&loc),
    )
    .with_width(width.max(1))
}
