#![allow(clippy::unwrap_used)]

use eprs_estx::{Grammar, Occurrence};
use eprs_lexer::Lexer;
use pretty_assertions::assert_eq;

use super::abc_grammar;
use crate::{
    parse, ParseConfig, ParseError, ParseErrorKind, ParseNodeKind, ParseTree, Parser,
};

fn literal_texts(tree: &ParseTree, lexer: &Lexer) -> Vec<String> {
    tree.nodes()
        .iter()
        .filter(|node| node.kind == ParseNodeKind::Literal)
        .map(|node| String::from_utf8_lossy(lexer.span_bytes(node.span)).into_owned())
        .collect()
}

fn render_failure(source: &str) -> (ParseError, String) {
    let (grammar, rule) = abc_grammar();
    let lexer = Lexer::tokenize(source, "input", 0);
    let mut out = Vec::new();
    let error = parse(&lexer, &grammar, rule, &mut out).unwrap_err();
    (error, String::from_utf8(out).unwrap())
}

#[test]
fn test_abbc_parses_fully() {
    let (grammar, rule) = abc_grammar();
    let lexer = Lexer::tokenize("abbc", "input", 0);
    let mut parser = Parser::new(&lexer, &grammar);

    let root = parser.parse(rule).unwrap();
    let tree = parser.tree();
    assert_eq!(literal_texts(tree, &lexer), vec!["a", "b", "b", "c"]);
    assert_eq!(tree.get_str(root, &lexer), "abbc");

    let node = tree.node(root).unwrap();
    assert_eq!(node.kind, ParseNodeKind::Rule { rule });
    assert_eq!(node.tokens.len(), 4);
    assert_eq!(node.span.len(), 4);
}

#[test]
fn test_ab_parses_without_optional() {
    let (grammar, rule) = abc_grammar();
    let lexer = Lexer::tokenize("ab", "input", 0);
    let mut parser = Parser::new(&lexer, &grammar);

    parser.parse(rule).unwrap();
    assert_eq!(literal_texts(parser.tree(), &lexer), vec!["a", "b"]);
    assert_eq!(parser.tree().len(), 3);
}

#[test]
fn test_ac_fails_expecting_b() {
    let (grammar, rule) = abc_grammar();
    let lexer = Lexer::tokenize("ac", "input", 0);
    let mut parser = Parser::new(&lexer, &grammar);

    let error = parser.parse(rule).unwrap_err();
    assert_eq!(error.kind, ParseErrorKind::NoMatch);
    assert_eq!(error.offset, 1);
    assert_eq!(parser.report(&error).message, "expected 'b'");
}

#[test]
fn test_rendered_diagnostic() {
    let (_, text) = render_failure("ac");
    assert_eq!(
        text,
        "error[E1002]: expected 'b'\n\
         \x20 --> input:1:2\n\
         \x20  |\n\
         \x201 | ac\n\
         \x20  |  ^ expected 'b'\n\
         \x20 = note: while parsing rule `rule`\n"
    );
}

#[test]
fn test_failed_parse_leaves_tree_empty() {
    let (grammar, rule) = abc_grammar();
    let lexer = Lexer::tokenize("ac", "input", 0);
    let mut parser = Parser::new(&lexer, &grammar);

    assert!(parser.parse(rule).is_err());
    assert!(parser.tree().is_empty());
    assert_eq!(parser.tree().root(), None);
}

#[test]
fn test_trailing_input_reports_furthest_failure() {
    // "abbx": the start rule matches "abb"; the furthest failure is the
    // "b"+ / "c"? attempt at offset 3.
    let (error, text) = render_failure("abbx");
    assert_eq!(
        error.kind,
        ParseErrorKind::TrailingInput {
            consumed: 3,
            total: 4
        }
    );
    assert_eq!(error.offset, 3);
    assert!(text.starts_with("error[E1002]: expected 'c'\n"), "got:\n{text}");
    assert!(text.contains("  --> input:1:4\n"), "got:\n{text}");
}

#[test]
fn test_trailing_input_without_failure() {
    // start = "a": nothing is attempted past the first token.
    let mut grammar = Grammar::new();
    let rule = grammar.add_rule("start");
    let a = grammar.term_lit("a", Occurrence::ONE);
    grammar.attach(rule, a).unwrap();
    let lexer = Lexer::tokenize("a;;", "input", 0);

    let mut out = Vec::new();
    let error = parse(&lexer, &grammar, rule, &mut out).unwrap_err();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(error.failure, None);
    assert!(text.starts_with("error[E1004]: unexpected trailing input\n"), "got:\n{text}");
}

#[test]
fn test_full_consumption_terminals_cover_input() {
    let (grammar, rule) = abc_grammar();
    for source in ["abc", "abbbbb", "abbbc"] {
        let lexer = Lexer::tokenize(source, "input", 0);
        let tree = parse(&lexer, &grammar, rule, std::io::sink()).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.get_str(root, &lexer), source);
    }
}

#[test]
fn test_alt_commits_to_first_then_outer_continues() {
    // start = ("a" | "ab") "b"
    let mut grammar = Grammar::new();
    let rule = grammar.add_rule("start");
    let con = grammar.term_con();
    let alt = grammar.term_alt();
    for text in ["a", "ab"] {
        let lit = grammar.term_lit(text, Occurrence::ONE);
        grammar.attach(alt, lit).unwrap();
    }
    let b = grammar.term_lit("b", Occurrence::ONE);
    grammar.attach(con, alt).unwrap();
    grammar.attach(con, b).unwrap();
    grammar.attach(rule, con).unwrap();
    let lexer = Lexer::tokenize("ab", "input", 0);

    let tree = parse(&lexer, &grammar, rule, std::io::sink()).unwrap();
    assert_eq!(literal_texts(&tree, &lexer), vec!["a", "b"]);
}

#[test]
fn test_furthest_failure_message() {
    // rule = "a" | "b" on "c"
    let mut grammar = Grammar::new();
    let rule = grammar.add_rule("rule");
    let alt = grammar.term_alt();
    for text in ["a", "b"] {
        let lit = grammar.term_lit(text, Occurrence::ONE);
        grammar.attach(alt, lit).unwrap();
    }
    grammar.attach(rule, alt).unwrap();
    let lexer = Lexer::tokenize("c", "input", 0);

    let mut parser = Parser::new(&lexer, &grammar);
    let error = parser.parse(rule).unwrap_err();
    assert_eq!(parser.report(&error).message, "expected 'b'");
}

#[test]
fn test_left_recursion_hits_limit() {
    // expr = expr "+" DIGIT | DIGIT
    let mut grammar = Grammar::new();
    let expr = grammar.add_rule("expr");
    let alt = grammar.term_alt();
    let con = grammar.term_con();
    let recurse = grammar.term_rule(expr, Occurrence::ONE);
    let plus = grammar.term_lit("+", Occurrence::ONE);
    let digit = grammar.term_tok(eprs_lexer::TokenType::DIGIT, Occurrence::ONE);
    let digit_alone = grammar.term_tok(eprs_lexer::TokenType::DIGIT, Occurrence::ONE);
    for term in [recurse, plus, digit] {
        grammar.attach(con, term).unwrap();
    }
    grammar.attach(alt, con).unwrap();
    grammar.attach(alt, digit_alone).unwrap();
    grammar.attach(expr, alt).unwrap();
    let lexer = Lexer::tokenize("1+2", "input", 0);

    let mut out = Vec::new();
    let config = ParseConfig::default().with_max_depth(64);
    let error = crate::parse_with_config(&lexer, &grammar, expr, &mut out, config).unwrap_err();
    assert_eq!(error.kind, ParseErrorKind::RecursionLimit { limit: 64 });
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("error[E1005]: recursion limit of 64 exceeded\n"), "got:\n{text}");
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn test_default_depth_is_unbounded_on_native() {
    assert_eq!(ParseConfig::default().max_depth, usize::MAX);
}

#[test]
fn test_deep_right_recursion_parses_with_default_limit() {
    // list = "a" list?
    let mut grammar = Grammar::new();
    let list = grammar.add_rule("list");
    let con = grammar.term_con();
    let a = grammar.term_lit("a", Occurrence::ONE);
    let rest = grammar.term_rule(list, Occurrence::OPT);
    grammar.attach(con, a).unwrap();
    grammar.attach(con, rest).unwrap();
    grammar.attach(list, con).unwrap();

    let source = "a".repeat(3000);
    let lexer = Lexer::tokenize(&source, "input", 0);
    let mut parser = Parser::new(&lexer, &grammar);
    let root = parser.parse(list).unwrap();
    let tree = parser.tree();

    assert_eq!(tree.get_str(root, &lexer), source);
    let rule_nodes = tree
        .nodes()
        .iter()
        .filter(|node| node.kind == ParseNodeKind::Rule { rule: list })
        .count();
    assert_eq!(rule_nodes, 3000);
    assert_eq!(literal_texts(tree, &lexer).len(), 3000);
}

#[test]
fn test_start_rule_without_production() {
    let mut grammar = Grammar::new();
    let rule = grammar.add_rule("empty");
    let lexer = Lexer::tokenize("x", "input", 0);

    let mut parser = Parser::new(&lexer, &grammar);
    let error = parser.parse(rule).unwrap_err();
    assert_eq!(error.kind, ParseErrorKind::NoMatch);
    let diag = parser.report(&error);
    assert_eq!(diag.code.as_str(), "E1003");
    assert_eq!(diag.message, "expected rule `empty`, which has no production");
}

#[test]
fn test_empty_input_with_star_rule() {
    let mut grammar = Grammar::new();
    let rule = grammar.add_rule("items");
    let star = grammar.term_tok(eprs_lexer::TokenType::ALPHA, Occurrence::STAR);
    grammar.attach(rule, star).unwrap();
    let lexer = Lexer::tokenize("", "input", 0);

    let tree = parse(&lexer, &grammar, rule, std::io::sink()).unwrap();
    assert_eq!(tree.len(), 1);
    let root = tree.node(tree.root().unwrap()).unwrap();
    assert!(root.span.is_empty());
}

#[test]
fn test_parser_is_reusable() {
    let (grammar, rule) = abc_grammar();
    let lexer = Lexer::tokenize("abc", "input", 0);
    let mut parser = Parser::new(&lexer, &grammar);

    let first = parser.parse(rule).unwrap();
    let len = parser.tree().len();
    let second = parser.parse(rule).unwrap();
    assert_eq!(first, second);
    assert_eq!(parser.tree().len(), len);

    let tree = parser.take_tree();
    assert_eq!(tree.len(), len);
    assert!(parser.tree().is_empty());
}

#[test]
fn test_error_display() {
    let (error, _) = render_failure("ac");
    assert_eq!(error.to_string(), "input does not match the start rule (at token 1)");
}

#[test]
fn test_line_offset_in_diagnostic() {
    let (grammar, rule) = abc_grammar();
    let lexer = Lexer::tokenize("ab\nx", "frag.txt", 41);
    let mut out = Vec::new();
    assert!(parse(&lexer, &grammar, rule, &mut out).is_err());
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("--> frag.txt:42:3\n"), "got:\n{text}");
}
