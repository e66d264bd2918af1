#![allow(clippy::unwrap_used)]

use eprs_estx::{Grammar, Occurrence, RuleId};
use eprs_lexer::{Lexer, TokenType};
use pretty_assertions::assert_eq;

use crate::{NodeId, ParseTree, Parser};

struct KvGrammar {
    grammar: Grammar,
    file: RuleId,
    kv: RuleId,
    key: RuleId,
    value: RuleId,
}

/// ```text
/// file  = kv*
/// kv    = key "=" value ";" WS*
/// key   = ALPHA+
/// value = DIGIT+ | key
/// ```
fn kv_grammar() -> KvGrammar {
    let mut grammar = Grammar::new();
    let file = grammar.add_rule("file");
    let kv = grammar.add_rule("kv");
    let key = grammar.add_rule("key");
    let value = grammar.add_rule("value");

    let kvs = grammar.term_rule(kv, Occurrence::STAR);
    grammar.attach(file, kvs).unwrap();

    let con = grammar.term_con();
    let key_ref = grammar.term_rule(key, Occurrence::ONE);
    let eq = grammar.term_lit("=", Occurrence::ONE);
    let value_ref = grammar.term_rule(value, Occurrence::ONE);
    let semi = grammar.term_lit(";", Occurrence::ONE);
    let ws = grammar.term_tok(TokenType::WS, Occurrence::STAR);
    for term in [key_ref, eq, value_ref, semi, ws] {
        grammar.attach(con, term).unwrap();
    }
    grammar.attach(kv, con).unwrap();

    let letters = grammar.term_tok(TokenType::ALPHA, Occurrence::REP);
    grammar.attach(key, letters).unwrap();

    let alt = grammar.term_alt();
    let digits = grammar.term_tok(TokenType::DIGIT, Occurrence::REP);
    let word = grammar.term_rule(key, Occurrence::ONE);
    grammar.attach(alt, digits).unwrap();
    grammar.attach(alt, word).unwrap();
    grammar.attach(value, alt).unwrap();

    KvGrammar {
        grammar,
        file,
        kv,
        key,
        value,
    }
}

fn parse_kv(g: &KvGrammar, source: &str) -> (Lexer, ParseTree) {
    let lexer = Lexer::tokenize(source, "conf", 0);
    let tree = {
        let mut parser = Parser::new(&lexer, &g.grammar);
        parser.parse(g.file).unwrap();
        parser.into_tree()
    };
    (lexer, tree)
}

#[test]
fn test_rules_lists_each_entry() {
    let g = kv_grammar();
    let (lexer, tree) = parse_kv(&g, "port=8080;\nhost=local;\n");

    let entries: Vec<_> = tree
        .rules(NodeId::ROOT, g.kv)
        .map(|kv| {
            let key = tree.get_rule(kv, g.key).unwrap();
            let value = tree.get_rule(kv, g.value).unwrap();
            (tree.get_str(key, &lexer), tree.get_str(value, &lexer))
        })
        .collect();

    assert_eq!(
        entries,
        vec![
            ("port".to_string(), "8080".to_string()),
            ("host".to_string(), "local".to_string()),
        ]
    );
}

#[test]
fn test_rules_skips_nested_matches() {
    let g = kv_grammar();
    let (_, tree) = parse_kv(&g, "a=b;");

    // The value `b` is itself a `key` nested inside `value`.
    assert_eq!(tree.rules(NodeId::ROOT, g.key).count(), 2);
    let value = tree.get_rule(NodeId::ROOT, g.value).unwrap();
    assert_eq!(tree.rules(value, g.key).count(), 1);
    assert_eq!(tree.rules(NodeId::ROOT, g.value).count(), 1);
}

#[test]
fn test_get_rule_returns_first_in_preorder() {
    let g = kv_grammar();
    let (lexer, tree) = parse_kv(&g, "x=1;y=2;");

    let first = tree.get_rule(NodeId::ROOT, g.kv).unwrap();
    assert_eq!(tree.get_str(first, &lexer), "x=1;");
    assert_eq!(tree.get_rule(first, g.kv), Some(first));
    assert_eq!(tree.get_rule(NodeId::ROOT, g.file), Some(NodeId::ROOT));
}

#[test]
fn test_get_str_includes_literals_and_whitespace() {
    let g = kv_grammar();
    let (lexer, tree) = parse_kv(&g, "k=v;  ");
    let kv = tree.get_rule(NodeId::ROOT, g.kv).unwrap();
    assert_eq!(tree.get_str(kv, &lexer), "k=v;  ");
}

#[test]
fn test_children_of_entry() {
    let g = kv_grammar();
    let (lexer, tree) = parse_kv(&g, "ab=12;");
    let kv = tree.get_rule(NodeId::ROOT, g.kv).unwrap();

    let parts: Vec<_> = tree
        .children(kv)
        .map(|child| tree.get_str(child, &lexer))
        .collect();
    assert_eq!(parts, vec!["ab", "=", "12", ";"]);

    for child in tree.children(kv) {
        assert_eq!(tree.node(child).unwrap().parent, Some(kv));
    }
}

#[test]
fn test_empty_file_has_only_root() {
    let g = kv_grammar();
    let (_, tree) = parse_kv(&g, "");
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.rules(NodeId::ROOT, g.kv).count(), 0);
    assert_eq!(tree.get_rule(NodeId::ROOT, g.key), None);
}
