//! Backtracking grammar interpreter for EPRS.
//!
//! Walks a [`Grammar`] over a [`Lexer`]'s tokens and builds a flat
//! [`ParseTree`]. Alternation is ordered (first match wins), repetition is
//! greedy, and every failed attempt is rolled back exactly. When the start
//! rule does not match the whole input, the error points at the furthest
//! token any attempt reached.
//!
//! ```
//! use eprs_estx::{Grammar, Occurrence};
//! use eprs_lexer::Lexer;
//! use eprs_parse::Parser;
//!
//! let mut grammar = Grammar::new();
//! let start = grammar.add_rule("start");
//! let lit = grammar.term_lit("hi", Occurrence::ONE);
//! grammar.attach(start, lit).unwrap();
//!
//! let lexer = Lexer::tokenize("hi", "input", 0);
//! let mut parser = Parser::new(&lexer, &grammar);
//! let root = parser.parse(start).unwrap();
//! assert_eq!(parser.tree().get_str(root, &lexer), "hi");
//! ```

mod config;
mod engine;
mod error;
pub mod report;
mod snapshot;
mod stack;
mod tree;

use std::io;
use std::sync::Once;

pub use config::{ParseConfig, DEFAULT_MAX_DEPTH};
pub use error::{Failure, ParseError, ParseErrorKind};
pub use tree::{Children, NodeId, ParseNode, ParseNodeKind, ParseTree, Rules, TokenRange};

use eprs_diagnostic::{Diagnostic, DiagnosticEmitter, TerminalEmitter};
use eprs_estx::{Grammar, RuleId, TermId};
use eprs_lexer::Lexer;

use engine::Stop;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber driven by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and nothing after the first call.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Parser state.
///
/// The lexer and grammar are borrowed immutably; the node arena is owned
/// and reset by every [`parse`](Parser::parse), so one parser can be
/// reused for several start rules over the same input.
pub struct Parser<'a> {
    lexer: &'a Lexer,
    grammar: &'a Grammar,
    config: ParseConfig,
    tree: ParseTree,
    /// Current token offset.
    pos: u32,
    /// Node that matched terms attach to.
    parent: NodeId,
    /// Rule whose production is being parsed.
    rule: RuleId,
    depth: usize,
    failure: Option<Failure>,
}

impl<'a> Parser<'a> {
    /// Create a parser with the default configuration.
    pub fn new(lexer: &'a Lexer, grammar: &'a Grammar) -> Self {
        Parser {
            lexer,
            grammar,
            config: ParseConfig::default(),
            tree: ParseTree::default(),
            pos: 0,
            parent: NodeId::ROOT,
            rule: RuleId::from_raw(0),
            depth: 0,
            failure: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ParseConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Parse the whole input as `start`.
    ///
    /// On success the tree's root is a `Rule(start)` node spanning every
    /// token. On failure the tree is left empty and the error carries the
    /// furthest failure recorded.
    pub fn parse(&mut self, start: RuleId) -> Result<NodeId, ParseError> {
        self.tree.clear();
        self.pos = 0;
        self.parent = NodeId::ROOT;
        self.rule = start;
        self.depth = 0;
        self.failure = None;

        tracing::debug!(
            rule = self.grammar.rule_name(start).unwrap_or("?"),
            file = self.lexer.file_name(),
            tokens = self.lexer.token_count(),
            "parse"
        );

        let root = self
            .tree
            .open(ParseNodeKind::Rule { rule: start }, None, None, 0);
        let result = self.parse_rule_body(TermId::from(start), start);
        let total = u32::try_from(self.lexer.token_count()).unwrap_or(u32::MAX);

        let error = match result {
            Ok(()) if self.pos == total => {
                let span = self.token_span(0, self.pos);
                self.tree.close(root, self.pos, span);
                return Ok(root);
            }
            Ok(()) => ParseError::new(
                ParseErrorKind::TrailingInput {
                    consumed: self.pos,
                    total,
                },
                self.pos,
                self.failure,
            ),
            Err(Stop::Mismatch) => ParseError::new(
                ParseErrorKind::NoMatch,
                self.failure.map_or(0, |failure| failure.token),
                self.failure,
            ),
            Err(Stop::RecursionLimit) => ParseError::new(
                ParseErrorKind::RecursionLimit {
                    limit: self.config.max_depth,
                },
                self.pos,
                self.failure,
            ),
        };

        tracing::debug!(%error, "parse failed");
        self.tree.clear();
        Err(error)
    }

    /// The tree built by the last successful [`parse`](Parser::parse).
    pub fn tree(&self) -> &ParseTree {
        &self.tree
    }

    /// Take the tree, leaving an empty one behind.
    pub fn take_tree(&mut self) -> ParseTree {
        std::mem::take(&mut self.tree)
    }

    pub fn into_tree(self) -> ParseTree {
        self.tree
    }

    /// Furthest failure recorded by the last parse. Set even when the
    /// parse succeeded, if some alternative failed along the way.
    pub fn furthest_failure(&self) -> Option<Failure> {
        self.failure
    }

    /// Build the diagnostic for an error from this parser.
    pub fn report(&self, error: &ParseError) -> Diagnostic {
        report::to_diagnostic(error, self.lexer, self.grammar)
    }
}

/// Parse `lexer`'s input as `start` with the default configuration.
///
/// On failure the diagnostic is rendered into `sink` and the error is
/// returned.
pub fn parse<W: io::Write>(
    lexer: &Lexer,
    grammar: &Grammar,
    start: RuleId,
    sink: W,
) -> Result<ParseTree, ParseError> {
    parse_with_config(lexer, grammar, start, sink, ParseConfig::default())
}

/// [`parse`] with an explicit configuration.
pub fn parse_with_config<W: io::Write>(
    lexer: &Lexer,
    grammar: &Grammar,
    start: RuleId,
    sink: W,
    config: ParseConfig,
) -> Result<ParseTree, ParseError> {
    let mut parser = Parser::new(lexer, grammar).with_config(config);
    match parser.parse(start) {
        Ok(_) => Ok(parser.into_tree()),
        Err(error) => {
            let mut emitter = TerminalEmitter::with_color_mode(sink, config.color, false);
            emitter.emit(&parser.report(&error));
            emitter.flush();
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests;
