//! ESTX: grammar model for the EPRS grammar engine.
//!
//! A grammar is an arena of [`GrammarNode`]s. Rules own a single production
//! term; compound terms (alternation, concatenation, group) own ordered
//! children; leaf terms reference a rule, a token category, or literal text.
//!
//! Ids are arena indices and never change once issued, so a rule term may
//! reference a rule that has not been given a production yet. Names and
//! literals are copied into one append-only string buffer.
//!
//! The model knows nothing about how it was produced. A textual grammar
//! compiler drives the same builder API that tests use directly:
//!
//! ```
//! use eprs_estx::{Grammar, Occurrence};
//!
//! // pair = "a" "b"+
//! let mut g = Grammar::new();
//! let pair = g.add_rule("pair");
//! let seq = g.term_con();
//! let a = g.term_lit("a", Occurrence::ONE);
//! let b = g.term_lit("b", Occurrence::REP);
//! g.attach(seq, a).unwrap();
//! g.attach(seq, b).unwrap();
//! g.attach(pair, seq).unwrap();
//!
//! assert_eq!(g.find_rule("pair"), Some(pair));
//! assert_eq!(g.children(seq), &[a, b]);
//! ```

mod error;
mod node;

use eprs_lexer::TokenType;

pub use error::GrammarError;
pub use node::{Children, GrammarNode, Occurrence, RuleId, TermId, Text};

/// Arena of rules and terms plus their shared string buffer.
#[derive(Clone, Debug, Default)]
pub struct Grammar {
    nodes: Vec<GrammarNode>,
    strings: String,
}

impl Grammar {
    /// Create an empty grammar.
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Builder
    // ─────────────────────────────────────────────────────────────────────

    /// Add a rule with no production yet.
    pub fn add_rule(&mut self, name: &str) -> RuleId {
        let name = self.intern(name);
        let id = self.push(GrammarNode::Rule {
            name,
            production: None,
        });
        RuleId::from_raw(id.raw())
    }

    /// Add a reference to `target`.
    ///
    /// The target is not validated here; a dangling reference fails the
    /// parse when it is reached.
    pub fn term_rule(&mut self, target: RuleId, occurrence: Occurrence) -> TermId {
        self.push(GrammarNode::TermRule { target, occurrence })
    }

    /// Add a term matching one token of category `ty`.
    pub fn term_tok(&mut self, ty: TokenType, occurrence: Occurrence) -> TermId {
        self.push(GrammarNode::TermTok { ty, occurrence })
    }

    /// Add a term matching the literal `text`.
    pub fn term_lit(&mut self, text: &str, occurrence: Occurrence) -> TermId {
        let text = self.intern(text);
        self.push(GrammarNode::TermLit { text, occurrence })
    }

    /// Add an empty ordered choice.
    pub fn term_alt(&mut self) -> TermId {
        self.push(GrammarNode::TermAlt {
            children: Children::new(),
        })
    }

    /// Add an empty sequence.
    pub fn term_con(&mut self) -> TermId {
        self.push(GrammarNode::TermCon {
            children: Children::new(),
        })
    }

    /// Add an empty parenthesized group.
    pub fn term_group(&mut self, occurrence: Occurrence) -> TermId {
        self.push(GrammarNode::TermGroup {
            children: Children::new(),
            occurrence,
        })
    }

    /// Attach `child` under `parent`.
    ///
    /// For alternations, concatenations and groups the child is appended
    /// after the existing children. For a rule the child becomes its
    /// production.
    pub fn attach(&mut self, parent: impl Into<TermId>, child: TermId) -> Result<(), GrammarError> {
        let parent = parent.into();
        match self.node(child) {
            None => return Err(GrammarError::UnknownNode(child)),
            Some(GrammarNode::Rule { name, .. }) => {
                return Err(GrammarError::ChildIsRule {
                    name: self.text(*name).to_owned(),
                })
            }
            Some(_) => {}
        }

        let Some(node) = self.nodes.get_mut(parent.index()) else {
            return Err(GrammarError::UnknownNode(parent));
        };
        match node {
            GrammarNode::Rule {
                production: Some(_),
                name,
            } => {
                let name = *name;
                Err(GrammarError::ProductionExists {
                    name: self.text(name).to_owned(),
                })
            }
            GrammarNode::Rule { production, .. } => {
                *production = Some(child);
                Ok(())
            }
            GrammarNode::TermAlt { children }
            | GrammarNode::TermCon { children }
            | GrammarNode::TermGroup { children, .. } => {
                children.push(child);
                Ok(())
            }
            leaf @ (GrammarNode::TermRule { .. }
            | GrammarNode::TermTok { .. }
            | GrammarNode::TermLit { .. }) => Err(GrammarError::LeafParent {
                id: parent,
                kind: leaf.kind_name(),
            }),
        }
    }

    fn push(&mut self, node: GrammarNode) -> TermId {
        let raw = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(node);
        TermId::from_raw(raw)
    }

    fn intern(&mut self, text: &str) -> Text {
        let offset = u32::try_from(self.strings.len()).unwrap_or(u32::MAX);
        let len = u32::try_from(text.len()).unwrap_or(u32::MAX);
        self.strings.push_str(text);
        Text { offset, len }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────

    /// Look up a rule by name. Linear scan; not used on the parse path.
    pub fn find_rule(&self, name: &str) -> Option<RuleId> {
        self.rules().find(|&rule| self.rule_name(rule) == Some(name))
    }

    /// Get a node by id.
    #[inline]
    pub fn node(&self, id: impl Into<TermId>) -> Option<&GrammarNode> {
        self.nodes.get(id.into().index())
    }

    /// Narrow a node id to a rule id if the node is a rule.
    pub fn as_rule(&self, id: TermId) -> Option<RuleId> {
        match self.node(id)? {
            GrammarNode::Rule { .. } => Some(RuleId::from_raw(id.raw())),
            _ => None,
        }
    }

    /// Name of a rule, or `None` if `rule` is not a rule.
    pub fn rule_name(&self, rule: RuleId) -> Option<&str> {
        match self.node(rule)? {
            GrammarNode::Rule { name, .. } => Some(self.text(*name)),
            _ => None,
        }
    }

    /// Production term of a rule, if it has one.
    pub fn production(&self, rule: RuleId) -> Option<TermId> {
        match self.node(rule)? {
            GrammarNode::Rule { production, .. } => *production,
            _ => None,
        }
    }

    /// Ordered children of a compound term.
    pub fn children(&self, term: TermId) -> &[TermId] {
        match self.node(term) {
            Some(node) => node.children(),
            None => &[],
        }
    }

    /// Occurrence modifier of a term.
    pub fn occurrence(&self, term: TermId) -> Occurrence {
        self.node(term).map_or(Occurrence::ONE, GrammarNode::occurrence)
    }

    /// Resolve text from the string buffer.
    pub fn text(&self, text: Text) -> &str {
        let start = text.offset as usize;
        let end = start + text.len as usize;
        self.strings.get(start..end).unwrap_or("")
    }

    /// Iterate over all rules in creation order.
    pub fn rules(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, node)| {
            let raw = u32::try_from(i).ok()?;
            matches!(node, GrammarNode::Rule { .. }).then(|| RuleId::from_raw(raw))
        })
    }

    /// Number of rules.
    pub fn rule_count(&self) -> usize {
        self.rules().count()
    }

    /// Number of nodes (rules and terms).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
