//! Parse tree arena.
//!
//! Nodes live in one `Vec` in pre-order: a node's descendants occupy the
//! contiguous index range `id + 1 .. subtree_end`. That layout gives the
//! parser its rollback (truncate the vector) and gives consumers cheap
//! subtree scans (a range walk, no pointer chasing).

use std::fmt;

use eprs_estx::{RuleId, TermId};
use eprs_lexer::{Lexer, Span, TokenType};

/// Index of a node in a [`ParseTree`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root of every successful parse.
    pub const ROOT: NodeId = NodeId(0);

    /// Create from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        NodeId(raw)
    }

    /// Raw index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// What a parse node stands for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseNodeKind {
    /// A matched rule; its children are the rule's body.
    Rule { rule: RuleId },
    /// A single token matched by category. `ty` is the token's own mask.
    Token { ty: TokenType },
    /// Literal text, possibly spanning several tokens.
    Literal,
}

/// Half-open range of token indices.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenRange {
    pub start: u32,
    pub end: u32,
}

impl TokenRange {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        TokenRange { start, end }
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// One node of the parse tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseNode {
    pub kind: ParseNodeKind,
    /// Grammar term that produced the node. `None` for the root.
    pub term: Option<TermId>,
    pub parent: Option<NodeId>,
    /// Tokens covered by the node.
    pub tokens: TokenRange,
    /// Source bytes covered by the node. Empty for zero-width matches.
    pub span: Span,
    /// One past the last descendant.
    subtree_end: u32,
}

impl ParseNode {
    /// Rule matched by this node, if it is a rule node.
    #[inline]
    pub fn rule(&self) -> Option<RuleId> {
        match self.kind {
            ParseNodeKind::Rule { rule } => Some(rule),
            ParseNodeKind::Token { .. } | ParseNodeKind::Literal => None,
        }
    }

    /// Check if this is a token or literal node.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self.kind, ParseNodeKind::Rule { .. })
    }
}

/// Subtree end of a node that is still being parsed.
const OPEN: u32 = u32::MAX;

/// Arena of parse nodes, built by a [`Parser`](crate::Parser).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseTree {
    nodes: Vec<ParseNode>,
}

impl ParseTree {
    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root node, if the tree holds a parse.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId::ROOT)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&ParseNode> {
        self.nodes.get(id.index())
    }

    /// All nodes in pre-order.
    #[inline]
    pub fn nodes(&self) -> &[ParseNode] {
        &self.nodes
    }

    /// Direct children of `id`, in order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let (next, end) = match self.node(id) {
            Some(node) => (id.raw() + 1, node.subtree_end),
            None => (0, 0),
        };
        Children {
            tree: self,
            next,
            end,
        }
    }

    /// `id` and all its descendants, in pre-order.
    pub fn subtree(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let end = self.node(id).map_or(id.raw(), |node| node.subtree_end);
        (id.raw()..end).map(NodeId)
    }

    /// First node in pre-order within `parent`'s subtree (including
    /// `parent` itself) that matched `rule`.
    pub fn get_rule(&self, parent: NodeId, rule: RuleId) -> Option<NodeId> {
        self.subtree(parent)
            .find(|&id| self.nodes[id.index()].rule() == Some(rule))
    }

    /// Every outermost match of `rule` within `parent`'s subtree.
    ///
    /// Matches nested inside an earlier match are skipped, so for
    /// `list = item*` with recursive items this yields the list's own items.
    pub fn rules(&self, parent: NodeId, rule: RuleId) -> Rules<'_> {
        let (next, end) = match self.node(parent) {
            Some(node) => (parent.raw(), node.subtree_end),
            None => (0, 0),
        };
        Rules {
            tree: self,
            rule,
            next,
            end,
        }
    }

    /// Token and literal nodes within `parent`'s subtree, in source order.
    pub fn terminals(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.subtree(parent)
            .filter(|&id| self.nodes[id.index()].is_terminal())
    }

    /// Source text matched by `parent`'s subtree: the concatenation of its
    /// token and literal nodes.
    pub fn get_str(&self, parent: NodeId, lexer: &Lexer) -> String {
        let mut bytes = Vec::new();
        for id in self.terminals(parent) {
            bytes.extend_from_slice(lexer.span_bytes(self.nodes[id.index()].span));
        }
        String::from_utf8_lossy(&bytes).into_owned()
    }

    // --- Building (parser only) ---

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    pub(crate) fn truncate(&mut self, len: u32) {
        self.nodes.truncate(len as usize);
    }

    /// Length as the `u32` used for marks and node ids.
    #[inline]
    pub(crate) fn mark_len(&self) -> u32 {
        u32::try_from(self.nodes.len()).unwrap_or(u32::MAX)
    }

    /// Append an interior node whose children follow. Must be closed.
    pub(crate) fn open(
        &mut self,
        kind: ParseNodeKind,
        term: Option<TermId>,
        parent: Option<NodeId>,
        token_start: u32,
    ) -> NodeId {
        let id = NodeId(self.mark_len());
        self.nodes.push(ParseNode {
            kind,
            term,
            parent,
            tokens: TokenRange::new(token_start, token_start),
            span: Span::DUMMY,
            subtree_end: OPEN,
        });
        id
    }

    /// Finish an interior node once all its children are appended.
    pub(crate) fn close(&mut self, id: NodeId, token_end: u32, span: Span) {
        let end = self.mark_len();
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.tokens.end = token_end;
            node.span = span;
            node.subtree_end = end;
        }
    }

    /// Append a childless node.
    pub(crate) fn push_leaf(
        &mut self,
        kind: ParseNodeKind,
        term: TermId,
        parent: NodeId,
        tokens: TokenRange,
        span: Span,
    ) -> NodeId {
        let id = NodeId(self.mark_len());
        self.nodes.push(ParseNode {
            kind,
            term: Some(term),
            parent: Some(parent),
            tokens,
            span,
            subtree_end: id.0 + 1,
        });
        id
    }
}

/// Iterator over direct children. See [`ParseTree::children`].
pub struct Children<'t> {
    tree: &'t ParseTree,
    next: u32,
    end: u32,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.next >= self.end {
            return None;
        }
        let id = NodeId(self.next);
        self.next = self.tree.nodes.get(id.index())?.subtree_end;
        Some(id)
    }
}

/// Iterator over outermost rule matches. See [`ParseTree::rules`].
pub struct Rules<'t> {
    tree: &'t ParseTree,
    rule: RuleId,
    next: u32,
    end: u32,
}

impl Iterator for Rules<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while self.next < self.end {
            let id = NodeId(self.next);
            let node = self.tree.nodes.get(id.index())?;
            if node.rule() == Some(self.rule) {
                self.next = node.subtree_end;
                return Some(id);
            }
            self.next += 1;
        }
        None
    }
}
