//! Grammar node types: ids, occurrence modifiers, and the node enum.

use std::fmt;

use bitflags::bitflags;
use eprs_lexer::TokenType;
use smallvec::SmallVec;

/// Index of a grammar node in the [`Grammar`](crate::Grammar) arena.
///
/// Ids are stable once issued: nodes are never removed or reordered.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct TermId(u32);

impl TermId {
    /// Create an id from a raw arena index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TermId(raw)
    }

    /// The raw arena index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Id of a rule node.
///
/// Shares the index space of [`TermId`]. A `RuleId` built with
/// [`RuleId::from_raw`] is not validated; referencing a node that is not a
/// rule fails at parse time, not at build time.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct RuleId(u32);

impl RuleId {
    /// Create an id from a raw arena index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        RuleId(raw)
    }

    /// The raw arena index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<RuleId> for TermId {
    #[inline]
    fn from(rule: RuleId) -> Self {
        TermId(rule.0)
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// How many times a term may match.
    ///
    /// | Flags | Meaning |
    /// |-------|---------|
    /// | none | exactly one |
    /// | `OPT` | zero or one |
    /// | `REP` | one or more |
    /// | `OPT \| REP` | zero or more |
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Occurrence: u8 {
        const OPT = 1 << 0;
        const REP = 1 << 1;
        const STAR = Self::OPT.bits() | Self::REP.bits();
    }
}

impl Occurrence {
    /// Exactly one match.
    pub const ONE: Occurrence = Occurrence::empty();

    /// Whether zero matches is acceptable.
    #[inline]
    pub fn is_optional(self) -> bool {
        self.contains(Occurrence::OPT)
    }

    /// Whether the term may match more than once.
    #[inline]
    pub fn is_repeated(self) -> bool {
        self.contains(Occurrence::REP)
    }

    /// EBNF suffix: `""`, `"?"`, `"+"`, or `"*"`.
    pub fn suffix(self) -> &'static str {
        match (self.is_optional(), self.is_repeated()) {
            (false, false) => "",
            (true, false) => "?",
            (false, true) => "+",
            (true, true) => "*",
        }
    }
}

/// Reference to text in the grammar's string buffer.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Text {
    pub offset: u32,
    pub len: u32,
}

/// Ordered child list of a compound term.
pub type Children = SmallVec<[TermId; 4]>;

/// A node of the grammar tree.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum GrammarNode {
    /// Named rule with at most one production term.
    Rule {
        name: Text,
        production: Option<TermId>,
    },
    /// Reference to another rule, possibly one not yet populated.
    TermRule {
        target: RuleId,
        occurrence: Occurrence,
    },
    /// Matches one token whose category intersects `ty`.
    TermTok {
        ty: TokenType,
        occurrence: Occurrence,
    },
    /// Matches literal text, character by character.
    TermLit { text: Text, occurrence: Occurrence },
    /// Ordered choice: first matching child wins.
    TermAlt { children: Children },
    /// Sequence: every child in order.
    TermCon { children: Children },
    /// Parenthesized sequence carrying its own occurrence.
    TermGroup {
        children: Children,
        occurrence: Occurrence,
    },
}

impl GrammarNode {
    /// Occurrence modifier of the node; `ONE` for rules, alternations and
    /// concatenations.
    pub fn occurrence(&self) -> Occurrence {
        match self {
            GrammarNode::TermRule { occurrence, .. }
            | GrammarNode::TermTok { occurrence, .. }
            | GrammarNode::TermLit { occurrence, .. }
            | GrammarNode::TermGroup { occurrence, .. } => *occurrence,
            GrammarNode::Rule { .. } | GrammarNode::TermAlt { .. } | GrammarNode::TermCon { .. } => {
                Occurrence::ONE
            }
        }
    }

    /// Children of a compound term; empty for everything else.
    pub fn children(&self) -> &[TermId] {
        match self {
            GrammarNode::TermAlt { children }
            | GrammarNode::TermCon { children }
            | GrammarNode::TermGroup { children, .. } => children,
            _ => &[],
        }
    }

    /// Human-readable node kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            GrammarNode::Rule { .. } => "rule",
            GrammarNode::TermRule { .. } => "rule reference",
            GrammarNode::TermTok { .. } => "token",
            GrammarNode::TermLit { .. } => "literal",
            GrammarNode::TermAlt { .. } => "alternation",
            GrammarNode::TermCon { .. } => "concatenation",
            GrammarNode::TermGroup { .. } => "group",
        }
    }
}
