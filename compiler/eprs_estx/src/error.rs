//! Grammar builder errors.

use crate::TermId;

/// Misuse of the grammar builder API.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// An id that was never issued by this grammar.
    #[error("unknown grammar node {0}")]
    UnknownNode(TermId),

    /// Children can only be attached to rules, alternations,
    /// concatenations and groups.
    #[error("cannot attach children to {kind} term {id}")]
    LeafParent { id: TermId, kind: &'static str },

    /// A rule has exactly one production.
    #[error("rule `{name}` already has a production")]
    ProductionExists { name: String },

    /// Rules are referenced through rule terms, never attached directly.
    #[error("rule `{name}` cannot be attached as a term; reference it with a rule term")]
    ChildIsRule { name: String },
}
