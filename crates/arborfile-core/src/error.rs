//! Error types for tree operations.

use compact_str::CompactString;
use thiserror::Error;

use crate::node::NodeId;

/// Errors surfaced by validators and the mutation engine.
///
/// Every variant is an ordinary, recoverable outcome except [`BrokenChain`],
/// which signals a corrupted parent link and should never occur while the
/// forest invariants hold.
///
/// [`BrokenChain`]: EngineError::BrokenChain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Referenced node id does not exist.
    #[error("node not found: {id}")]
    NotFound { id: NodeId },

    /// Creation parent is missing or not a folder.
    #[error("invalid parent: {id}")]
    InvalidParent { id: NodeId },

    /// Move target does not exist.
    #[error("move target not found: {id}")]
    TargetNotFound { id: NodeId },

    /// Move target exists but is a file.
    #[error("move target is not a folder: {id}")]
    TargetNotFolder { id: NodeId },

    /// Candidate name collides with a sibling.
    #[error("name already taken: {name}")]
    NameCollision { name: CompactString },

    /// Move would place a folder under itself or one of its descendants.
    #[error("cannot move folder {moved} into its own subtree (target {target})")]
    CyclicMove { moved: NodeId, target: NodeId },

    /// Requested operation changes nothing.
    #[error("operation requests no change")]
    NoOp,

    /// Candidate name is not acceptable regardless of siblings.
    #[error("invalid name {name:?}: {reason}")]
    InvalidName {
        name: CompactString,
        reason: CompactString,
    },

    /// An ancestor walk hit a parent link that dangles or loops.
    #[error("broken ancestor chain at {id}: bad parent link {missing_parent}")]
    BrokenChain { id: NodeId, missing_parent: NodeId },
}

impl EngineError {
    /// Create an invalid-name error.
    pub fn invalid_name(name: impl Into<CompactString>, reason: impl Into<CompactString>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check whether this error signals store corruption rather than a
    /// rejected request.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::BrokenChain { .. })
    }
}
