//! Error types for layout tree operations.
//!
//! Structural inconsistencies are programming errors: they are logged loudly
//! at the point of detection, the offending operation is abandoned, and the
//! tree is left in its last consistent state.

use std::result::Result as StdResult;

use thiserror::Error;

use crate::id::NodeId;

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Layout tree error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// Node id not present in the arena.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Node missing from its supposed parent's child list.
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The parent whose child list was searched.
        parent: NodeId,
        /// The node that was expected in the list.
        child: NodeId,
    },

    /// Reparenting that would make a node its own ancestor.
    #[error("reparenting {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// The requested new parent.
        parent: NodeId,
        /// The node being reparented.
        child: NodeId,
    },

    /// A reordering operation on a node that has no parent.
    #[error("node {0:?} is detached")]
    Detached(NodeId),

    /// Child index outside the parent's child list.
    #[error("index {index} out of range for {parent:?}")]
    IndexOutOfRange {
        /// The parent whose list was indexed.
        parent: NodeId,
        /// The offending index.
        index: usize,
    },

    /// Attribute parsing failure in the declarative loader.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
