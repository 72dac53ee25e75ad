//! Change notifications emitted by the layout tree.

use std::{cell::RefCell, rc::Rc};

use crate::id::NodeId;

/// A change notification. Handlers are invoked after the mutating operation
/// has fully completed, so the tree is consistent when they run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEvent {
    /// The node was attached to a new parent, or detached.
    ParentChanged {
        /// The node whose parent changed.
        node: NodeId,
        /// The new parent, if any.
        parent: Option<NodeId>,
    },
    /// A child was added to or repositioned under the parent. The child may
    /// be new in the hierarchy or just reordered.
    ChildrenChanged {
        /// The parent whose child list changed.
        parent: NodeId,
        /// The child that changed.
        child: NodeId,
    },
    /// The node's effective scale was recomputed.
    ScaleChanged {
        /// The rescaled node.
        node: NodeId,
    },
    /// The node's non-scaled size was recomputed.
    SizeChanged {
        /// The resized node.
        node: NodeId,
    },
}

impl LayoutEvent {
    /// The node whose subscribers receive this event.
    pub(crate) fn target(&self) -> NodeId {
        match self {
            Self::ParentChanged { node, .. } => *node,
            Self::ChildrenChanged { parent, .. } => *parent,
            Self::ScaleChanged { node } => *node,
            Self::SizeChanged { node } => *node,
        }
    }
}

/// Shared callback invoked with each event delivered to its node.
pub(crate) type Handler = Rc<RefCell<dyn FnMut(&LayoutEvent)>>;

/// A registered handler bound to a single node.
pub(crate) struct Subscription {
    /// The node whose events this subscription receives.
    pub(crate) node: NodeId,
    /// The callback.
    pub(crate) handler: Handler,
}
