//! A hierarchical layout and scaling tree for game UIs.
//!
//! Each node computes a screen-space rectangle from a parent-relative
//! specification: a relative or absolute size, one of nine anchor positions
//! on the parent rectangle, a pivot on the node's own rectangle, three
//! offset channels, min/max size clamps, and a composed scale factor.
//! Mutations propagate through descendants in a single bounded pass, and the
//! derived rectangle is cached lazily and re-derived only on read.
//!
//! Nodes live in an arena owned by [`LayoutTree`] and are addressed by
//! [`NodeId`], so reparenting and detaching are plain index assignments.

/// Anchor/pivot positions and the pure geometry functions built on them.
mod anchor;
/// Error types for tree operations.
pub mod error;
/// Change notifications and subscriptions.
mod event;
/// Arena key types.
mod id;
/// Declarative construction from attribute maps.
mod markup;
/// Node storage and construction parameters.
mod node;
/// The layout tree and its recalculation engine.
mod tree;

pub use anchor::{Anchor, Pivot, ScaleBasis, anchor_point, offset_from_anchor, pivot_offset};
pub use error::{Error, Result};
pub use event::LayoutEvent;
pub use id::{NodeId, SubscriptionId};
pub use markup::{NodeAttrs, load};
pub use node::NodeParams;
pub use tree::{Ancestors, Descendants, LayoutTree};

pub use geom;
pub use geom::{Expanse, Point, Rect, Vec2};
