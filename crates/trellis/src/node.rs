//! Node storage and construction parameters.

use std::cell::Cell;

use geom::{Expanse, Point, Rect, Vec2};

use crate::{
    anchor::{Anchor, Pivot, ScaleBasis},
    id::NodeId,
};

/// Sizing specification for a new node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Size {
    /// A fraction of the parent rectangle per axis.
    Relative(Vec2),
    /// A pixel size before scale is applied. Absolute-sized nodes still
    /// track later parent resizes unless marked fixed-size.
    Absolute(Expanse),
}

/// Construction parameters for a layout node.
#[derive(Debug, Clone, Copy)]
pub struct NodeParams {
    /// Initial size specification.
    pub(crate) size: Size,
    /// Anchor position on the parent rectangle.
    pub(crate) anchor: Anchor,
    /// Pivot position on the node's own rectangle; defaults to the anchor.
    pub(crate) pivot: Option<Pivot>,
    /// Minimum pixel size clamp.
    pub(crate) min_size: Option<Expanse>,
    /// Maximum pixel size clamp.
    pub(crate) max_size: Option<Expanse>,
    /// Dimension policy for relative sizing.
    pub(crate) scale_basis: ScaleBasis,
    /// If true, the node does not resize when its parent does.
    pub(crate) fixed_size: bool,
}

impl NodeParams {
    /// Parameters for a node sized as a fraction of its parent.
    pub fn relative(size: Vec2) -> Self {
        Self::with_size(Size::Relative(size))
    }

    /// Parameters for a node with an explicit pixel size.
    pub fn absolute(size: Expanse) -> Self {
        Self::with_size(Size::Absolute(size))
    }

    fn with_size(size: Size) -> Self {
        Self {
            size,
            anchor: Anchor::TopLeft,
            pivot: None,
            min_size: None,
            max_size: None,
            scale_basis: ScaleBasis::Normal,
            fixed_size: false,
        }
    }

    /// Set the anchor position.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the pivot position. Unset, the pivot matches the anchor.
    pub fn pivot(mut self, pivot: Pivot) -> Self {
        self.pivot = Some(pivot);
        self
    }

    /// Set the minimum pixel size.
    pub fn min_size(mut self, min: Expanse) -> Self {
        self.min_size = Some(min);
        self
    }

    /// Set the maximum pixel size.
    pub fn max_size(mut self, max: Expanse) -> Self {
        self.max_size = Some(max);
        self
    }

    /// Set the dimension policy for relative sizing.
    pub fn scale_basis(mut self, basis: ScaleBasis) -> Self {
        self.scale_basis = basis;
        self
    }

    /// Exempt the node from parent-driven resizes. Scaling still applies.
    pub fn fixed_size(mut self, fixed: bool) -> Self {
        self.fixed_size = fixed;
        self
    }
}

/// Node data stored in the arena.
pub(crate) struct Node {
    /// Parent in the arena tree.
    pub(crate) parent: Option<NodeId>,
    /// Children in the arena tree; order is painter's/focus order.
    pub(crate) children: Vec<NodeId>,

    /// Size as a fraction of the non-scaled parent size. Kept consistent
    /// with `non_scaled_size` by every setter.
    pub(crate) relative_size: Vec2,
    /// Size in pixels before scale multiplication, clamped to min/max.
    pub(crate) non_scaled_size: Expanse,
    /// Minimum size clamp; unset means zero.
    pub(crate) min_size: Option<Expanse>,
    /// Maximum size clamp; unset means unbounded.
    pub(crate) max_size: Option<Expanse>,

    /// Anchor position on the parent rectangle.
    pub(crate) anchor: Anchor,
    /// Pivot position on this node's own rectangle.
    pub(crate) pivot: Pivot,

    /// Offset as a fraction of the parent size, directed away from the
    /// anchor point.
    pub(crate) relative_offset: Vec2,
    /// Offset in pixels, directed away from the anchor point.
    pub(crate) absolute_offset: Point,
    /// Raw top-left-relative screen displacement, used for free motion.
    pub(crate) screen_space_offset: Point,

    /// Scale multiplier applied at this node.
    pub(crate) local_scale: Vec2,
    /// Effective scale: local scale times all ancestor local scales times
    /// the tree's global scale. Recomputed top-down.
    pub(crate) scale: Vec2,

    /// If true, parent resizes leave this node's size untouched.
    pub(crate) fixed_size: bool,
    /// Dimension policy for relative sizing.
    pub(crate) scale_basis: ScaleBasis,

    /// Cached anchor point in screen space.
    pub(crate) anchor_point: Point,
    /// Cached pivot offset in pixels, derived from the scaled size.
    pub(crate) pivot_offset: Point,
    /// Lazily derived screen rectangle. `None` means dirty.
    pub(crate) rect: Cell<Option<Rect>>,
}

impl Node {
    /// Build a node from construction parameters, before any recalculation.
    pub(crate) fn new(params: NodeParams, parent: Option<NodeId>) -> Self {
        let mut node = Self {
            parent,
            children: Vec::new(),
            relative_size: Vec2::ONE,
            non_scaled_size: Expanse::zero(),
            min_size: params.min_size,
            max_size: params.max_size,
            anchor: params.anchor,
            pivot: params.pivot.unwrap_or(params.anchor.matching_pivot()),
            relative_offset: Vec2::ZERO,
            absolute_offset: Point::zero(),
            screen_space_offset: Point::zero(),
            local_scale: Vec2::ONE,
            scale: Vec2::ONE,
            fixed_size: params.fixed_size,
            scale_basis: params.scale_basis,
            anchor_point: Point::zero(),
            pivot_offset: Point::zero(),
            rect: Cell::new(None),
        };
        match params.size {
            Size::Relative(size) => node.relative_size = size,
            Size::Absolute(size) => node.non_scaled_size = size.clamp(node.min(), node.max()),
        }
        node
    }

    /// Effective minimum size.
    pub(crate) fn min(&self) -> Expanse {
        self.min_size.unwrap_or(Expanse::zero())
    }

    /// Effective maximum size.
    pub(crate) fn max(&self) -> Expanse {
        self.max_size.unwrap_or(Expanse::MAX)
    }

    /// Size after scale multiplication.
    pub(crate) fn scaled_size(&self) -> Expanse {
        self.non_scaled_size.scale(self.scale)
    }

    /// Mark the cached rectangle dirty without recomputing it.
    pub(crate) fn invalidate_rect(&self) {
        self.rect.set(None);
    }
}
