//! The layout tree: a node arena with anchor/pivot geometry, lazy rectangle
//! caching, and single-pass subtree recalculation.

use std::{cell::RefCell, cmp::Ordering, mem, rc::Rc};

use slotmap::SlotMap;
use tracing::error;

use geom::{Expanse, Point, Rect, Vec2};

use crate::{
    anchor::{Anchor, Pivot, ScaleBasis, anchor_point, offset_from_anchor, pivot_offset},
    error::{Error, Result},
    event::{Handler, LayoutEvent, Subscription},
    id::{NodeId, SubscriptionId},
    node::{Node, NodeParams, Size},
};

/// Arena of layout nodes plus the shared state they derive geometry from:
/// the screen size (the parent rectangle of root nodes) and the global scale.
pub struct LayoutTree {
    /// Node storage arena.
    nodes: SlotMap<NodeId, Node>,
    /// Screen size; roots anchor against this rectangle.
    screen: Expanse,
    /// Scale factor applied to every node. Changing it does not propagate
    /// automatically; call [`LayoutTree::rescale_all`] afterward.
    global_scale: Vec2,
    /// Registered event subscriptions.
    subs: SlotMap<SubscriptionId, Subscription>,
    /// Events queued during a mutation, delivered once it completes.
    pending: Vec<LayoutEvent>,
}

impl LayoutTree {
    /// Create an empty tree for a screen of the given size.
    pub fn new(screen: Expanse) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            screen,
            global_scale: Vec2::ONE,
            subs: SlotMap::with_key(),
            pending: Vec::new(),
        }
    }

    /// Create a node under `parent` (or as a root) and compute its initial
    /// geometry. Fires children-changed on the parent.
    pub fn add_node(&mut self, parent: Option<NodeId>, params: NodeParams) -> Result<NodeId> {
        if let Some(p) = parent
            && !self.nodes.contains_key(p)
        {
            return Err(Error::NodeNotFound(p));
        }
        let id = self.nodes.insert(Node::new(params, parent));
        if let Some(p) = parent {
            self.nodes[p].children.push(id);
        }
        self.recalc_scale(id);
        match params.size {
            Size::Relative(_) => self.recalc_absolute_size(id),
            Size::Absolute(_) => {
                self.recalc_relative_size(id);
                if self.nodes[id].scale_basis != ScaleBasis::Normal {
                    self.recalc_absolute_size(id);
                }
            }
        }
        self.recalc_anchor_point(id);
        self.recalc_pivot_offset(id);
        if let Some(p) = parent {
            self.emit(LayoutEvent::ChildrenChanged {
                parent: p,
                child: id,
            });
        }
        self.flush_events();
        Ok(id)
    }

    /// Remove a node and all its descendants from the arena, dropping any
    /// subscriptions bound to them.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<()> {
        if !self.nodes.contains_key(id) {
            return Err(Error::NodeNotFound(id));
        }
        if self.nodes[id].parent.is_some() {
            self.remove_from_parent(id)?;
        }
        let mut doomed = vec![id];
        doomed.extend(self.descendants(id));
        for nid in doomed {
            self.nodes.remove(nid);
        }
        let nodes = &self.nodes;
        self.subs.retain(|_, s| nodes.contains_key(s.node));
        Ok(())
    }

    /// True if the node id is live in the arena.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    // ------------------------------------------------------------------
    // Shared state

    /// The screen size roots anchor against.
    pub fn screen_size(&self) -> Expanse {
        self.screen
    }

    /// The screen rectangle, at the origin.
    pub fn screen_rect(&self) -> Rect {
        self.screen.rect()
    }

    /// Change the screen size and run a resize pass over every root.
    pub fn set_screen_size(&mut self, screen: Expanse) {
        if self.screen == screen {
            return;
        }
        self.screen = screen;
        for root in self.roots() {
            self.recalc_all(root, true, false, true);
        }
        self.flush_events();
    }

    /// The scale factor applied to every node.
    pub fn global_scale(&self) -> Vec2 {
        self.global_scale
    }

    /// Store a new global scale. No node is updated: there is no registry of
    /// live consumers to notify, so the caller follows up with
    /// [`LayoutTree::rescale_all`] (or a targeted
    /// [`LayoutTree::recalculate_scale`]) once the new value is in place.
    pub fn set_global_scale(&mut self, scale: Vec2) {
        self.global_scale = scale;
    }

    /// Run a scale recalculation pass over the whole forest of roots.
    pub fn rescale_all(&mut self) {
        for root in self.roots() {
            self.recalc_all(root, false, true, true);
        }
        self.flush_events();
    }

    /// Recompute a node's effective scale, optionally sweeping descendants.
    pub fn recalculate_scale(&mut self, id: NodeId, with_children: bool) {
        self.recalc_all(id, false, true, with_children);
        self.flush_events();
    }

    /// All nodes without a parent.
    fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    // ------------------------------------------------------------------
    // Geometry reads

    /// The node's current screen rectangle. Re-derived from the cached
    /// anchor point, pivot offset, and offsets if a mutation invalidated it.
    pub fn rect(&self, id: NodeId) -> Rect {
        if let Some(r) = self.nodes[id].rect.get() {
            return r;
        }
        let r = self.compute_rect(id);
        self.nodes[id].rect.set(Some(r));
        r
    }

    /// True if the cached rectangle is valid, i.e. no recomputation will
    /// happen on the next read.
    pub fn has_cached_rect(&self, id: NodeId) -> bool {
        self.nodes[id].rect.get().is_some()
    }

    /// The parent rectangle this node anchors against: the parent's rect,
    /// or the screen rect for roots.
    pub fn parent_rect(&self, id: NodeId) -> Rect {
        match self.nodes[id].parent {
            Some(p) => self.rect(p),
            None => self.screen.rect(),
        }
    }

    /// Size before scale multiplication.
    pub fn non_scaled_size(&self, id: NodeId) -> Expanse {
        self.nodes[id].non_scaled_size
    }

    /// Size after scale multiplication.
    pub fn scaled_size(&self, id: NodeId) -> Expanse {
        self.nodes[id].scaled_size()
    }

    /// Size as a fraction of the non-scaled parent size.
    pub fn relative_size(&self, id: NodeId) -> Vec2 {
        self.nodes[id].relative_size
    }

    /// Minimum size clamp, if set.
    pub fn min_size(&self, id: NodeId) -> Option<Expanse> {
        self.nodes[id].min_size
    }

    /// Maximum size clamp, if set.
    pub fn max_size(&self, id: NodeId) -> Option<Expanse> {
        self.nodes[id].max_size
    }

    /// The node's anchor position.
    pub fn anchor(&self, id: NodeId) -> Anchor {
        self.nodes[id].anchor
    }

    /// The node's pivot position.
    pub fn pivot(&self, id: NodeId) -> Pivot {
        self.nodes[id].pivot
    }

    /// The cached anchor point in screen space.
    pub fn anchor_point(&self, id: NodeId) -> Point {
        self.nodes[id].anchor_point
    }

    /// Offset as a fraction of the parent size, away from the anchor.
    pub fn relative_offset(&self, id: NodeId) -> Vec2 {
        self.nodes[id].relative_offset
    }

    /// Offset in pixels, away from the anchor.
    pub fn absolute_offset(&self, id: NodeId) -> Point {
        self.nodes[id].absolute_offset
    }

    /// Raw top-left-relative screen displacement.
    pub fn screen_space_offset(&self, id: NodeId) -> Point {
        self.nodes[id].screen_space_offset
    }

    /// Scale multiplier applied at this node.
    pub fn local_scale(&self, id: NodeId) -> Vec2 {
        self.nodes[id].local_scale
    }

    /// Effective scale: local, ancestors, and global combined.
    pub fn scale(&self, id: NodeId) -> Vec2 {
        self.nodes[id].scale
    }

    /// True if the node is exempt from parent-driven resizes.
    pub fn is_fixed_size(&self, id: NodeId) -> bool {
        self.nodes[id].fixed_size
    }

    /// The node's dimension policy for relative sizing.
    pub fn scale_basis(&self, id: NodeId) -> ScaleBasis {
        self.nodes[id].scale_basis
    }

    // ------------------------------------------------------------------
    // Geometry writes

    /// Set the size as a fraction of the parent rect and resize the subtree.
    pub fn set_relative_size(&mut self, id: NodeId, size: Vec2) {
        if self.nodes[id].relative_size.nearly_equals(size) {
            return;
        }
        self.nodes[id].relative_size = size;
        self.recalc_all(id, true, false, true);
        self.flush_events();
    }

    /// Set the pixel size directly. The relative size is derived backward
    /// from it, so later parent resizes keep honoring the implied ratio.
    pub fn set_non_scaled_size(&mut self, id: NodeId, size: Expanse) {
        if self.nodes[id].non_scaled_size == size {
            return;
        }
        {
            let node = &mut self.nodes[id];
            node.non_scaled_size = size.clamp(node.min(), node.max());
        }
        self.recalc_relative_size(id);
        self.recalc_anchor_point(id);
        self.recalc_pivot_offset(id);
        self.recalc_children(id, true, false);
        self.flush_events();
    }

    /// Set the minimum size clamp and re-clamp the subtree.
    pub fn set_min_size(&mut self, id: NodeId, min: Option<Expanse>) {
        if self.nodes[id].min_size == min {
            return;
        }
        self.nodes[id].min_size = min;
        self.recalc_all(id, true, false, true);
        self.flush_events();
    }

    /// Set the maximum size clamp and re-clamp the subtree.
    pub fn set_max_size(&mut self, id: NodeId, max: Option<Expanse>) {
        if self.nodes[id].max_size == max {
            return;
        }
        self.nodes[id].max_size = max;
        self.recalc_all(id, true, false, true);
        self.flush_events();
    }

    /// Explicit pixel resize with optional child resizing. The relative
    /// size is derived backward from the new value.
    pub fn resize(&mut self, id: NodeId, size: Expanse, resize_children: bool) {
        {
            let node = &mut self.nodes[id];
            node.non_scaled_size = size.clamp(node.min(), node.max());
        }
        self.recalc_relative_size(id);
        self.recalc_anchor_point(id);
        self.recalc_pivot_offset(id);
        self.recalc_children(id, resize_children, false);
        self.flush_events();
    }

    /// Explicit relative resize with optional child resizing.
    pub fn resize_relative(&mut self, id: NodeId, size: Vec2, resize_children: bool) {
        self.nodes[id].relative_size = size;
        self.recalc_all(id, true, false, false);
        self.recalc_children(id, resize_children, false);
        self.flush_events();
    }

    /// Set the anchor and recalculate positions through the subtree. Use
    /// [`LayoutTree::set_position`] to also reset free-floating offsets.
    pub fn set_anchor(&mut self, id: NodeId, anchor: Anchor) {
        if self.nodes[id].anchor == anchor {
            return;
        }
        self.nodes[id].anchor = anchor;
        self.recalc_anchor_point(id);
        self.recalc_children(id, false, false);
        self.flush_events();
    }

    /// Set the pivot and recalculate positions through the subtree. The
    /// pivot does not automatically follow the anchor; see
    /// [`LayoutTree::match_pivot_to_anchor`].
    pub fn set_pivot(&mut self, id: NodeId, pivot: Pivot) {
        if self.nodes[id].pivot == pivot {
            return;
        }
        self.nodes[id].pivot = pivot;
        self.recalc_pivot_offset(id);
        self.recalc_children(id, false, false);
        self.flush_events();
    }

    /// Reposition the node: set the anchor, match the pivot to it unless
    /// given explicitly, zero the screen-space offset, and recalculate
    /// child positions.
    pub fn set_position(&mut self, id: NodeId, anchor: Anchor, pivot: Option<Pivot>) {
        {
            let node = &mut self.nodes[id];
            node.anchor = anchor;
            node.pivot = pivot.unwrap_or(anchor.matching_pivot());
            node.screen_space_offset = Point::zero();
        }
        self.recalc_anchor_point(id);
        self.recalc_pivot_offset(id);
        self.recalc_children(id, false, false);
        self.flush_events();
    }

    /// Snap the pivot to the same symbolic position as the anchor.
    pub fn match_pivot_to_anchor(&mut self, id: NodeId) {
        let pivot = self.nodes[id].anchor.matching_pivot();
        self.set_pivot(id, pivot);
    }

    /// Set the parent-size-relative offset and recalculate child positions.
    pub fn set_relative_offset(&mut self, id: NodeId, offset: Vec2) {
        if self.nodes[id].relative_offset.nearly_equals(offset) {
            return;
        }
        self.nodes[id].relative_offset = offset;
        self.nodes[id].invalidate_rect();
        self.recalc_children(id, false, false);
        self.flush_events();
    }

    /// Set the pixel offset and recalculate child positions.
    pub fn set_absolute_offset(&mut self, id: NodeId, offset: Point) {
        if self.nodes[id].absolute_offset == offset {
            return;
        }
        self.nodes[id].absolute_offset = offset;
        self.nodes[id].invalidate_rect();
        self.recalc_children(id, false, false);
        self.flush_events();
    }

    /// Set the raw screen-space displacement and recalculate child
    /// positions.
    pub fn set_screen_space_offset(&mut self, id: NodeId, offset: Point) {
        if self.nodes[id].screen_space_offset == offset {
            return;
        }
        self.nodes[id].screen_space_offset = offset;
        self.nodes[id].invalidate_rect();
        self.recalc_children(id, false, false);
        self.flush_events();
    }

    /// Shift the node by a screen-space delta.
    pub fn translate(&mut self, id: NodeId, delta: Point) {
        let offset = self.nodes[id].screen_space_offset + delta;
        self.set_screen_space_offset(id, offset);
    }

    /// Set the local scale multiplier and rescale the subtree.
    pub fn set_local_scale(&mut self, id: NodeId, scale: Vec2) {
        if self.nodes[id].local_scale.nearly_equals(scale) {
            return;
        }
        self.nodes[id].local_scale = scale;
        self.recalc_all(id, false, true, true);
        self.flush_events();
    }

    /// Reset the local scale to one.
    pub fn reset_scale(&mut self, id: NodeId) {
        self.set_local_scale(id, Vec2::ONE);
    }

    /// Exempt or re-include the node in parent-driven resizes.
    pub fn set_fixed_size(&mut self, id: NodeId, fixed: bool) {
        self.nodes[id].fixed_size = fixed;
    }

    /// Change the dimension policy and recompute the size under it.
    pub fn set_scale_basis(&mut self, id: NodeId, basis: ScaleBasis) {
        if self.nodes[id].scale_basis == basis {
            return;
        }
        self.nodes[id].scale_basis = basis;
        self.recalc_absolute_size(id);
        self.recalc_pivot_offset(id);
        self.recalc_children(id, true, false);
        self.flush_events();
    }

    // ------------------------------------------------------------------
    // Hierarchy

    /// The node's parent, if any.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// The node's children, in order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Number of direct children.
    pub fn child_count(&self, id: NodeId) -> usize {
        self.nodes[id].children.len()
    }

    /// The child at an index, if in range.
    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.nodes[id].children.get(index).copied()
    }

    /// The index of a child under a parent, if present.
    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.nodes[parent].children.iter().position(|c| *c == child)
    }

    /// True if the node is the first child of its parent.
    pub fn is_first_child(&self, id: NodeId) -> bool {
        self.nodes[id]
            .parent
            .is_some_and(|p| self.nodes[p].children.first() == Some(&id))
    }

    /// True if the node is the last child of its parent.
    pub fn is_last_child(&self, id: NodeId) -> bool {
        self.nodes[id]
            .parent
            .is_some_and(|p| self.nodes[p].children.last() == Some(&id))
    }

    /// Iterate the node's ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.nodes[id].parent,
        }
    }

    /// Iterate the node's descendants in depth-first pre-order, following
    /// child list order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.nodes[id].children.clone();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// True if `ancestor` appears in the parent chain of `node`.
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// Move the node under a new parent, or detach it (`None`). Fires
    /// parent-changed on the node, and children-changed on the new parent.
    pub fn set_parent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> Result<()> {
        if !self.nodes.contains_key(id) {
            return Err(Error::NodeNotFound(id));
        }
        if self.nodes[id].parent == new_parent {
            return Ok(());
        }
        if let Some(p) = new_parent {
            if !self.nodes.contains_key(p) {
                return Err(Error::NodeNotFound(p));
            }
            if p == id || self.is_ancestor_of(id, p) {
                error!(?id, parent = ?p, "reparenting would create a cycle");
                return Err(Error::WouldCreateCycle { parent: p, child: id });
            }
        }
        if self.nodes[id].parent.is_some() {
            self.remove_from_parent(id)?;
        }
        self.nodes[id].parent = new_parent;
        if let Some(p) = new_parent {
            self.nodes[p].children.push(id);
            self.recalc_all(id, false, true, true);
            self.emit(LayoutEvent::ChildrenChanged {
                parent: p,
                child: id,
            });
        }
        self.emit(LayoutEvent::ParentChanged {
            node: id,
            parent: new_parent,
        });
        self.flush_events();
        Ok(())
    }

    /// Move the node to the front of its parent's child list.
    pub fn set_as_first_child(&mut self, id: NodeId) -> Result<()> {
        if self.is_first_child(id) {
            return Ok(());
        }
        self.reposition_child(id, 0)
    }

    /// Move the node to the back of its parent's child list.
    pub fn set_as_last_child(&mut self, id: NodeId) -> Result<()> {
        if self.is_last_child(id) {
            return Ok(());
        }
        let parent = self.remove_from_parent(id)?;
        self.nodes[parent].children.push(id);
        self.recalc_all(id, false, true, true);
        self.emit(LayoutEvent::ChildrenChanged { parent, child: id });
        self.flush_events();
        Ok(())
    }

    /// Move the node to a specific index in its parent's child list. The
    /// index is validated before any mutation, so an out-of-range request
    /// leaves the tree untouched.
    pub fn reposition_child(&mut self, id: NodeId, index: usize) -> Result<()> {
        let Some(parent) = self.nodes[id].parent else {
            error!(?id, "repositioning a detached node");
            return Err(Error::Detached(id));
        };
        if index >= self.nodes[parent].children.len() {
            error!(?id, index, "reposition index out of range");
            return Err(Error::IndexOutOfRange { parent, index });
        }
        self.remove_from_parent(id)?;
        self.nodes[parent].children.insert(index, id);
        self.recalc_all(id, false, true, true);
        self.emit(LayoutEvent::ChildrenChanged { parent, child: id });
        self.flush_events();
        Ok(())
    }

    /// Sort a node's children with a comparator that may read the tree.
    /// Geometry is unchanged; positions are recalculated for order-sensitive
    /// consumers and children-changed fires for each child in final order.
    pub fn sort_children_by<F>(&mut self, parent: NodeId, mut cmp: F)
    where
        F: FnMut(&Self, NodeId, NodeId) -> Ordering,
    {
        let mut children = mem::take(&mut self.nodes[parent].children);
        {
            let tree: &Self = self;
            children.sort_by(|a, b| cmp(tree, *a, *b));
        }
        self.nodes[parent].children = children;
        self.after_reorder(parent);
    }

    /// Reverse a node's child list.
    pub fn reverse_children(&mut self, parent: NodeId) {
        self.nodes[parent].children.reverse();
        self.after_reorder(parent);
    }

    /// Recalculate and notify after a whole-list reorder.
    fn after_reorder(&mut self, parent: NodeId) {
        self.recalc_all(parent, false, false, true);
        for child in self.nodes[parent].children.clone() {
            self.emit(LayoutEvent::ChildrenChanged { parent, child });
        }
        self.flush_events();
    }

    /// Detach every child of a node. The list is snapshotted first, so the
    /// iteration is safe against the mutation it performs.
    pub fn clear_children(&mut self, parent: NodeId) -> Result<()> {
        let children = self.nodes[parent].children.clone();
        for child in children {
            self.set_parent(child, None)?;
        }
        Ok(())
    }

    /// Remove the node from its current parent's child list, returning the
    /// parent. Inconsistencies are programming errors: they are logged and
    /// the operation is abandoned.
    fn remove_from_parent(&mut self, id: NodeId) -> Result<NodeId> {
        let Some(parent) = self.nodes[id].parent else {
            error!(?id, "node has no parent to remove it from");
            return Err(Error::Detached(id));
        };
        let Some(pos) = self.nodes[parent].children.iter().position(|c| *c == id) else {
            error!(?id, ?parent, "node missing from its parent's child list");
            return Err(Error::NotAChild { parent, child: id });
        };
        self.nodes[parent].children.remove(pos);
        Ok(parent)
    }

    // ------------------------------------------------------------------
    // Events

    /// Register a handler for events targeting a node. The subscription
    /// lives until [`LayoutTree::unsubscribe`] or until the node is removed.
    pub fn subscribe<F>(&mut self, node: NodeId, handler: F) -> SubscriptionId
    where
        F: FnMut(&LayoutEvent) + 'static,
    {
        self.subs.insert(Subscription {
            node,
            handler: Rc::new(RefCell::new(handler)),
        })
    }

    /// Drop a subscription. Unknown handles are ignored.
    pub fn unsubscribe(&mut self, sub: SubscriptionId) {
        self.subs.remove(sub);
    }

    /// Queue an event for delivery once the current mutation completes.
    fn emit(&mut self, event: LayoutEvent) {
        if !self.subs.is_empty() {
            self.pending.push(event);
        }
    }

    /// Deliver queued events in emission order. Handlers have no access to
    /// the tree, so delivery cannot re-enter a mutation.
    fn flush_events(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let events = mem::take(&mut self.pending);
        for event in events {
            let target = event.target();
            let handlers: Vec<Handler> = self
                .subs
                .values()
                .filter(|s| s.node == target)
                .map(|s| Rc::clone(&s.handler))
                .collect();
            for handler in handlers {
                (handler.borrow_mut())(&event);
            }
        }
    }

    // ------------------------------------------------------------------
    // Recalculation

    /// Recompute the pieces of a node affected by a `(resize, rescale)`
    /// change, then propagate the same flags through descendants depth-first.
    /// One top-level mutation results in exactly one pass over the subtree.
    fn recalc_all(&mut self, id: NodeId, resize: bool, rescale: bool, with_children: bool) {
        if rescale {
            self.recalc_scale(id);
        }
        if resize && !self.nodes[id].fixed_size {
            self.recalc_absolute_size(id);
        }
        self.recalc_anchor_point(id);
        self.recalc_pivot_offset(id);
        if with_children {
            self.recalc_children(id, resize, rescale);
        }
    }

    /// Propagate a recalculation pass into a node's children.
    fn recalc_children(&mut self, id: NodeId, resize: bool, rescale: bool) {
        for child in self.nodes[id].children.clone() {
            self.recalc_all(child, resize, rescale, true);
        }
    }

    /// Recompute the effective scale from the parent's (already current)
    /// effective scale, or from the global scale for roots.
    fn recalc_scale(&mut self, id: NodeId) {
        let base = match self.nodes[id].parent {
            Some(p) => self.nodes[p].scale,
            None => self.global_scale,
        };
        let node = &mut self.nodes[id];
        node.scale = base * node.local_scale;
        node.invalidate_rect();
        self.emit(LayoutEvent::ScaleChanged { node: id });
    }

    /// Recompute the pixel size from the relative size and the non-scaled
    /// parent size, honoring the scale basis and the min/max clamps.
    fn recalc_absolute_size(&mut self, id: NodeId) {
        let mut base = self.non_scaled_parent_size(id);
        let node = &mut self.nodes[id];
        match node.scale_basis {
            ScaleBasis::Normal => {}
            ScaleBasis::BothWidth => base.h = base.w,
            ScaleBasis::BothHeight => base.w = base.h,
            ScaleBasis::Smallest => {
                let side = base.w.min(base.h);
                base = Expanse::new(side, side);
            }
            ScaleBasis::Largest => {
                let side = base.w.max(base.h);
                base = Expanse::new(side, side);
            }
        }
        let size = base.scale(node.relative_size);
        node.non_scaled_size = size.clamp(node.min(), node.max());
        node.invalidate_rect();
        self.emit(LayoutEvent::SizeChanged { node: id });
    }

    /// Derive the relative size backward from the pixel size. Measured
    /// against the non-scaled parent size, so scale never feeds back into
    /// the relative-size definition.
    fn recalc_relative_size(&mut self, id: NodeId) {
        let parent_size = self.non_scaled_parent_size(id);
        let node = &mut self.nodes[id];
        node.relative_size = Vec2::new(
            node.non_scaled_size.w as f32 / parent_size.w as f32,
            node.non_scaled_size.h as f32 / parent_size.h as f32,
        );
        node.invalidate_rect();
        self.emit(LayoutEvent::SizeChanged { node: id });
    }

    /// Recompute the screen-space anchor point from the parent rectangle.
    fn recalc_anchor_point(&mut self, id: NodeId) {
        let parent_rect = self.parent_rect(id);
        let node = &mut self.nodes[id];
        node.anchor_point = anchor_point(node.anchor, parent_rect);
        node.invalidate_rect();
    }

    /// Recompute the pivot offset from the current scaled size.
    fn recalc_pivot_offset(&mut self, id: NodeId) {
        let node = &mut self.nodes[id];
        node.pivot_offset = pivot_offset(node.pivot, node.scaled_size());
        node.invalidate_rect();
    }

    /// The non-scaled size of the parent, or the screen size for roots.
    fn non_scaled_parent_size(&self, id: NodeId) -> Expanse {
        match self.nodes[id].parent {
            Some(p) => self.nodes[p].non_scaled_size,
            None => self.screen,
        }
    }

    /// Derive the screen rectangle from the cached anchor point and pivot
    /// offset plus the three resolved offset channels.
    fn compute_rect(&self, id: NodeId) -> Rect {
        let parent_rect = self.parent_rect(id);
        let node = &self.nodes[id];
        let absolute = offset_from_anchor(node.absolute_offset, node.anchor);
        let relative = offset_from_anchor(
            Point::new(
                (parent_rect.w as f32 * node.relative_offset.x) as i32,
                (parent_rect.h as f32 * node.relative_offset.y) as i32,
            ),
            node.anchor,
        );
        let tl = node.anchor_point
            + node.pivot_offset
            + absolute
            + relative
            + node.screen_space_offset;
        Rect::at(tl, node.scaled_size())
    }
}

/// Iterator over a node's ancestors, nearest first.
pub struct Ancestors<'a> {
    /// Tree being walked.
    tree: &'a LayoutTree,
    /// Next ancestor to yield.
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.nodes[current].parent;
        Some(current)
    }
}

/// Iterator over a node's descendants in depth-first pre-order.
pub struct Descendants<'a> {
    /// Tree being walked.
    tree: &'a LayoutTree,
    /// Pending nodes, top of stack is next.
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        for child in self.tree.nodes[current].children.iter().rev() {
            self.stack.push(*child);
        }
        Some(current)
    }
}
