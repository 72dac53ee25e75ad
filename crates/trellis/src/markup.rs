//! Declarative node construction from attribute maps.
//!
//! UI definitions stored as data describe each node with a flat set of
//! lowercase attributes. [`NodeAttrs`] is the deserialized form and
//! [`load`] turns one into a live node.

use serde::Deserialize;

use geom::{Expanse, Point, Vec2};

use crate::{
    anchor::{Anchor, Pivot, ScaleBasis},
    error::Result,
    id::NodeId,
    node::NodeParams,
    tree::LayoutTree,
};

/// Attributes describing one node. Every field is optional; absent fields
/// take the same defaults as programmatic construction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeAttrs {
    /// Size as a fraction of the parent, per axis.
    pub relativesize: Option<(f32, f32)>,
    /// Pixel size. When both sizes are given, the absolute one wins and the
    /// relative one is derived from it.
    pub absolutesize: Option<(i32, i32)>,
    /// Anchor position on the parent rectangle.
    pub anchor: Option<Anchor>,
    /// Pivot position; defaults to matching the anchor.
    pub pivot: Option<Pivot>,
    /// Minimum pixel size clamp.
    pub minsize: Option<(i32, i32)>,
    /// Maximum pixel size clamp.
    pub maxsize: Option<(i32, i32)>,
    /// Offset as a fraction of the parent size, away from the anchor.
    pub relativeoffset: Option<(f32, f32)>,
    /// Offset in pixels, away from the anchor.
    pub absoluteoffset: Option<(i32, i32)>,
    /// Dimension policy for relative sizing.
    pub scalebasis: Option<ScaleBasis>,
}

impl NodeAttrs {
    /// Parse attributes from a JSON object.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Create a node under `parent` from declarative attributes. The anchor
/// falls back to `default_anchor` when the attributes leave it unset, so a
/// container can impose a house default on its children.
pub fn load(
    tree: &mut LayoutTree,
    parent: Option<NodeId>,
    default_anchor: Anchor,
    attrs: &NodeAttrs,
) -> Result<NodeId> {
    let mut params = match attrs.absolutesize {
        Some((w, h)) => NodeParams::absolute(Expanse::new(w, h)),
        None => {
            let (x, y) = attrs.relativesize.unwrap_or((1.0, 1.0));
            NodeParams::relative(Vec2::new(x, y))
        }
    };
    params = params.anchor(attrs.anchor.unwrap_or(default_anchor));
    if let Some(pivot) = attrs.pivot {
        params = params.pivot(pivot);
    }
    if let Some((w, h)) = attrs.minsize {
        params = params.min_size(Expanse::new(w, h));
    }
    if let Some((w, h)) = attrs.maxsize {
        params = params.max_size(Expanse::new(w, h));
    }
    if let Some(basis) = attrs.scalebasis {
        params = params.scale_basis(basis);
    }
    let id = tree.add_node(parent, params)?;
    if let Some((x, y)) = attrs.relativeoffset {
        tree.set_relative_offset(id, Vec2::new(x, y));
    }
    if let Some((x, y)) = attrs.absoluteoffset {
        tree.set_absolute_offset(id, Point::new(x, y));
    }
    Ok(id)
}
