//! The nine-position anchor/pivot model and the pure geometry functions
//! every recalculation is built on.

use geom::{Expanse, Point, Rect};
use serde::Deserialize;

/// A symbolic position on the parent rectangle: the point of the parent
/// that a child is attached to.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Top-left corner of the parent.
    #[default]
    TopLeft,
    /// Middle of the parent's top edge.
    TopCenter,
    /// Top-right corner of the parent.
    TopRight,
    /// Middle of the parent's left edge.
    CenterLeft,
    /// Center of the parent.
    Center,
    /// Middle of the parent's right edge.
    CenterRight,
    /// Bottom-left corner of the parent.
    BottomLeft,
    /// Middle of the parent's bottom edge.
    BottomCenter,
    /// Bottom-right corner of the parent.
    BottomRight,
}

impl Anchor {
    /// The pivot at the same symbolic position as this anchor. A node whose
    /// pivot matches its anchor sits exactly on the anchor point.
    pub fn matching_pivot(self) -> Pivot {
        match self {
            Self::TopLeft => Pivot::TopLeft,
            Self::TopCenter => Pivot::TopCenter,
            Self::TopRight => Pivot::TopRight,
            Self::CenterLeft => Pivot::CenterLeft,
            Self::Center => Pivot::Center,
            Self::CenterRight => Pivot::CenterRight,
            Self::BottomLeft => Pivot::BottomLeft,
            Self::BottomCenter => Pivot::BottomCenter,
            Self::BottomRight => Pivot::BottomRight,
        }
    }
}

/// A symbolic position on a node's own rectangle: the point of the node
/// that is placed at the anchor point.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pivot {
    /// Top-left corner of the node.
    #[default]
    TopLeft,
    /// Middle of the node's top edge.
    TopCenter,
    /// Top-right corner of the node.
    TopRight,
    /// Middle of the node's left edge.
    CenterLeft,
    /// Center of the node.
    Center,
    /// Middle of the node's right edge.
    CenterRight,
    /// Bottom-left corner of the node.
    BottomLeft,
    /// Middle of the node's bottom edge.
    BottomCenter,
    /// Bottom-right corner of the node.
    BottomRight,
}

/// Policy for which parent dimension relative sizing is measured against.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleBasis {
    /// Width from parent width, height from parent height.
    #[default]
    Normal,
    /// Both dimensions from the parent width.
    BothWidth,
    /// Both dimensions from the parent height.
    BothHeight,
    /// Both dimensions from the smaller parent dimension.
    Smallest,
    /// Both dimensions from the larger parent dimension.
    Largest,
}

/// Map an anchor to the literal point on the parent rectangle it names.
pub fn anchor_point(anchor: Anchor, parent: Rect) -> Point {
    match anchor {
        Anchor::TopLeft => parent.tl,
        Anchor::TopCenter => Point::new(parent.center().x, parent.top()),
        Anchor::TopRight => Point::new(parent.right(), parent.top()),
        Anchor::CenterLeft => Point::new(parent.left(), parent.center().y),
        Anchor::Center => parent.center(),
        Anchor::CenterRight => Point::new(parent.right(), parent.center().y),
        Anchor::BottomLeft => Point::new(parent.left(), parent.bottom()),
        Anchor::BottomCenter => Point::new(parent.center().x, parent.bottom()),
        Anchor::BottomRight => Point::new(parent.right(), parent.bottom()),
    }
}

/// The vector added to the anchor point so that the named pivot of a
/// rectangle of the given size lands exactly on the anchor point. Halving
/// truncates, so repeated layout passes are stable.
pub fn pivot_offset(pivot: Pivot, size: Expanse) -> Point {
    let Expanse { w, h } = size;
    match pivot {
        Pivot::TopLeft => Point::zero(),
        Pivot::TopCenter => Point::new(-(w / 2), 0),
        Pivot::TopRight => Point::new(-w, 0),
        Pivot::CenterLeft => Point::new(0, -(h / 2)),
        Pivot::Center => Point::new(-(w / 2), -(h / 2)),
        Pivot::CenterRight => Point::new(-w, -(h / 2)),
        Pivot::BottomLeft => Point::new(0, -h),
        Pivot::BottomCenter => Point::new(-(w / 2), -h),
        Pivot::BottomRight => Point::new(-w, -h),
    }
}

/// Convert an offset so that its direction is always away from the anchor
/// point, whichever edge of the parent the anchor sits on. Callers never
/// hand-encode anchor-dependent signs.
pub fn offset_from_anchor(offset: Point, anchor: Anchor) -> Point {
    match anchor {
        Anchor::BottomRight => -offset,
        Anchor::BottomLeft | Anchor::BottomCenter => Point::new(offset.x, -offset.y),
        Anchor::TopRight | Anchor::CenterRight => Point::new(-offset.x, offset.y),
        _ => offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_points() {
        let parent = Rect::new(0, 0, 200, 100);
        assert_eq!(anchor_point(Anchor::TopLeft, parent), Point::new(0, 0));
        assert_eq!(anchor_point(Anchor::TopCenter, parent), Point::new(100, 0));
        assert_eq!(anchor_point(Anchor::TopRight, parent), Point::new(200, 0));
        assert_eq!(anchor_point(Anchor::CenterLeft, parent), Point::new(0, 50));
        assert_eq!(anchor_point(Anchor::Center, parent), Point::new(100, 50));
        assert_eq!(
            anchor_point(Anchor::CenterRight, parent),
            Point::new(200, 50)
        );
        assert_eq!(
            anchor_point(Anchor::BottomLeft, parent),
            Point::new(0, 100)
        );
        assert_eq!(
            anchor_point(Anchor::BottomCenter, parent),
            Point::new(100, 100)
        );
        assert_eq!(
            anchor_point(Anchor::BottomRight, parent),
            Point::new(200, 100)
        );
    }

    #[test]
    fn anchor_points_track_parent_location() {
        let parent = Rect::new(10, 20, 200, 100);
        assert_eq!(anchor_point(Anchor::TopLeft, parent), Point::new(10, 20));
        assert_eq!(anchor_point(Anchor::Center, parent), Point::new(110, 70));
        assert_eq!(
            anchor_point(Anchor::BottomRight, parent),
            Point::new(210, 120)
        );
    }

    #[test]
    fn pivot_offsets() {
        let size = Expanse::new(20, 10);
        assert_eq!(pivot_offset(Pivot::TopLeft, size), Point::zero());
        assert_eq!(pivot_offset(Pivot::TopCenter, size), Point::new(-10, 0));
        assert_eq!(pivot_offset(Pivot::TopRight, size), Point::new(-20, 0));
        assert_eq!(pivot_offset(Pivot::CenterLeft, size), Point::new(0, -5));
        assert_eq!(pivot_offset(Pivot::Center, size), Point::new(-10, -5));
        assert_eq!(pivot_offset(Pivot::CenterRight, size), Point::new(-20, -5));
        assert_eq!(pivot_offset(Pivot::BottomLeft, size), Point::new(0, -10));
        assert_eq!(
            pivot_offset(Pivot::BottomCenter, size),
            Point::new(-10, -10)
        );
        assert_eq!(
            pivot_offset(Pivot::BottomRight, size),
            Point::new(-20, -10)
        );
    }

    #[test]
    fn pivot_offset_truncates_odd_sizes() {
        // 5/2 truncates to 2; both passes of a repeated layout agree.
        assert_eq!(
            pivot_offset(Pivot::Center, Expanse::new(5, 5)),
            Point::new(-2, -2)
        );
    }

    #[test]
    fn offset_sign_flips() {
        let offset = Point::new(3, 7);
        assert_eq!(
            offset_from_anchor(offset, Anchor::TopLeft),
            Point::new(3, 7)
        );
        assert_eq!(
            offset_from_anchor(offset, Anchor::BottomRight),
            Point::new(-3, -7)
        );
        assert_eq!(
            offset_from_anchor(offset, Anchor::BottomLeft),
            Point::new(3, -7)
        );
        assert_eq!(
            offset_from_anchor(offset, Anchor::BottomCenter),
            Point::new(3, -7)
        );
        assert_eq!(
            offset_from_anchor(offset, Anchor::TopRight),
            Point::new(-3, 7)
        );
        assert_eq!(
            offset_from_anchor(offset, Anchor::CenterRight),
            Point::new(-3, 7)
        );
        assert_eq!(
            offset_from_anchor(offset, Anchor::Center),
            Point::new(3, 7)
        );
    }

    #[test]
    fn matching_pivot_is_one_to_one() {
        assert_eq!(Anchor::Center.matching_pivot(), Pivot::Center);
        assert_eq!(Anchor::BottomRight.matching_pivot(), Pivot::BottomRight);
        assert_eq!(Anchor::TopLeft.matching_pivot(), Pivot::TopLeft);
    }
}
