//! Geometry tests: anchoring, sizing, clamps, scale composition, and the
//! lazy rectangle cache.

use proptest::prelude::*;

use trellis::{
    Anchor, Expanse, LayoutTree, NodeParams, Pivot, Point, Rect, Vec2,
};

#[test]
fn root_fills_the_screen_by_default() {
    let mut tree = LayoutTree::new(Expanse::new(800, 600));
    let root = tree.add_node(None, NodeParams::relative(Vec2::ONE)).unwrap();
    assert_eq!(tree.rect(root), Rect::new(0, 0, 800, 600));
}

#[test]
fn bottom_right_anchor_and_pivot() {
    let mut tree = LayoutTree::new(Expanse::new(200, 100));
    let root = tree.add_node(None, NodeParams::relative(Vec2::ONE)).unwrap();
    let child = tree
        .add_node(
            Some(root),
            NodeParams::absolute(Expanse::new(20, 10)).anchor(Anchor::BottomRight),
        )
        .unwrap();
    // Pivot defaults to the anchor, so the child's bottom-right corner sits
    // on the parent's bottom-right corner.
    assert_eq!(tree.rect(child), Rect::new(180, 90, 20, 10));
}

#[test]
fn center_anchor_with_top_left_pivot() {
    let mut tree = LayoutTree::new(Expanse::new(200, 100));
    let root = tree.add_node(None, NodeParams::relative(Vec2::ONE)).unwrap();
    let child = tree
        .add_node(
            Some(root),
            NodeParams::absolute(Expanse::new(20, 10))
                .anchor(Anchor::Center)
                .pivot(Pivot::TopLeft),
        )
        .unwrap();
    assert_eq!(tree.rect(child).tl, Point::new(100, 50));
}

#[test]
fn relative_size_follows_parent_resizes() {
    let mut tree = LayoutTree::new(Expanse::new(800, 600));
    let root = tree
        .add_node(None, NodeParams::absolute(Expanse::new(200, 100)))
        .unwrap();
    let child = tree
        .add_node(Some(root), NodeParams::relative(Vec2::splat(0.5)))
        .unwrap();
    assert_eq!(tree.non_scaled_size(child), Expanse::new(100, 50));

    tree.set_non_scaled_size(root, Expanse::new(400, 100));
    assert_eq!(tree.non_scaled_size(child), Expanse::new(200, 50));
}

#[test]
fn absolute_size_derives_the_relative_ratio() {
    let mut tree = LayoutTree::new(Expanse::new(800, 600));
    let root = tree
        .add_node(None, NodeParams::absolute(Expanse::new(200, 100)))
        .unwrap();
    let child = tree
        .add_node(Some(root), NodeParams::absolute(Expanse::new(100, 50)))
        .unwrap();
    assert!(tree.relative_size(child).nearly_equals(Vec2::splat(0.5)));

    // The derived ratio keeps working under later parent resizes.
    tree.set_non_scaled_size(root, Expanse::new(400, 200));
    assert_eq!(tree.non_scaled_size(child), Expanse::new(200, 100));
}

#[test]
fn max_size_clamps_the_computed_size() {
    let mut tree = LayoutTree::new(Expanse::new(200, 100));
    let root = tree.add_node(None, NodeParams::relative(Vec2::ONE)).unwrap();
    let child = tree
        .add_node(
            Some(root),
            NodeParams::relative(Vec2::splat(0.5)).max_size(Expanse::new(50, 50)),
        )
        .unwrap();
    assert_eq!(tree.non_scaled_size(child), Expanse::new(50, 50));
}

#[test]
fn min_size_clamps_the_computed_size() {
    let mut tree = LayoutTree::new(Expanse::new(200, 100));
    let root = tree.add_node(None, NodeParams::relative(Vec2::ONE)).unwrap();
    let child = tree
        .add_node(
            Some(root),
            NodeParams::relative(Vec2::splat(0.1)).min_size(Expanse::new(50, 50)),
        )
        .unwrap();
    assert_eq!(tree.non_scaled_size(child), Expanse::new(50, 50));
}

#[test]
fn fixed_size_nodes_ignore_parent_resizes() {
    let mut tree = LayoutTree::new(Expanse::new(800, 600));
    let root = tree
        .add_node(None, NodeParams::absolute(Expanse::new(200, 100)))
        .unwrap();
    let child = tree
        .add_node(
            Some(root),
            NodeParams::absolute(Expanse::new(40, 40))
                .anchor(Anchor::BottomRight)
                .fixed_size(true),
        )
        .unwrap();
    assert_eq!(tree.rect(child).tl, Point::new(160, 60));

    tree.set_non_scaled_size(root, Expanse::new(400, 200));
    // Size is untouched, but the position tracks the moved anchor point.
    assert_eq!(tree.non_scaled_size(child), Expanse::new(40, 40));
    assert_eq!(tree.rect(child).tl, Point::new(360, 160));
}

#[test]
fn scale_composes_down_the_tree() {
    let mut tree = LayoutTree::new(Expanse::new(800, 600));
    let root = tree
        .add_node(None, NodeParams::absolute(Expanse::new(100, 100)))
        .unwrap();
    let child = tree
        .add_node(Some(root), NodeParams::absolute(Expanse::new(10, 10)))
        .unwrap();
    tree.set_local_scale(child, Vec2::splat(3.0));
    tree.set_local_scale(root, Vec2::splat(2.0));

    assert!(tree.scale(root).nearly_equals(Vec2::splat(2.0)));
    assert!(tree.scale(child).nearly_equals(Vec2::splat(6.0)));
    assert_eq!(tree.scaled_size(child), Expanse::new(60, 60));
}

#[test]
fn global_scale_requires_an_explicit_rescale() {
    let mut tree = LayoutTree::new(Expanse::new(800, 600));
    let root = tree
        .add_node(None, NodeParams::absolute(Expanse::new(100, 100)))
        .unwrap();
    let child = tree
        .add_node(Some(root), NodeParams::absolute(Expanse::new(10, 10)))
        .unwrap();
    tree.set_local_scale(child, Vec2::splat(3.0));
    tree.set_local_scale(root, Vec2::splat(2.0));

    tree.set_global_scale(Vec2::splat(2.0));
    // Nothing propagates until the caller asks for it.
    assert!(tree.scale(child).nearly_equals(Vec2::splat(6.0)));

    tree.rescale_all();
    assert!(tree.scale(root).nearly_equals(Vec2::splat(4.0)));
    assert!(tree.scale(child).nearly_equals(Vec2::splat(12.0)));
}

#[test]
fn nested_layout_end_to_end() {
    let mut tree = LayoutTree::new(Expanse::new(800, 600));
    let root = tree.add_node(None, NodeParams::relative(Vec2::ONE)).unwrap();
    let panel = tree
        .add_node(
            Some(root),
            NodeParams::relative(Vec2::splat(0.5)).anchor(Anchor::Center),
        )
        .unwrap();
    let label = tree
        .add_node(Some(panel), NodeParams::absolute(Expanse::new(100, 20)))
        .unwrap();
    tree.set_absolute_offset(label, Point::new(5, 5));

    assert_eq!(tree.rect(panel), Rect::new(200, 150, 400, 300));
    assert_eq!(tree.rect(label), Rect::new(205, 155, 100, 20));
}

#[test]
fn relative_offset_is_measured_against_the_parent() {
    let mut tree = LayoutTree::new(Expanse::new(200, 100));
    let root = tree.add_node(None, NodeParams::relative(Vec2::ONE)).unwrap();
    let child = tree
        .add_node(Some(root), NodeParams::absolute(Expanse::new(20, 10)))
        .unwrap();
    tree.set_relative_offset(child, Vec2::new(0.1, 0.2));
    assert_eq!(tree.rect(child).tl, Point::new(20, 20));
}

#[test]
fn offsets_point_away_from_the_anchor() {
    let mut tree = LayoutTree::new(Expanse::new(200, 100));
    let root = tree.add_node(None, NodeParams::relative(Vec2::ONE)).unwrap();
    let child = tree
        .add_node(
            Some(root),
            NodeParams::absolute(Expanse::new(20, 10)).anchor(Anchor::BottomRight),
        )
        .unwrap();
    tree.set_absolute_offset(child, Point::new(5, 5));
    // A positive offset moves the node inward, toward the top-left.
    assert_eq!(tree.rect(child).tl, Point::new(175, 85));
}

#[test]
fn screen_space_offset_and_translate() {
    let mut tree = LayoutTree::new(Expanse::new(200, 100));
    let root = tree.add_node(None, NodeParams::relative(Vec2::ONE)).unwrap();
    let child = tree
        .add_node(Some(root), NodeParams::absolute(Expanse::new(20, 10)))
        .unwrap();
    tree.translate(child, Point::new(7, 3));
    tree.translate(child, Point::new(1, 1));
    assert_eq!(tree.screen_space_offset(child), Point::new(8, 4));
    assert_eq!(tree.rect(child).tl, Point::new(8, 4));
}

#[test]
fn set_position_resets_the_screen_space_offset() {
    let mut tree = LayoutTree::new(Expanse::new(200, 100));
    let root = tree.add_node(None, NodeParams::relative(Vec2::ONE)).unwrap();
    let child = tree
        .add_node(Some(root), NodeParams::absolute(Expanse::new(20, 10)))
        .unwrap();
    tree.translate(child, Point::new(30, 30));
    tree.set_position(child, Anchor::BottomRight, None);
    assert_eq!(tree.screen_space_offset(child), Point::zero());
    assert_eq!(tree.rect(child), Rect::new(180, 90, 20, 10));
}

#[test]
fn rect_reads_are_cached_until_invalidated() {
    let mut tree = LayoutTree::new(Expanse::new(200, 100));
    let root = tree.add_node(None, NodeParams::relative(Vec2::ONE)).unwrap();
    let child = tree
        .add_node(Some(root), NodeParams::absolute(Expanse::new(20, 10)))
        .unwrap();
    assert!(!tree.has_cached_rect(child));

    let first = tree.rect(child);
    assert!(tree.has_cached_rect(child));
    // Reading the child also resolved the parent chain.
    assert!(tree.has_cached_rect(root));
    assert_eq!(tree.rect(child), first);

    tree.set_absolute_offset(child, Point::new(1, 1));
    assert!(!tree.has_cached_rect(child));
    assert_eq!(tree.rect(child).tl, Point::new(1, 1));
}

#[test]
fn screen_resize_reflows_the_whole_forest() {
    let mut tree = LayoutTree::new(Expanse::new(800, 600));
    let root = tree.add_node(None, NodeParams::relative(Vec2::ONE)).unwrap();
    let child = tree
        .add_node(Some(root), NodeParams::relative(Vec2::splat(0.25)))
        .unwrap();
    tree.set_screen_size(Expanse::new(400, 200));
    assert_eq!(tree.rect(root), Rect::new(0, 0, 400, 200));
    assert_eq!(tree.non_scaled_size(child), Expanse::new(100, 50));
}

#[test]
fn scale_basis_remaps_the_reference_dimension() {
    let mut tree = LayoutTree::new(Expanse::new(400, 100));
    let root = tree.add_node(None, NodeParams::relative(Vec2::ONE)).unwrap();
    let square = tree
        .add_node(
            Some(root),
            NodeParams::relative(Vec2::splat(0.5))
                .scale_basis(trellis::ScaleBasis::Smallest),
        )
        .unwrap();
    assert_eq!(tree.non_scaled_size(square), Expanse::new(50, 50));

    tree.set_scale_basis(square, trellis::ScaleBasis::Largest);
    assert_eq!(tree.non_scaled_size(square), Expanse::new(200, 200));
}

#[test]
fn zero_sized_parents_are_a_valid_terminal_state() {
    let mut tree = LayoutTree::new(Expanse::new(200, 100));
    let root = tree
        .add_node(None, NodeParams::absolute(Expanse::zero()))
        .unwrap();
    let child = tree
        .add_node(Some(root), NodeParams::relative(Vec2::splat(0.5)))
        .unwrap();
    assert!(tree.rect(child).is_empty());
}

proptest! {
    #[test]
    fn rect_reads_are_idempotent(
        rx in 0.0f32..1.5,
        ry in 0.0f32..1.5,
        ox in -50i32..50,
        oy in -50i32..50,
        anchor in prop::sample::select(vec![
            Anchor::TopLeft,
            Anchor::TopCenter,
            Anchor::TopRight,
            Anchor::CenterLeft,
            Anchor::Center,
            Anchor::CenterRight,
            Anchor::BottomLeft,
            Anchor::BottomCenter,
            Anchor::BottomRight,
        ]),
    ) {
        let mut tree = LayoutTree::new(Expanse::new(640, 480));
        let root = tree.add_node(None, NodeParams::relative(Vec2::ONE)).unwrap();
        let child = tree
            .add_node(
                Some(root),
                NodeParams::relative(Vec2::new(rx, ry)).anchor(anchor),
            )
            .unwrap();
        tree.set_absolute_offset(child, Point::new(ox, oy));

        let first = tree.rect(child);
        prop_assert_eq!(tree.rect(child), first);

        // A recalculation pass with unchanged inputs lands on the same rect.
        tree.recalculate_scale(root, true);
        prop_assert_eq!(tree.rect(child), first);
    }

    #[test]
    fn matched_pivot_sits_on_the_anchor_point(
        rx in 0.05f32..1.0,
        ry in 0.05f32..1.0,
        anchor in prop::sample::select(vec![
            Anchor::TopLeft,
            Anchor::TopCenter,
            Anchor::TopRight,
            Anchor::CenterLeft,
            Anchor::Center,
            Anchor::CenterRight,
            Anchor::BottomLeft,
            Anchor::BottomCenter,
            Anchor::BottomRight,
        ]),
    ) {
        let mut tree = LayoutTree::new(Expanse::new(640, 480));
        let root = tree.add_node(None, NodeParams::relative(Vec2::ONE)).unwrap();
        let child = tree
            .add_node(
                Some(root),
                NodeParams::relative(Vec2::new(rx, ry)).anchor(anchor),
            )
            .unwrap();
        // With the pivot matching the anchor and no offsets, the named
        // point of the child rect lands exactly on the parent's anchor
        // point, whatever the sizes are.
        prop_assert_eq!(
            trellis::anchor_point(anchor, tree.rect(child)),
            trellis::anchor_point(anchor, tree.rect(root))
        );
    }
}
