//! Level 1: End-to-End Scenarios
//!
//! Two cards side by side, connected right-to-left, with and without a start
//! arrow, plus relations that name elements which never registered.

mod common;

use common::harness::{point, side_by_side, ArrowTestHarness};
use slint_connector_arrows::{MarkerRef, Rect};

#[test]
fn test_right_to_left_without_start_arrow() {
    let harness = side_by_side();
    harness.relate("a", "right", "b", "left", false);

    let arrow = harness.arrow(0);
    assert_eq!(arrow.anchor_start, point(100.0, 25.0));
    assert_eq!(arrow.anchor_end, point(200.0, 25.0));
    assert_eq!(arrow.start, point(100.0, 25.0));
    assert_eq!(arrow.end, point(180.0, 25.0));
    assert_eq!(arrow.path, "M100,25 L180,25");
    assert_eq!(arrow.end_marker, MarkerRef::Arrow);
    assert_eq!(arrow.start_marker, None);
}

#[test]
fn test_right_to_left_with_start_arrow() {
    let harness = side_by_side();
    harness.relate("a", "right", "b", "left", true);

    let arrow = harness.arrow(0);
    assert_eq!(arrow.start, point(120.0, 25.0));
    assert_eq!(arrow.path, "M120,25 L180,25");
    assert_eq!(arrow.start_marker, Some(MarkerRef::ArrowStart));
}

#[test]
fn test_unregistered_elements_resolve_to_origin() {
    let harness = ArrowTestHarness::new();
    harness.relate("ghost", "right", "phantom", "left", false);

    let arrows = harness.arrows.compute_all_geometries();
    assert_eq!(arrows.len(), 1);
    assert_eq!(arrows[0].anchor_start, point(0.0, 0.0));
    assert_eq!(arrows[0].anchor_end, point(0.0, 0.0));
    // The end is still pulled back along the left side: 10 * 2 * 2 / 2 = 20.
    assert_eq!(arrows[0].start, point(0.0, 0.0));
    assert_eq!(arrows[0].end, point(-20.0, 0.0));
    assert_eq!(arrows[0].path, "M0,0 L-20,0");
}

#[test]
fn test_unregistered_elements_with_unanchored_sides_are_zero_length() {
    let harness = ArrowTestHarness::new();
    harness.relate("ghost", "middle", "phantom", "center", true);

    let arrow = harness.arrow(0);
    assert_eq!(arrow.start, arrow.end);
    assert_eq!(arrow.path, "M0,0 L0,0");
}

#[test]
fn test_relation_before_elements_fills_in_later() {
    let mut harness = ArrowTestHarness::new();
    harness.relate("a", "right", "b", "left", false);
    assert_eq!(harness.arrow(0).anchor_start, point(0.0, 0.0));

    harness.add_card("a", Rect::new(0.0, 0.0, 100.0, 50.0));
    harness.add_card("b", Rect::new(200.0, 0.0, 100.0, 50.0));
    assert_eq!(harness.paths(), vec!["M100,25 L180,25"]);
}

#[test]
fn test_parent_offset_shifts_every_point() {
    let mut harness = ArrowTestHarness::with_parent(Rect::new(10.0, 40.0, 800.0, 600.0));
    harness.add_card("a", Rect::new(10.0, 40.0, 100.0, 50.0));
    harness.add_card("b", Rect::new(10.0, 200.0, 100.0, 50.0));
    harness.relate("a", "bottom", "b", "top", false);

    let arrow = harness.arrow(0);
    assert_eq!(arrow.anchor_start, point(50.0, 50.0));
    assert_eq!(arrow.anchor_end, point(50.0, 160.0));
    // Top side points up: the end is pulled back by 20.
    assert_eq!(arrow.end, point(50.0, 140.0));
}
