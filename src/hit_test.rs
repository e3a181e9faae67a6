use super::*;
use crate::scene::{Element, ElementType};

fn place(id: &str, x: f64, y: f64, w: f64, h: f64) -> Element {
    let mut el = Element::new(id.to_string(), ElementType::Furniture);
    el.x = x;
    el.y = y;
    el.w = w;
    el.h = h;
    el
}

fn scene_with(elements: Vec<Element>) -> SceneStore {
    let mut scene = SceneStore::new();
    for el in elements {
        scene.insert(el);
    }
    scene
}

// --- bodies ---

#[test]
fn empty_scene_hits_nothing() {
    let scene = SceneStore::new();
    let vp = Viewport::default();
    assert!(hit_test(Point::new(0.0, 0.0), &scene, &vp, None).is_none());
}

#[test]
fn body_hit_inside_rect() {
    let scene = scene_with(vec![place("a", 0.0, 0.0, 100.0, 50.0)]);
    let vp = Viewport::default();
    let hit = hit_test(Point::new(50.0, 25.0), &scene, &vp, None).unwrap();
    assert_eq!(hit.id, "a");
    assert_eq!(hit.part, HitPart::Body);
}

#[test]
fn body_edges_are_inclusive() {
    let scene = scene_with(vec![place("a", 0.0, 0.0, 100.0, 50.0)]);
    let vp = Viewport::default();
    assert!(hit_test(Point::new(0.0, 0.0), &scene, &vp, None).is_some());
    assert!(hit_test(Point::new(100.0, 50.0), &scene, &vp, None).is_some());
    assert!(hit_test(Point::new(100.5, 25.0), &scene, &vp, None).is_none());
}

#[test]
fn topmost_overlapping_body_wins() {
    let scene = scene_with(vec![
        place("bottom", 0.0, 0.0, 100.0, 100.0),
        place("top", 50.0, 50.0, 100.0, 100.0),
    ]);
    let vp = Viewport::default();
    let hit = hit_test(Point::new(75.0, 75.0), &scene, &vp, None).unwrap();
    assert_eq!(hit.id, "top");
    // outside the top element the bottom one still picks
    let hit = hit_test(Point::new(25.0, 25.0), &scene, &vp, None).unwrap();
    assert_eq!(hit.id, "bottom");
}

// --- resize handles ---

#[test]
fn handles_require_selection() {
    let scene = scene_with(vec![place("a", 0.0, 0.0, 100.0, 50.0)]);
    let vp = Viewport::default();
    // at the corner but nothing selected: body hit only
    let hit = hit_test(Point::new(0.0, 0.0), &scene, &vp, None).unwrap();
    assert_eq!(hit.part, HitPart::Body);
    let hit = hit_test(Point::new(0.0, 0.0), &scene, &vp, Some("a")).unwrap();
    assert_eq!(hit.part, HitPart::ResizeHandle(Corner::Nw));
}

#[test]
fn each_corner_picks_its_handle() {
    let scene = scene_with(vec![place("a", 0.0, 0.0, 100.0, 50.0)]);
    let vp = Viewport::default();
    let cases = [
        (Point::new(0.0, 0.0), Corner::Nw),
        (Point::new(100.0, 0.0), Corner::Ne),
        (Point::new(0.0, 50.0), Corner::Sw),
        (Point::new(100.0, 50.0), Corner::Se),
    ];
    for (pt, corner) in cases {
        let hit = hit_test(pt, &scene, &vp, Some("a")).unwrap();
        assert_eq!(hit.part, HitPart::ResizeHandle(corner), "{corner:?}");
    }
}

#[test]
fn handle_pickup_is_a_square_slop() {
    let scene = scene_with(vec![place("a", 0.0, 0.0, 100.0, 50.0)]);
    let vp = Viewport::default();
    // 8 px at zoom 1 is 8 world units, both axes at once
    let hit = hit_test(Point::new(-8.0, -8.0), &scene, &vp, Some("a")).unwrap();
    assert_eq!(hit.part, HitPart::ResizeHandle(Corner::Nw));
    // just past the reach on one axis: no handle, and outside the body
    assert!(hit_test(Point::new(-8.5, 0.0), &scene, &vp, Some("a")).is_none());
}

#[test]
fn handle_beats_own_body() {
    let scene = scene_with(vec![place("a", 0.0, 0.0, 100.0, 50.0)]);
    let vp = Viewport::default();
    let hit = hit_test(Point::new(2.0, 2.0), &scene, &vp, Some("a")).unwrap();
    assert_eq!(hit.part, HitPart::ResizeHandle(Corner::Nw));
}

#[test]
fn selected_handle_beats_covering_body() {
    let scene = scene_with(vec![
        place("a", 0.0, 0.0, 100.0, 50.0),
        place("cover", -50.0, -50.0, 300.0, 200.0),
    ]);
    let vp = Viewport::default();
    let hit = hit_test(Point::new(0.0, 0.0), &scene, &vp, Some("a")).unwrap();
    assert_eq!(hit.id, "a");
    assert_eq!(hit.part, HitPart::ResizeHandle(Corner::Nw));
}

#[test]
fn handle_reach_shrinks_when_zoomed_in() {
    let scene = scene_with(vec![place("a", 0.0, 0.0, 100.0, 50.0)]);
    let vp = Viewport { offset_x: 0.0, offset_y: 0.0, zoom: 2.0 };
    // 8 px / zoom 2 = 4 world units
    let hit = hit_test(Point::new(4.0, 0.0), &scene, &vp, Some("a")).unwrap();
    assert_eq!(hit.part, HitPart::ResizeHandle(Corner::Nw));
    let hit = hit_test(Point::new(5.0, 0.0), &scene, &vp, Some("a")).unwrap();
    assert_eq!(hit.part, HitPart::Body);
}

#[test]
fn handle_reach_grows_when_zoomed_out() {
    let scene = scene_with(vec![place("a", 0.0, 0.0, 100.0, 50.0)]);
    let vp = Viewport { offset_x: 0.0, offset_y: 0.0, zoom: 0.5 };
    // 8 px / zoom 0.5 = 16 world units
    let hit = hit_test(Point::new(15.0, -12.0), &scene, &vp, Some("a")).unwrap();
    assert_eq!(hit.part, HitPart::ResizeHandle(Corner::Nw));
}

#[test]
fn selected_id_missing_from_scene_is_ignored() {
    let scene = scene_with(vec![place("a", 0.0, 0.0, 100.0, 50.0)]);
    let vp = Viewport::default();
    let hit = hit_test(Point::new(0.0, 0.0), &scene, &vp, Some("ghost")).unwrap();
    assert_eq!(hit.id, "a");
    assert_eq!(hit.part, HitPart::Body);
}

// --- rotation ---

#[test]
fn rotated_body_picks_along_drawn_outline() {
    let mut el = place("a", 0.0, 0.0, 100.0, 50.0);
    el.rot = 90.0;
    let scene = scene_with(vec![el]);
    let vp = Viewport::default();
    // inside the rotated footprint, outside the unrotated rect
    let hit = hit_test(Point::new(50.0, -20.0), &scene, &vp, None).unwrap();
    assert_eq!(hit.id, "a");
    // inside the unrotated rect, outside the rotated footprint
    assert!(hit_test(Point::new(95.0, 45.0), &scene, &vp, None).is_none());
}

#[test]
fn rotated_handle_follows_corner() {
    let mut el = place("a", 0.0, 0.0, 100.0, 50.0);
    el.rot = 90.0;
    let scene = scene_with(vec![el]);
    let vp = Viewport::default();
    // the Nw corner (0,0) rotates to (75,-25) about the center (50,25)
    let hit = hit_test(Point::new(75.0, -25.0), &scene, &vp, Some("a")).unwrap();
    assert_eq!(hit.part, HitPart::ResizeHandle(Corner::Nw));
}

#[test]
fn corner_positions_on_rect() {
    let rect = crate::scene::Rect::new(10.0, 20.0, 100.0, 50.0);
    assert_eq!(Corner::Nw.of(rect), Point::new(10.0, 20.0));
    assert_eq!(Corner::Ne.of(rect), Point::new(110.0, 20.0));
    assert_eq!(Corner::Sw.of(rect), Point::new(10.0, 70.0));
    assert_eq!(Corner::Se.of(rect), Point::new(110.0, 70.0));
}
