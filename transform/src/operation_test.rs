#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use uuid::Uuid;

use super::*;
use crate::compass::Cursor;
use crate::surface::{Element, ElementStore};

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// =============================================================
// Helpers
// =============================================================

fn store_with_element(x: f64, y: f64, w: f64, h: f64) -> (ElementStore, ElementId) {
    let mut store = ElementStore::new();
    let id = Uuid::new_v4();
    store.insert(Element { id, offset: Point::new(x, y), size: Size::new(w, h), transform: None });
    (store, id)
}

fn rotated_store(w: f64, h: f64, rotation: f64) -> (ElementStore, ElementId) {
    let (mut store, id) = store_with_element(0.0, 0.0, w, h);
    let css = AffineMatrix::from_transformation(&Transformation::rotation(rotation)).to_css();
    store.set_transform(id, &css).unwrap();
    (store, id)
}

fn document_selectable(store: &ElementStore) -> bool {
    store.is_selectable(SelectionScope::Document)
}

// =============================================================
// Operation accessors
// =============================================================

#[test]
fn operation_reports_mode_element_and_rotation() {
    let element = Uuid::new_v4();
    let op = Operation::Move(MoveState { element, position: Point::default(), rotation: 1.5 });
    assert_eq!(op.mode(), Mode::Move);
    assert_eq!(op.element(), element);
    assert_eq!(op.orientation(), Orientation { element, rotation: 1.5 });
}

#[test]
fn mode_names() {
    assert_eq!(Mode::Create.to_string(), "create");
    assert_eq!(Mode::Rotate.as_str(), "rotate");
    assert_eq!(Mode::Resize.as_str(), "resize");
    assert_eq!(Mode::Move.as_str(), "move");
}

// =============================================================
// Create
// =============================================================

#[test]
fn start_creating_makes_element_at_anchor() {
    let mut store = ElementStore::new();
    let op = start_creating(&mut store, 10.0, 20.0);
    let Operation::Create(state) = &op else {
        panic!("expected create, got {op:?}");
    };
    assert_eq!(state.anchor, Point::new(10.0, 20.0));
    assert_eq!(state.rotation, 0.0);
    assert_eq!(store.offset(state.element), Ok(Point::new(10.0, 20.0)));
    assert!(!document_selectable(&store));
}

#[test]
fn update_creating_tracks_far_corner() {
    let mut store = ElementStore::new();
    let Operation::Create(state) = start_creating(&mut store, 10.0, 20.0) else {
        panic!("expected create");
    };
    update_creating(&mut store, &state, 60.0, 50.0).unwrap();
    assert_eq!(store.size(state.element), Ok(Size::new(50.0, 30.0)));
    update_creating(&mut store, &state, 70.0, 25.0).unwrap();
    assert_eq!(store.size(state.element), Ok(Size::new(60.0, 5.0)));
}

#[test]
fn update_creating_allows_negative_size() {
    let mut store = ElementStore::new();
    let Operation::Create(state) = start_creating(&mut store, 10.0, 20.0) else {
        panic!("expected create");
    };
    update_creating(&mut store, &state, 0.0, 5.0).unwrap();
    assert_eq!(store.size(state.element), Ok(Size::new(-10.0, -15.0)));
    assert_eq!(store.offset(state.element), Ok(Point::new(10.0, 20.0)));
}

#[test]
fn create_gesture_end_to_end() {
    let mut store = ElementStore::new();
    let mut overlay = Overlay::new();
    let mut op = start_creating(&mut store, 0.0, 0.0);
    update(&mut store, &mut overlay, &mut op, 40.0, 30.0).unwrap();
    let id = end(&mut store, &mut overlay, op).unwrap();

    assert_eq!(store.size(id), Ok(Size::new(40.0, 30.0)));
    assert!(document_selectable(&store));
    assert_eq!(overlay.pivot(), Some(Point::new(20.0, 15.0)));
}

#[test]
fn create_inside_out_keeps_overlay_finite() {
    let mut store = ElementStore::new();
    let mut overlay = Overlay::new();
    let mut op = start_creating(&mut store, 50.0, 50.0);
    update(&mut store, &mut overlay, &mut op, 20.0, 10.0).unwrap();
    assert_eq!(overlay.outline().map(|b| (b.width, b.height)), Some((0.0, 0.0)));
    assert!(overlay.markers().iter().all(|m| m.position == Point::new(50.0, 50.0)));
}

// =============================================================
// Rotate
// =============================================================

#[test]
fn start_rotating_records_pivot_and_anchor_angle() {
    let (mut store, id) = store_with_element(0.0, 0.0, 100.0, 100.0);
    let op = start_rotating(&mut store, id, 150.0, 50.0).unwrap();
    let Operation::Rotate(state) = &op else {
        panic!("expected rotate, got {op:?}");
    };
    assert_eq!(state.origin, Point::new(50.0, 50.0));
    assert!(approx_eq(state.angle, FRAC_PI_2));
    assert_eq!(state.rotation, 0.0);
    assert_eq!(state.anchor, Point::new(150.0, 50.0));
    assert!(!document_selectable(&store));
}

#[test]
fn start_rotating_reads_existing_rotation() {
    let (mut store, id) = rotated_store(100.0, 100.0, FRAC_PI_4);
    let op = start_rotating(&mut store, id, 0.0, 0.0).unwrap();
    assert!(approx_eq(op.rotation(), FRAC_PI_4));
}

#[test]
fn start_rotating_unknown_element_leaves_selection_alone() {
    let mut store = ElementStore::new();
    let id = Uuid::new_v4();
    assert_eq!(start_rotating(&mut store, id, 0.0, 0.0), Err(TransformError::ElementNotFound(id)));
    assert!(document_selectable(&store));
}

#[test]
fn update_rotating_quarter_turn_clockwise() {
    let (mut store, id) = store_with_element(0.0, 0.0, 100.0, 100.0);
    let Ok(Operation::Rotate(mut state)) = start_rotating(&mut store, id, 150.0, 50.0) else {
        panic!("expected rotate");
    };
    update_rotating(&mut store, &mut state, 50.0, 150.0).unwrap();

    assert!(approx_eq(state.rotation, FRAC_PI_2));
    assert!(approx_eq(state.angle, PI));
    let stored = store.transform(id).unwrap().unwrap();
    let matrix = AffineMatrix::parse(&stored).unwrap().unwrap();
    assert!(approx_eq(matrix.rotation_angle(), FRAC_PI_2));
}

#[test]
fn update_rotating_accumulates_across_samples() {
    let (mut store, id) = store_with_element(0.0, 0.0, 100.0, 100.0);
    let Ok(Operation::Rotate(mut state)) = start_rotating(&mut store, id, 50.0, -50.0) else {
        panic!("expected rotate");
    };
    // North → east → south → west → north: one full clockwise turn.
    for (x, y) in [(150.0, 50.0), (50.0, 150.0), (-50.0, 50.0), (50.0, -50.0)] {
        update_rotating(&mut store, &mut state, x, y).unwrap();
    }
    assert!(state.rotation < EPSILON || (state.rotation - 2.0 * PI).abs() < EPSILON);
}

#[test]
fn update_rotating_counter_clockwise_wraps() {
    let (mut store, id) = store_with_element(0.0, 0.0, 100.0, 100.0);
    let Ok(Operation::Rotate(mut state)) = start_rotating(&mut store, id, 50.0, -50.0) else {
        panic!("expected rotate");
    };
    update_rotating(&mut store, &mut state, -50.0, 50.0).unwrap();
    assert!(approx_eq(state.rotation, 3.0 * FRAC_PI_2));
}

#[test]
fn rotate_gesture_moves_north_marker_into_east_slot() {
    let (mut store, id) = store_with_element(0.0, 0.0, 100.0, 100.0);
    let mut overlay = Overlay::new();
    overlay.show(&Orientation { element: id, rotation: 0.0 }, Point::default(), Size::new(100.0, 100.0));
    let east_before = overlay.marker(CompassDirection::E).position;

    let mut op = start_rotating(&mut store, id, 150.0, 50.0).unwrap();
    update(&mut store, &mut overlay, &mut op, 50.0, 150.0).unwrap();
    assert!(approx_eq(op.rotation(), FRAC_PI_2));

    let returned = end(&mut store, &mut overlay, op).unwrap();
    assert_eq!(returned, id);
    assert!(point_approx_eq(overlay.marker(CompassDirection::N).position, east_before));
    assert_eq!(overlay.marker(CompassDirection::N).cursor, Cursor::EwResize);
    assert!(document_selectable(&store));
}

// =============================================================
// Resize
// =============================================================

#[test]
fn start_resizing_derives_direction_from_handle_and_rotation() {
    let (mut store, id) = rotated_store(100.0, 50.0, FRAC_PI_2);
    let op = start_resizing(&mut store, id, CompassDirection::N, 0.0, 0.0).unwrap();
    let Operation::Resize(state) = &op else {
        panic!("expected resize, got {op:?}");
    };
    // The north handle of a quarter-turned element faces east.
    assert!(approx_eq(state.normal, FRAC_PI_2));
    assert!(point_approx_eq(state.direction, Point::new(1.0, 0.0)));
    assert!(!document_selectable(&store));
}

#[test]
fn resize_east_handle_grows_width_only() {
    let (mut store, id) = store_with_element(0.0, 0.0, 100.0, 50.0);
    let Ok(Operation::Resize(mut state)) = start_resizing(&mut store, id, CompassDirection::E, 100.0, 25.0) else {
        panic!("expected resize");
    };
    update_resizing(&mut store, &mut state, 120.0, 25.0).unwrap();

    let size = store.size(id).unwrap();
    assert!(approx_eq(size.width, 120.0));
    assert_eq!(size.height, 50.0);
    assert_eq!(store.offset(id), Ok(Point::new(0.0, 0.0)));
    assert!(point_approx_eq(state.start, Point::new(120.0, 25.0)));
}

#[test]
fn resize_ignores_perpendicular_motion() {
    let (mut store, id) = store_with_element(0.0, 0.0, 100.0, 50.0);
    let Ok(Operation::Resize(mut state)) = start_resizing(&mut store, id, CompassDirection::E, 100.0, 25.0) else {
        panic!("expected resize");
    };
    update_resizing(&mut store, &mut state, 110.0, 90.0).unwrap();

    assert!(approx_eq(store.size(id).unwrap().width, 110.0));
    assert!(point_approx_eq(state.start, Point::new(110.0, 25.0)));
}

#[test]
fn resize_west_handle_keeps_east_edge_anchored() {
    let (mut store, id) = store_with_element(50.0, 0.0, 100.0, 50.0);
    let Ok(Operation::Resize(mut state)) = start_resizing(&mut store, id, CompassDirection::W, 50.0, 25.0) else {
        panic!("expected resize");
    };
    update_resizing(&mut store, &mut state, 30.0, 25.0).unwrap();

    let size = store.size(id).unwrap();
    let offset = store.offset(id).unwrap();
    assert!(approx_eq(size.width, 120.0));
    assert!(approx_eq(offset.x, 30.0));
    assert!(approx_eq(offset.x + size.width, 150.0));
}

#[test]
fn resize_north_handle_keeps_south_edge_anchored() {
    let (mut store, id) = store_with_element(0.0, 100.0, 40.0, 60.0);
    let Ok(Operation::Resize(mut state)) = start_resizing(&mut store, id, CompassDirection::N, 20.0, 100.0) else {
        panic!("expected resize");
    };
    update_resizing(&mut store, &mut state, 20.0, 90.0).unwrap();

    let size = store.size(id).unwrap();
    let offset = store.offset(id).unwrap();
    assert!(approx_eq(size.height, 70.0));
    assert!(approx_eq(offset.y, 90.0));
    assert_eq!(size.width, 40.0);
}

#[test]
fn resize_south_handle_shrinks_when_dragged_inward() {
    let (mut store, id) = store_with_element(0.0, 0.0, 40.0, 60.0);
    let Ok(Operation::Resize(mut state)) = start_resizing(&mut store, id, CompassDirection::S, 20.0, 60.0) else {
        panic!("expected resize");
    };
    update_resizing(&mut store, &mut state, 20.0, 45.0).unwrap();
    assert!(approx_eq(store.size(id).unwrap().height, 45.0));
}

#[test]
fn resize_is_path_dependent() {
    let (mut store, id) = store_with_element(0.0, 0.0, 100.0, 50.0);
    let Ok(Operation::Resize(mut state)) = start_resizing(&mut store, id, CompassDirection::E, 100.0, 25.0) else {
        panic!("expected resize");
    };
    update_resizing(&mut store, &mut state, 110.0, 25.0).unwrap();
    update_resizing(&mut store, &mut state, 130.0, 25.0).unwrap();
    // Each sample contributes only its delta from the previous one.
    assert!(approx_eq(store.size(id).unwrap().width, 130.0));
}

#[test]
fn resize_diagonal_handle_shifts_offset_without_resizing() {
    let (mut store, id) = store_with_element(10.0, 10.0, 100.0, 50.0);
    let Ok(Operation::Resize(mut state)) = start_resizing(&mut store, id, CompassDirection::Nw, 10.0, 10.0) else {
        panic!("expected resize");
    };
    update_resizing(&mut store, &mut state, -10.0, -10.0).unwrap();

    assert_eq!(store.size(id), Ok(Size::new(100.0, 50.0)));
    assert!(point_approx_eq(store.offset(id).unwrap(), Point::new(-10.0, -10.0)));
    assert!(point_approx_eq(state.start, Point::new(-10.0, -10.0)));
}

#[test]
fn resize_diagonal_handle_facing_positive_keeps_offset() {
    let (mut store, id) = store_with_element(10.0, 10.0, 100.0, 50.0);
    let Ok(Operation::Resize(mut state)) = start_resizing(&mut store, id, CompassDirection::Se, 110.0, 60.0) else {
        panic!("expected resize");
    };
    update_resizing(&mut store, &mut state, 130.0, 80.0).unwrap();

    assert_eq!(store.size(id), Ok(Size::new(100.0, 50.0)));
    assert_eq!(store.offset(id), Ok(Point::new(10.0, 10.0)));
}

#[test]
fn resize_on_rotated_element_uses_rotated_direction() {
    // Quarter turn: the east handle faces south, so dragging down widens.
    let (mut store, id) = rotated_store(100.0, 50.0, FRAC_PI_2);
    let Ok(Operation::Resize(mut state)) = start_resizing(&mut store, id, CompassDirection::E, 0.0, 0.0) else {
        panic!("expected resize");
    };
    update_resizing(&mut store, &mut state, 0.0, 30.0).unwrap();
    let size = store.size(id).unwrap();
    assert!(approx_eq(size.width, 130.0));
    assert_eq!(size.height, 50.0);
}

// =============================================================
// Move
// =============================================================

#[test]
fn move_adds_delta_to_offset() {
    let (mut store, id) = store_with_element(5.0, 5.0, 20.0, 20.0);
    let Ok(Operation::Move(mut state)) = start_moving(&mut store, id, 10.0, 10.0) else {
        panic!("expected move");
    };
    update_moving(&mut store, &mut state, 15.0, 12.0).unwrap();
    assert_eq!(store.offset(id), Ok(Point::new(10.0, 7.0)));
    assert_eq!(state.position, Point::new(15.0, 12.0));
}

#[test]
fn move_consumes_delta_from_previous_sample() {
    let (mut store, id) = store_with_element(0.0, 0.0, 20.0, 20.0);
    let Ok(Operation::Move(mut state)) = start_moving(&mut store, id, 0.0, 0.0) else {
        panic!("expected move");
    };
    update_moving(&mut store, &mut state, 10.0, 0.0).unwrap();
    update_moving(&mut store, &mut state, 15.0, 5.0).unwrap();
    assert_eq!(store.offset(id), Ok(Point::new(15.0, 5.0)));
}

#[test]
fn move_keeps_rotation_and_size() {
    let (mut store, id) = rotated_store(30.0, 20.0, 1.0);
    let before = store.transform(id).unwrap();
    let mut overlay = Overlay::new();
    let mut op = start_moving(&mut store, id, 0.0, 0.0).unwrap();
    assert!(approx_eq(op.rotation(), 1.0));
    update(&mut store, &mut overlay, &mut op, 3.0, 4.0).unwrap();
    end(&mut store, &mut overlay, op).unwrap();

    assert_eq!(store.transform(id).unwrap(), before);
    assert_eq!(store.size(id), Ok(Size::new(30.0, 20.0)));
}

#[test]
fn start_moving_malformed_transform_errors() {
    let (mut store, id) = store_with_element(0.0, 0.0, 10.0, 10.0);
    store.set_transform(id, "matrix(oops)").unwrap();
    assert!(matches!(start_moving(&mut store, id, 0.0, 0.0), Err(TransformError::MalformedMatrix(_))));
    assert!(document_selectable(&store));
}

// =============================================================
// Dispatch: update / end / cancel
// =============================================================

#[test]
fn update_refreshes_overlay_every_sample() {
    let (mut store, id) = store_with_element(0.0, 0.0, 20.0, 20.0);
    let mut overlay = Overlay::new();
    let mut op = start_moving(&mut store, id, 0.0, 0.0).unwrap();
    assert!(!overlay.is_visible());

    update(&mut store, &mut overlay, &mut op, 10.0, 0.0).unwrap();
    assert_eq!(overlay.pivot(), Some(Point::new(20.0, 10.0)));
    update(&mut store, &mut overlay, &mut op, 10.0, 10.0).unwrap();
    assert_eq!(overlay.pivot(), Some(Point::new(20.0, 20.0)));
}

#[test]
fn end_returns_element_and_restores_selection() {
    let (mut store, id) = store_with_element(0.0, 0.0, 20.0, 20.0);
    let mut overlay = Overlay::new();
    let op = start_resizing(&mut store, id, CompassDirection::S, 10.0, 20.0).unwrap();
    assert!(!document_selectable(&store));
    assert_eq!(end(&mut store, &mut overlay, op), Ok(id));
    assert!(document_selectable(&store));
    assert!(overlay.is_visible());
}

#[test]
fn end_after_element_removed_still_restores_selection() {
    let (mut store, id) = store_with_element(0.0, 0.0, 20.0, 20.0);
    let mut overlay = Overlay::new();
    let op = start_moving(&mut store, id, 0.0, 0.0).unwrap();
    store.remove_element(id).unwrap();
    assert_eq!(end(&mut store, &mut overlay, op), Err(TransformError::ElementNotFound(id)));
    assert!(document_selectable(&store));
}

#[test]
fn update_after_element_removed_errors() {
    let (mut store, id) = store_with_element(0.0, 0.0, 20.0, 20.0);
    let mut overlay = Overlay::new();
    let mut op = start_moving(&mut store, id, 0.0, 0.0).unwrap();
    store.remove_element(id).unwrap();
    assert_eq!(update(&mut store, &mut overlay, &mut op, 1.0, 1.0), Err(TransformError::ElementNotFound(id)));
}

#[test]
fn cancel_restores_selection_and_hides_overlay() {
    let (mut store, id) = store_with_element(0.0, 0.0, 20.0, 20.0);
    let mut overlay = Overlay::new();
    let mut op = start_moving(&mut store, id, 0.0, 0.0).unwrap();
    update(&mut store, &mut overlay, &mut op, 5.0, 5.0).unwrap();
    assert!(overlay.is_visible());

    assert_eq!(cancel(&mut store, &mut overlay, op), id);
    assert!(document_selectable(&store));
    assert!(!overlay.is_visible());
    // Geometry from the last update is kept.
    assert_eq!(store.offset(id), Ok(Point::new(5.0, 5.0)));
}
