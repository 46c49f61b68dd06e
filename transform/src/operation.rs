//! Gesture state machine: create, rotate, resize and move.
//!
//! Every gesture runs `start_*` on pointer-down, `update_*` on each pointer
//! sample, and `end_*` on release. The `start_*` functions block text
//! selection and return an [`Operation`] carrying everything the updates
//! need. Updates are path-dependent: each one consumes the delta from the
//! previous sample, so replaying the same samples reproduces the same result
//! but skipping one does not.
//!
//! [`update`], [`end`] and [`cancel`] dispatch on the active variant and keep
//! the [`Overlay`] in step with the element.

#[cfg(test)]
#[path = "operation_test.rs"]
mod operation_test;

use std::fmt;

use crate::bounds::{BoundingBox, Size, compute_bounding_box, compute_origin};
use crate::compass::{CompassDirection, direction_vector};
use crate::error::TransformError;
use crate::math::{Point, angular_direction, normalize_angle, v_add, v_project, v_scalar_projection, v_subtract};
use crate::matrix::{AffineMatrix, Transformation, element_rotation};
use crate::overlay::Overlay;
use crate::surface::{ElementId, SelectionScope, Surface, disable_selection, enable_selection};

/// The element under manipulation and its current rotation: all the overlay
/// needs to place its markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub element: ElementId,
    /// Clockwise rotation in radians, in `[0, 2π)`.
    pub rotation: f64,
}

/// Which kind of gesture an [`Operation`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Rotate,
    Resize,
    Move,
}

impl Mode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Rotate => "rotate",
            Self::Resize => "resize",
            Self::Move => "move",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A new element being sized by dragging its far corner.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateState {
    /// Id of the element created at pointer-down.
    pub element: ElementId,
    /// The fixed corner where the drag started.
    pub anchor: Point,
    /// Always zero; new elements start unrotated.
    pub rotation: f64,
}

/// An element being turned about the center of its bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct RotateState {
    pub element: ElementId,
    /// Bounding box at pointer-down.
    pub bounds: BoundingBox,
    /// Pivot: center of `bounds`.
    pub origin: Point,
    /// Pointer position at pointer-down.
    pub anchor: Point,
    /// Compass angle of the previous sample as seen from `origin`.
    pub angle: f64,
    /// Accumulated rotation.
    pub rotation: f64,
}

/// An element being stretched by one of its eight handles.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    pub element: ElementId,
    /// The handle being dragged.
    pub handle: CompassDirection,
    /// Compass angle the handle faces: its base angle plus `rotation`.
    pub normal: f64,
    /// Unit vector along `normal`.
    pub direction: Point,
    /// Handle position after the previous sample.
    pub start: Point,
    /// Element rotation, fixed for the whole gesture.
    pub rotation: f64,
}

/// An element being dragged across the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveState {
    pub element: ElementId,
    /// Pointer position at the previous sample.
    pub position: Point,
    /// Element rotation, fixed for the whole gesture.
    pub rotation: f64,
}

/// The gesture in progress. Exactly one mode is active.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Create(CreateState),
    Rotate(RotateState),
    Resize(ResizeState),
    Move(MoveState),
}

impl Operation {
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::Create(_) => Mode::Create,
            Self::Rotate(_) => Mode::Rotate,
            Self::Resize(_) => Mode::Resize,
            Self::Move(_) => Mode::Move,
        }
    }

    /// The element being manipulated.
    #[must_use]
    pub fn element(&self) -> ElementId {
        match self {
            Self::Create(s) => s.element,
            Self::Rotate(s) => s.element,
            Self::Resize(s) => s.element,
            Self::Move(s) => s.element,
        }
    }

    /// Current rotation of the element.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        match self {
            Self::Create(s) => s.rotation,
            Self::Rotate(s) => s.rotation,
            Self::Resize(s) => s.rotation,
            Self::Move(s) => s.rotation,
        }
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        Orientation { element: self.element(), rotation: self.rotation() }
    }
}

// =============================================================================
// CREATE
// =============================================================================

/// Create an empty element at `(x, y)` and start sizing it.
pub fn start_creating<S: Surface + ?Sized>(surface: &mut S, x: f64, y: f64) -> Operation {
    disable_selection(surface, SelectionScope::Document);
    let anchor = Point::new(x, y);
    let element = surface.create_element(anchor);
    tracing::debug!(%element, x, y, "create started");
    Operation::Create(CreateState { element, anchor, rotation: 0.0 })
}

/// Size the new element so its far corner follows `(x, y)`.
///
/// The size goes negative when the pointer crosses back over the anchor.
///
/// # Errors
///
/// Returns `ElementNotFound` if the element was removed mid-gesture.
pub fn update_creating<S: Surface + ?Sized>(
    surface: &mut S,
    state: &CreateState,
    x: f64,
    y: f64,
) -> Result<(), TransformError> {
    let size = Size::new(x - state.anchor.x, y - state.anchor.y);
    surface.set_size(state.element, size)?;
    tracing::trace!(element = %state.element, width = size.width, height = size.height, "sized");
    Ok(())
}

#[must_use]
pub fn end_creating(state: CreateState) -> ElementId {
    state.element
}

// =============================================================================
// ROTATE
// =============================================================================

/// Start turning `element`, grabbed at `(x, y)`.
///
/// # Errors
///
/// Returns `ElementNotFound` for an unknown element and `MalformedMatrix`
/// when its current transform cannot be read.
pub fn start_rotating<S: Surface + ?Sized>(
    surface: &mut S,
    element: ElementId,
    x: f64,
    y: f64,
) -> Result<Operation, TransformError> {
    let rotation = element_rotation(&*surface, element)?;
    let bounds = compute_bounding_box(surface.offset(element)?, surface.size(element)?, rotation);
    let origin = compute_origin(&bounds);
    let anchor = Point::new(x, y);
    let angle = angular_direction(v_subtract(anchor, origin));

    disable_selection(surface, SelectionScope::Document);
    tracing::debug!(%element, rotation, "rotate started");
    Ok(Operation::Rotate(RotateState { element, bounds, origin, anchor, angle, rotation }))
}

/// Turn the element by the angle swept between the previous sample and
/// `(x, y)` around the pivot, and write the new transform.
///
/// # Errors
///
/// Returns `ElementNotFound` if the element was removed mid-gesture.
pub fn update_rotating<S: Surface + ?Sized>(
    surface: &mut S,
    state: &mut RotateState,
    x: f64,
    y: f64,
) -> Result<(), TransformError> {
    let theta = angular_direction(v_subtract(Point::new(x, y), state.origin));
    state.rotation = normalize_angle(state.rotation + (theta - state.angle));
    state.angle = theta;

    let matrix = AffineMatrix::from_transformation(&Transformation::rotation(state.rotation));
    surface.set_transform(state.element, &matrix.to_css())?;
    tracing::trace!(element = %state.element, rotation = state.rotation, "rotated");
    Ok(())
}

#[must_use]
pub fn end_rotating(state: RotateState) -> ElementId {
    state.element
}

// =============================================================================
// RESIZE
// =============================================================================

/// Start dragging `handle` of `element`, grabbed at `(x, y)`.
///
/// # Errors
///
/// Returns `ElementNotFound` for an unknown element and `MalformedMatrix`
/// when its current transform cannot be read.
pub fn start_resizing<S: Surface + ?Sized>(
    surface: &mut S,
    element: ElementId,
    handle: CompassDirection,
    x: f64,
    y: f64,
) -> Result<Operation, TransformError> {
    let rotation = element_rotation(&*surface, element)?;
    let normal = handle.angle() + rotation;

    disable_selection(surface, SelectionScope::Document);
    tracing::debug!(%element, %handle, rotation, "resize started");
    Ok(Operation::Resize(ResizeState {
        element,
        handle,
        normal,
        direction: direction_vector(normal),
        start: Point::new(x, y),
        rotation,
    }))
}

/// Stretch the element by the part of the pointer delta that runs along the
/// dragged handle's direction.
///
/// `e`/`w` handles change the width and `n`/`s` handles the height. When the
/// handle points toward negative x or y, the offset moves with it so the
/// opposite edge stays put. Diagonal handles leave the size alone but still
/// shift the offset, so dragging `nw` outward moves the element.
///
/// # Errors
///
/// Returns `ElementNotFound` if the element was removed mid-gesture.
pub fn update_resizing<S: Surface + ?Sized>(
    surface: &mut S,
    state: &mut ResizeState,
    x: f64,
    y: f64,
) -> Result<(), TransformError> {
    let delta = v_subtract(Point::new(x, y), state.start);
    let direction = state.direction;
    let position = v_add(state.start, v_project(delta, direction));
    let scalar = v_scalar_projection(delta, direction);

    if state.handle.is_cardinal() {
        let mut size = surface.size(state.element)?;
        match state.handle {
            CompassDirection::E | CompassDirection::W => size.width += scalar,
            _ => size.height += scalar,
        }
        surface.set_size(state.element, size)?;
    }

    let mut offset = surface.offset(state.element)?;
    if direction.x < 0.0 {
        offset.x += scalar * direction.x;
    }
    if direction.y < 0.0 {
        offset.y += scalar * direction.y;
    }
    surface.set_offset(state.element, offset)?;

    state.start = position;
    tracing::trace!(element = %state.element, handle = %state.handle, scalar, "resized");
    Ok(())
}

#[must_use]
pub fn end_resizing(state: ResizeState) -> ElementId {
    state.element
}

// =============================================================================
// MOVE
// =============================================================================

/// Start dragging `element`, grabbed at `(x, y)`.
///
/// # Errors
///
/// Returns `ElementNotFound` for an unknown element and `MalformedMatrix`
/// when its current transform cannot be read.
pub fn start_moving<S: Surface + ?Sized>(
    surface: &mut S,
    element: ElementId,
    x: f64,
    y: f64,
) -> Result<Operation, TransformError> {
    let rotation = element_rotation(&*surface, element)?;

    disable_selection(surface, SelectionScope::Document);
    tracing::debug!(%element, "move started");
    Ok(Operation::Move(MoveState { element, position: Point::new(x, y), rotation }))
}

/// Shift the element by the pointer delta since the previous sample.
///
/// # Errors
///
/// Returns `ElementNotFound` if the element was removed mid-gesture.
pub fn update_moving<S: Surface + ?Sized>(
    surface: &mut S,
    state: &mut MoveState,
    x: f64,
    y: f64,
) -> Result<(), TransformError> {
    let position = Point::new(x, y);
    let current = surface.offset(state.element)?;
    let offset = v_add(current, v_subtract(position, state.position));
    surface.set_offset(state.element, offset)?;
    state.position = position;
    tracing::trace!(element = %state.element, x = offset.x, y = offset.y, "moved");
    Ok(())
}

#[must_use]
pub fn end_moving(state: MoveState) -> ElementId {
    state.element
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Feed one pointer sample to the active gesture, then re-place the overlay.
///
/// # Errors
///
/// Returns `ElementNotFound` if the element was removed mid-gesture.
pub fn update<S: Surface + ?Sized>(
    surface: &mut S,
    overlay: &mut Overlay,
    operation: &mut Operation,
    x: f64,
    y: f64,
) -> Result<(), TransformError> {
    match operation {
        Operation::Create(state) => update_creating(surface, state, x, y)?,
        Operation::Rotate(state) => update_rotating(surface, state, x, y)?,
        Operation::Resize(state) => update_resizing(surface, state, x, y)?,
        Operation::Move(state) => update_moving(surface, state, x, y)?,
    }
    overlay.refresh(&*surface, Some(&operation.orientation()))
}

/// Finish the gesture: restore text selection, place the overlay around the
/// final geometry, and hand back the element.
///
/// # Errors
///
/// Returns `ElementNotFound` if the element was removed mid-gesture.
/// Selection is restored either way.
pub fn end<S: Surface + ?Sized>(
    surface: &mut S,
    overlay: &mut Overlay,
    operation: Operation,
) -> Result<ElementId, TransformError> {
    enable_selection(surface, SelectionScope::Document);
    let orientation = operation.orientation();
    let mode = operation.mode();
    let element = match operation {
        Operation::Create(state) => end_creating(state),
        Operation::Rotate(state) => end_rotating(state),
        Operation::Resize(state) => end_resizing(state),
        Operation::Move(state) => end_moving(state),
    };
    overlay.refresh(&*surface, Some(&orientation))?;
    tracing::debug!(%element, %mode, "gesture ended");
    Ok(element)
}

/// Abandon the gesture: restore text selection and hide the overlay. The
/// element keeps whatever geometry the last update gave it.
pub fn cancel<S: Surface + ?Sized>(surface: &mut S, overlay: &mut Overlay, operation: Operation) -> ElementId {
    enable_selection(surface, SelectionScope::Document);
    overlay.hide();
    let element = operation.element();
    tracing::debug!(%element, mode = %operation.mode(), "gesture cancelled");
    element
}
