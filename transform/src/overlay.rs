//! Marker overlay: eight resize handles, a pivot and a bounding outline.
//!
//! The overlay is a pure projection of an [`Orientation`] plus the element's
//! geometry onto screen positions. It is owned by the caller (one per
//! surface), so two surfaces never fight over the same markers.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use serde::Serialize;

use crate::bounds::{BoundingBox, Size, compute_bounding_box, compute_origin};
use crate::compass::{CompassDirection, Cursor, rotate_direction};
use crate::error::TransformError;
use crate::math::{Point, v_add, v_rotate};
use crate::operation::Orientation;
use crate::surface::Surface;

/// One resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    /// Which handle this is on the unrotated element.
    pub direction: CompassDirection,
    /// Center of the handle in surface coordinates.
    pub position: Point,
    /// Cursor for the direction the handle currently faces.
    pub cursor: Cursor,
    pub visible: bool,
}

/// Handles, pivot and outline for the element under manipulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    markers: [Marker; 8],
    outline: BoundingBox,
    pivot: Point,
    outline_visible: bool,
    pivot_visible: bool,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            markers: CompassDirection::ALL.map(|direction| Marker {
                direction,
                position: Point::default(),
                cursor: direction.cursor(),
                visible: false,
            }),
            outline: BoundingBox::default(),
            pivot: Point::default(),
            outline_visible: false,
            pivot_visible: false,
        }
    }
}

impl Overlay {
    /// A hidden overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place and show every part around an element at `offset` with `size`.
    ///
    /// Negative extents are treated as zero, so an inside-out element collapses
    /// every marker onto the pivot.
    pub fn show(&mut self, orientation: &Orientation, offset: Point, size: Size) {
        let size = Size::new(size.width.max(0.0), size.height.max(0.0));
        let bounds = compute_bounding_box(offset, size, orientation.rotation);
        let origin = compute_origin(&bounds);

        for marker in &mut self.markers {
            let handle = marker.direction.handle_offset(size);
            marker.position = v_add(v_rotate(handle, orientation.rotation), origin);
            marker.cursor = rotate_direction(marker.direction, orientation.rotation).cursor();
            marker.visible = true;
        }

        self.outline = bounds;
        self.outline_visible = true;
        self.pivot = origin;
        self.pivot_visible = true;
    }

    /// Re-read the oriented element from `surface` and show the overlay
    /// around it. Does nothing when `orientation` is absent.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` when the element is no longer on the surface.
    pub fn refresh<S: Surface + ?Sized>(
        &mut self,
        surface: &S,
        orientation: Option<&Orientation>,
    ) -> Result<(), TransformError> {
        let Some(orientation) = orientation else {
            return Ok(());
        };
        let offset = surface.offset(orientation.element)?;
        let size = surface.size(orientation.element)?;
        self.show(orientation, offset, size);
        Ok(())
    }

    /// Hide every part. Positions are kept.
    pub fn hide(&mut self) {
        for marker in &mut self.markers {
            marker.visible = false;
        }
        self.outline_visible = false;
        self.pivot_visible = false;
    }

    /// Whether any part of the overlay is showing.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.outline_visible || self.pivot_visible || self.markers.iter().any(|m| m.visible)
    }

    /// All eight markers, clockwise from north.
    #[must_use]
    pub fn markers(&self) -> &[Marker; 8] {
        &self.markers
    }

    /// The marker for one handle.
    #[must_use]
    pub fn marker(&self, direction: CompassDirection) -> &Marker {
        // `markers` is built from `CompassDirection::ALL`, so the index matches.
        &self.markers[direction as usize]
    }

    /// The outline, or `None` while hidden.
    #[must_use]
    pub fn outline(&self) -> Option<BoundingBox> {
        self.outline_visible.then_some(self.outline)
    }

    /// The pivot, or `None` while hidden.
    #[must_use]
    pub fn pivot(&self) -> Option<Point> {
        self.pivot_visible.then_some(self.pivot)
    }
}
