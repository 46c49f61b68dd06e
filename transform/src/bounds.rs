//! Element sizes and the axis-aligned box around a rotated element.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use serde::{Deserialize, Serialize};

use crate::consts::{HALF_ANGLE, RIGHT_ANGLE};
use crate::math::{Point, normalize_angle};

/// Unrotated width and height of an element. Either may be negative while a
/// create or resize gesture drags past the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Top-left corner.
    #[must_use]
    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// The box enclosing an element of `size` at `offset` turned by `angle`.
///
/// The box keeps the element's offset as its top-left corner: rotation is
/// taken to pivot about the element's center, and the anchor is not
/// re-derived from the rotated corners. Negative extents count as zero, so a
/// size dragged inside out yields a zero-area box rather than a negative one.
#[must_use]
pub fn compute_bounding_box(offset: Point, size: Size, angle: f64) -> BoundingBox {
    let mut w = size.width.max(0.0);
    let mut h = size.height.max(0.0);
    let mut angle = normalize_angle(angle);

    if angle >= HALF_ANGLE {
        angle -= HALF_ANGLE;
    }
    if angle >= RIGHT_ANGLE {
        angle -= RIGHT_ANGLE;
        std::mem::swap(&mut w, &mut h);
    }

    // cos(right - a) == sin(a), sin(right - a) == cos(a)
    let (sin, cos) = angle.sin_cos();
    BoundingBox { x: offset.x, y: offset.y, width: w * cos + h * sin, height: w * sin + h * cos }
}

/// Center of `bounds`.
#[must_use]
pub fn compute_origin(bounds: &BoundingBox) -> Point {
    Point::new(bounds.x + bounds.width / 2.0, bounds.y + bounds.height / 2.0)
}
