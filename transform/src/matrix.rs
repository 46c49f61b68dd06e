//! 2D affine matrices and the `matrix(...)` transform descriptor.
//!
//! A matrix
//!
//! ```text
//! | a  b  tx |
//! | c  d  ty |
//! ```
//!
//! is stored column-major as the sequence `[a c b d tx ty]`: `<a c>` is the
//! image of the x axis, `<b d>` the image of the y axis, and `<tx ty>` the
//! translation. That is also the parameter order of the textual form
//! `matrix(a, c, b, d, tx, ty)`.

#[cfg(test)]
#[path = "matrix_test.rs"]
mod matrix_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{HALF_ANGLE, RIGHT_ANGLE};
use crate::error::TransformError;
use crate::math::{Point, normalize_angle};
use crate::surface::{ElementId, Surface};

/// A 2×3 affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMatrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

/// The pieces of a transform, applied in the fixed order
/// rotate → translate → scale → skew. Absent pieces are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transformation {
    /// Clockwise rotation in radians.
    pub rotation: Option<f64>,
    pub translation: Option<Point>,
    /// Horizontal and vertical scale factors.
    pub scale: Option<Point>,
    /// Skew angles in radians along x and y.
    pub skew: Option<Point>,
}

impl Transformation {
    /// A pure rotation.
    #[must_use]
    pub fn rotation(angle: f64) -> Self {
        Self { rotation: Some(angle), ..Self::default() }
    }
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::STANDARD_BASIS
    }
}

impl AffineMatrix {
    /// The identity transform every matrix is built from.
    pub const STANDARD_BASIS: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, tx: 0.0, ty: 0.0 };

    /// Build from the column-major sequence `[a c b d tx ty]`.
    #[must_use]
    pub fn from_array([a, c, b, d, tx, ty]: [f64; 6]) -> Self {
        Self { a, b, c, d, tx, ty }
    }

    /// The column-major sequence `[a c b d tx ty]`.
    #[must_use]
    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.c, self.b, self.d, self.tx, self.ty]
    }

    /// Compose `self · other`: `other` is applied first, in `self`'s frame.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            tx: self.a * other.tx + self.b * other.ty + self.tx,
            ty: self.c * other.tx + self.d * other.ty + self.ty,
        }
    }

    #[must_use]
    pub fn rotate(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        self.multiply(&Self { a: cos, b: -sin, c: sin, d: cos, tx: 0.0, ty: 0.0 })
    }

    #[must_use]
    pub fn translate(&self, by: Point) -> Self {
        self.multiply(&Self { tx: by.x, ty: by.y, ..Self::STANDARD_BASIS })
    }

    #[must_use]
    pub fn scale(&self, by: Point) -> Self {
        self.multiply(&Self { a: by.x, d: by.y, ..Self::STANDARD_BASIS })
    }

    /// Skew by `angles.x` along the x axis and `angles.y` along the y axis.
    #[must_use]
    pub fn skew(&self, angles: Point) -> Self {
        self.multiply(&Self { b: angles.x.tan(), c: angles.y.tan(), ..Self::STANDARD_BASIS })
    }

    /// Build the matrix for `transformation` from the standard basis.
    #[must_use]
    pub fn from_transformation(transformation: &Transformation) -> Self {
        let mut matrix = Self::STANDARD_BASIS;
        if let Some(angle) = transformation.rotation {
            matrix = matrix.rotate(angle);
        }
        if let Some(by) = transformation.translation {
            matrix = matrix.translate(by);
        }
        if let Some(by) = transformation.scale {
            matrix = matrix.scale(by);
        }
        if let Some(angles) = transformation.skew {
            matrix = matrix.skew(angles);
        }
        matrix
    }

    /// Map `p` through this transform.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(self.a * p.x + self.b * p.y + self.tx, self.c * p.x + self.d * p.y + self.ty)
    }

    /// The textual `matrix(a, c, b, d, tx, ty)` descriptor.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.to_string()
    }

    /// Parse a transform property value.
    ///
    /// Returns `Ok(None)` for an empty value or `none`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedMatrix` for anything other than a six-parameter
    /// `matrix(...)` with numeric arguments.
    pub fn parse(value: &str) -> Result<Option<Self>, TransformError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(None);
        }

        let malformed = || TransformError::MalformedMatrix(value.to_string());
        let args = trimmed
            .strip_prefix("matrix(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(malformed)?;

        let mut elements = [0.0; 6];
        let mut count = 0;
        for part in args.split(',') {
            let slot = elements.get_mut(count).ok_or_else(malformed)?;
            *slot = part.trim().parse::<f64>().map_err(|_| malformed())?;
            count += 1;
        }
        if count != elements.len() {
            return Err(malformed());
        }
        Ok(Some(Self::from_array(elements)))
    }

    /// Clockwise rotation encoded by this matrix, in `[0, 2π)`.
    #[must_use]
    pub fn rotation_angle(&self) -> f64 {
        get_rotation_angle(&self.to_array())
    }
}

impl fmt::Display for AffineMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, c, b, d, tx, ty] = self.to_array();
        write!(f, "matrix({a}, {c}, {b}, {d}, {tx}, {ty})")
    }
}

/// Recover the rotation from a column-major `[a c b d tx ty]` sequence.
///
/// The arctangent alone only determines the angle modulo a half turn; the
/// sign of `a` (the x axis pointing left) selects the other half. A zero `d`
/// resolves to a quarter turn signed like `c`, or to zero when `c` is also
/// zero.
#[must_use]
pub fn get_rotation_angle(matrix: &[f64; 6]) -> f64 {
    let [a, c, _, d, _, _] = *matrix;

    let mut rotation = if d == 0.0 {
        if c > 0.0 {
            RIGHT_ANGLE
        } else if c < 0.0 {
            -RIGHT_ANGLE
        } else {
            0.0
        }
    } else {
        (c / d).atan()
    };

    if a < 0.0 {
        rotation += HALF_ANGLE;
    }

    normalize_angle(rotation)
}

/// Current rotation of an element, read back from its transform property.
/// An element with no transform is unrotated.
///
/// # Errors
///
/// Returns `ElementNotFound` for an unknown id and `MalformedMatrix` when the
/// stored transform cannot be parsed.
pub fn element_rotation<S: Surface + ?Sized>(surface: &S, id: ElementId) -> Result<f64, TransformError> {
    let Some(value) = surface.transform(id)? else {
        return Ok(0.0);
    };
    Ok(AffineMatrix::parse(&value)?.map_or(0.0, |matrix| matrix.rotation_angle()))
}
