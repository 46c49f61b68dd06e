//! Points, vector operations and angle helpers.
//!
//! Angles are radians measured clockwise from north in screen space (y grows
//! downward), so `0` points up and `π/2` points right.

#[cfg(test)]
#[path = "math_test.rs"]
mod math_test;

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::{FULL_ANGLE, RIGHT_ANGLE};

/// A point or a displacement vector in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product with `other`.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        v_add(self, rhs)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        v_subtract(self, rhs)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Wrap `angle` into `[0, 2π)`, whatever its sign or number of turns.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(FULL_ANGLE);
    // Tiny negative inputs round up to exactly 2π.
    if wrapped >= FULL_ANGLE { 0.0 } else { wrapped }
}

/// Componentwise sum.
#[must_use]
pub fn v_add(a: Point, b: Point) -> Point {
    Point { x: a.x + b.x, y: a.y + b.y }
}

/// Componentwise difference `a - b`.
#[must_use]
pub fn v_subtract(a: Point, b: Point) -> Point {
    Point { x: a.x - b.x, y: a.y - b.y }
}

/// Rotate `v` by `angle` about the origin.
#[must_use]
pub fn v_rotate(v: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point { x: v.x * cos - v.y * sin, y: v.x * sin + v.y * cos }
}

/// The component of `v` along the unit vector `direction`.
#[must_use]
pub fn v_project(v: Point, direction: Point) -> Point {
    direction * v_scalar_projection(v, direction)
}

/// Signed length of `v` along the unit vector `direction`.
#[must_use]
pub fn v_scalar_projection(v: Point, direction: Point) -> f64 {
    v.dot(direction)
}

/// Compass angle of `v`: `0` for straight up, `π/2` for straight right.
#[must_use]
pub fn angular_direction(v: Point) -> f64 {
    normalize_angle(v.y.atan2(v.x) + RIGHT_ANGLE)
}
