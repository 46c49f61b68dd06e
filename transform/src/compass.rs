//! Compass rose: handle directions, their angles, and resize cursors.
//!
//! The eight principal winds name the handles around an element. The eight
//! half-winds between them (`nne`, `ene`, ...) are only used as thresholds
//! when classifying an arbitrary angle back into a principal wind, which is
//! how a handle's cursor keeps pointing the right way while the element turns.

#[cfg(test)]
#[path = "compass_test.rs"]
mod compass_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bounds::Size;
use crate::consts::{EIGHTH_TURN, RIGHT_ANGLE, SIXTEENTH_TURN};
use crate::error::TransformError;
use crate::math::{Point, normalize_angle};

/// One of the 16 points of the compass rose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassPoint {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

impl CompassPoint {
    /// Angle in radians, clockwise from north.
    #[must_use]
    pub fn angle(self) -> f64 {
        let n = 0.0;
        let e = 2.0 * EIGHTH_TURN;
        let s = 4.0 * EIGHTH_TURN;
        let w = 6.0 * EIGHTH_TURN;
        match self {
            Self::N => n,
            Self::E => e,
            Self::S => s,
            Self::W => w,
            Self::Ne => n + EIGHTH_TURN,
            Self::Se => e + EIGHTH_TURN,
            Self::Sw => s + EIGHTH_TURN,
            Self::Nw => w + EIGHTH_TURN,
            Self::Nne => n + SIXTEENTH_TURN,
            Self::Ene => n + EIGHTH_TURN + SIXTEENTH_TURN,
            Self::Ese => e + EIGHTH_TURN - SIXTEENTH_TURN,
            Self::Sse => s - SIXTEENTH_TURN,
            Self::Ssw => s + EIGHTH_TURN - SIXTEENTH_TURN,
            Self::Wsw => w - SIXTEENTH_TURN,
            Self::Wnw => w + SIXTEENTH_TURN,
            Self::Nnw => w + EIGHTH_TURN + SIXTEENTH_TURN,
        }
    }
}

/// A principal wind: the position of one of the eight resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompassDirection {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl CompassDirection {
    /// All eight handles, clockwise from north.
    pub const ALL: [Self; 8] = [Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W, Self::Nw];

    /// The rose point this handle sits on.
    #[must_use]
    pub fn point(self) -> CompassPoint {
        match self {
            Self::N => CompassPoint::N,
            Self::Ne => CompassPoint::Ne,
            Self::E => CompassPoint::E,
            Self::Se => CompassPoint::Se,
            Self::S => CompassPoint::S,
            Self::Sw => CompassPoint::Sw,
            Self::W => CompassPoint::W,
            Self::Nw => CompassPoint::Nw,
        }
    }

    /// Base angle of this handle on an unrotated element.
    #[must_use]
    pub fn angle(self) -> f64 {
        self.point().angle()
    }

    /// Whether this is one of `n`, `e`, `s`, `w`.
    #[must_use]
    pub fn is_cardinal(self) -> bool {
        matches!(self, Self::N | Self::E | Self::S | Self::W)
    }

    /// Lowercase short name (`"n"`, `"ne"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }

    /// Offset of this handle from the element center before rotation.
    #[must_use]
    pub fn handle_offset(self, size: Size) -> Point {
        let half_w = size.width / 2.0;
        let half_h = size.height / 2.0;
        match self {
            Self::N => Point::new(0.0, -half_h),
            Self::Ne => Point::new(half_w, -half_h),
            Self::E => Point::new(half_w, 0.0),
            Self::Se => Point::new(half_w, half_h),
            Self::S => Point::new(0.0, half_h),
            Self::Sw => Point::new(-half_w, half_h),
            Self::W => Point::new(-half_w, 0.0),
            Self::Nw => Point::new(-half_w, -half_h),
        }
    }

    /// Resize cursor shown for a handle that currently points this way.
    #[must_use]
    pub fn cursor(self) -> Cursor {
        match self {
            Self::N | Self::S => Cursor::NsResize,
            Self::E | Self::W => Cursor::EwResize,
            Self::Ne => Cursor::NeResize,
            Self::Se => Cursor::SeResize,
            Self::Sw => Cursor::SwResize,
            Self::Nw => Cursor::NwResize,
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompassDirection {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TransformError::UnknownDirection(s.to_string()))
    }
}

/// Resize cursor icon for a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cursor {
    NsResize,
    EwResize,
    NeResize,
    SeResize,
    SwResize,
    NwResize,
}

impl Cursor {
    /// CSS cursor keyword.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::NsResize => "ns-resize",
            Self::EwResize => "ew-resize",
            Self::NeResize => "ne-resize",
            Self::SeResize => "se-resize",
            Self::SwResize => "sw-resize",
            Self::NwResize => "nw-resize",
        }
    }
}

/// The principal wind that `base` points to after turning by `rotation`.
#[must_use]
pub fn rotate_direction(base: CompassDirection, rotation: f64) -> CompassDirection {
    let angle = normalize_angle(base.angle() + rotation);
    if angle < CompassPoint::Nne.angle() {
        CompassDirection::N
    } else if angle < CompassPoint::Ene.angle() {
        CompassDirection::Ne
    } else if angle < CompassPoint::Ese.angle() {
        CompassDirection::E
    } else if angle < CompassPoint::Sse.angle() {
        CompassDirection::Se
    } else if angle < CompassPoint::Ssw.angle() {
        CompassDirection::S
    } else if angle < CompassPoint::Wsw.angle() {
        CompassDirection::Sw
    } else if angle < CompassPoint::Wnw.angle() {
        CompassDirection::W
    } else if angle < CompassPoint::Nnw.angle() {
        CompassDirection::Nw
    } else {
        CompassDirection::N
    }
}

/// Unit vector pointing along the compass `angle`.
///
/// Inverse of [`crate::math::angular_direction`]: `0` gives `(0, -1)` and
/// `π/2` gives `(1, 0)`.
#[must_use]
pub fn direction_vector(angle: f64) -> Point {
    let (sin, cos) = (normalize_angle(angle) - RIGHT_ANGLE).sin_cos();
    Point::new(cos, sin)
}
