//! Shared numeric constants for the transform crate.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8, PI, TAU};

// ── Angles ──────────────────────────────────────────────────────

/// A quarter turn (90°).
pub const RIGHT_ANGLE: f64 = FRAC_PI_2;

/// A half turn (180°).
pub const HALF_ANGLE: f64 = PI;

/// A full turn (360°). Normalized angles are strictly below this.
pub const FULL_ANGLE: f64 = TAU;

// ── Compass ─────────────────────────────────────────────────────

/// Angular width of one principal wind (45°).
pub const EIGHTH_TURN: f64 = FRAC_PI_4;

/// Half a principal wind (22.5°); offset of the classification thresholds.
pub const SIXTEENTH_TURN: f64 = FRAC_PI_8;
