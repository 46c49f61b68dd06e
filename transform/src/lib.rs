//! Affine transform engine for interactive object manipulation.
//!
//! This crate owns the geometry behind the four drag gestures (create,
//! rotate, resize, move) applied to a rectangular element: rotated bounding
//! boxes, rotation recovered from a stored transform matrix, drag deltas
//! projected onto handle directions, and the eight compass handles that follow
//! the element as it turns. The host is responsible only for painting: it
//! implements [`surface::Surface`] and forwards pointer samples.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Single-gesture session wrapping surface, overlay and the active operation |
//! | [`operation`] | The gesture state machine: `start_*` → `update_*` → `end_*` |
//! | [`overlay`] | Handle markers, pivot and bounding outline placement |
//! | [`surface`] | Rendering surface trait and the in-memory element store |
//! | [`matrix`] | 2×3 affine matrices and the `matrix(...)` string codec |
//! | [`bounds`] | Sizes, rotated bounding boxes and their centers |
//! | [`compass`] | Compass rose, handle directions and resize cursors |
//! | [`math`] | Points, vector operations and angle normalization |
//! | [`consts`] | Shared angle constants |
//! | [`error`] | Error type shared by the fallible operations |

pub mod bounds;
pub mod compass;
pub mod consts;
pub mod engine;
pub mod error;
pub mod math;
pub mod matrix;
pub mod operation;
pub mod overlay;
pub mod surface;

pub use error::TransformError;
