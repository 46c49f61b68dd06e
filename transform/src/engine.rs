//! Single-gesture session over a surface and its overlay.
//!
//! [`Transformer`] wraps the free functions of [`crate::operation`] and owns
//! the active [`Operation`], so hosts only forward pointer events.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::compass::CompassDirection;
use crate::error::TransformError;
use crate::operation::{self, Operation};
use crate::overlay::Overlay;
use crate::surface::{ElementId, Surface};

/// A surface, its overlay, and at most one gesture in progress.
///
/// The free functions in [`operation`] leave it to the caller to run one
/// gesture at a time. `Transformer` enforces that: starting a second gesture
/// fails with [`TransformError::GestureInProgress`], and samples with no
/// gesture fail with [`TransformError::NoActiveGesture`].
pub struct Transformer<S: Surface> {
    pub surface: S,
    pub overlay: Overlay,
    operation: Option<Operation>,
}

impl<S: Surface + Default> Default for Transformer<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: Surface> Transformer<S> {
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self { surface, overlay: Overlay::new(), operation: None }
    }

    // --- Gesture start ---

    /// Start drawing a new element from `(x, y)`. Returns its id.
    ///
    /// # Errors
    ///
    /// Returns `GestureInProgress` when a gesture is already active.
    pub fn begin_create(&mut self, x: f64, y: f64) -> Result<ElementId, TransformError> {
        self.ensure_idle()?;
        let op = operation::start_creating(&mut self.surface, x, y);
        Ok(self.activate(op))
    }

    /// Start rotating `element`, grabbed at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns `GestureInProgress` when a gesture is already active, or the
    /// error from [`operation::start_rotating`].
    pub fn begin_rotate(&mut self, element: ElementId, x: f64, y: f64) -> Result<ElementId, TransformError> {
        self.ensure_idle()?;
        let op = operation::start_rotating(&mut self.surface, element, x, y)?;
        Ok(self.activate(op))
    }

    /// Start dragging `handle` of `element`, grabbed at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns `GestureInProgress` when a gesture is already active, or the
    /// error from [`operation::start_resizing`].
    pub fn begin_resize(
        &mut self,
        element: ElementId,
        handle: CompassDirection,
        x: f64,
        y: f64,
    ) -> Result<ElementId, TransformError> {
        self.ensure_idle()?;
        let op = operation::start_resizing(&mut self.surface, element, handle, x, y)?;
        Ok(self.activate(op))
    }

    /// Start moving `element`, grabbed at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns `GestureInProgress` when a gesture is already active, or the
    /// error from [`operation::start_moving`].
    pub fn begin_move(&mut self, element: ElementId, x: f64, y: f64) -> Result<ElementId, TransformError> {
        self.ensure_idle()?;
        let op = operation::start_moving(&mut self.surface, element, x, y)?;
        Ok(self.activate(op))
    }

    // --- Pointer events ---

    /// Feed a pointer sample to the active gesture.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveGesture` when idle, or the error from [`operation::update`].
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<(), TransformError> {
        let op = self.operation.as_mut().ok_or(TransformError::NoActiveGesture)?;
        operation::update(&mut self.surface, &mut self.overlay, op, x, y)
    }

    /// Finish the active gesture and return the manipulated element.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveGesture` when idle, or the error from [`operation::end`].
    /// The gesture is over either way.
    pub fn pointer_up(&mut self) -> Result<ElementId, TransformError> {
        let op = self.operation.take().ok_or(TransformError::NoActiveGesture)?;
        operation::end(&mut self.surface, &mut self.overlay, op)
    }

    /// Abandon the active gesture, if any. Returns the element it was manipulating.
    pub fn cancel(&mut self) -> Option<ElementId> {
        let op = self.operation.take()?;
        Some(operation::cancel(&mut self.surface, &mut self.overlay, op))
    }

    // --- Queries ---

    /// The gesture in progress, if any.
    #[must_use]
    pub fn operation(&self) -> Option<&Operation> {
        self.operation.as_ref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.operation.is_some()
    }

    /// Give back the surface, dropping any gesture in progress.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn ensure_idle(&self) -> Result<(), TransformError> {
        if self.operation.is_some() {
            return Err(TransformError::GestureInProgress);
        }
        Ok(())
    }

    fn activate(&mut self, op: Operation) -> ElementId {
        let element = op.element();
        self.operation = Some(op);
        element
    }
}
