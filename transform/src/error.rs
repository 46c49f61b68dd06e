use crate::surface::ElementId;

/// Errors returned by surface lookups, the matrix codec and the gesture session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// The surface holds no element with this id.
    #[error("element not found: {0}")]
    ElementNotFound(ElementId),
    /// The transform property is not a six-parameter `matrix(...)` descriptor.
    #[error("malformed transform matrix: {0:?}")]
    MalformedMatrix(String),
    /// The name is not one of the eight principal winds.
    #[error("unknown compass direction: {0:?}")]
    UnknownDirection(String),
    /// A gesture was started while another one is still active.
    #[error("a gesture is already in progress")]
    GestureInProgress,
    /// A pointer sample or release arrived with no gesture active.
    #[error("no gesture in progress")]
    NoActiveGesture,
}
