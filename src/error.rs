use transform::TransformError;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read script {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("invalid script JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("failed to render report: {0}")]
    Render(serde_json::Error),
    #[error("unknown element `{0}`")]
    UnknownElement(String),
    #[error("element name `{0}` is already taken")]
    DuplicateName(String),
    #[error("gesture {index} ({mode}) failed: {source}")]
    Gesture { index: usize, mode: &'static str, source: TransformError },
}
