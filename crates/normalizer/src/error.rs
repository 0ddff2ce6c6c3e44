use thiserror::Error;

/// Document-level failures. Field-level problems never surface here; they are
/// coerced to safe defaults instead.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Project document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Project document has an invalid shape: {0}")]
    InvalidDocument(String),
}
