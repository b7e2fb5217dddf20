use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure or a non-2xx backend response. The display string is
    /// the backend's `message` field when one was present.
    #[error("{0}")]
    Http(Box<dyn std::error::Error + Send + Sync>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
