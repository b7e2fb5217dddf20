use thiserror::Error;

/// Terminal capture failures, surfaced verbatim to the view. None of these
/// are retried by the core: permission must be granted out-of-band, and an
/// absent capability disables the feature rather than crashing it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Speech recognition not supported.")]
    NotSupported,

    #[error("Microphone permission denied.")]
    PermissionDenied,

    #[error("Speech error: {0}")]
    Other(String),
}
