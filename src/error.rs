use thiserror::Error;

/// Failure reported by the remote mail provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("could not decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("label '{0}' not found")]
    MissingLabel(String),
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// User input rejected before any remote call.
    #[error("{0}")]
    Validation(String),

    /// Internal invariant broken; a bug, not a user error.
    #[error("precondition violated: {0}")]
    Precondition(String),
}

impl ClientError {
    pub fn is_precondition(&self) -> bool {
        matches!(self, ClientError::Precondition(_))
    }
}
