// Provider Error Types

use subtitler_providers::ProviderClientError;

/// Provider-level errors
///
/// Only download paths surface these to callers; searches log them and
/// degrade to an empty result.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error(transparent)]
    Client(#[from] ProviderClientError),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Provider disabled: {0}")]
    Disabled(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Deadline exceeded")]
    DeadlineExceeded,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Client(err.into())
    }
}
