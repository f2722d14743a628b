use thiserror::Error;

/// Fallback text used when a failure carries no message of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("API key is required")]
    MissingCredential,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The bare message, without the variant prefix, as returned in HTTP
    /// error bodies. Falls back to [`GENERIC_ERROR_MESSAGE`] when empty.
    pub fn detail(&self) -> String {
        let detail = match self {
            Self::MissingCredential => return self.to_string(),
            Self::InvalidInput(msg)
            | Self::Provider(msg)
            | Self::Transport(msg)
            | Self::MalformedResponse(msg)
            | Self::Internal(msg) => msg.trim(),
        };

        if detail.is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            detail.to_string()
        }
    }

    /// Client-side errors: the request never reached a provider.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::MissingCredential | Self::InvalidInput(_))
    }
}
