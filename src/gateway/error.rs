use thiserror::Error;

/// Failure normalized by the gateway. Raw parse and transport errors never
/// escape; each variant carries a message fit for the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// Missing, placeholder, or rejected credentials. Never retried.
    #[error("{0}")]
    Unauthorized(String),
    /// The response was not JSON or did not match the expected shape.
    #[error("{0}")]
    MalformedResponse(String),
    /// Network or service-side failure.
    #[error("{0}")]
    ProviderError(String),
    #[error("{last} (gave up after {attempts} attempts)")]
    ExhaustedRetries {
        attempts: u32,
        last: Box<GatewayError>,
    },
}

impl GatewayError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::MalformedResponse(_) | Self::ProviderError(_))
    }

    pub(crate) fn not_configured() -> Self {
        Self::Unauthorized(
            "Gemini API key not configured. Please add your key to .env file.".to_string(),
        )
    }

    pub(crate) fn invalid_key() -> Self {
        Self::Unauthorized("Invalid Gemini API key".to_string())
    }

    /// The innermost error, looking through `ExhaustedRetries`.
    pub fn root(&self) -> &GatewayError {
        match self {
            Self::ExhaustedRetries { last, .. } => last.root(),
            other => other,
        }
    }
}

/// Transport-level failure reported by a [`TextProvider`](super::TextProvider).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderFailure {
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("provider returned an empty response")]
    EmptyResponse,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ProviderFailure {
    /// Whether the failure means the credentials were rejected.
    pub fn is_credential_failure(&self) -> bool {
        match self {
            Self::Status { status, message } => {
                matches!(status, 401 | 403) || message.contains("API key")
            }
            other => other.to_string().contains("API key"),
        }
    }
}
