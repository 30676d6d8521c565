use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Quota exceeded for {provider}")]
    QuotaExceeded { provider: String },

    #[error("Rate limited by {provider}")]
    RateLimited { provider: String },

    #[error("Retrieval error: {message}")]
    Retrieval { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn quota_exceeded(provider: impl Into<String>) -> Self {
        Self::QuotaExceeded {
            provider: provider.into(),
        }
    }

    pub fn rate_limited(provider: impl Into<String>) -> Self {
        Self::RateLimited {
            provider: provider.into(),
        }
    }

    pub fn retrieval(message: impl Into<String>) -> Self {
        Self::Retrieval {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the failure came from exhausting the completion service's
    /// quota or rate limits. Callers use this to show a "service busy"
    /// message instead of a generic failure.
    pub fn is_capacity_error(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. } | Self::RateLimited { .. })
    }
}
