use async_trait::async_trait;
use std::fmt::Debug;

use super::{GenerationRequest, GenerationResponse};
use crate::domain::DomainError;

/// Trait for hosted completion services (Azure OpenAI deployments, etc.)
///
/// One synchronous round trip per call: no streaming, no retries. Quota and
/// rate-limit failures must surface as `DomainError::QuotaExceeded` and
/// `DomainError::RateLimited` so callers can distinguish them from generic
/// transport failures.
#[async_trait]
pub trait CompletionProvider: Send + Sync + Debug {
    /// Send a chat completion request to the given deployment/model.
    async fn complete(
        &self,
        deployment: &str,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
