//! Azure OpenAI embedding provider implementation

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::EmbeddingSettings;
use crate::domain::embedding::{
    EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage,
};
use crate::domain::DomainError;
use crate::infrastructure::http::HttpClientTrait;
use crate::infrastructure::llm::map_http_error;

const PROVIDER_NAME: &str = "azure_openai_embedding";

/// Known embedding models and their dimensions
const EMBEDDING_MODELS: &[(&str, usize)] = &[
    ("text-embedding-ada-002", 1536),
    ("text-embedding-3-small", 1536),
    ("text-embedding-3-large", 3072),
];

/// Azure OpenAI embedding provider. A separate deployment (and often a
/// separate resource) from the completion deployment.
#[derive(Debug)]
pub struct AzureOpenAiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    settings: EmbeddingSettings,
}

impl<C: HttpClientTrait> AzureOpenAiEmbeddingProvider<C> {
    pub fn new(client: C, settings: EmbeddingSettings) -> Self {
        Self { client, settings }
    }

    fn embeddings_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/embeddings?api-version={}",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.deployment,
            self.settings.api_version
        )
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("api-key", self.settings.api_key.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn build_request(&self, request: &EmbeddingRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": request.model(),
            "input": request.input(),
        });

        if let Some(dims) = request.dimensions() {
            body["dimensions"] = serde_json::json!(dims);
        }

        body
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<EmbeddingResponse, DomainError> {
        let response: AzureEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider(
                PROVIDER_NAME,
                format!("Failed to parse embedding response: {}", e),
            )
        })?;

        let vector = response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| DomainError::provider(PROVIDER_NAME, "No embedding in response"))?;

        let usage = EmbeddingUsage::new(response.usage.prompt_tokens, response.usage.total_tokens);

        Ok(EmbeddingResponse::new(response.model, vector, usage))
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for AzureOpenAiEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let url = self.embeddings_url();
        let body = self.build_request(&request);

        let response = self
            .client
            .post_json(&url, self.headers(), &body)
            .await
            .map_err(|e| map_http_error(PROVIDER_NAME, e))?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn default_model(&self) -> &'static str {
        "text-embedding-ada-002"
    }

    fn dimensions(&self, model: &str) -> Option<usize> {
        EMBEDDING_MODELS
            .iter()
            .find(|(name, _)| *name == model)
            .map(|(_, dims)| *dims)
    }
}

// Azure OpenAI API types for embeddings

#[derive(Debug, Deserialize)]
struct AzureEmbeddingResponse {
    model: String,
    data: Vec<AzureEmbeddingData>,
    usage: AzureEmbeddingUsage,
}

#[derive(Debug, Deserialize)]
struct AzureEmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct AzureEmbeddingUsage {
    prompt_tokens: u32,
    total_tokens: u32,
}
