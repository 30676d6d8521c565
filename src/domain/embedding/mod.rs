//! Embedding domain - query vectorization for retrieval

mod provider;

use serde::{Deserialize, Serialize};

pub use provider::EmbeddingProvider;

#[cfg(test)]
pub use provider::mock::MockEmbeddingProvider;

/// Request for a single text embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    model: String,
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: input.into(),
            dimensions: None,
        }
    }

    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }
}

/// Token usage for an embedding call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbeddingUsage {
    pub prompt_tokens: u32,
    pub total_tokens: u32,
}

impl EmbeddingUsage {
    pub fn new(prompt_tokens: u32, total_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            total_tokens,
        }
    }
}

/// Response from an embedding provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    model: String,
    vector: Vec<f32>,
    usage: EmbeddingUsage,
}

impl EmbeddingResponse {
    pub fn new(model: impl Into<String>, vector: Vec<f32>, usage: EmbeddingUsage) -> Self {
        Self {
            model: model.into(),
            vector,
            usage,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    pub fn into_vector(self) -> Vec<f32> {
        self.vector
    }

    pub fn usage(&self) -> &EmbeddingUsage {
        &self.usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accessors() {
        let request = EmbeddingRequest::new("text-embedding-ada-002", "library hours")
            .with_dimensions(1536);

        assert_eq!(request.model(), "text-embedding-ada-002");
        assert_eq!(request.input(), "library hours");
        assert_eq!(request.dimensions(), Some(1536));
    }

    #[test]
    fn test_response_vector() {
        let response = EmbeddingResponse::new(
            "text-embedding-ada-002",
            vec![0.1, 0.2, 0.3],
            EmbeddingUsage::new(3, 3),
        );

        assert_eq!(response.vector().len(), 3);
        assert_eq!(response.usage().total_tokens, 3);
        assert_eq!(response.into_vector(), vec![0.1, 0.2, 0.3]);
    }
}
