use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A scored document returned by the vector store
///
/// Produced fresh per query; the pipeline never persists these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    /// Unique identifier of the stored point
    pub id: String,
    /// Content text
    pub content: String,
    /// Similarity score (0.0 - 1.0, higher is more similar)
    pub score: f32,
    /// Free-form payload metadata
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
    /// Source document reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl RetrievedDocument {
    pub fn new(id: impl Into<String>, content: impl Into<String>, score: f32) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            score,
            metadata: HashMap::new(),
            source: None,
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Metadata value as a string, if present and a string.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(|v| v.as_str())
    }
}
