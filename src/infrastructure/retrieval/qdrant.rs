//! Qdrant vector store implementation over the REST API

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::config::QdrantSettings;
use crate::domain::retrieval::{RetrievedDocument, SearchParams, VectorSearchProvider};
use crate::domain::DomainError;
use crate::infrastructure::http::HttpClientTrait;

/// Qdrant-backed vector store. Talks to the points API of a single
/// collection; scores come back as cosine similarity in [0, 1].
#[derive(Debug)]
pub struct QdrantVectorStore<C: HttpClientTrait> {
    client: C,
    settings: QdrantSettings,
}

impl<C: HttpClientTrait> QdrantVectorStore<C> {
    pub fn new(client: C, settings: QdrantSettings) -> Self {
        Self { client, settings }
    }

    fn search_url(&self) -> String {
        format!(
            "{}/collections/{}/points/search",
            self.settings.url.trim_end_matches('/'),
            self.settings.collection
        )
    }

    fn upsert_url(&self) -> String {
        format!(
            "{}/collections/{}/points?wait=true",
            self.settings.url.trim_end_matches('/'),
            self.settings.collection
        )
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];
        if let Some(ref key) = self.settings.api_key {
            headers.push(("api-key", key.as_str()));
        }
        headers
    }

    fn parse_search_response(
        &self,
        json: serde_json::Value,
    ) -> Result<Vec<RetrievedDocument>, DomainError> {
        let response: QdrantSearchResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::retrieval(format!("Failed to parse Qdrant response: {}", e))
        })?;

        let documents = response
            .result
            .into_iter()
            .map(|point| {
                let id = match point.id {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };

                let mut payload = point.payload.unwrap_or_default();
                let content = payload
                    .remove("content")
                    .and_then(|v| v.as_str().map(String::from))
                    .unwrap_or_default();
                let source = payload
                    .get("source")
                    .and_then(|v| v.as_str().map(String::from));

                RetrievedDocument {
                    id,
                    content,
                    score: point.score,
                    metadata: payload,
                    source,
                }
            })
            .collect();

        Ok(documents)
    }

    /// Embed-and-store entry point for administrative content loading. The
    /// caller provides the already-computed vector; the payload carries the
    /// text, its source tag, and an insertion timestamp.
    pub async fn upsert(
        &self,
        vector: Vec<f32>,
        content: impl Into<String>,
        source: Option<String>,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Result<String, DomainError> {
        let id = Uuid::new_v4().to_string();

        let mut payload = serde_json::Map::new();
        payload.insert("content".to_string(), serde_json::json!(content.into()));
        payload.insert(
            "inserted_at".to_string(),
            serde_json::json!(Utc::now().to_rfc3339()),
        );
        if let Some(source) = source {
            payload.insert("source".to_string(), serde_json::json!(source));
        }
        for (key, value) in metadata {
            payload.entry(key).or_insert(value);
        }

        let body = serde_json::json!({
            "points": [{
                "id": id,
                "vector": vector,
                "payload": payload,
            }]
        });

        self.client
            .put_json(&self.upsert_url(), self.headers(), &body)
            .await
            .map_err(|e| DomainError::retrieval(format!("Qdrant upsert failed: {}", e)))?;

        debug!(collection = %self.settings.collection, point_id = %id, "Upserted point");

        Ok(id)
    }
}

#[async_trait]
impl<C: HttpClientTrait> VectorSearchProvider for QdrantVectorStore<C> {
    async fn search(
        &self,
        vector: Vec<f32>,
        params: &SearchParams,
    ) -> Result<Vec<RetrievedDocument>, DomainError> {
        let mut body = serde_json::json!({
            "vector": vector,
            "limit": params.top_k,
            "with_payload": true,
        });

        if let Some(threshold) = params.score_threshold {
            body["score_threshold"] = serde_json::json!(threshold);
        }

        let response = self
            .client
            .post_json(&self.search_url(), self.headers(), &body)
            .await
            .map_err(|e| DomainError::retrieval(format!("Qdrant search failed: {}", e)))?;

        let documents = self.parse_search_response(response)?;

        debug!(
            collection = %self.settings.collection,
            results = documents.len(),
            "Vector search completed"
        );

        Ok(documents)
    }

    fn collection(&self) -> &str {
        &self.settings.collection
    }
}

// Qdrant REST API types

#[derive(Debug, Deserialize)]
struct QdrantSearchResponse {
    result: Vec<QdrantScoredPoint>,
}

#[derive(Debug, Deserialize)]
struct QdrantScoredPoint {
    id: serde_json::Value,
    score: f32,
    payload: Option<HashMap<String, serde_json::Value>>,
}
