//! HTTP client seam shared by the Azure OpenAI and Qdrant backends

use async_trait::async_trait;
use thiserror::Error;

/// Failure of a single HTTP round trip. Providers translate these into
/// domain errors; status codes are kept so quota and rate-limit responses
/// stay distinguishable.
#[derive(Debug, Error)]
pub enum HttpCallError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    Parse(String),
}

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, HttpCallError>;

    async fn put_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, HttpCallError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: std::time::Duration) -> Result<Self, HttpCallError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpCallError::Transport(format!("failed to build client: {}", e)))?;
        Ok(Self { client })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    async fn send_json(
        &self,
        mut request: reqwest::RequestBuilder,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, HttpCallError> {
        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request
            .json(body)
            .send()
            .await
            .map_err(|e| HttpCallError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(HttpCallError::Status {
                status: status.as_u16(),
                body: error_body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| HttpCallError::Parse(e.to_string()))
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, HttpCallError> {
        self.send_json(self.client.post(url), headers, body).await
    }

    async fn put_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, HttpCallError> {
        self.send_json(self.client.put(url), headers, body).await
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    #[derive(Debug, Clone)]
    enum CannedFailure {
        Transport(String),
        Status { status: u16, body: String },
    }

    #[derive(Debug, Default)]
    pub struct MockHttpClient {
        responses: RwLock<HashMap<String, serde_json::Value>>,
        failures: RwLock<HashMap<String, CannedFailure>>,
        requests: RwLock<Vec<(String, serde_json::Value)>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, url: impl Into<String>, response: serde_json::Value) -> Self {
            self.responses.write().unwrap().insert(url.into(), response);
            self
        }

        pub fn with_transport_error(self, url: impl Into<String>, error: impl Into<String>) -> Self {
            self.failures
                .write()
                .unwrap()
                .insert(url.into(), CannedFailure::Transport(error.into()));
            self
        }

        pub fn with_status_error(
            self,
            url: impl Into<String>,
            status: u16,
            body: impl Into<String>,
        ) -> Self {
            self.failures.write().unwrap().insert(
                url.into(),
                CannedFailure::Status {
                    status,
                    body: body.into(),
                },
            );
            self
        }

        /// Bodies sent so far, paired with the URL they were sent to.
        pub fn requests(&self) -> Vec<(String, serde_json::Value)> {
            self.requests.read().unwrap().clone()
        }

        fn respond(
            &self,
            url: &str,
            body: &serde_json::Value,
        ) -> Result<serde_json::Value, HttpCallError> {
            self.requests
                .write()
                .unwrap()
                .push((url.to_string(), body.clone()));

            if let Some(failure) = self.failures.read().unwrap().get(url) {
                return Err(match failure.clone() {
                    CannedFailure::Transport(msg) => HttpCallError::Transport(msg),
                    CannedFailure::Status { status, body } => {
                        HttpCallError::Status { status, body }
                    }
                });
            }

            self.responses
                .read()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| {
                    HttpCallError::Transport(format!("No mock response for {}", url))
                })
        }
    }

    #[async_trait]
    impl HttpClientTrait for MockHttpClient {
        async fn post_json(
            &self,
            url: &str,
            _headers: Vec<(&str, &str)>,
            body: &serde_json::Value,
        ) -> Result<serde_json::Value, HttpCallError> {
            self.respond(url, body)
        }

        async fn put_json(
            &self,
            url: &str,
            _headers: Vec<(&str, &str)>,
            body: &serde_json::Value,
        ) -> Result<serde_json::Value, HttpCallError> {
            self.respond(url, body)
        }
    }
}
