use async_trait::async_trait;
use std::fmt::Debug;

use super::RetrievedDocument;
use crate::domain::DomainError;

/// Parameters for a similarity search
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Number of results to return
    pub top_k: u32,
    /// Minimum similarity score enforced by the backend, if any
    pub score_threshold: Option<f32>,
}

impl SearchParams {
    pub fn new(top_k: u32) -> Self {
        Self {
            top_k,
            score_threshold: None,
        }
    }

    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = Some(threshold);
        self
    }
}

/// Trait for vector similarity search backends
///
/// Implementations return results ordered by descending score (the backend's
/// native ordering is trusted). An unavailable backend must fail with
/// `DomainError::Retrieval` - never an empty result set, which is a normal
/// "no matches" outcome.
#[async_trait]
pub trait VectorSearchProvider: Send + Sync + Debug {
    /// Search the collection with a query vector.
    async fn search(
        &self,
        vector: Vec<f32>,
        params: &SearchParams,
    ) -> Result<Vec<RetrievedDocument>, DomainError>;

    /// Name of the collection being searched
    fn collection(&self) -> &str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug)]
    pub struct MockVectorSearchProvider {
        collection: String,
        results: Vec<RetrievedDocument>,
        error: Option<String>,
        requested_params: Mutex<Vec<SearchParams>>,
    }

    impl MockVectorSearchProvider {
        pub fn new(collection: impl Into<String>) -> Self {
            Self {
                collection: collection.into(),
                results: Vec::new(),
                error: None,
                requested_params: Mutex::new(Vec::new()),
            }
        }

        pub fn with_results(mut self, results: Vec<RetrievedDocument>) -> Self {
            self.results = results;
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn requested_params(&self) -> Vec<SearchParams> {
            self.requested_params.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VectorSearchProvider for MockVectorSearchProvider {
        async fn search(
            &self,
            _vector: Vec<f32>,
            params: &SearchParams,
        ) -> Result<Vec<RetrievedDocument>, DomainError> {
            self.requested_params.lock().unwrap().push(params.clone());

            if let Some(ref error) = self.error {
                return Err(DomainError::retrieval(error));
            }

            let mut results = self.results.clone();
            if let Some(threshold) = params.score_threshold {
                results.retain(|d| d.score >= threshold);
            }
            results.truncate(params.top_k as usize);
            Ok(results)
        }

        fn collection(&self) -> &str {
            &self.collection
        }
    }
}
