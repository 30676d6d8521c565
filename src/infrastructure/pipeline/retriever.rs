//! Context retrieval - embedding the query and searching the vector store

use std::sync::Arc;

use tracing::debug;

use crate::config::RetrievalPolicy;
use crate::domain::embedding::{EmbeddingProvider, EmbeddingRequest};
use crate::domain::pipeline::ChatbotProfile;
use crate::domain::retrieval::{RetrievedDocument, SearchParams, VectorSearchProvider};
use crate::domain::DomainError;

/// Embeds the retrieval query and fetches candidate documents.
///
/// The store is queried at a loose floor with twice the requested count so
/// the profile re-rank has generic results to pad with; the strict relevance
/// decision belongs to the context gate downstream.
#[derive(Debug)]
pub struct ContextRetriever<E, V> {
    embedding: Arc<E>,
    search: Arc<V>,
    model: String,
    policy: RetrievalPolicy,
}

impl<E: EmbeddingProvider, V: VectorSearchProvider> ContextRetriever<E, V> {
    pub fn new(embedding: Arc<E>, search: Arc<V>, policy: RetrievalPolicy) -> Self {
        let model = embedding.default_model().to_string();
        Self {
            embedding,
            search,
            model,
            policy,
        }
    }

    /// Retrieve up to `top_k` documents for a query, ordered by descending
    /// score except where the profile bias moved topical matches forward.
    pub async fn retrieve(
        &self,
        query: &str,
        profile: &ChatbotProfile,
    ) -> Result<Vec<RetrievedDocument>, DomainError> {
        let request = EmbeddingRequest::new(&self.model, query);
        let vector = self.embedding.embed(request).await?.into_vector();

        let params = SearchParams::new(self.policy.top_k * 2)
            .with_score_threshold(self.policy.search_floor);
        let results = self.search.search(vector, &params).await?;

        debug!(
            collection = self.search.collection(),
            candidates = results.len(),
            profile = %profile.tag,
            "Vector search returned candidates"
        );

        Ok(self.rerank(results, profile))
    }

    /// Soft re-rank: topical matches move to the front, the remainder pads
    /// the list back up, then the list is cut to `top_k`. Never a hard
    /// filter.
    fn rerank(
        &self,
        documents: Vec<RetrievedDocument>,
        profile: &ChatbotProfile,
    ) -> Vec<RetrievedDocument> {
        let k = self.policy.top_k as usize;

        if !profile.has_bias() {
            let mut documents = documents;
            documents.truncate(k);
            return documents;
        }

        let (mut topical, generic): (Vec<_>, Vec<_>) =
            documents.into_iter().partition(|doc| profile.matches(doc));

        topical.extend(generic);
        topical.truncate(k);
        topical
    }
}
