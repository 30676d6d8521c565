//! The RAG answer pipeline - reformulate, retrieve, gate, assemble,
//! generate, sanitize

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::domain::chat::ChatTurn;
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::llm::{CompletionProvider, GenerationRequest};
use crate::domain::persona::PersonaStore;
use crate::domain::pipeline::{ChatbotProfile, PipelineResult};
use crate::domain::retrieval::VectorSearchProvider;
use crate::domain::DomainError;

use super::prompt::{PromptAssembler, DEFAULT_PERSONA};
use super::reformulate::QueryReformulator;
use super::retriever::ContextRetriever;
use super::sanitize::sanitize;

/// One request, one strictly sequential run - each stage consumes the
/// previous one's output. No state crosses requests; history is
/// caller-supplied and never accumulated here.
///
/// Providers are injected at construction so tests substitute fakes without
/// network access.
#[derive(Debug)]
pub struct RagPipeline<L, E, V, P> {
    completion: Arc<L>,
    reformulator: QueryReformulator<L>,
    retriever: ContextRetriever<E, V>,
    personas: Arc<P>,
    assembler: PromptAssembler,
    config: PipelineConfig,
}

impl<L, E, V, P> RagPipeline<L, E, V, P>
where
    L: CompletionProvider,
    E: EmbeddingProvider,
    V: VectorSearchProvider,
    P: PersonaStore,
{
    pub fn new(
        completion: Arc<L>,
        embedding: Arc<E>,
        search: Arc<V>,
        personas: Arc<P>,
        config: PipelineConfig,
    ) -> Self {
        let reformulator = QueryReformulator::new(
            Arc::clone(&completion),
            config.deployment.clone(),
            config.reformulation.clone(),
        );
        let retriever = ContextRetriever::new(embedding, search, config.retrieval.clone());
        let assembler = PromptAssembler::new(config.history_window);

        Self {
            completion,
            reformulator,
            retriever,
            personas,
            assembler,
            config,
        }
    }

    /// Answer one user message. Reformulation failures are recovered
    /// internally; retrieval and generation failures surface typed, so the
    /// caller can distinguish "service busy" from a generic failure.
    pub async fn answer(
        &self,
        session_id: &str,
        message: &str,
        history: &[ChatTurn],
        profile: &ChatbotProfile,
    ) -> Result<PipelineResult, DomainError> {
        let started = Instant::now();

        let query = self.reformulator.reformulate(message, history).await;
        debug!(session_id, %query, "Retrieval query ready");

        let candidates = self.retriever.retrieve(&query, profile).await?;
        let outcome = self.config.gate.apply(candidates);

        info!(
            session_id,
            relevant = outcome.relevant.len(),
            discarded = outcome.discarded.len(),
            threshold = self.config.gate.similarity_threshold,
            "Context gate applied"
        );

        if !outcome.has_relevant_context {
            warn!(session_id, "No relevant context found, answering ungrounded");
        }

        let persona = self.active_persona_text().await;
        let sources = outcome.sources();
        let messages = self.assembler.assemble(&persona, &sources, history, message);

        let generation = &self.config.generation;
        let request = GenerationRequest::builder()
            .messages(messages)
            .temperature(generation.temperature)
            .max_tokens(generation.max_tokens)
            .top_p(generation.top_p)
            .frequency_penalty(generation.frequency_penalty)
            .presence_penalty(generation.presence_penalty)
            .build();

        let response = self
            .completion
            .complete(&self.config.deployment, request)
            .await?;

        let answer = sanitize(response.content());
        let tokens_used = response.total_tokens();
        let latency_ms = started.elapsed().as_millis() as u64;

        info!(
            session_id,
            tokens_used,
            latency_ms,
            relevant_docs = outcome.relevant.len(),
            "Pipeline run completed"
        );

        Ok(PipelineResult {
            answer,
            tokens_used,
            latency_ms,
            sources,
            relevant_doc_count: outcome.relevant.len(),
            has_relevant_context: outcome.has_relevant_context,
        })
    }

    /// Active persona text, degrading to the built-in default. A missing or
    /// unreachable persona store never fails the request.
    async fn active_persona_text(&self) -> String {
        match self.personas.active().await {
            Ok(Some(persona)) => persona.content,
            Ok(None) => {
                warn!("No active persona configured, using default");
                DEFAULT_PERSONA.to_string()
            }
            Err(error) => {
                warn!(%error, "Persona store unavailable, using default");
                DEFAULT_PERSONA.to_string()
            }
        }
    }
}
