//! Campus RAG - the answer pipeline behind a business school chatbot
//!
//! One request runs six ordered stages: reformulate the question against
//! recent conversation, embed and search the knowledge collection, gate the
//! results by similarity, assemble a strict grounding prompt, generate, and
//! sanitize the model output. External services (Azure OpenAI completions
//! and embeddings, Qdrant) sit behind domain traits, so the pipeline is a
//! pure function of (message, history, profile) with injected providers.

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    ChatTurn, ChatbotProfile, CompletionProvider, DomainError, EmbeddingProvider, GatePolicy,
    Persona, PersonaStore, PipelineResult, RetrievedDocument, TurnRole, VectorSearchProvider,
};
pub use infrastructure::pipeline::RagPipeline;
