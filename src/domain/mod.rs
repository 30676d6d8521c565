//! Domain layer - entities, policy types, and provider seams

pub mod chat;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod persona;
pub mod pipeline;
pub mod retrieval;

pub use chat::{ChatTurn, TurnRole};
pub use embedding::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage};
pub use error::DomainError;
pub use llm::{
    CompletionProvider, FinishReason, GenerationRequest, GenerationRequestBuilder,
    GenerationResponse, Message, MessageRole, Usage,
};
pub use persona::{Persona, PersonaStore};
pub use pipeline::{ChatbotProfile, GateOutcome, GatePolicy, PipelineResult};
pub use retrieval::{RetrievedDocument, SearchParams, VectorSearchProvider};
