//! Pipeline orchestration - the stages of one answer run

mod prompt;
mod rag;
mod reformulate;
mod retriever;
mod sanitize;

pub use prompt::{PromptAssembler, DEFAULT_PERSONA};
pub use rag::RagPipeline;
pub use reformulate::QueryReformulator;
pub use retriever::ContextRetriever;
pub use sanitize::sanitize;
