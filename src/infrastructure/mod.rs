//! Infrastructure layer - external service implementations

pub mod embedding;
pub mod http;
pub mod llm;
pub mod logging;
pub mod persona;
pub mod pipeline;
pub mod retrieval;
