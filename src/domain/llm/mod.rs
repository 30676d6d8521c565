//! LLM completion domain - messages, requests, and the provider seam

mod message;
mod provider;
mod request;
mod response;

pub use message::{Message, MessageRole};
pub use provider::CompletionProvider;
pub use request::{GenerationRequest, GenerationRequestBuilder};
pub use response::{FinishReason, GenerationResponse, Usage};

#[cfg(test)]
pub use provider::mock::{MockCompletionProvider, MockFailure};
