//! Retrieval domain - scored documents and the vector search seam

mod document;
mod provider;

pub use document::RetrievedDocument;
pub use provider::{SearchParams, VectorSearchProvider};

#[cfg(test)]
pub use provider::mock::MockVectorSearchProvider;
