//! Vector store backends

mod qdrant;

pub use qdrant::QdrantVectorStore;
