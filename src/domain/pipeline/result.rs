use serde::{Deserialize, Serialize};

/// Final output of one pipeline run. Ephemeral, one per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Sanitized answer text
    pub answer: String,
    /// Total tokens billed by the completion call
    pub tokens_used: u32,
    /// Wall-clock time for the whole pipeline run
    pub latency_ms: u64,
    /// Content of the documents that grounded the answer
    pub sources: Vec<String>,
    /// Number of documents that passed the context gate
    pub relevant_doc_count: usize,
    /// Whether the gate found enough relevant context to trust retrieval
    pub has_relevant_context: bool,
}
