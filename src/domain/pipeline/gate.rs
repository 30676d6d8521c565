//! Context gate - decides whether retrieval results are trustworthy enough
//! to ground generation.

use serde::{Deserialize, Serialize};

use crate::domain::retrieval::RetrievedDocument;

/// Policy constants for the gate. Tunable per deployment, never per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatePolicy {
    /// Documents scoring at or above this are considered relevant
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,
    /// Minimum number of relevant documents required to trust retrieval
    #[serde(default = "default_min_relevant_docs")]
    pub min_relevant_docs: usize,
}

fn default_similarity_threshold() -> f32 {
    0.55
}

fn default_min_relevant_docs() -> usize {
    1
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            min_relevant_docs: default_min_relevant_docs(),
        }
    }
}

impl GatePolicy {
    pub fn new(similarity_threshold: f32, min_relevant_docs: usize) -> Self {
        Self {
            similarity_threshold: similarity_threshold.clamp(0.0, 1.0),
            min_relevant_docs,
        }
    }

    /// Partition documents by the similarity threshold. Pure: no I/O, inputs
    /// are consumed, relative ordering within each partition is preserved.
    pub fn apply(&self, documents: Vec<RetrievedDocument>) -> GateOutcome {
        let mut relevant = Vec::new();
        let mut discarded = Vec::new();

        for doc in documents {
            if doc.score >= self.similarity_threshold {
                relevant.push(doc);
            } else {
                discarded.push(doc);
            }
        }

        let has_relevant_context = relevant.len() >= self.min_relevant_docs;

        GateOutcome {
            relevant,
            discarded,
            has_relevant_context,
        }
    }
}

/// Result of gating retrieved documents
#[derive(Debug, Clone)]
pub struct GateOutcome {
    /// Documents scoring at or above the threshold, retrieval order preserved
    pub relevant: Vec<RetrievedDocument>,
    /// Documents below the threshold
    pub discarded: Vec<RetrievedDocument>,
    /// True iff |relevant| >= min_relevant_docs
    pub has_relevant_context: bool,
}

impl GateOutcome {
    /// Content strings of the relevant documents, for the context block and
    /// the caller-facing sources list.
    pub fn sources(&self) -> Vec<String> {
        self.relevant.iter().map(|d| d.content.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(scores: &[f32]) -> Vec<RetrievedDocument> {
        scores
            .iter()
            .enumerate()
            .map(|(i, s)| RetrievedDocument::new(format!("doc-{}", i), format!("content {}", i), *s))
            .collect()
    }

    #[test]
    fn test_gate_partitions_by_threshold() {
        let policy = GatePolicy::default();
        let outcome = policy.apply(docs(&[0.8, 0.6, 0.3]));

        assert_eq!(outcome.relevant.len(), 2);
        assert_eq!(outcome.discarded.len(), 1);
        assert!(outcome.has_relevant_context);
    }

    #[test]
    fn test_gate_empty_input() {
        let policy = GatePolicy::default();
        let outcome = policy.apply(Vec::new());

        assert!(outcome.relevant.is_empty());
        assert!(!outcome.has_relevant_context);
    }

    #[test]
    fn test_gate_all_below_threshold() {
        let policy = GatePolicy::default();
        let outcome = policy.apply(docs(&[0.5, 0.4, 0.1]));

        assert!(outcome.relevant.is_empty());
        assert_eq!(outcome.discarded.len(), 3);
        assert!(!outcome.has_relevant_context);
    }

    #[test]
    fn test_gate_boundary_score_is_relevant() {
        let policy = GatePolicy::default();
        let outcome = policy.apply(docs(&[0.55]));

        assert_eq!(outcome.relevant.len(), 1);
        assert!(outcome.has_relevant_context);
    }

    #[test]
    fn test_gate_min_relevant_docs() {
        let policy = GatePolicy::new(0.55, 2);
        let outcome = policy.apply(docs(&[0.9]));

        assert_eq!(outcome.relevant.len(), 1);
        assert!(!outcome.has_relevant_context);
    }

    #[test]
    fn test_gate_preserves_order() {
        let policy = GatePolicy::default();
        let outcome = policy.apply(docs(&[0.9, 0.3, 0.7]));

        assert_eq!(outcome.relevant[0].id, "doc-0");
        assert_eq!(outcome.relevant[1].id, "doc-2");
    }

    #[test]
    fn test_sources_extraction() {
        let policy = GatePolicy::default();
        let outcome = policy.apply(docs(&[0.8, 0.2]));

        assert_eq!(outcome.sources(), vec!["content 0".to_string()]);
    }

    #[test]
    fn test_threshold_clamping() {
        let policy = GatePolicy::new(1.5, 1);
        assert_eq!(policy.similarity_threshold, 1.0);
    }
}
