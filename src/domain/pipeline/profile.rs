use serde::{Deserialize, Serialize};

use crate::domain::retrieval::RetrievedDocument;

/// A chatbot profile selects the assistant's audience and optionally biases
/// retrieval toward a topical subset of the collection.
///
/// The bias is a soft re-rank: matching documents move to the front of the
/// result list, which is then padded back with the next-best generic results.
/// It never filters documents out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotProfile {
    /// Short tag identifying the profile, e.g. "studybot"
    pub tag: String,
    /// Lowercased keywords the bias matches against document metadata
    /// (source, title) and content
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topic_bias: Vec<String>,
}

impl ChatbotProfile {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            topic_bias: Vec::new(),
        }
    }

    pub fn with_topic_bias(mut self, keywords: Vec<String>) -> Self {
        self.topic_bias = keywords.into_iter().map(|k| k.to_lowercase()).collect();
        self
    }

    pub fn has_bias(&self) -> bool {
        !self.topic_bias.is_empty()
    }

    /// Whether a document matches the profile's topical subset.
    pub fn matches(&self, doc: &RetrievedDocument) -> bool {
        if self.topic_bias.is_empty() {
            return false;
        }

        let source = doc.source.as_deref().unwrap_or("").to_lowercase();
        let source_meta = doc.metadata_str("source").unwrap_or("").to_lowercase();
        let title = doc.metadata_str("title").unwrap_or("").to_lowercase();
        let content = doc.content.to_lowercase();

        self.topic_bias.iter().any(|kw| {
            source.contains(kw.as_str())
                || source_meta.contains(kw.as_str())
                || title.contains(kw.as_str())
                || content.contains(kw.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library_profile() -> ChatbotProfile {
        ChatbotProfile::new("bibliobot").with_topic_bias(vec!["library".to_string()])
    }

    #[test]
    fn test_matches_content() {
        let profile = library_profile();
        let doc = RetrievedDocument::new("d1", "The Library opens at 9h", 0.8);
        assert!(profile.matches(&doc));
    }

    #[test]
    fn test_matches_metadata_source() {
        let profile = library_profile();
        let doc = RetrievedDocument::new("d1", "Opening hours", 0.8)
            .with_metadata("source", serde_json::json!("library-faq"));
        assert!(profile.matches(&doc));
    }

    #[test]
    fn test_matches_source_field() {
        let profile = library_profile();
        let doc = RetrievedDocument::new("d1", "Opening hours", 0.8).with_source("library-faq");
        assert!(profile.matches(&doc));
    }

    #[test]
    fn test_no_match() {
        let profile = library_profile();
        let doc = RetrievedDocument::new("d1", "Cafeteria menu", 0.8);
        assert!(!profile.matches(&doc));
    }

    #[test]
    fn test_unbiased_profile_never_matches() {
        let profile = ChatbotProfile::new("studybot");
        let doc = RetrievedDocument::new("d1", "The library", 0.8);
        assert!(!profile.has_bias());
        assert!(!profile.matches(&doc));
    }
}
