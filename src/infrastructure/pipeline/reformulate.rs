//! Query reformulation - turning follow-up questions into standalone queries

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ReformulationParams;
use crate::domain::chat::{recent_turns, ChatTurn, TurnRole};
use crate::domain::llm::{CompletionProvider, GenerationRequest};
use crate::domain::DomainError;

/// Rewrites a short follow-up question into a standalone retrieval query
/// using the recent conversation.
///
/// The rewrite is best-effort: when history is empty or the question is long
/// enough to stand on its own, no LLM call is made, and any failure of the
/// rewrite call falls back to the original question. Reformulation never
/// blocks the pipeline.
#[derive(Debug)]
pub struct QueryReformulator<L> {
    completion: Arc<L>,
    deployment: String,
    params: ReformulationParams,
}

impl<L: CompletionProvider> QueryReformulator<L> {
    pub fn new(completion: Arc<L>, deployment: impl Into<String>, params: ReformulationParams) -> Self {
        Self {
            completion,
            deployment: deployment.into(),
            params,
        }
    }

    /// Produce the retrieval query for a user question. Infallible.
    pub async fn reformulate(&self, question: &str, history: &[ChatTurn]) -> String {
        if history.is_empty() {
            return question.to_string();
        }

        // Long questions are treated as already standalone
        if question.split_whitespace().count() > self.params.max_passthrough_words {
            return question.to_string();
        }

        match self.rewrite(question, history).await {
            Ok(rewritten) if !rewritten.trim().is_empty() => rewritten.trim().to_string(),
            Ok(_) => {
                debug!("Reformulation returned blank output, using original question");
                question.to_string()
            }
            Err(error) => {
                warn!(%error, "Reformulation failed, using original question");
                question.to_string()
            }
        }
    }

    async fn rewrite(&self, question: &str, history: &[ChatTurn]) -> Result<String, DomainError> {
        let transcript = recent_turns(history, self.params.history_window)
            .iter()
            .map(|turn| {
                let speaker = match turn.role {
                    TurnRole::User => "Human",
                    TurnRole::Assistant => "Assistant",
                };
                format!("{}: {}", speaker, turn.content)
            })
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "Given the following conversation and a follow up question, rephrase the follow up question to be a standalone question.\n\nChat History:\n{}\n\nFollow Up Input: {}\n\nStandalone Question:",
            transcript, question
        );

        let request = GenerationRequest::builder()
            .user(prompt)
            .temperature(self.params.temperature)
            .max_tokens(self.params.max_tokens)
            .build();

        let response = self.completion.complete(&self.deployment, request).await?;

        Ok(response.content().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::{MockCompletionProvider, MockFailure};

    fn reformulator(completion: MockCompletionProvider) -> QueryReformulator<MockCompletionProvider> {
        QueryReformulator::new(Arc::new(completion), "gpt-4o", ReformulationParams::default())
    }

    fn history() -> Vec<ChatTurn> {
        vec![
            ChatTurn::user("What are the library services?"),
            ChatTurn::assistant("The library offers study rooms and databases."),
        ]
    }

    #[tokio::test]
    async fn test_empty_history_passes_through_without_llm_call() {
        let reformulator = reformulator(MockCompletionProvider::new("mock"));

        let query = reformulator.reformulate("library hours?", &[]).await;

        assert_eq!(query, "library hours?");
        assert_eq!(reformulator.completion.call_count(), 0);
    }

    #[tokio::test]
    async fn test_long_question_passes_through_without_llm_call() {
        let reformulator = reformulator(MockCompletionProvider::new("mock"));
        let question = "What are the exact opening hours of the main campus library during exam weeks?";

        let query = reformulator.reformulate(question, &history()).await;

        assert_eq!(query, question);
        assert_eq!(reformulator.completion.call_count(), 0);
    }

    #[tokio::test]
    async fn test_rewrites_short_follow_up() {
        let completion = MockCompletionProvider::new("mock")
            .with_text_response("What are the library's opening hours?");
        let reformulator = reformulator(completion);

        let query = reformulator.reformulate("and the hours?", &history()).await;

        assert_eq!(query, "What are the library's opening hours?");
        assert_eq!(reformulator.completion.call_count(), 1);

        let request = &reformulator.completion.calls()[0];
        let prompt = request.messages[0].content();
        assert!(prompt.contains("Human: What are the library services?"));
        assert!(prompt.contains("Follow Up Input: and the hours?"));
        assert_eq!(request.temperature, Some(0.3));
        assert_eq!(request.max_tokens, Some(100));
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_original() {
        let completion =
            MockCompletionProvider::new("mock").with_failure(MockFailure::RateLimited);
        let reformulator = reformulator(completion);

        let query = reformulator.reformulate("and the hours?", &history()).await;

        assert_eq!(query, "and the hours?");
    }

    #[tokio::test]
    async fn test_blank_output_falls_back_to_original() {
        let completion = MockCompletionProvider::new("mock").with_text_response("   ");
        let reformulator = reformulator(completion);

        let query = reformulator.reformulate("and the hours?", &history()).await;

        assert_eq!(query, "and the hours?");
    }
}
