//! Prompt assembly - the strict system prompt and ordered message list

use crate::domain::chat::{recent_turns, ChatTurn};
use crate::domain::llm::Message;

/// Fallback persona used when the persona store has no active entry.
pub const DEFAULT_PERSONA: &str = "Assistant name: CampusBot\n\nInstruction:\nYou are a virtual assistant dedicated exclusively to the services and resources of the business school campus.";

/// Formatting rules appended to every system prompt. The link rules exist
/// because the model otherwise drifts into raw HTML or bare URLs, which the
/// sanitizer can only partially repair.
const RESPONSE_RULES: &str = "RESPONSE RULES:\n\
1. Use the provided context to answer precisely and helpfully\n\
2. LINK FORMATTING (MANDATORY):\n\
   - ALWAYS use Markdown link syntax only: [descriptive text](full URL)\n\
   - NEVER generate HTML (<a href=...), NEVER write a bare URL in plain text\n\
   - Link text must be short and descriptive (name of the resource or service)\n\
   - URLs must ALWAYS be complete, starting with https://\n\
3. LIST FORMATTING:\n\
   - Always break the line after a colon (:)\n\
   - Always break the line between numbered items\n\
4. Length: adapt to the question (concise but complete)\n\
5. Stay natural, conversational and professional";

/// Builds the ordered message list for generation: one system message
/// (persona, context block, formatting rules), then the trailing history
/// turns, then the current user message.
///
/// The ordering is load-bearing: it controls what the model treats as recent
/// conversation versus background instruction.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    history_window: usize,
}

impl PromptAssembler {
    pub fn new(history_window: usize) -> Self {
        Self { history_window }
    }

    pub fn assemble(
        &self,
        persona: &str,
        sources: &[String],
        history: &[ChatTurn],
        user_message: &str,
    ) -> Vec<Message> {
        let system = format!(
            "{}\n{}\n\n{}",
            persona,
            context_block(sources),
            RESPONSE_RULES
        );

        let trailing = recent_turns(history, self.history_window);

        let mut messages = Vec::with_capacity(trailing.len() + 2);
        messages.push(Message::system(system));
        messages.extend(trailing.iter().map(ChatTurn::to_message));
        messages.push(Message::user(user_message));
        messages
    }
}

/// The context block: a delimited, numbered list of grounding passages, or
/// an explicit no-context marker. Never an empty block, so the model cannot
/// mistake missing context for permission to improvise.
fn context_block(sources: &[String]) -> String {
    if sources.is_empty() {
        return "\n=== CONTEXT ===\nNo relevant information found.\n================\n".to_string();
    }

    let items = sources
        .iter()
        .enumerate()
        .map(|(i, source)| format!("{}. {}", i + 1, source))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "\n=== PROVIDED CONTEXT ===\n{}\n========================\n\nUse ONLY the information above to answer.",
        items
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MessageRole;

    #[test]
    fn test_message_ordering() {
        let assembler = PromptAssembler::new(6);
        let history = vec![
            ChatTurn::user("What services does the library offer?"),
            ChatTurn::assistant("Study rooms and research databases."),
        ];

        let messages = assembler.assemble(
            "You are the library assistant.",
            &["Library open 9h-22h Mon-Fri".to_string()],
            &history,
            "and the hours?",
        );

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[2].role, MessageRole::Assistant);
        assert_eq!(messages[3].role, MessageRole::User);
        assert_eq!(messages[3].content(), "and the hours?");
    }

    #[test]
    fn test_system_message_contains_persona_context_and_rules() {
        let assembler = PromptAssembler::new(6);

        let messages = assembler.assemble(
            "You are the library assistant.",
            &["Library open 9h-22h Mon-Fri".to_string()],
            &[],
            "library hours?",
        );

        let system = messages[0].content();
        assert!(system.starts_with("You are the library assistant."));
        assert!(system.contains("=== PROVIDED CONTEXT ==="));
        assert!(system.contains("1. Library open 9h-22h Mon-Fri"));
        assert!(system.contains("Use ONLY the information above to answer."));
        assert!(system.contains("RESPONSE RULES:"));
    }

    #[test]
    fn test_no_context_marker_when_sources_empty() {
        let assembler = PromptAssembler::new(6);

        let messages = assembler.assemble(DEFAULT_PERSONA, &[], &[], "library hours?");

        let system = messages[0].content();
        assert!(system.contains("No relevant information found."));
        assert!(!system.contains("=== PROVIDED CONTEXT ==="));
    }

    #[test]
    fn test_history_capped_at_window() {
        let assembler = PromptAssembler::new(6);
        let history: Vec<ChatTurn> = (0..10)
            .map(|i| ChatTurn::user(format!("message {}", i)))
            .collect();

        let messages = assembler.assemble(DEFAULT_PERSONA, &[], &history, "latest");

        // system + 6 trailing turns + current message
        assert_eq!(messages.len(), 8);
        assert_eq!(messages[1].content(), "message 4");
        assert_eq!(messages[6].content(), "message 9");
    }

    #[test]
    fn test_numbered_context_items() {
        let sources = vec!["First passage".to_string(), "Second passage".to_string()];
        let block = context_block(&sources);

        assert!(block.contains("1. First passage"));
        assert!(block.contains("2. Second passage"));
    }
}
