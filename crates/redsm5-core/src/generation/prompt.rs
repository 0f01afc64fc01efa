//! Few-shot prompt construction

use super::types::GeneratedExplanation;
use crate::dataset::Example;
use crate::llm::ChatMessage;

const SYSTEM_PROMPT: &str = "You are a clinical psychology assistant. Given a Reddit post, explain which DSM-5 \
depression symptoms the post expresses and cite the phrases that support each one. If the post shows no \
symptom, say so. Answer with a JSON object containing `chain_of_thought` (your step-by-step reasoning) and \
`explanation` (the final rationale).";

const DEMONSTRATION_REASONING: &str =
    "Read the post, find statements that match DSM-5 depression criteria, then summarise them.";

/// Builds the conversation sent for each post
///
/// The conversation is the system instruction, one user/assistant exchange
/// per demonstration, then the target post.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    demonstrations: Vec<Example>,
}

impl PromptBuilder {
    pub fn new(demonstrations: Vec<Example>) -> Self {
        Self { demonstrations }
    }

    pub fn demonstrations(&self) -> &[Example] {
        &self.demonstrations
    }

    pub fn build(&self, text: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.demonstrations.len() * 2 + 2);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));

        for example in &self.demonstrations {
            messages.push(ChatMessage::user(user_turn(&example.text)));
            let answer = GeneratedExplanation::new(
                example.reference_explanation.clone(),
                DEMONSTRATION_REASONING,
            );
            // Serializing two string fields cannot fail.
            let json = serde_json::to_string(&answer).unwrap_or_default();
            messages.push(ChatMessage::assistant(json));
        }

        messages.push(ChatMessage::user(user_turn(text)));
        messages
    }
}

fn user_turn(text: &str) -> String {
    format!("Post:\n{}", text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MessageRole;

    #[test]
    fn test_layout_with_demonstrations() {
        let builder = PromptBuilder::new(vec![
            Example::new("I can't get out of bed", "Fatigue."),
            Example::new("Food tastes like nothing", "Appetite change."),
        ]);
        let messages = builder.build("I feel hopeless every day.");

        let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                MessageRole::System,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
                MessageRole::Assistant,
                MessageRole::User,
            ]
        );
        assert!(messages[2].content.contains("\"explanation\":\"Fatigue.\""));
        assert!(messages[5].content.ends_with("I feel hopeless every day."));
    }

    #[test]
    fn test_zero_shot() {
        let messages = PromptBuilder::default().build("text");
        assert_eq!(messages.len(), 2);
    }
}
