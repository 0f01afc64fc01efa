//! Structured explanation generation for a single post

use super::prompt::PromptBuilder;
use super::types::GeneratedExplanation;
use crate::context::PipelineContext;
use crate::llm::{ChatBackend, ChatRequest, request_structured};
use crate::outcome::Outcome;
use std::sync::Arc;
use tracing::{instrument, warn};

/// Produces a validated explanation for a post, or the sentinel
pub struct ExplanationGenerator {
    backend: Arc<dyn ChatBackend>,
    prompt: PromptBuilder,
    model: String,
    max_attempts: u32,
    temperature: Option<f32>,
}

impl ExplanationGenerator {
    /// Generator using `backend` with the context's model, retry budget and demonstrations
    pub fn new(backend: Arc<dyn ChatBackend>, context: &PipelineContext) -> Self {
        let config = context.config();
        Self {
            backend,
            prompt: PromptBuilder::new(context.few_shot().to_vec()),
            model: config.models.generation.clone(),
            max_attempts: config.generation.max_attempts,
            temperature: config.generation.temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate an explanation for `text`
    ///
    /// Never fails: any error after the retry budget yields
    /// [`Outcome::Fallback`] carrying [`GeneratedExplanation::sentinel`].
    #[instrument(skip(self, text), fields(model = %self.model, text_len = text.len()))]
    pub async fn generate(&self, text: &str) -> Outcome<GeneratedExplanation> {
        let request = ChatRequest::new(self.model.clone(), self.prompt.build(text))
            .with_temperature(self.temperature);

        match request_structured::<GeneratedExplanation>(
            self.backend.as_ref(),
            request,
            self.max_attempts,
        )
        .await
        {
            Ok(explanation) => Outcome::Completed(explanation),
            Err(error) => {
                warn!(
                    error = %error,
                    kind = %error.failure_kind(),
                    "explanation failed, using sentinel"
                );
                Outcome::fallback(GeneratedExplanation::sentinel(), &error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::error::Redsm5Error;
    use crate::generation::SENTINEL;
    use crate::llm::{ChatCompletion, MockChatBackend};
    use crate::outcome::FailureKind;

    fn generator(backend: MockChatBackend) -> ExplanationGenerator {
        ExplanationGenerator::new(
            Arc::new(backend),
            &PipelineContext::new(PipelineConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_valid_output_is_completed() {
        let mut backend = MockChatBackend::new();
        backend
            .expect_chat()
            .times(1)
            .withf(|req| req.model == "llama3.1:8b" && req.response_format.is_some())
            .returning(|_| {
                Ok(ChatCompletion::new(
                    r#"{"explanation": "Expresses hopelessness, a sign of depressed mood.", "chain_of_thought": "The post says hopeless every day."}"#,
                ))
            });

        let outcome = generator(backend).generate("I feel hopeless every day.").await;
        assert!(!outcome.is_fallback());
        assert!(outcome.value().explanation.contains("depressed mood"));
    }

    #[tokio::test]
    async fn test_five_validation_failures_yield_sentinel() {
        let mut backend = MockChatBackend::new();
        backend
            .expect_chat()
            .times(5)
            .returning(|_| Ok(ChatCompletion::new(r#"{"explanation": "missing reasoning"}"#)));

        let outcome = generator(backend).generate("I feel hopeless every day.").await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.failure_kind(), Some(FailureKind::Validation));
        assert_eq!(outcome.value().explanation, SENTINEL);
        assert_eq!(outcome.value().chain_of_thought, SENTINEL);
    }

    #[tokio::test]
    async fn test_transport_error_yields_sentinel() {
        let mut backend = MockChatBackend::new();
        backend
            .expect_chat()
            .times(1)
            .returning(|_| Err(Redsm5Error::http_status("connection refused", "http://x", 503)));

        let outcome = generator(backend).generate("text").await;
        assert_eq!(outcome.failure_kind(), Some(FailureKind::Transport));
        assert!(outcome.into_value().is_sentinel());
    }
}
