//! Free-form reasoning tool: delegates back to the language model with a
//! fixed instruction template.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AbacusError;
use crate::provider::{CompletionProvider, CompletionRequest};
use crate::types::{ChatMessage, GenerationSettings};

use super::Tool;

pub const REASONING: &str = "Reasoning";

const TEMPLATE: &str = "You are an agent tasked with solving the user's mathematical and logic \
questions. Logically arrive at the solution, provide a detailed explanation, \
and display it point-wise for the question below.\n\
Question: {question}\n\
Answer:";

/// Answers logic questions by prompting the model directly, outside the
/// Action/Observation protocol.
pub struct ReasoningTool {
    provider: Arc<dyn CompletionProvider>,
}

impl ReasoningTool {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for ReasoningTool {
    fn name(&self) -> &str {
        REASONING
    }

    fn description(&self) -> &str {
        "Answers logic-based and reasoning questions in plain language. Use it \
         when neither the calculator nor a factual lookup fits."
    }

    async fn invoke(&self, input: &str) -> Result<String, AbacusError> {
        let question = input.trim();
        if question.is_empty() {
            return Err(AbacusError::tool(REASONING, "empty question"));
        }

        let request = CompletionRequest {
            messages: vec![ChatMessage::user(TEMPLATE.replace("{question}", question))],
            settings: GenerationSettings::default(),
        };

        let response = self
            .provider
            .complete(&request)
            .await
            .map_err(|e| AbacusError::tool(REASONING, e.to_string()))?;

        Ok(response.text.trim().to_string())
    }
}

impl std::fmt::Debug for ReasoningTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReasoningTool")
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}
