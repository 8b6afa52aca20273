//! Completion provider trait and the Groq implementation.

pub mod groq;
pub mod http;

use async_trait::async_trait;

use crate::config::AbacusConfig;
use crate::error::AbacusError;
use crate::types::{ChatMessage, FinishReason, GenerationSettings, Usage};

/// A request sent to a completion provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub settings: GenerationSettings,
}

/// Response from a completion provider.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub text: String,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// Core trait implemented by completion providers.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name (e.g., "groq").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Generate a completion for the given messages.
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, AbacusError>;
}

/// Create a provider for the given model, using the provided config.
///
/// The credential is required up front: without one, nothing in the
/// application may run, so a missing key is a `Configuration` error.
pub fn create_provider(
    model: &str,
    config: &AbacusConfig,
) -> Result<Box<dyn CompletionProvider>, AbacusError> {
    let api_key = config.get_api_key("groq").ok_or_else(|| {
        AbacusError::Configuration(
            "Missing Groq API key. Set GROQ_API_KEY or pass --api-key.".into(),
        )
    })?;
    Ok(Box::new(groq::GroqProvider::new(
        model.to_string(),
        api_key,
        config.get_base_url("groq"),
    )))
}
