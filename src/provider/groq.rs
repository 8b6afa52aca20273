//! Groq provider (OpenAI-compatible chat completions).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::AbacusError;
use crate::types::{parse_finish_reason, Usage};

use super::http::{bearer_headers, shared_client, status_to_error};
use super::{CompletionProvider, CompletionRequest, CompletionResponse};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model when none is configured.
pub const DEFAULT_MODEL: &str = "gemma2-9b-it";

pub struct GroqProvider {
    model: String,
    api_key: String,
    base_url: String,
}

impl GroqProvider {
    pub fn new(model: String, api_key: String, base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model,
            api_key,
        }
    }

    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let messages = request
            .messages
            .iter()
            .map(|m| {
                serde_json::json!({
                    "role": m.role.as_str(),
                    "content": m.content,
                })
            })
            .collect::<Vec<_>>();

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        let obj = body.as_object_mut().unwrap();

        if let Some(max) = request.settings.max_tokens {
            obj.insert("max_tokens".into(), max.into());
        }
        if let Some(temp) = request.settings.temperature {
            obj.insert("temperature".into(), temp.into());
        }
        if let Some(top_p) = request.settings.top_p {
            obj.insert("top_p".into(), top_p.into());
        }
        if let Some(ref stops) = request.settings.stop_sequences {
            obj.insert("stop".into(), serde_json::json!(stops));
        }
        if let Some(seed) = request.settings.seed {
            obj.insert("seed".into(), seed.into());
        }

        body
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    fn provider_name(&self) -> &str {
        "groq"
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, AbacusError> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %self.model, "Groq complete");

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: GroqChatResponse = resp.json().await?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AbacusError::api(200, "No choices in Groq response"))?;

        Ok(CompletionResponse {
            text: choice.message.content.unwrap_or_default(),
            usage: data
                .usage
                .map(|u| Usage {
                    input_tokens: u.prompt_tokens,
                    output_tokens: u.completion_tokens,
                    total_tokens: u.total_tokens,
                })
                .unwrap_or_default(),
            finish_reason: choice.finish_reason.as_deref().and_then(parse_finish_reason),
        })
    }
}

#[derive(Deserialize)]
struct GroqChatResponse {
    choices: Vec<GroqChoice>,
    usage: Option<GroqUsage>,
}

#[derive(Deserialize)]
struct GroqChoice {
    message: GroqChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GroqChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct GroqUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatMessage, GenerationSettings};

    fn request_with_settings(settings: GenerationSettings) -> CompletionRequest {
        CompletionRequest {
            messages: vec![
                ChatMessage::system("You are helpful."),
                ChatMessage::user("What is 2 + 2?"),
            ],
            settings,
        }
    }

    #[test]
    fn body_carries_model_and_messages() {
        let provider = GroqProvider::new("gemma2-9b-it".into(), "gsk-test".into(), None);
        let body = provider.build_request_body(&request_with_settings(Default::default()));

        assert_eq!(body["model"], "gemma2-9b-it");
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "What is 2 + 2?");
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn body_carries_optional_settings() {
        let provider = GroqProvider::new("gemma2-9b-it".into(), "gsk-test".into(), None);
        let settings = GenerationSettings {
            temperature: Some(0.2),
            max_tokens: Some(512),
            stop_sequences: Some(vec!["\nObservation:".into()]),
            ..Default::default()
        };
        let body = provider.build_request_body(&request_with_settings(settings));

        assert_eq!(body["temperature"], 0.2);
        assert_eq!(body["max_tokens"], 512);
        assert_eq!(body["stop"][0], "\nObservation:");
    }

    #[test]
    fn default_base_url_is_groq() {
        let provider = GroqProvider::new("gemma2-9b-it".into(), "gsk-test".into(), None);
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);

        let overridden = GroqProvider::new(
            "gemma2-9b-it".into(),
            "gsk-test".into(),
            Some("http://localhost:1234/v1".into()),
        );
        assert_eq!(overridden.base_url, "http://localhost:1234/v1");
    }
}
