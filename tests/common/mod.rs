//! Shared test helpers: a mock provider with scripted responses.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use abacus::error::AbacusError;
use abacus::provider::{CompletionProvider, CompletionRequest, CompletionResponse};
use abacus::types::{FinishReason, Usage};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Return this text.
    Text(String),
    /// Fail with an API error.
    Error(u16, String),
}

/// A mock provider that returns scripted responses in order and captures
/// every request for assertions.
pub struct MockProvider {
    model_id: String,
    responses: Mutex<VecDeque<Scripted>>,
    default_response: Mutex<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            responses: Mutex::new(VecDeque::new()),
            default_response: Mutex::new("Final Answer: (no more scripted responses)".to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a text response.
    pub fn queue_response(&self, text: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Scripted::Text(text.to_string()));
    }

    /// Queue an API failure.
    pub fn queue_error(&self, status: u16, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Scripted::Error(status, message.to_string()));
    }

    /// Reply returned once the queue is empty (defaults to a final answer).
    pub fn set_default_response(&self, text: &str) {
        *self.default_response.lock().unwrap() = text.to_string();
    }

    /// Number of completion calls made so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// All captured requests.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The most recent captured request.
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, AbacusError> {
        self.requests.lock().unwrap().push(request.clone());

        let scripted = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Scripted::Text(self.default_response.lock().unwrap().clone()));

        match scripted {
            Scripted::Text(text) => Ok(CompletionResponse {
                text,
                usage: Usage {
                    input_tokens: 10,
                    output_tokens: 20,
                    total_tokens: 30,
                },
                finish_reason: Some(FinishReason::Stop),
            }),
            Scripted::Error(status, message) => Err(AbacusError::api(status, message)),
        }
    }
}
