//! The agent loop runner.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::AbacusError;
use crate::provider::{CompletionProvider, CompletionRequest};
use crate::tools::ToolRegistry;
use crate::types::{ChatMessage, GenerationSettings};

use super::events::{AgentEvent, EventSink};
use super::parser;
use super::prompt;
use super::step::{AgentStep, Scratchpad, StepRecord};

const DEFAULT_MAX_STEPS: u32 = 8;

/// Runs the question-answering loop: one model call per step, at most
/// `max_steps` calls, always resolving to a string.
pub struct AgentRunner {
    provider: Arc<dyn CompletionProvider>,
    tools: ToolRegistry,
    settings: GenerationSettings,
    max_steps: u32,
    event_sink: Option<EventSink>,
}

impl AgentRunner {
    pub fn new(provider: Arc<dyn CompletionProvider>, tools: ToolRegistry) -> Self {
        Self {
            provider,
            tools,
            settings: GenerationSettings::default(),
            max_steps: DEFAULT_MAX_STEPS,
            event_sink: None,
        }
    }

    /// Cap the number of model calls per question (must be at least 1).
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set generation settings used for every model call.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Stream progress events to a sink.
    pub fn with_event_sink(mut self, sink: EventSink) -> Self {
        self.event_sink = Some(sink);
        self
    }

    fn emit(&self, event: AgentEvent) {
        if let Some(ref sink) = self.event_sink {
            (sink)(&event);
        }
    }

    /// Answer one question.
    ///
    /// Upstream completion failures propagate as errors; everything the
    /// model or the tools get wrong resolves to a string answer instead:
    /// unknown tools and tool failures become scratchpad observations, a
    /// malformed reply is retried once with a corrective instruction and
    /// then taken verbatim, and an exhausted step budget yields an explicit
    /// fallback answer.
    pub async fn answer(&self, question: &str) -> Result<String, AbacusError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AbacusError::InvalidArgument(
                "question must not be empty".into(),
            ));
        }
        if self.max_steps == 0 {
            return Err(AbacusError::InvalidArgument(
                "max_steps must be at least 1".into(),
            ));
        }

        let run_id = Uuid::new_v4();
        self.emit(AgentEvent::Started {
            run_id,
            question: question.to_string(),
        });

        let system = prompt::system_prompt(&self.tools);
        let settings = self.settings_with_observation_stop();
        let mut scratchpad = Scratchpad::new();
        let mut corrective = false;

        for step in 1..=self.max_steps {
            let request = CompletionRequest {
                messages: vec![
                    ChatMessage::system(system.clone()),
                    ChatMessage::user(prompt::user_prompt(question, &scratchpad, corrective)),
                ],
                settings: settings.clone(),
            };

            let response = self.provider.complete(&request).await?;
            debug!(%run_id, step, "model responded");

            match parser::parse_step(&response.text) {
                Ok(AgentStep::FinalAnswer { text }) => {
                    self.emit(AgentEvent::Finished {
                        answer: text.clone(),
                    });
                    return Ok(text);
                }
                Ok(AgentStep::ToolCall {
                    tool,
                    input,
                    thought,
                }) => {
                    corrective = false;
                    if let Some(ref text) = thought {
                        self.emit(AgentEvent::Thought { text: text.clone() });
                    }
                    self.emit(AgentEvent::ToolInvoked {
                        tool: tool.clone(),
                        input: input.clone(),
                    });

                    let (observation, is_error) = self.dispatch(&tool, &input).await;
                    self.emit(AgentEvent::Observation {
                        tool: tool.clone(),
                        text: observation.clone(),
                        is_error,
                    });
                    scratchpad.push(StepRecord {
                        thought,
                        tool,
                        input,
                        observation,
                    });
                }
                Err(failure) => {
                    if corrective {
                        // Second malformed reply in a row: hand the raw text
                        // to the user rather than failing the question.
                        warn!(%run_id, step, %failure, "unparseable reply after corrective retry");
                        let text = response.text.trim().to_string();
                        self.emit(AgentEvent::Finished {
                            answer: text.clone(),
                        });
                        return Ok(text);
                    }
                    debug!(%run_id, step, %failure, "unparseable reply, retrying with correction");
                    self.emit(AgentEvent::ParseRetry {
                        reason: failure.reason,
                    });
                    corrective = true;
                }
            }
        }

        self.emit(AgentEvent::StepLimitReached {
            steps: self.max_steps,
        });
        let answer = match scratchpad.last_observation() {
            Some(observation) => format!(
                "I could not determine a final answer within {} steps. \
                 The last tool result was: {observation}",
                self.max_steps
            ),
            None => format!(
                "I could not determine a final answer within {} steps.",
                self.max_steps
            ),
        };
        self.emit(AgentEvent::Finished {
            answer: answer.clone(),
        });
        Ok(answer)
    }

    /// Run one requested tool, resolving every failure to observation text.
    async fn dispatch(&self, tool: &str, input: &str) -> (String, bool) {
        match self.tools.get(tool) {
            None => {
                warn!(tool, "model requested an unknown tool");
                (
                    format!(
                        "'{tool}' is not a known tool. Available tools: {}",
                        self.tools.names().join(", ")
                    ),
                    true,
                )
            }
            Some(t) => match t.invoke(input).await {
                Ok(output) => (output, false),
                Err(e) => (e.to_string(), true),
            },
        }
    }

    fn settings_with_observation_stop(&self) -> GenerationSettings {
        let mut settings = self.settings.clone();
        let stops = settings.stop_sequences.get_or_insert_with(Vec::new);
        if !stops.iter().any(|s| s == prompt::OBSERVATION_STOP) {
            stops.push(prompt::OBSERVATION_STOP.to_string());
        }
        settings
    }
}

impl std::fmt::Debug for AgentRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRunner")
            .field("provider", &self.provider.provider_name())
            .field("model", &self.provider.model_id())
            .field("tools", &self.tools.names())
            .field("max_steps", &self.max_steps)
            .finish()
    }
}
