//! Progress events emitted by the agent loop.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Callback used for streaming agent events to a UI.
pub type EventSink = Arc<dyn Fn(&AgentEvent) + Send + Sync>;

/// Events emitted while answering one question.
///
/// Observational only: a sink can render progress but cannot influence the
/// loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    Started {
        run_id: Uuid,
        question: String,
    },
    Thought {
        text: String,
    },
    ToolInvoked {
        tool: String,
        input: String,
    },
    Observation {
        tool: String,
        text: String,
        is_error: bool,
    },
    ParseRetry {
        reason: String,
    },
    StepLimitReached {
        steps: u32,
    },
    Finished {
        answer: String,
    },
}
