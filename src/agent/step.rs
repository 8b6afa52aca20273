//! Structured agent steps and the per-question scratchpad.

use serde::{Deserialize, Serialize};

/// The model's decision for one loop iteration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentStep {
    /// Invoke a named tool with a text argument.
    ToolCall {
        tool: String,
        input: String,
        thought: Option<String>,
    },
    /// Stop and return text to the user.
    FinalAnswer { text: String },
}

/// One completed tool round: what the model thought, what it called, and
/// what came back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepRecord {
    pub thought: Option<String>,
    pub tool: String,
    pub input: String,
    pub observation: String,
}

/// The accumulating transcript of tool rounds for the current question.
///
/// Lives only for the duration of one `answer()` call; rendered into the
/// prompt each iteration so the model can condition on its earlier actions.
#[derive(Debug, Clone, Default)]
pub struct Scratchpad {
    records: Vec<StepRecord>,
}

impl Scratchpad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: StepRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn last_observation(&self) -> Option<&str> {
        self.records.last().map(|r| r.observation.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
