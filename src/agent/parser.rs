//! Best-effort parsing of the model's reply into an [`AgentStep`].
//!
//! The model is asked to reply in the Thought / Action / Action Input /
//! Final Answer line format, but is not guaranteed to comply. Anything that
//! does not match is reported as a parse failure for the caller's retry
//! policy, never a panic.

use std::sync::OnceLock;

use regex::Regex;

use super::step::AgentStep;

/// Why a model reply could not be parsed into a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub reason: String,
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason)
    }
}

fn final_answer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)Final Answer\s*:\s*(.*)\z").expect("valid regex"))
}

fn action_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*Action\s*:\s*(.+?)\s*$").expect("valid regex"))
}

fn action_input_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)Action Input\s*:\s*(.*)\z").expect("valid regex"))
}

fn thought_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\s*Thought\s*:\s*(.+?)\s*$").expect("valid regex"))
}

/// Parse one model reply into a structured step.
pub fn parse_step(raw: &str) -> Result<AgentStep, ParseFailure> {
    let has_action = action_re().is_match(raw);
    let has_final = final_answer_re().is_match(raw);

    if has_action && has_final {
        return Err(ParseFailure {
            reason: "reply contains both an Action and a Final Answer".into(),
        });
    }

    if has_final {
        let text = final_answer_re()
            .captures(raw)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        return Ok(AgentStep::FinalAnswer { text });
    }

    if has_action {
        let tool = action_re()
            .captures(raw)
            .and_then(|c| c.get(1))
            .map(|m| clean_fragment(m.as_str()))
            .unwrap_or_default();
        if tool.is_empty() {
            return Err(ParseFailure {
                reason: "Action line names no tool".into(),
            });
        }

        let input = match action_input_re().captures(raw).and_then(|c| c.get(1)) {
            Some(m) => clean_fragment(truncate_at_observation(m.as_str())),
            None => {
                return Err(ParseFailure {
                    reason: format!("Action '{tool}' has no Action Input line"),
                })
            }
        };

        let thought = thought_re()
            .captures(raw)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string());

        return Ok(AgentStep::ToolCall {
            tool,
            input,
            thought,
        });
    }

    Err(ParseFailure {
        reason: "reply contains neither an Action nor a Final Answer".into(),
    })
}

/// Drop a hallucinated `Observation:` continuation the stop sequence missed.
fn truncate_at_observation(input: &str) -> &str {
    match input.find("\nObservation") {
        Some(pos) => &input[..pos],
        None => input,
    }
}

/// Trim whitespace and a single layer of quoting or backticks.
fn clean_fragment(fragment: &str) -> String {
    let trimmed = fragment.trim();
    let trimmed = trimmed
        .strip_prefix("```")
        .and_then(|s| s.strip_suffix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.trim();
    for quote in ['"', '\'', '`'] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return trimmed[1..trimmed.len() - 1].trim().to_string();
        }
    }
    trimmed.to_string()
}
