//! Prompt construction for the agent loop.

use crate::tools::ToolRegistry;

use super::step::Scratchpad;

/// Appended to the user prompt after a malformed reply.
pub const CORRECTIVE_INSTRUCTION: &str = "Your previous reply did not follow the required format. \
Reply again with either an Action and Action Input pair, or a Final Answer line.";

/// Stop sequence cutting the model off before it hallucinates observations.
pub const OBSERVATION_STOP: &str = "\nObservation:";

/// Render the system preamble: role, tool catalog, and format instructions.
pub fn system_prompt(tools: &ToolRegistry) -> String {
    let mut catalog = String::new();
    for tool in tools.tools() {
        catalog.push_str(&format!("{}: {}\n", tool.name(), tool.description()));
    }
    let names = tools.names().join(", ");

    format!(
        "You are an assistant that solves math word problems and factual questions \
step by step.\n\n\
You have access to the following tools:\n\n\
{catalog}\n\
Use the following format:\n\n\
Question: the input question you must answer\n\
Thought: you should always think about what to do next\n\
Action: the tool to use, exactly one of [{names}]\n\
Action Input: the input to the tool\n\
Observation: the result of the tool\n\
... (this Thought/Action/Action Input/Observation can repeat N times)\n\
Thought: I now know the final answer\n\
Final Answer: the final answer to the original question, explained point by point\n\n\
Begin!"
    )
}

/// Render the user turn: question, scratchpad transcript, and an optional
/// corrective instruction, ending with a `Thought:` cue.
pub fn user_prompt(question: &str, scratchpad: &Scratchpad, corrective: bool) -> String {
    let mut prompt = format!("Question: {question}\n");

    for record in scratchpad.records() {
        if let Some(ref thought) = record.thought {
            prompt.push_str(&format!("Thought: {thought}\n"));
        }
        prompt.push_str(&format!("Action: {}\n", record.tool));
        prompt.push_str(&format!("Action Input: {}\n", record.input));
        prompt.push_str(&format!("Observation: {}\n", record.observation));
    }

    if corrective {
        prompt.push_str(CORRECTIVE_INSTRUCTION);
        prompt.push('\n');
    }

    prompt.push_str("Thought:");
    prompt
}
