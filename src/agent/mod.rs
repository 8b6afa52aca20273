//! The agent loop: ask the model what to do next, run the requested tool,
//! feed the observation back, repeat until a final answer.

pub mod events;
pub mod parser;
pub mod prompt;
pub mod runner;
pub mod step;

pub use events::{AgentEvent, EventSink};
pub use runner::AgentRunner;
pub use step::{AgentStep, Scratchpad, StepRecord};
