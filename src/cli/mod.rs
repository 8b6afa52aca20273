//! CLI entry point for Abacus.

pub mod chat;

use clap::{Parser, Subcommand};

/// Abacus CLI
#[derive(Parser, Debug)]
#[command(name = "abacus", version, about = "Abacus — math word-problem assistant")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a single question and exit
    Ask(AskArgs),
    /// Interactive chat session
    Chat(ChatArgs),
}

/// Arguments for the `ask` subcommand.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// Model to use
    #[arg(short, long, default_value = "gemma2-9b-it")]
    pub model: String,

    /// Groq API key (overrides GROQ_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Maximum agent steps per question
    #[arg(long, default_value_t = 8)]
    pub max_steps: u32,

    /// Temperature (0.0 - 2.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Suppress the agent trace (thoughts, tool calls, observations)
    #[arg(short, long)]
    pub quiet: bool,

    /// The question (a built-in example is used when omitted)
    pub question: Option<String>,
}

/// Arguments for the `chat` subcommand.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Model to use
    #[arg(short, long, default_value = "gemma2-9b-it")]
    pub model: String,

    /// Groq API key (overrides GROQ_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Maximum agent steps per question
    #[arg(long, default_value_t = 8)]
    pub max_steps: u32,

    /// Temperature (0.0 - 2.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
