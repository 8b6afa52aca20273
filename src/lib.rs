//! Abacus — math word-problem assistant.
//!
//! A tool-using agent over a hosted chat model: given a natural-language
//! arithmetic or word problem, the agent decides turn by turn whether to
//! invoke a calculator, a Wikipedia lookup, or a free-form reasoning tool,
//! and returns a step-by-step answer.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use abacus::agent::AgentRunner;
//! use abacus::config::AbacusConfig;
//! use abacus::provider::create_provider;
//! use abacus::tools::default_registry;
//!
//! # async fn example() -> abacus::error::Result<()> {
//! let config = AbacusConfig::from_env();
//! let provider = Arc::from(create_provider("gemma2-9b-it", &config)?);
//! let runner = AgentRunner::new(Arc::clone(&provider), default_registry(provider, &config)?);
//! let answer = runner.answer("What is 12 * (3 + 4)?").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod prelude;
pub mod provider;
pub mod session;
pub mod tools;
pub mod types;
