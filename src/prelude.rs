//! Convenience re-exports for common use.

pub use crate::agent::{AgentEvent, AgentRunner, AgentStep};
pub use crate::config::AbacusConfig;
pub use crate::error::{AbacusError, Result};
pub use crate::provider::{create_provider, CompletionProvider};
pub use crate::session::{ChatSession, Conversation};
pub use crate::tools::{default_registry, Tool, ToolRegistry};
pub use crate::types::{ChatMessage, GenerationSettings, Role};
