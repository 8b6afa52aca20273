//! Tool trait and registry.

pub mod calculator;
pub mod reasoning;
pub mod wikipedia;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AbacusConfig;
use crate::error::AbacusError;
use crate::provider::CompletionProvider;

/// Core tool trait: a named capability the agent may invoke with a text
/// argument.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must match what the model writes in its Action line).
    fn name(&self) -> &str;

    /// Human-readable description, shown to the model in the tool catalog.
    fn description(&self) -> &str;

    /// Execute the tool against a free-text input.
    async fn invoke(&self, input: &str) -> Result<String, AbacusError>;
}

/// An ordered set of tools with exact-name lookup.
///
/// Names are matched case-sensitively; a name the model invents that is not
/// registered here is the caller's "unknown tool" case, never a panic.
/// Registration order is preserved so the prompt catalog is stable.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Names must be unique within the registry.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), AbacusError> {
        if self.get(tool.name()).is_some() {
            return Err(AbacusError::InvalidArgument(format!(
                "duplicate tool name: {}",
                tool.name()
            )));
        }
        self.tools.push(tool);
        Ok(())
    }

    /// Look up a tool by exact, case-sensitive name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Tools in registration order.
    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

/// The built-in tool set: calculator, Wikipedia lookup, and LLM-backed
/// reasoning (which is why a provider handle is required). The config
/// supplies base-URL overrides for upstream-backed tools.
pub fn default_registry(
    provider: Arc<dyn CompletionProvider>,
    config: &AbacusConfig,
) -> Result<ToolRegistry, AbacusError> {
    let mut wikipedia_tool = wikipedia::WikipediaTool::new();
    if let Some(url) = config.get_base_url("wikipedia") {
        wikipedia_tool = wikipedia_tool.with_api_url(url);
    }

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(calculator::CalculatorTool::new()))?;
    registry.register(Arc::new(wikipedia_tool))?;
    registry.register(Arc::new(reasoning::ReasoningTool::new(provider)))?;
    Ok(registry)
}
