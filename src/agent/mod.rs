//! Agents: named bundles of system prompt, provider/model pin, and an
//! allowed tool subset.
//!
//! Invocation follows the "tools in a loop" pattern:
//! 1. Seed a transcript with the agent's system prompt and the user request
//! 2. Call the model with the agent's tool schemas
//! 3. Execute every tool call the model requests and append the results
//! 4. Repeat until the model answers in text or the iteration budget runs out

mod agent_loop;
mod benefits;
mod registry;

pub use agent_loop::{
    invoke_agent, AgentLoop, DEFAULT_MAX_ITERATIONS, MAX_ITERATIONS_MESSAGE,
};
pub use benefits::benefits_agent;
pub use registry::AgentRegistry;

use std::sync::Arc;

use crate::llm::ProviderId;
use crate::tools::Tool;

/// Static configuration for one agent. Built at startup, immutable after.
#[derive(Clone)]
pub struct AgentDefinition {
    pub name: String,
    pub system_prompt: String,
    pub provider: ProviderId,
    pub model: String,
    /// Shared references into the tool catalog. The subset decides which
    /// schemas the model sees; dispatch still goes through the catalog.
    pub tools: Vec<Arc<dyn Tool>>,
}

impl AgentDefinition {
    /// Names of the agent's tools, in declaration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }
}

// Manual impl: `dyn Tool` objects are not `Debug`, so tools are shown by name.
impl std::fmt::Debug for AgentDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentDefinition")
            .field("name", &self.name)
            .field("system_prompt", &self.system_prompt)
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("tools", &self.tool_names())
            .finish()
    }
}
