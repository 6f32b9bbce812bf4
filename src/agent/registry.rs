//! Agent registry: immutable name-to-definition lookup.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::tools::ToolCatalog;

use super::{benefits_agent, AgentDefinition};

/// Name-keyed agent definitions, built once at startup and passed by
/// reference to the request handlers.
#[derive(Default)]
pub struct AgentRegistry {
    agents: HashMap<String, Arc<AgentDefinition>>,
}

impl AgentRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the default agents, sharing tools with `catalog`.
    pub fn with_defaults(catalog: &ToolCatalog) -> Self {
        let mut registry = Self::new();
        registry.insert("benefits", benefits_agent(catalog));
        registry
    }

    pub fn insert(&mut self, key: impl Into<String>, agent: AgentDefinition) {
        self.agents.insert(key.into(), Arc::new(agent));
    }

    /// Look up one agent by registry key.
    pub fn get(&self, name: &str) -> Result<Arc<AgentDefinition>> {
        self.agents
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownAgent {
                name: name.to_string(),
                available: self.available(),
            })
    }

    /// Resolve names in request order; fails on the first unknown entry.
    pub fn resolve(&self, names: &[String]) -> Result<Vec<Arc<AgentDefinition>>> {
        names.iter().map(|name| self.get(name)).collect()
    }

    /// Registered keys, sorted for stable output.
    pub fn available(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.agents.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// All entries, sorted by key.
    pub fn entries(&self) -> Vec<(&str, &Arc<AgentDefinition>)> {
        let mut entries: Vec<(&str, &Arc<AgentDefinition>)> = self
            .agents
            .iter()
            .map(|(key, agent)| (key.as_str(), agent))
            .collect();
        entries.sort_unstable_by_key(|(key, _)| *key);
        entries
    }
}
