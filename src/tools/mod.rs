//! Tool catalog: typed tool contracts and name-based dispatch.
//!
//! Tools declare a language-neutral parameter list; provider-specific
//! schema shapes are produced elsewhere (see `crate::llm::schema`). The
//! catalog is built once at startup and shared read-only with the agent
//! loop. A tool's own failure never propagates out of `execute`: it is
//! folded into the payload so the model can see it and react.

mod enrollment;
mod lookup;
mod planning;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use thiserror::Error;

pub use enrollment::BenefitsEnrollment;
pub use lookup::{HealthInsuranceLookup, PtoBalanceLookup};
pub use planning::{CalculatePension, FsaHsaCalculator};

/// Wire-neutral parameter types. Each provider adapter maps these onto its
/// own schema vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    Float,
    Boolean,
    List,
    Map,
    Any,
}

/// One declared tool parameter.
#[derive(Debug, Clone)]
pub struct ToolParameter {
    pub name: String,
    pub kind: ParamKind,
    pub description: String,
    pub required: bool,
}

impl ToolParameter {
    /// New required parameter. Use [`optional`](Self::optional) to relax.
    pub fn new(name: impl Into<String>, kind: ParamKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// A callable tool exposed to the model.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Canonical name, used as the dispatch key.
    fn name(&self) -> &str;

    /// Human-readable description shown to the model.
    fn description(&self) -> &str;

    /// Declared parameters, in schema order.
    fn parameters(&self) -> Vec<ToolParameter>;

    /// Run the tool with already-parsed arguments. The returned string must
    /// itself be valid JSON; anything else is treated as a failure.
    async fn execute(&self, args: &Map<String, Value>) -> anyhow::Result<String>;
}

#[derive(Debug, Error)]
#[error("tool '{0}' is already registered")]
pub struct DuplicateTool(pub String);

/// Outcome of one catalog-dispatched execution. Failures inside the tool
/// land here as an error payload instead of propagating.
#[derive(Debug, Clone)]
pub struct ToolExecution {
    /// Serialized JSON payload to feed back to the model.
    pub payload: String,
    pub is_error: bool,
}

/// Immutable name-to-tool mapping.
#[derive(Default)]
pub struct ToolCatalog {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with the built-in benefits tools.
    pub fn with_builtin_tools() -> Self {
        let builtin: [Arc<dyn Tool>; 5] = [
            Arc::new(CalculatePension),
            Arc::new(HealthInsuranceLookup),
            Arc::new(PtoBalanceLookup),
            Arc::new(BenefitsEnrollment),
            Arc::new(FsaHsaCalculator),
        ];
        let mut tools: HashMap<String, Arc<dyn Tool>> = HashMap::new();
        for tool in builtin {
            tools.insert(tool.name().to_string(), tool);
        }
        Self { tools }
    }

    /// Register a tool under its canonical name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), DuplicateTool> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(DuplicateTool(name));
        }
        self.tools.insert(name, tool);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Registered tool names, sorted for stable output.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Execute a registered tool. Returns `None` when the name is unknown;
    /// the caller decides how to represent that to the model.
    ///
    /// A successful run must produce valid JSON; a failed run (or non-JSON
    /// output) becomes an error payload carrying the parsed arguments so the
    /// model can correct itself on the next turn.
    pub async fn execute(&self, name: &str, args: &Map<String, Value>) -> Option<ToolExecution> {
        let tool = self.lookup(name)?;

        let execution = match tool.execute(args).await {
            Ok(output) => match serde_json::from_str::<Value>(&output) {
                Ok(value) => ToolExecution {
                    payload: value.to_string(),
                    is_error: false,
                },
                Err(e) => failed_execution(e, args),
            },
            Err(e) => failed_execution(e, args),
        };

        Some(execution)
    }
}

/// Placeholder payload for tools whose real backend is not wired up yet:
/// echo the arguments so the model can keep reasoning about them.
pub(crate) fn stub_payload(name: &str, args: &Map<String, Value>) -> String {
    json!({
        "input": args,
        "note": format!("Stub {} implementation. Replace with real logic.", name),
    })
    .to_string()
}

fn failed_execution(error: impl std::fmt::Display, args: &Map<String, Value>) -> ToolExecution {
    let payload = json!({
        "error": format!("Tool execution failed: {}", error),
        "input": args,
    });
    ToolExecution {
        payload: payload.to_string(),
        is_error: true,
    }
}
