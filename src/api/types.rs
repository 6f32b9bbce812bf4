//! API request and response types.

use serde::Serialize;

/// Response after running an agent against a request.
#[derive(Debug, Clone, Serialize)]
pub struct CallAgentResponse {
    /// Original request text, echoed back
    pub request_text: String,

    /// Presigned URLs for any uploaded files
    pub request_files: Vec<String>,

    /// Final answer produced by the agent
    pub result: String,

    /// Status mirror for clients that only look at the body
    pub status: u16,
}

/// One registered agent, as listed by `GET /agents`.
#[derive(Debug, Clone, Serialize)]
pub struct AgentSummary {
    /// Registry key, the name callers pass in `agent_names`
    pub name: String,

    /// Provider the agent runs on
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Names of the tools bound to this agent
    pub tools: Vec<String>,
}

/// Response for `GET /agents`.
#[derive(Debug, Clone, Serialize)]
pub struct AgentsResponse {
    pub agents: Vec<AgentSummary>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
