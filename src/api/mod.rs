//! HTTP API for the agent service.
//!
//! Three routes: `POST /call-agent` stages any uploads, resolves the named
//! agents, and runs the agent workflow; `GET /agents` lists the registry;
//! `GET /health` reports liveness.

pub mod types;

use std::sync::Arc;

use axum::{
    extract::{multipart::Field, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::agent::AgentRegistry;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::staging::{StagedUpload, StagingClient};
use crate::tools::ToolCatalog;
use crate::workflow::{AgentRequest, AgentWorkflow};
use types::{AgentSummary, AgentsResponse, CallAgentResponse, HealthResponse};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub registry: AgentRegistry,
    pub workflow: AgentWorkflow,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let catalog = Arc::new(ToolCatalog::with_builtin_tools());
        let registry = AgentRegistry::with_defaults(&catalog);
        let workflow = AgentWorkflow::new(catalog, config.clone());
        Self {
            config,
            registry,
            workflow,
        }
    }
}

/// Start the HTTP server and serve until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config));
    let app = routes(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the router with request tracing and permissive CORS.
pub fn routes(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/call-agent", post(call_agent))
        .route("/agents", get(list_agents))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Multipart fields lifted out of a `POST /call-agent` body.
struct CallAgentForm {
    request_text: String,
    agent_names: Vec<String>,
    uploads: Vec<StagedUpload>,
}

/// POST /call-agent - Run the requested agents against the uploaded request.
async fn call_agent(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<CallAgentResponse>> {
    let request_id = Uuid::new_v4();
    let form = parse_call_agent(multipart).await?;

    tracing::info!(
        %request_id,
        agents = ?form.agent_names,
        files = form.uploads.len(),
        "received agent request"
    );

    // Staging is skipped entirely for file-less requests, so the staging
    // credential is only required when something was uploaded.
    let request_files = if form.uploads.is_empty() {
        Vec::new()
    } else {
        StagingClient::from_config(&state.config)?
            .presign(form.uploads)
            .await?
    };

    let agents = state.registry.resolve(&form.agent_names)?;
    let request = AgentRequest {
        request_text: form.request_text.clone(),
        request_files: request_files.clone(),
        agents,
    };

    let result = state.workflow.run(&request).await?;
    tracing::info!(%request_id, "agent request completed");

    Ok(Json(CallAgentResponse {
        request_text: form.request_text,
        request_files,
        result,
        status: StatusCode::OK.as_u16(),
    }))
}

async fn parse_call_agent(mut multipart: Multipart) -> Result<CallAgentForm> {
    let mut request_text = None;
    let mut agent_names = Vec::new();
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::InvalidRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "request_text" => request_text = Some(text_field(field).await?),
            "agent_names" => agent_names.push(text_field(field).await?),
            "files" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(|ct| ct.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::InvalidRequest(e.to_string()))?
                    .to_vec();
                uploads.push(StagedUpload {
                    filename,
                    content_type,
                    data,
                });
            }
            other => {
                tracing::debug!(field = other, "ignoring unexpected multipart field");
            }
        }
    }

    let request_text = request_text.ok_or_else(|| {
        Error::InvalidRequest("missing required field 'request_text'".to_string())
    })?;

    Ok(CallAgentForm {
        request_text,
        agent_names,
        uploads,
    })
}

async fn text_field(field: Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| Error::InvalidRequest(e.to_string()))
}

/// GET /agents - List registered agents and their bindings.
async fn list_agents(State(state): State<Arc<AppState>>) -> Json<AgentsResponse> {
    let agents = state
        .registry
        .entries()
        .into_iter()
        .map(|(key, agent)| AgentSummary {
            name: key.to_string(),
            provider: agent.provider.as_str().to_string(),
            model: agent.model.clone(),
            tools: agent.tool_names().iter().map(|s| s.to_string()).collect(),
        })
        .collect();

    Json(AgentsResponse { agents })
}

/// GET /health - Liveness probe.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::InvalidRequest(_) | Error::NoAgents | Error::UnsupportedModel { .. } => {
            StatusCode::BAD_REQUEST
        }
        Error::UnknownAgent { .. } => StatusCode::NOT_FOUND,
        Error::ProviderNotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
        Error::MissingCredential(_) => StatusCode::INTERNAL_SERVER_ERROR,
        Error::Provider(_) | Error::Staging(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "request failed");
        } else {
            tracing::warn!(status = %status, error = %message, "request rejected");
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
