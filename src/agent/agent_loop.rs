//! Core tool-resolution loop.
//!
//! One invocation drives a private transcript through repeated provider
//! calls. Every tool call the model requests gets exactly one result turn,
//! appended in request order, before the next provider call; the provider
//! rejects a resumed transcript with unresolved calls. The loop never fails
//! because of a tool: tool problems travel back to the model as payloads.

use serde_json::{json, Map, Value};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::llm::{LlmProvider, ModelTurn, OpenAiProvider, ProviderId, ToolCall, TranscriptItem};
use crate::tools::ToolCatalog;

use super::AgentDefinition;

/// Default tool-resolution budget per agent invocation.
pub const DEFAULT_MAX_ITERATIONS: usize = 5;

/// Returned when the budget runs out before the model settles on an answer.
/// A terminal outcome, not an error: the wrapping activity decides whether
/// the whole invocation is worth retrying.
pub const MAX_ITERATIONS_MESSAGE: &str = "Reached max tool iterations without final answer.";

/// Drives one agent invocation to completion.
pub struct AgentLoop<'a> {
    provider: &'a dyn LlmProvider,
    catalog: &'a ToolCatalog,
    max_iterations: usize,
}

impl<'a> AgentLoop<'a> {
    pub fn new(provider: &'a dyn LlmProvider, catalog: &'a ToolCatalog) -> Self {
        Self {
            provider,
            catalog,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Run over a seeded transcript until the model stops requesting tools.
    ///
    /// Returns the final text, the serialized turn when the model produced
    /// neither text nor tool calls, or [`MAX_ITERATIONS_MESSAGE`] on budget
    /// exhaustion. Provider and credential faults are the only errors.
    pub async fn run(
        &self,
        mut transcript: Vec<TranscriptItem>,
        tool_schemas: Option<&[Value]>,
        model: &str,
    ) -> Result<String> {
        for iteration in 0..self.max_iterations {
            tracing::debug!(iteration = iteration + 1, "agent loop iteration");

            let turn = self
                .provider
                .create_response(model, &transcript, tool_schemas)
                .await?;

            // Echo the raw output items first; the provider correlates the
            // tool results appended below against its own call items.
            transcript.extend(turn.output.iter().cloned().map(TranscriptItem::raw));

            if turn.tool_calls.is_empty() {
                return final_answer(&turn);
            }

            for call in &turn.tool_calls {
                let output = self.resolve_call(call).await;
                transcript.push(TranscriptItem::tool_output(call.call_id.clone(), output));
            }
        }

        tracing::warn!(
            max_iterations = self.max_iterations,
            "tool budget exhausted without final answer"
        );
        Ok(MAX_ITERATIONS_MESSAGE.to_string())
    }

    /// Produce the result payload for one requested call.
    async fn resolve_call(&self, call: &ToolCall) -> String {
        let args = parse_arguments(&call.arguments);

        if !call.name.is_empty() {
            if let Some(execution) = self.catalog.execute(&call.name, &args).await {
                if execution.is_error {
                    tracing::warn!(tool = %call.name, "tool execution failed");
                } else {
                    tracing::debug!(tool = %call.name, "tool executed");
                }
                return execution.payload;
            }
        }

        // Unknown or unnamed tool: answer with a placeholder carrying the
        // raw argument string so the model sees what it asked for.
        tracing::debug!(tool = %call.name, "no implementation for requested tool");
        json!({
            "result": format!(
                "Function '{}' called with args {}. Implementation needed.",
                call.name, call.arguments
            ),
        })
        .to_string()
    }
}

fn final_answer(turn: &ModelTurn) -> Result<String> {
    match &turn.text {
        Some(text) if !text.is_empty() => Ok(text.clone()),
        // No usable text: fall back to the whole structured turn rather
        // than returning an empty string.
        _ => Ok(serde_json::to_string(turn)?),
    }
}

/// Parse raw tool arguments. Anything that is not a JSON object comes back
/// as an empty map; tools treat missing keys as absent values.
fn parse_arguments(raw: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Run one agent against a staged request: validate the model pin, build
/// the provider client and tool schemas, seed the transcript, drive the
/// loop. This is the body of the invoke-agent activity.
pub async fn invoke_agent(
    agent: &AgentDefinition,
    request_text: &str,
    request_files: &[String],
    catalog: &ToolCatalog,
    config: &Config,
) -> Result<String> {
    agent.provider.ensure_supported(&agent.model)?;

    let provider = match agent.provider {
        ProviderId::OpenAi => OpenAiProvider::from_config(config)?,
        ProviderId::Anthropic | ProviderId::Gemini => {
            return Err(Error::ProviderNotImplemented(agent.provider.as_str()))
        }
    };

    let schemas = if agent.tools.is_empty() {
        None
    } else {
        Some(provider.build_tool_schemas(&agent.tools))
    };

    let transcript = vec![
        TranscriptItem::system(agent.system_prompt.clone()),
        TranscriptItem::user(request_text, request_files),
    ];

    tracing::info!(
        agent = %agent.name,
        model = %agent.model,
        tools = agent.tools.len(),
        "invoking agent"
    );

    AgentLoop::new(&provider, catalog)
        .with_max_iterations(config.max_tool_iterations)
        .run(transcript, schemas.as_deref(), &agent.model)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_parse_to_a_map() {
        let args = parse_arguments("{\"employee_id\": \"E-1\", \"n\": 2}");
        assert_eq!(args.get("employee_id").unwrap(), "E-1");
        assert_eq!(args.get("n").unwrap(), 2);
    }

    #[test]
    fn malformed_arguments_become_an_empty_map() {
        assert!(parse_arguments("{invalid").is_empty());
        assert!(parse_arguments("").is_empty());
    }

    #[test]
    fn non_object_arguments_become_an_empty_map() {
        assert!(parse_arguments("[1, 2]").is_empty());
        assert!(parse_arguments("\"text\"").is_empty());
        assert!(parse_arguments("42").is_empty());
    }

    fn test_agent(provider: ProviderId, model: &str) -> AgentDefinition {
        AgentDefinition {
            name: "Test Agent".to_string(),
            system_prompt: "You are a test agent.".to_string(),
            provider,
            model: model.to_string(),
            tools: vec![],
        }
    }

    #[tokio::test]
    async fn invoke_rejects_models_outside_the_allow_list() {
        let catalog = ToolCatalog::with_builtin_tools();
        let agent = test_agent(ProviderId::OpenAi, "gpt-2");

        let err = invoke_agent(&agent, "hi", &[], &catalog, &Config::new(None))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedModel { .. }));
    }

    #[tokio::test]
    async fn invoke_reports_unimplemented_providers() {
        let catalog = ToolCatalog::with_builtin_tools();
        let agent = test_agent(ProviderId::Gemini, "gemini-pro");

        let err = invoke_agent(&agent, "hi", &[], &catalog, &Config::new(None))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ProviderNotImplemented("Gemini")));
    }

    #[tokio::test]
    async fn invoke_requires_the_openai_credential() {
        let catalog = ToolCatalog::with_builtin_tools();
        let agent = test_agent(ProviderId::OpenAi, "gpt-4");

        let err = invoke_agent(&agent, "hi", &[], &catalog, &Config::new(None))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingCredential("OPENAI_API_KEY")));
    }
}
