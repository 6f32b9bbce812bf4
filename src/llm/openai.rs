//! OpenAI Responses API client.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::tools::Tool;

use super::schema;
use super::transcript::{ModelTurn, ToolCall, TranscriptItem};
use super::LlmProvider;

/// Client for `POST /v1/responses`.
pub struct OpenAiProvider {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build from service config. Fails when no OpenAI credential is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .openai_api_key
            .clone()
            .ok_or(Error::MissingCredential("OPENAI_API_KEY"))?;
        Ok(Self::new(api_key, config.openai_base_url.clone()))
    }
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a [TranscriptItem],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [Value]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

#[derive(Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output: Vec<Value>,
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn build_tool_schemas(&self, tools: &[Arc<dyn Tool>]) -> Vec<Value> {
        schema::function_schemas(tools)
    }

    async fn create_response(
        &self,
        model: &str,
        transcript: &[TranscriptItem],
        tools: Option<&[Value]>,
    ) -> Result<ModelTurn> {
        let body = ResponsesRequest {
            model,
            input: transcript,
            tools,
            tool_choice: tools.map(|_| "auto"),
        };

        let url = format!("{}/v1/responses", self.base_url);
        tracing::debug!(model, items = transcript.len(), "calling OpenAI");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(Error::Provider)?
            .error_for_status()
            .map_err(Error::Provider)?;

        let reply: ResponsesReply = response.json().await.map_err(Error::Provider)?;
        Ok(parse_output(reply.output))
    }
}

/// Split raw output items into tool calls and aggregated text, keeping the
/// raw items in provider order for transcript echoing.
fn parse_output(output: Vec<Value>) -> ModelTurn {
    let mut tool_calls = Vec::new();
    let mut text_parts: Vec<&str> = Vec::new();

    for item in &output {
        match item.get("type").and_then(Value::as_str) {
            Some("function_call") => {
                tool_calls.push(ToolCall {
                    call_id: string_field(item, "call_id"),
                    name: string_field(item, "name"),
                    arguments: item
                        .get("arguments")
                        .and_then(Value::as_str)
                        .unwrap_or("{}")
                        .to_string(),
                });
            }
            Some("message") => {
                if let Some(parts) = item.get("content").and_then(Value::as_array) {
                    for part in parts {
                        if part.get("type").and_then(Value::as_str) == Some("output_text") {
                            if let Some(text) = part.get("text").and_then(Value::as_str) {
                                text_parts.push(text);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    let text = if text_parts.is_empty() {
        None
    } else {
        Some(text_parts.concat())
    };

    ModelTurn {
        output,
        tool_calls,
        text,
    }
}

fn string_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
