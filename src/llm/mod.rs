//! LLM provider integration.
//!
//! Each provider implements [`LlmProvider`]: schema building plus a single
//! request/response call. The agent loop depends only on that interface,
//! which keeps it testable against scripted providers. OpenAI is the one
//! wired-up provider; Anthropic and Gemini are declared in the catalog with
//! model allow-lists but have no invocation path yet.

pub mod openai;
pub mod schema;
pub mod transcript;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::tools::Tool;

pub use openai::OpenAiProvider;
pub use transcript::{Content, ContentPart, MessageItem, ModelTurn, Role, ToolCall, TranscriptItem};

/// Models accepted for OpenAI agents.
pub const OPENAI_MODELS: &[&str] = &[
    "gpt-5",
    "gpt-5-mini",
    "gpt-4",
    "gpt-4-turbo",
    "gpt-4o",
    "gpt-4o-mini",
    "gpt-3.5-turbo",
];

/// Models accepted for Anthropic agents (declared, not yet invocable).
pub const ANTHROPIC_MODELS: &[&str] = &[
    "claude-3-5-sonnet-20241022",
    "claude-3-opus-20240229",
    "claude-3-haiku-20240307",
];

/// Models accepted for Gemini agents (declared, not yet invocable).
pub const GEMINI_MODELS: &[&str] = &[
    "gemini-pro",
    "gemini-pro-vision",
    "gemini-1.5-pro",
    "gemini-1.5-flash",
];

/// Which provider an agent talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProviderId {
    #[serde(rename = "OPENAI")]
    OpenAi,
    #[serde(rename = "ANTHROPIC")]
    Anthropic,
    #[serde(rename = "GEMINI")]
    Gemini,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OpenAI",
            ProviderId::Anthropic => "Anthropic",
            ProviderId::Gemini => "Gemini",
        }
    }

    pub fn supported_models(&self) -> &'static [&'static str] {
        match self {
            ProviderId::OpenAi => OPENAI_MODELS,
            ProviderId::Anthropic => ANTHROPIC_MODELS,
            ProviderId::Gemini => GEMINI_MODELS,
        }
    }

    /// Fails when `model` is not in this provider's allow-list.
    pub fn ensure_supported(&self, model: &str) -> Result<()> {
        if self.supported_models().contains(&model) {
            Ok(())
        } else {
            Err(Error::UnsupportedModel {
                provider: self.as_str(),
                model: model.to_string(),
                supported: self.supported_models(),
            })
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One implementation per provider: convert tool contracts into the
/// provider's schema shape, and issue one model call over a transcript.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Provider-native function schemas for the given tools.
    fn build_tool_schemas(&self, tools: &[Arc<dyn Tool>]) -> Vec<Value>;

    /// Issue a single model call. Every tool call present in the response
    /// must be surfaced, in the order the provider returned it.
    async fn create_response(
        &self,
        model: &str,
        transcript: &[TranscriptItem],
        tools: Option<&[Value]>,
    ) -> Result<ModelTurn>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_allow_lists_gate_each_provider() {
        assert!(ProviderId::OpenAi.ensure_supported("gpt-4").is_ok());
        assert!(ProviderId::Anthropic
            .ensure_supported("claude-3-opus-20240229")
            .is_ok());

        let err = ProviderId::OpenAi
            .ensure_supported("claude-3-opus-20240229")
            .unwrap_err();
        assert!(err.to_string().contains("not supported by OpenAI"));
    }

    #[test]
    fn provider_ids_serialize_in_wire_case() {
        assert_eq!(
            serde_json::to_value(ProviderId::OpenAi).unwrap(),
            serde_json::json!("OPENAI")
        );
        assert_eq!(
            serde_json::to_value(ProviderId::Gemini).unwrap(),
            serde_json::json!("GEMINI")
        );
    }
}
