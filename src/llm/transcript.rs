//! Conversation transcript model, in provider wire shape.
//!
//! The transcript is append-only: seed turns (system prompt, user content)
//! are authored here, model output re-enters as opaque raw items so the
//! provider can correlate tool-result turns with the tool-call turns that
//! caused them, and tool results are appended as `function_call_output`
//! entries keyed by the provider-issued call id.

use serde::Serialize;
use serde_json::Value;

/// Roles for authored turns. Assistant turns come back as raw output items,
/// so only the seeding roles are constructed directly in this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One content part of a user turn.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    InputText { text: String },
    InputFile { file_url: String },
}

/// Content of an authored message: a bare string or structured parts.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// An authored role-tagged message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageItem {
    pub role: Role,
    pub content: Content,
}

/// A resolved tool result, correlated to its request by `call_id`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutputItem {
    #[serde(rename = "type")]
    kind: &'static str,
    pub call_id: String,
    pub output: String,
}

/// One transcript entry.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TranscriptItem {
    Message(MessageItem),
    ToolOutput(ToolOutputItem),
    /// Verbatim model output item, echoed back exactly as received.
    Raw(Value),
}

impl TranscriptItem {
    pub fn system(prompt: impl Into<String>) -> Self {
        TranscriptItem::Message(MessageItem {
            role: Role::System,
            content: Content::Text(prompt.into()),
        })
    }

    /// User turn holding the request text plus one file part per staged URL.
    pub fn user(text: impl Into<String>, file_urls: &[String]) -> Self {
        let mut parts = vec![ContentPart::InputText { text: text.into() }];
        parts.extend(file_urls.iter().map(|url| ContentPart::InputFile {
            file_url: url.clone(),
        }));
        TranscriptItem::Message(MessageItem {
            role: Role::User,
            content: Content::Parts(parts),
        })
    }

    pub fn tool_output(call_id: impl Into<String>, output: impl Into<String>) -> Self {
        TranscriptItem::ToolOutput(ToolOutputItem {
            kind: "function_call_output",
            call_id: call_id.into(),
            output: output.into(),
        })
    }

    pub fn raw(item: Value) -> Self {
        TranscriptItem::Raw(item)
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolCall {
    /// Provider-issued correlation token.
    pub call_id: String,
    pub name: String,
    /// Serialized arguments exactly as the model produced them.
    pub arguments: String,
}

/// Parsed result of one provider call.
///
/// `output` keeps every raw item in provider order; `tool_calls` are parsed
/// out of it without reordering. Serialization of the whole turn is the
/// fallback answer when the model produced neither text nor tool calls.
#[derive(Debug, Clone, Serialize)]
pub struct ModelTurn {
    #[serde(rename = "output_items")]
    pub output: Vec<Value>,
    pub tool_calls: Vec<ToolCall>,
    #[serde(rename = "output_text")]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn system_turn_serializes_to_plain_content() {
        let item = TranscriptItem::system("You are helpful.");
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"role": "system", "content": "You are helpful."})
        );
    }

    #[test]
    fn user_turn_carries_text_and_file_parts() {
        let urls = vec!["https://assets.example/a.pdf".to_string()];
        let item = TranscriptItem::user("What is my PTO balance?", &urls);
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({
                "role": "user",
                "content": [
                    {"type": "input_text", "text": "What is my PTO balance?"},
                    {"type": "input_file", "file_url": "https://assets.example/a.pdf"},
                ],
            })
        );
    }

    #[test]
    fn tool_output_turn_has_wire_type_tag() {
        let item = TranscriptItem::tool_output("call_1", "{\"ok\":true}");
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({
                "type": "function_call_output",
                "call_id": "call_1",
                "output": "{\"ok\":true}",
            })
        );
    }

    #[test]
    fn raw_items_pass_through_untouched() {
        let original = json!({
            "type": "function_call",
            "call_id": "call_9",
            "name": "calculate_pension",
            "arguments": "{}",
            "id": "fc_123",
        });
        let item = TranscriptItem::raw(original.clone());
        assert_eq!(serde_json::to_value(&item).unwrap(), original);
    }

    #[test]
    fn model_turn_serializes_with_wire_field_names() {
        let turn = ModelTurn {
            output: vec![json!({"type": "message"})],
            tool_calls: vec![],
            text: None,
        };
        let value = serde_json::to_value(&turn).unwrap();
        assert!(value.get("output_items").is_some());
        assert!(value.get("tool_calls").is_some());
        assert!(value.get("output_text").is_some());
    }
}
