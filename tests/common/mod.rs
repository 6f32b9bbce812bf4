#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use steward::llm::{LlmProvider, ModelTurn, ToolCall, TranscriptItem};
use steward::tools::{Tool, ToolCatalog, ToolParameter};
use steward::{Error, Result};

/// A scripted provider that replays model turns in order and snapshots the
/// transcript it was shown on each call.
pub struct ScriptedProvider {
    turns: Mutex<VecDeque<ModelTurn>>,
    transcripts: Mutex<Vec<Vec<Value>>>,
}

impl ScriptedProvider {
    /// Provider that answers once with plain text and no tool calls.
    pub fn single_text(text: &str) -> Self {
        Self::with_turns(vec![text_turn(text)])
    }

    /// Provider that replays `turns` in order (popped front to back).
    pub fn with_turns(turns: Vec<ModelTurn>) -> Self {
        Self {
            turns: Mutex::new(VecDeque::from(turns)),
            transcripts: Mutex::new(Vec::new()),
        }
    }

    /// Number of provider calls made so far.
    pub fn call_count(&self) -> usize {
        self.transcripts.lock().unwrap().len()
    }

    /// Serialized transcript exactly as seen by call `index` (0-based).
    pub fn transcript_for_call(&self, index: usize) -> Vec<Value> {
        self.transcripts.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn build_tool_schemas(&self, tools: &[Arc<dyn Tool>]) -> Vec<Value> {
        steward::llm::schema::function_schemas(tools)
    }

    async fn create_response(
        &self,
        _model: &str,
        transcript: &[TranscriptItem],
        _tools: Option<&[Value]>,
    ) -> Result<ModelTurn> {
        let snapshot = transcript
            .iter()
            .map(|item| serde_json::to_value(item).expect("transcript item serializes"))
            .collect();
        self.transcripts.lock().unwrap().push(snapshot);

        self.turns
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::InvalidRequest("scripted provider ran out of turns".to_string()))
    }
}

/// A turn where the model answers in text without requesting tools.
pub fn text_turn(text: &str) -> ModelTurn {
    ModelTurn {
        output: vec![json!({
            "type": "message",
            "role": "assistant",
            "content": [{"type": "output_text", "text": text}],
        })],
        tool_calls: vec![],
        text: Some(text.to_string()),
    }
}

/// A turn requesting one tool call per `(call_id, name, arguments)` triple.
pub fn tool_call_turn(requests: &[(&str, &str, &str)]) -> ModelTurn {
    let output = requests
        .iter()
        .map(|(call_id, name, arguments)| {
            json!({
                "type": "function_call",
                "call_id": call_id,
                "name": name,
                "arguments": arguments,
            })
        })
        .collect();
    let tool_calls = requests
        .iter()
        .map(|(call_id, name, arguments)| ToolCall {
            call_id: call_id.to_string(),
            name: name.to_string(),
            arguments: arguments.to_string(),
        })
        .collect();

    ModelTurn {
        output,
        tool_calls,
        text: None,
    }
}

/// A turn with neither usable text nor tool calls.
pub fn empty_turn() -> ModelTurn {
    ModelTurn {
        output: vec![json!({"type": "message", "role": "assistant", "content": []})],
        tool_calls: vec![],
        text: None,
    }
}

/// Tool that records every argument map it is executed with.
pub struct RecordingTool {
    pub calls: Mutex<Vec<Map<String, Value>>>,
}

impl RecordingTool {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Tool for RecordingTool {
    fn name(&self) -> &str {
        "record_args"
    }

    fn description(&self) -> &str {
        "Records the arguments it was called with"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![]
    }

    async fn execute(&self, args: &Map<String, Value>) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(args.clone());
        Ok(json!({"ok": true}).to_string())
    }
}

/// Tool that always fails.
pub struct FailingTool;

#[async_trait]
impl Tool for FailingTool {
    fn name(&self) -> &str {
        "always_fails"
    }

    fn description(&self) -> &str {
        "Fails on every execution"
    }

    fn parameters(&self) -> Vec<ToolParameter> {
        vec![]
    }

    async fn execute(&self, _args: &Map<String, Value>) -> anyhow::Result<String> {
        anyhow::bail!("boom")
    }
}

/// The built-in catalog plus any extra test tools.
pub fn catalog_with(extra: Vec<Arc<dyn Tool>>) -> ToolCatalog {
    let mut catalog = ToolCatalog::with_builtin_tools();
    for tool in extra {
        catalog.register(tool).expect("unique tool name");
    }
    catalog
}
