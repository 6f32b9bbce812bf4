//! Workflow-style execution wrapper around agent invocation.
//!
//! This is not a durable engine. It supplies the two things the
//! orchestration layer owes the agent loop: a retry policy (bounded
//! attempts with capped exponential backoff) and a start-to-close timeout,
//! applied in-process around each activity. The loop itself stays free of
//! timeouts and retries.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::agent::{invoke_agent, AgentDefinition};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::tools::ToolCatalog;

/// Retry bounds for one activity.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub maximum_attempts: u32,
    pub initial_interval: Duration,
    pub maximum_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            maximum_attempts: 3,
            initial_interval: Duration::from_secs(2),
            maximum_interval: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Backoff before retry number `attempt` (0-based): doubles from the
    /// initial interval, capped at the maximum.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exp = self
            .initial_interval
            .as_millis()
            .saturating_mul(2u128.saturating_pow(attempt));
        let capped = exp.min(self.maximum_interval.as_millis());
        Duration::from_millis(capped as u64)
    }
}

/// Execution bounds for one activity.
#[derive(Debug, Clone)]
pub struct ActivityOptions {
    pub start_to_close: Duration,
    pub retry: RetryPolicy,
}

/// Run `f` as an activity: each attempt races the start-to-close timeout,
/// and retryable failures back off then try again until the attempt budget
/// is spent. Non-retryable failures propagate immediately.
pub async fn execute_activity<T, F, Fut>(
    name: &'static str,
    options: &ActivityOptions,
    mut f: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = options.retry.maximum_attempts.max(1);
    let mut attempt: u32 = 0;

    loop {
        let result = match tokio::time::timeout(options.start_to_close, f()).await {
            Ok(result) => result,
            Err(_) => Err(Error::ActivityTimeout {
                activity: name,
                timeout: options.start_to_close,
            }),
        };

        match result {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if !err.is_retryable() || attempt >= attempts {
                    return Err(err);
                }
                let delay = options.retry.delay_for_attempt(attempt - 1);
                tracing::warn!(
                    activity = name,
                    attempt,
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "activity attempt failed, backing off"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Input to the agent workflow.
#[derive(Clone)]
pub struct AgentRequest {
    pub request_text: String,
    /// Presigned URLs of any staged uploads.
    pub request_files: Vec<String>,
    pub agents: Vec<Arc<AgentDefinition>>,
}

/// The one workflow this service runs: invoke the first resolved agent as a
/// single retrying activity.
pub struct AgentWorkflow {
    catalog: Arc<ToolCatalog>,
    config: Config,
}

impl AgentWorkflow {
    pub fn new(catalog: Arc<ToolCatalog>, config: Config) -> Self {
        Self { catalog, config }
    }

    fn invoke_options() -> ActivityOptions {
        ActivityOptions {
            start_to_close: Duration::from_secs(60),
            retry: RetryPolicy::default(),
        }
    }

    pub async fn run(&self, request: &AgentRequest) -> Result<String> {
        let agent = request.agents.first().ok_or(Error::NoAgents)?;
        let workflow_id = workflow_id(&request.request_text);

        tracing::info!(
            workflow_id = %workflow_id,
            agent = %agent.name,
            files = request.request_files.len(),
            "starting agent workflow"
        );

        // Only the first agent is exercised today; each invocation is
        // independent, so extending this to fan out is a caller concern.
        execute_activity("invoke-agent", &Self::invoke_options(), || {
            invoke_agent(
                agent,
                &request.request_text,
                &request.request_files,
                &self.catalog,
                &self.config,
            )
        })
        .await
    }
}

/// Log-correlation id derived from the leading request text.
fn workflow_id(text: &str) -> String {
    let prefix: String = text.chars().take(20).collect();
    format!("agent-workflow-{}", prefix)
}
