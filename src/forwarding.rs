//! Forwarding proxy
//!
//! Sends a task envelope to the selected agent's `/tasks/send` endpoint with
//! an explicit timeout. On transport-level success the downstream's task is
//! returned verbatim; any transport failure (connection refused, timeout,
//! non-success status, unparseable response envelope) is normalized into a
//! synthesized `failed` task that preserves the original id and user
//! message. Forwarding failures are always representable as a valid task and
//! are never raised. A single attempt is made per call; retry policy, if
//! desired, belongs to the caller.

use crate::directory::AgentDescriptor;
use crate::error::sanitize_error_message;
use crate::protocol::{Message, Task, TaskStatus};
use std::time::Duration;
use tracing::{info, warn};

/// Outcome of a forwarding attempt
///
/// Both variants carry a valid task. The distinction lets the HTTP layer map
/// downstream unreachability to a 502-equivalent while still returning a
/// `failed` task body, keeping it separate from a downstream agent's own
/// business failure (which arrives as `Delivered`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// Transport succeeded; the downstream's task, verbatim
    Delivered(Task),
    /// Transport failed; a synthesized `failed` task
    Unreachable(Task),
}

impl ForwardOutcome {
    /// The task envelope to return to the client, either way
    pub fn into_task(self) -> Task {
        match self {
            ForwardOutcome::Delivered(task) | ForwardOutcome::Unreachable(task) => task,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, ForwardOutcome::Unreachable(_))
    }
}

/// Proxy that relays task envelopes to downstream agents
#[derive(Debug, Clone, Default)]
pub struct ForwardingProxy {
    client: reqwest::Client,
}

impl ForwardingProxy {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Forward `task` to `target`, bounded by `timeout`
    pub async fn forward(
        &self,
        target: &AgentDescriptor,
        task: &Task,
        timeout: Duration,
    ) -> ForwardOutcome {
        let send_url = format!("{}/tasks/send", target.base_url);

        let response = match self
            .client
            .post(&send_url)
            .json(task)
            .timeout(timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!(task_id = %task.id, url = %send_url, "forwarding timed out");
                return ForwardOutcome::Unreachable(Self::failure_task(
                    task,
                    target,
                    &format!("request timed out after {timeout:?}"),
                ));
            }
            Err(e) => {
                warn!(task_id = %task.id, url = %send_url, error = %e, "forwarding failed");
                return ForwardOutcome::Unreachable(Self::failure_task(task, target, &e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(task_id = %task.id, url = %send_url, status = %status, "downstream returned error status");
            return ForwardOutcome::Unreachable(Self::failure_task(
                task,
                target,
                &format!("downstream returned status {status}"),
            ));
        }

        // The downstream response is relayed verbatim; only envelope-level
        // decoding is applied, no re-validation of its content.
        match response.json::<Task>().await {
            Ok(downstream_task) => {
                info!(
                    task_id = %task.id,
                    agent = %target.identity,
                    "received downstream response"
                );
                ForwardOutcome::Delivered(downstream_task)
            }
            Err(e) => {
                warn!(task_id = %task.id, url = %send_url, error = %e, "downstream response envelope was unparseable");
                ForwardOutcome::Unreachable(Self::failure_task(
                    task,
                    target,
                    &format!("invalid response envelope: {e}"),
                ))
            }
        }
    }

    /// Synthesize a `failed` task preserving the original id and user message
    fn failure_task(original: &Task, target: &AgentDescriptor, detail: &str) -> Task {
        let detail = sanitize_error_message(detail);

        let mut messages = Vec::new();
        if let Some(message) = &original.message {
            messages.push(message.clone());
        }
        messages.push(Message::agent(format!(
            "Error: could not reach the target agent at {}. Details: {}",
            target.base_url, detail
        )));

        Task {
            id: original.id,
            message: None,
            status: Some(TaskStatus::failed(format!(
                "Failed to contact downstream agent: {}",
                target.base_url
            ))),
            messages,
        }
    }
}
