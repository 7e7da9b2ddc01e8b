//! Task envelope types and codec
//!
//! The task envelope is the wire-format structure carrying a conversation
//! turn, its id, and terminal status. Inbound envelopes are validated by
//! [`codec::decode`]; outbound envelopes are serialized by [`codec::encode`],
//! which is total for well-formed [`Task`] values.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The unit of content inside a message
///
/// A message carries an ordered sequence of parts; concatenation order is the
/// semantic reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessagePart {
    pub text: String,
}

impl MessagePart {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}

/// Who authored a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// A single conversation turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub parts: Vec<MessagePart>,
}

impl Message {
    /// Create a single-part user message
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self {
            role: Role::User,
            parts: vec![MessagePart::new(text)],
        }
    }

    /// Create a single-part agent message
    pub fn agent<S: Into<String>>(text: S) -> Self {
        Self {
            role: Role::Agent,
            parts: vec![MessagePart::new(text)],
        }
    }

    /// Concatenated text of all parts, in order
    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

/// Terminal state of a task
///
/// The protocol in scope has no intermediate or streaming states; a status is
/// terminal once set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Completed,
    Failed,
}

/// Terminal status attached to a task on its way back to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskStatus {
    pub state: TaskState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl TaskStatus {
    pub fn completed() -> Self {
        Self {
            state: TaskState::Completed,
            reason: None,
        }
    }

    pub fn failed<S: Into<String>>(reason: S) -> Self {
        Self {
            state: TaskState::Failed,
            reason: Some(reason.into()),
        }
    }
}

/// Task envelope carrying one conversation exchange
///
/// Created by the client with a fresh id (synthesized by the codec if
/// absent). The id is preserved unchanged through forwarding so every task
/// flowing through the system has a stable identifier for correlation. The
/// routing step never mutates a task; only the responding agent appends its
/// reply and sets the terminal status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Unique task identifier
    pub id: Uuid,
    /// The latest turn (present on inbound requests)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    /// Terminal status (present on responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// Full conversation history, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
}

impl Task {
    /// Build a fresh request envelope around a user utterance
    pub fn from_user_text<S: Into<String>>(text: S) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: Some(Message::user(text)),
            status: None,
            messages: Vec::new(),
        }
    }

    /// The canonical user utterance: the first part of the latest turn
    pub fn user_text(&self) -> Option<&str> {
        self.message
            .as_ref()
            .and_then(|m| m.parts.first())
            .map(|p| p.text.as_str())
    }

    /// Whether the task carries a terminal `failed` status
    pub fn is_failed(&self) -> bool {
        matches!(
            self.status,
            Some(TaskStatus {
                state: TaskState::Failed,
                ..
            })
        )
    }
}

/// Envelope decode/encode entry points
pub mod codec {
    use super::{Message, Task, TaskStatus};
    use crate::error::GatewayError;
    use serde::Deserialize;
    use tracing::debug;
    use uuid::Uuid;

    /// Inbound envelope before id normalization
    #[derive(Deserialize)]
    struct RawTask {
        id: Option<Uuid>,
        message: Option<Message>,
        status: Option<TaskStatus>,
        #[serde(default)]
        messages: Vec<Message>,
    }

    /// Decode and validate an inbound task envelope
    ///
    /// Fails with [`GatewayError::MalformedEnvelope`] if the payload is not
    /// well-formed JSON matching the envelope shape, and with
    /// [`GatewayError::MissingText`] if the latest turn is absent or carries
    /// no text part. A missing `id` is a non-fatal normalization: a fresh
    /// UUID is generated so every task has a stable identifier.
    pub fn decode(raw: &[u8]) -> Result<Task, GatewayError> {
        let raw: RawTask =
            serde_json::from_slice(raw).map_err(|e| GatewayError::malformed_envelope(e.to_string()))?;

        let message = raw.message.ok_or(GatewayError::MissingText)?;
        if message.parts.is_empty() {
            return Err(GatewayError::MissingText);
        }

        let id = raw.id.unwrap_or_else(|| {
            let generated = Uuid::new_v4();
            debug!(task_id = %generated, "inbound task had no id, generated one");
            generated
        });

        Ok(Task {
            id,
            message: Some(message),
            status: raw.status,
            messages: raw.messages,
        })
    }

    /// Serialize a task envelope
    ///
    /// Total for well-formed [`Task`] values: the envelope types contain no
    /// map keys or values that can fail JSON serialization.
    pub fn encode(task: &Task) -> Vec<u8> {
        serde_json::to_vec(task).unwrap_or_default()
    }
}
