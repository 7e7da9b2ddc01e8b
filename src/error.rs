//! Gateway error taxonomy
//!
//! Only protocol errors (a malformed or text-less envelope) surface to the
//! client as a non-Task error response. Every other failure mode is
//! normalized into a valid task envelope with a `failed` status so the
//! client-facing contract stays uniform, and nothing in this layer is fatal
//! to the process.

use thiserror::Error;

/// Main error type for gateway operations
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The inbound payload is not a well-formed task envelope. Rejected
    /// before routing, never forwarded.
    #[error("Malformed task envelope: {message}")]
    MalformedEnvelope { message: String },

    /// The envelope parsed but carries no extractable user text.
    #[error("Task message has no extractable text")]
    MissingText,

    /// A routing decision named an identity that is not configured. The
    /// default agent is validated at startup, so this indicates fatal
    /// misconfiguration if it ever fires.
    #[error("Unknown agent identity: {identity}")]
    UnknownAgent { identity: String },

    /// The classifier call failed or the classifier is unconfigured.
    /// Recovered locally by falling back to the default agent; never
    /// surfaced to the client.
    #[error("Classifier unavailable: {message}")]
    ClassifierUnavailable { message: String },

    /// Forwarding to a downstream agent failed. Recovered by synthesizing a
    /// failed task, surfaced to the client as a business failure rather than
    /// a protocol error.
    #[error("Downstream agent unreachable at {address}: {message}")]
    DownstreamUnreachable { address: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl GatewayError {
    /// Create a malformed-envelope error
    pub fn malformed_envelope<S: Into<String>>(message: S) -> Self {
        Self::MalformedEnvelope {
            message: message.into(),
        }
    }

    /// Create an unknown-agent error
    pub fn unknown_agent<S: Into<String>>(identity: S) -> Self {
        Self::UnknownAgent {
            identity: identity.into(),
        }
    }

    /// Create a classifier-unavailable error
    pub fn classifier_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ClassifierUnavailable {
            message: message.into(),
        }
    }

    /// Create a downstream-unreachable error
    pub fn downstream_unreachable<A: Into<String>, M: Into<String>>(address: A, message: M) -> Self {
        Self::DownstreamUnreachable {
            address: address.into(),
            message: message.into(),
        }
    }

    /// Whether this error is a protocol error: rejected with a client-error
    /// response before routing, distinct from a `failed` task.
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            GatewayError::MalformedEnvelope { .. } | GatewayError::MissingText
        )
    }
}

/// Sanitize error text before it is embedded in a client-visible failure task
pub fn sanitize_error_message(message: &str) -> String {
    let mut sanitized = message.to_string();

    // Redact common secret patterns
    sanitized = regex::Regex::new(r"(?i)(password|token|key|secret)[=:]\s*\S+")
        .unwrap()
        .replace_all(&sanitized, "${1}=***")
        .to_string();

    // Truncate very long messages so failure envelopes stay bounded
    if sanitized.len() > 500 {
        let truncate_suffix = "...[truncated]";
        let mut max_content_len = 500 - truncate_suffix.len();
        // Back off to a char boundary so multi-byte text cannot panic the slice
        while !sanitized.is_char_boundary(max_content_len) {
            max_content_len -= 1;
        }
        sanitized = format!("{}{}", &sanitized[..max_content_len], truncate_suffix);
    }

    sanitized
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
