//! Model-assisted routing strategy
//!
//! Issues one classification call to an LLM provider framed as a two-label
//! choice (`RAG` / `SEARCH`) with zero temperature and minimal output
//! length, then matches either label as a case-insensitive substring of the
//! reply. Falling back to the default agent on any failure is a correctness
//! requirement, not a convenience: routing must stay total even when the
//! classifier is unreachable or misconfigured.

use crate::llm::provider::{CompletionRequest, LlmProvider, Message, MessageRole};
use crate::routing::strategy::RoutingStrategy;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fixed instruction framing the routing choice as exactly one of two labels
const CLASSIFIER_INSTRUCTION: &str = "You are a routing classifier for an agent gateway. \
Decide whether the user's request should be answered by a local RAG knowledge base or by \
web search. Reply with exactly one word: RAG or SEARCH.";

/// Upper bound on classifier output; one label needs only a few tokens
const CLASSIFIER_MAX_TOKENS: u32 = 8;

/// LLM-classifier routing strategy
pub struct ClassifierStrategy {
    /// None when credentials were missing at startup; every call then
    /// short-circuits straight to the default agent.
    provider: Option<Arc<dyn LlmProvider>>,
    model: String,
    rag_agent: String,
    default_agent: String,
}

impl ClassifierStrategy {
    /// Create a classifier strategy backed by the given provider
    pub fn new<R: Into<String>, D: Into<String>>(
        provider: Arc<dyn LlmProvider>,
        model: String,
        rag_agent: R,
        default_agent: D,
    ) -> Self {
        Self {
            provider: Some(provider),
            model,
            rag_agent: rag_agent.into(),
            default_agent: default_agent.into(),
        }
    }

    /// Create a permanently degraded strategy for when the classifier cannot
    /// be configured (e.g., missing credentials at startup)
    ///
    /// Logged once here; every subsequent routing call goes straight to the
    /// default agent without attempting the call.
    pub fn unconfigured<R: Into<String>, D: Into<String>>(
        reason: &str,
        rag_agent: R,
        default_agent: D,
    ) -> Self {
        let default_agent = default_agent.into();
        warn!(
            reason = %reason,
            default_agent = %default_agent,
            "classifier unconfigured, all routing will fall back to the default agent"
        );
        Self {
            provider: None,
            model: String::new(),
            rag_agent: rag_agent.into(),
            default_agent,
        }
    }

    fn classification_request(&self, user_text: &str) -> CompletionRequest {
        CompletionRequest {
            messages: vec![
                Message {
                    role: MessageRole::System,
                    content: CLASSIFIER_INSTRUCTION.to_string(),
                },
                Message {
                    role: MessageRole::User,
                    content: user_text.to_string(),
                },
            ],
            model: self.model.clone(),
            max_tokens: Some(CLASSIFIER_MAX_TOKENS),
            // Maximally deterministic output
            temperature: Some(0.0),
        }
    }

    /// Match either label as a case-insensitive substring of the trimmed
    /// reply, so preambles like "Answer: RAG" still parse. RAG is checked
    /// first; a reply with neither label yields None.
    fn parse_label(&self, reply: &str) -> Option<&str> {
        let upper = reply.trim().to_uppercase();
        if upper.contains("RAG") {
            Some(&self.rag_agent)
        } else if upper.contains("SEARCH") {
            Some(&self.default_agent)
        } else {
            None
        }
    }
}

#[async_trait::async_trait]
impl RoutingStrategy for ClassifierStrategy {
    fn name(&self) -> &str {
        "classifier"
    }

    async fn select_agent(&self, user_text: &str) -> String {
        let Some(provider) = &self.provider else {
            return self.default_agent.clone();
        };

        let request = self.classification_request(user_text);
        match provider.complete(request).await {
            Ok(response) => {
                let reply = response.content.unwrap_or_default();
                match self.parse_label(&reply) {
                    Some(identity) => {
                        debug!(reply = %reply, agent = %identity, "classifier selected agent");
                        identity.to_string()
                    }
                    None => {
                        warn!(
                            reply = %reply,
                            "classifier reply contained neither label, using default agent"
                        );
                        self.default_agent.clone()
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "classifier call failed, using default agent");
                self.default_agent.clone()
            }
        }
    }
}
