//! Mock implementations for testing
//!
//! Provides a mock LlmProvider so routing behavior can be tested without
//! external dependencies.

use crate::llm::provider::{CompletionRequest, CompletionResponse, LlmError, LlmProvider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mock LLM provider with scripted replies
///
/// Replies are consumed in order; once exhausted, further calls fail. A
/// failure variant makes every call return the given error. All requests are
/// recorded for assertion.
pub struct MockLlmProvider {
    replies: Mutex<VecDeque<String>>,
    failure: Option<LlmError>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmProvider {
    /// Provider that answers with the given replies in order
    pub fn with_replies(replies: Vec<&str>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().map(String::from).collect()),
            failure: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Provider whose every call fails with the given error
    pub fn with_failure(error: LlmError) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            failure: Some(error),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the recorded completion requests
    pub fn calls(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        self.calls.clone()
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.calls.lock().await.push(request.clone());

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let reply = self
            .replies
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| LlmError::RequestFailed("mock replies exhausted".to_string()))?;

        Ok(CompletionResponse {
            content: Some(reply),
            model: request.model,
        })
    }
}
