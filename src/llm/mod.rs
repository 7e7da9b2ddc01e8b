//! LLM provider integrations
//!
//! The gateway's only LLM use is the routing classifier, so the provider
//! contract is deliberately narrow: one time-bounded completion call.

pub mod provider;
pub mod providers;

pub use provider::{CompletionRequest, CompletionResponse, LlmError, LlmProvider, Message, MessageRole};
