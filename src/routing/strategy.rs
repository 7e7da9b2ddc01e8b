//! Routing strategy contract
//!
//! A routing strategy maps user text to a target agent identity. The
//! contract is total: an implementation must always return an identity and
//! may never fail, using its configured default agent whenever a decision
//! cannot be made confidently. This is what keeps a broken or unreachable
//! classifier from ever taking the gateway down with it.

/// Decision function mapping user text to a target agent identity
///
/// Implementations see only the extracted user text, never the whole task:
/// routing is read-only over the envelope. The model-assisted variant
/// performs at most one time-bounded external call per invocation; the
/// keyword variant performs none.
#[async_trait::async_trait]
pub trait RoutingStrategy: Send + Sync {
    /// Strategy name for logging (e.g., "keyword", "classifier")
    fn name(&self) -> &str;

    /// Select the identity of the agent that should process `user_text`
    ///
    /// Total: always returns an identity, never fails.
    async fn select_agent(&self, user_text: &str) -> String;
}
