//! Gateway service
//!
//! Orchestration only: decode the envelope, ask the routing strategy for a
//! target, resolve it in the directory, forward with a fixed timeout, and
//! hand the resulting task back. Per request the flow is
//! `Received -> Routed -> Forwarded -> {Completed | Failed}`; a malformed
//! envelope terminates before `Routed` with a protocol error, which is the
//! only failure mode not normalized into a task.

use crate::directory::AgentDirectory;
use crate::error::GatewayResult;
use crate::forwarding::{ForwardOutcome, ForwardingProxy};
use crate::protocol::{codec, AgentCard};
use crate::routing::RoutingStrategy;
use crate::task_span;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Instrument};

/// Default timeout for a single forwarding attempt
pub const DEFAULT_FORWARD_TIMEOUT: Duration = Duration::from_secs(60);

/// The routing and forwarding engine behind the HTTP listener
///
/// Holds no cross-request mutable state: the directory is immutable after
/// load and the strategy and proxy are stateless per call, so any number of
/// requests may flow through concurrently.
pub struct Gateway {
    directory: Arc<AgentDirectory>,
    strategy: Arc<dyn RoutingStrategy>,
    proxy: ForwardingProxy,
    forward_timeout: Duration,
}

impl Gateway {
    /// Create a gateway with injected routing strategy and directory
    pub fn new(
        directory: Arc<AgentDirectory>,
        strategy: Arc<dyn RoutingStrategy>,
        forward_timeout: Duration,
    ) -> Self {
        Self {
            directory,
            strategy,
            proxy: ForwardingProxy::new(),
            forward_timeout,
        }
    }

    /// Handle one inbound task submission
    ///
    /// # Errors
    ///
    /// Returns a protocol error for a malformed or text-less envelope
    /// (rejected before routing) and [`GatewayError::UnknownAgent`] if the
    /// routing decision resolves to an unconfigured identity (fatal
    /// misconfiguration, prevented by startup validation). Every other
    /// failure mode is carried inside the returned [`ForwardOutcome`].
    pub async fn handle_task(&self, raw_request: &[u8]) -> GatewayResult<ForwardOutcome> {
        let task = codec::decode(raw_request)?;

        // codec::decode guarantees the latest turn carries a first part
        let user_text = task.user_text().unwrap_or_default().to_string();

        let identity = self.strategy.select_agent(&user_text).await;
        let target = self.directory.resolve(&identity)?;

        let span = task_span!(task_id = %task.id, agent = %identity);
        async {
            info!(
                strategy = %self.strategy.name(),
                url = %target.base_url,
                "routing task to agent"
            );
            Ok(self.proxy.forward(target, &task, self.forward_timeout).await)
        }
        .instrument(span)
        .await
    }

    /// The gateway's own capability card for the discovery endpoint
    pub fn agent_card(&self) -> &AgentCard {
        self.directory.describe_self()
    }
}
