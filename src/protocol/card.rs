//! Agent capability card served on the discovery endpoint
//!
//! Every agent in the mesh, the gateway included, advertises itself at
//! `GET /.well-known/agent.json` with this structure. Clients use it to
//! discover an agent's address and what it can do before submitting tasks.

use serde::{Deserialize, Serialize};

/// Capability flags advertised by an agent
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentCapabilities {
    /// Whether the agent streams partial results
    #[serde(default)]
    pub streaming: bool,
    /// Whether the agent supports server-initiated push notifications
    #[serde(rename = "pushNotifications", default)]
    pub push_notifications: bool,
}

/// Capability card metadata for a single agent
///
/// Served verbatim to any discovery request. Immutable once built from
/// configuration at process start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentCard {
    /// Human-readable agent name
    pub name: String,
    /// Description of what the agent does
    pub description: String,
    /// Base URL where the agent is hosted
    pub url: String,
    /// Advertised version string
    pub version: String,
    /// Capability flags
    pub capabilities: AgentCapabilities,
}
