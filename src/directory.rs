//! Agent directory
//!
//! Holds the statically configured descriptors of known downstream agents
//! and the gateway's own capability card. Built once from configuration at
//! process start and never mutated, so it is safe for unsynchronized
//! concurrent reads from any number of in-flight requests.

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::protocol::{AgentCapabilities, AgentCard};
use std::collections::HashMap;

/// Descriptor for a single configured downstream agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentDescriptor {
    /// Identity the routing layer selects by (e.g. "search", "rag")
    pub identity: String,
    /// Base URL of the agent's task-submission endpoint
    pub base_url: String,
    pub capabilities: AgentCapabilities,
}

/// Immutable registry of configured agents plus the gateway's own card
#[derive(Debug)]
pub struct AgentDirectory {
    agents: HashMap<String, AgentDescriptor>,
    card: AgentCard,
}

impl AgentDirectory {
    /// Build the directory from loaded configuration
    pub fn from_config(config: &GatewayConfig) -> Self {
        let agents = config
            .agents
            .iter()
            .map(|(identity, section)| {
                (
                    identity.clone(),
                    AgentDescriptor {
                        identity: identity.clone(),
                        base_url: section.url.trim_end_matches('/').to_string(),
                        capabilities: AgentCapabilities {
                            streaming: section.streaming,
                            push_notifications: section.push_notifications,
                        },
                    },
                )
            })
            .collect();

        let card = AgentCard {
            name: config.gateway.name.clone(),
            description: config.gateway.description.clone(),
            url: config.gateway.url.clone(),
            version: config.gateway.version.clone(),
            capabilities: AgentCapabilities::default(),
        };

        Self { agents, card }
    }

    /// Resolve an agent identity to its descriptor
    ///
    /// Fails with [`GatewayError::UnknownAgent`] if the identity is not
    /// configured. Startup validation guarantees the routing identities
    /// resolve, so a failure here is fatal misconfiguration.
    pub fn resolve(&self, identity: &str) -> Result<&AgentDescriptor, GatewayError> {
        self.agents
            .get(identity)
            .ok_or_else(|| GatewayError::unknown_agent(identity))
    }

    /// The gateway's own capability card, served verbatim on discovery
    pub fn describe_self(&self) -> &AgentCard {
        &self.card
    }
}
