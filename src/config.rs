//! Gateway configuration
//!
//! Loaded once from a TOML file at process start. Downstream agent
//! addresses, routing-strategy selection, and classifier credentials all
//! come from here; nothing in the hot path reads the environment directly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Top-level gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewayConfig {
    pub gateway: GatewaySection,
    /// Downstream agents keyed by identity (e.g. "search", "rag")
    pub agents: HashMap<String, AgentSection>,
    pub routing: RoutingSection,
    #[serde(default)]
    pub forwarding: ForwardingSection,
}

/// The gateway's own identity, served on the discovery endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatewaySection {
    /// Name advertised on the capability card
    pub name: String,
    /// Description advertised on the capability card
    pub description: String,
    /// Base URL where this gateway is hosted
    pub url: String,
    #[serde(default = "default_version")]
    pub version: String,
    /// Listening port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_port() -> u16 {
    5005
}

/// A single configured downstream agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentSection {
    /// Base URL of the agent (its `/tasks/send` endpoint lives under this)
    pub url: String,
    #[serde(default)]
    pub streaming: bool,
    #[serde(default)]
    pub push_notifications: bool,
}

/// Routing-strategy selection and identities
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingSection {
    /// Strategy: "keyword" or "classifier"
    pub strategy: StrategyKind,
    /// Identity selected when no confident decision can be made
    #[serde(default = "default_search_agent")]
    pub default_agent: String,
    /// Identity selected when the user asks for the local RAG system
    #[serde(default = "default_rag_agent")]
    pub rag_agent: String,
    /// Classifier configuration (required if strategy = "classifier")
    pub classifier: Option<ClassifierSection>,
}

fn default_search_agent() -> String {
    "search".to_string()
}

fn default_rag_agent() -> String {
    "rag".to_string()
}

/// Routing strategy selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Keyword,
    Classifier,
}

/// Model-assisted classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifierSection {
    /// LLM provider: "openai" or "anthropic"
    pub provider: String,
    /// Model identifier
    pub model: String,
    /// Environment variable containing the API key
    pub api_key_env: String,
    /// Classifier call timeout in seconds
    #[serde(default = "default_classifier_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_classifier_timeout_secs() -> u64 {
    10
}

/// Forwarding-proxy settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForwardingSection {
    /// Per-attempt timeout for the downstream call, in seconds
    #[serde(default = "default_forward_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_forward_timeout_secs() -> u64 {
    crate::gateway::DEFAULT_FORWARD_TIMEOUT.as_secs()
}

impl Default for ForwardingSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_forward_timeout_secs(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GatewayConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: GatewayConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field consistency
    ///
    /// The default agent must always be configured: routing is a total
    /// function and resolving the default must never fail at request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.agents.contains_key(&self.routing.default_agent) {
            return Err(ConfigError::InvalidConfig(format!(
                "default agent '{}' is not configured under [agents]",
                self.routing.default_agent
            )));
        }
        if !self.agents.contains_key(&self.routing.rag_agent) {
            return Err(ConfigError::InvalidConfig(format!(
                "rag agent '{}' is not configured under [agents]",
                self.routing.rag_agent
            )));
        }

        if self.routing.strategy == StrategyKind::Classifier && self.routing.classifier.is_none() {
            return Err(ConfigError::InvalidConfig(
                "classifier routing strategy requires [routing.classifier] configuration"
                    .to_string(),
            ));
        }

        url::Url::parse(&self.gateway.url).map_err(|e| {
            ConfigError::InvalidConfig(format!("gateway url '{}': {e}", self.gateway.url))
        })?;
        for (identity, agent) in &self.agents {
            url::Url::parse(&agent.url).map_err(|e| {
                ConfigError::InvalidConfig(format!("agent '{identity}' url '{}': {e}", agent.url))
            })?;
        }

        Ok(())
    }

    /// Resolve the classifier API key from the configured environment variable
    ///
    /// Resolved once at startup; a missing key downgrades the classifier to
    /// its default-agent fallback rather than failing the process.
    pub fn get_classifier_api_key(&self) -> Result<String, ConfigError> {
        let classifier = self.routing.classifier.as_ref().ok_or_else(|| {
            ConfigError::InvalidConfig("no [routing.classifier] section configured".to_string())
        })?;
        std::env::var(&classifier.api_key_env)
            .map_err(|_| ConfigError::EnvVarNotFound(classifier.api_key_env.clone()))
    }

    /// Create a test configuration for unit testing
    #[cfg(test)]
    pub fn test_config() -> Self {
        let toml_content = r#"
[gateway]
name = "GatewayAgent"
description = "Routes requests to either a Search Agent or a RAG Agent."
url = "http://localhost:5005"

[agents.search]
url = "http://localhost:5010"

[agents.rag]
url = "http://localhost:5006"

[routing]
strategy = "keyword"
"#;
        toml::from_str(toml_content).expect("Test config should parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_keyword_config() {
        let config = GatewayConfig::test_config();
        config.validate().unwrap();

        assert_eq!(config.gateway.name, "GatewayAgent");
        assert_eq!(config.gateway.version, "1.0");
        assert_eq!(config.gateway.port, 5005);
        assert_eq!(config.routing.strategy, StrategyKind::Keyword);
        assert_eq!(config.routing.default_agent, "search");
        assert_eq!(config.routing.rag_agent, "rag");
        assert_eq!(config.forwarding.timeout_secs, 60);
        assert_eq!(config.agents.len(), 2);
    }

    #[test]
    fn test_forward_timeout_defaults_to_gateway_constant() {
        let config = GatewayConfig::test_config();
        assert_eq!(
            config.forwarding.timeout_secs,
            crate::gateway::DEFAULT_FORWARD_TIMEOUT.as_secs()
        );
    }

    #[test]
    fn test_classifier_config() {
        let toml_content = r#"
[gateway]
name = "GatewayAgent"
description = "Routing gateway"
url = "http://localhost:5005"
port = 6000

[agents.search]
url = "http://localhost:5010"

[agents.rag]
url = "http://localhost:5006"
streaming = true

[routing]
strategy = "classifier"

[routing.classifier]
provider = "openai"
model = "gpt-4o-mini"
api_key_env = "OPENAI_API_KEY"

[forwarding]
timeout_secs = 30
"#;
        let config: GatewayConfig = toml::from_str(toml_content).unwrap();
        config.validate().unwrap();

        assert_eq!(config.gateway.port, 6000);
        assert_eq!(config.forwarding.timeout_secs, 30);
        assert!(config.agents["rag"].streaming);

        let classifier = config.routing.classifier.unwrap();
        assert_eq!(classifier.provider, "openai");
        assert_eq!(classifier.model, "gpt-4o-mini");
        assert_eq!(classifier.timeout_secs, 10);
    }

    #[test]
    fn test_classifier_strategy_requires_classifier_section() {
        let toml_content = r#"
[gateway]
name = "GatewayAgent"
description = "Routing gateway"
url = "http://localhost:5005"

[agents.search]
url = "http://localhost:5010"

[agents.rag]
url = "http://localhost:5006"

[routing]
strategy = "classifier"
"#;
        let config: GatewayConfig = toml::from_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }

    #[test]
    fn test_default_agent_must_be_configured() {
        let toml_content = r#"
[gateway]
name = "GatewayAgent"
description = "Routing gateway"
url = "http://localhost:5005"

[agents.rag]
url = "http://localhost:5006"

[routing]
strategy = "keyword"
"#;
        let config: GatewayConfig = toml::from_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default agent 'search'"));
    }

    #[test]
    fn test_invalid_agent_url_rejected() {
        let toml_content = r#"
[gateway]
name = "GatewayAgent"
description = "Routing gateway"
url = "http://localhost:5005"

[agents.search]
url = "not a url"

[agents.rag]
url = "http://localhost:5006"

[routing]
strategy = "keyword"
"#;
        let config: GatewayConfig = toml::from_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("agent 'search'"));
    }

    #[test]
    fn test_missing_api_key_env_reported() {
        let toml_content = r#"
[gateway]
name = "GatewayAgent"
description = "Routing gateway"
url = "http://localhost:5005"

[agents.search]
url = "http://localhost:5010"

[agents.rag]
url = "http://localhost:5006"

[routing]
strategy = "classifier"

[routing.classifier]
provider = "openai"
model = "gpt-4o-mini"
api_key_env = "A2A_GATEWAY_TEST_KEY_THAT_DOES_NOT_EXIST"
"#;
        let config: GatewayConfig = toml::from_str(toml_content).unwrap();
        let err = config.get_classifier_api_key().unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarNotFound(_)));
    }
}
