//! A2A gateway binary
//!
//! Loads configuration, builds the routing strategy and agent directory,
//! and serves the gateway until SIGINT or SIGTERM.

use a2a_gateway::config::{ClassifierSection, GatewayConfig, StrategyKind};
use a2a_gateway::directory::AgentDirectory;
use a2a_gateway::gateway::Gateway;
use a2a_gateway::llm::provider::{LlmError, LlmProvider};
use a2a_gateway::llm::providers::{AnthropicConfig, AnthropicProvider, OpenAiConfig, OpenAiProvider};
use a2a_gateway::observability::init_default_logging;
use a2a_gateway::routing::{ClassifierStrategy, KeywordStrategy, RoutingStrategy};
use a2a_gateway::server;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "a2a-gateway")]
#[command(about = "A2A task-routing gateway", version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gateway server
    Run,
    /// Validate and display configuration
    Config {
        /// Show resolved configuration values
        #[arg(long)]
        show: bool,
    },
}

/// Default configuration paths, tried in order
const DEFAULT_CONFIG_PATHS: &[&str] = &["gateway.toml", "config/gateway.toml"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_default_logging();
    info!("Starting A2A gateway v{}", env!("CARGO_PKG_VERSION"));

    let config = match load_configuration(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Run => run_gateway(config).await,
        Commands::Config { show } => handle_config_command(&config, show),
    };

    if let Err(e) = result {
        error!(error = %e, "gateway exited with error");
        std::process::exit(1);
    }
}

fn load_configuration(
    explicit_path: Option<&Path>,
) -> Result<GatewayConfig, Box<dyn std::error::Error>> {
    if let Some(path) = explicit_path {
        info!(path = %path.display(), "loading configuration");
        return Ok(GatewayConfig::load_from_file(path)?);
    }

    for candidate in DEFAULT_CONFIG_PATHS {
        let path = Path::new(candidate);
        if path.exists() {
            info!(path = %path.display(), "loading configuration");
            return Ok(GatewayConfig::load_from_file(path)?);
        }
    }

    Err(format!(
        "no configuration file found (tried {})",
        DEFAULT_CONFIG_PATHS.join(", ")
    )
    .into())
}

async fn run_gateway(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let port = config.gateway.port;
    let gateway = Arc::new(build_gateway(&config));

    let server_handle = tokio::spawn(server::run(gateway, port));

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        result = server_handle => {
            error!(?result, "gateway server exited unexpectedly");
        }
    }

    Ok(())
}

fn handle_config_command(
    config: &GatewayConfig,
    show: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Configuration is valid.");
    if show {
        println!("{}", toml::to_string_pretty(config)?);
    }
    Ok(())
}

fn build_gateway(config: &GatewayConfig) -> Gateway {
    let directory = Arc::new(AgentDirectory::from_config(config));
    let strategy = StrategyFactory::create_strategy(config);
    let forward_timeout = Duration::from_secs(config.forwarding.timeout_secs);
    Gateway::new(directory, strategy, forward_timeout)
}

/// Builds the configured routing strategy
struct StrategyFactory;

impl StrategyFactory {
    fn create_strategy(config: &GatewayConfig) -> Arc<dyn RoutingStrategy> {
        let rag = config.routing.rag_agent.clone();
        let default = config.routing.default_agent.clone();

        match config.routing.strategy {
            StrategyKind::Keyword => {
                info!("using keyword routing strategy");
                Arc::new(KeywordStrategy::new(rag, default))
            }
            StrategyKind::Classifier => Self::create_classifier_strategy(config, rag, default),
        }
    }

    /// A classifier that cannot be built is degraded, never fatal: the
    /// strategy still routes, everything going to the default agent.
    fn create_classifier_strategy(
        config: &GatewayConfig,
        rag: String,
        default: String,
    ) -> Arc<dyn RoutingStrategy> {
        let Some(section) = &config.routing.classifier else {
            // validate() rejects this combination, but degrade anyway
            return Arc::new(ClassifierStrategy::unconfigured(
                "no [routing.classifier] section configured",
                rag,
                default,
            ));
        };

        let api_key = match config.get_classifier_api_key() {
            Ok(key) => key,
            Err(e) => {
                return Arc::new(ClassifierStrategy::unconfigured(&e.to_string(), rag, default));
            }
        };

        match Self::create_provider(section, api_key) {
            Ok(provider) => {
                info!(
                    provider = %provider.name(),
                    model = %section.model,
                    "using classifier routing strategy"
                );
                Arc::new(ClassifierStrategy::new(
                    provider,
                    section.model.clone(),
                    rag,
                    default,
                ))
            }
            Err(e) => {
                warn!(error = %e, "classifier provider could not be created");
                Arc::new(ClassifierStrategy::unconfigured(&e.to_string(), rag, default))
            }
        }
    }

    fn create_provider(
        section: &ClassifierSection,
        api_key: String,
    ) -> Result<Arc<dyn LlmProvider>, LlmError> {
        let timeout = Duration::from_secs(section.timeout_secs);

        match section.provider.as_str() {
            "openai" => Ok(Arc::new(OpenAiProvider::new(OpenAiConfig {
                api_key,
                timeout,
                ..Default::default()
            })?)),
            "anthropic" => Ok(Arc::new(AnthropicProvider::new(AnthropicConfig {
                api_key,
                timeout,
                ..Default::default()
            })?)),
            other => Err(LlmError::NotConfigured(format!(
                "unsupported classifier provider: {other}"
            ))),
        }
    }
}
