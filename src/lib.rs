//! # A2A Gateway
//!
//! A message-routing gateway that fronts a small fleet of downstream agents
//! speaking an A2A-style task-submission protocol. Clients talk to the
//! gateway exactly as they would to any single agent; the gateway decides
//! which downstream agent should handle each task and relays the reply.
//!
//! ## Architecture
//!
//! - **Protocol** ([`protocol`]): the task envelope and capability card
//!   shared by the gateway and every agent it fronts, plus the envelope
//!   codec that validates inbound submissions.
//! - **Routing** ([`routing`]): pluggable strategies behind one trait. The
//!   keyword strategy matches trigger phrases; the classifier strategy makes
//!   one deterministic LLM call and falls back to the default agent on any
//!   failure.
//! - **Forwarding** ([`forwarding`]): a single-attempt, time-bounded relay
//!   to the selected agent that normalizes every transport failure into a
//!   synthesized `failed` task.
//! - **Directory** ([`directory`]): the configured agent registry and the
//!   gateway's own capability card.
//! - **Server** ([`server`]): the warp HTTP listener exposing
//!   `GET /.well-known/agent.json` and `POST /tasks/send`.
//!
//! ## Example
//!
//! ```rust
//! use a2a_gateway::protocol::{codec, Task};
//!
//! let task = Task::from_user_text("What is Go?");
//! let raw = codec::encode(&task);
//! let decoded = codec::decode(&raw).unwrap();
//! assert_eq!(decoded.id, task.id);
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod forwarding;
pub mod gateway;
pub mod llm;
pub mod observability;
pub mod protocol;
pub mod routing;
pub mod server;
pub mod testing;

pub use config::{ConfigError, GatewayConfig, StrategyKind};
pub use directory::{AgentDescriptor, AgentDirectory};
pub use error::{GatewayError, GatewayResult};
pub use forwarding::{ForwardOutcome, ForwardingProxy};
pub use gateway::{Gateway, DEFAULT_FORWARD_TIMEOUT};
pub use protocol::{AgentCapabilities, AgentCard, Message, Task, TaskState, TaskStatus};
pub use routing::{ClassifierStrategy, KeywordStrategy, RoutingStrategy};
