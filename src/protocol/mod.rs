//! A2A wire protocol types and envelope codec
//!
//! This module implements the task envelope shared by the gateway and every
//! downstream agent, plus the capability card served on the discovery
//! endpoint. The gateway and the agents it fronts speak the identical
//! two-endpoint protocol, so these types describe both sides of every
//! exchange.

pub mod card;
pub mod envelope;

pub use card::{AgentCapabilities, AgentCard};
pub use envelope::{codec, Message, MessagePart, Role, Task, TaskState, TaskStatus};
