//! Routing strategies
//!
//! This module defines the [`RoutingStrategy`] contract and its two
//! interchangeable implementations:
//!
//! - [`KeywordStrategy`]: deterministic, pure substring matching on the RAG
//!   trigger phrases. No I/O.
//! - [`ClassifierStrategy`]: one zero-temperature LLM call framed as a
//!   two-label choice, trading latency and cost for semantic flexibility.
//!
//! Selection happens once at startup from configuration; the gateway service
//! never knows which variant is active. Both are total: routing always
//! returns an identity, falling back to the default agent whenever a
//! confident decision cannot be made.

pub mod classifier;
pub mod keyword;
pub mod strategy;

pub use classifier::ClassifierStrategy;
pub use keyword::KeywordStrategy;
pub use strategy::RoutingStrategy;
