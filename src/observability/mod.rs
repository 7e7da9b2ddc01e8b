//! Observability infrastructure
//!
//! Structured logging setup for the gateway. Initialized once at process
//! start from environment variables.

pub mod logging;

pub use logging::{init_default_logging, init_logging, LogFormat};
