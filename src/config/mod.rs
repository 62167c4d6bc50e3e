//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, retry defaults, wire contract values)
//! - The immutable `ClientConfig` and its builder
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Cli, Command};
pub use constants::*;
pub(crate) use types::matches_login_host;
pub use types::{ClientConfig, ClientConfigBuilder, LogFormat, LogLevel};
