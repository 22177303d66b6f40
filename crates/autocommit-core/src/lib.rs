//! Core configuration and utilities for autocommit
//!
//! - `config`: layered TOML configuration
//! - `logging`: tracing subscriber setup

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError, FilterConfig, LogConfig, PublishConfig};
