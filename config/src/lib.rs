//! # Configuration System
//!
//! Centralized configuration for the isolation engine and its logging.
//!
//! This crate provides:
//! - Configuration structures for sharing defaults and observability
//! - Environment variable loading (12-factor app principles)
//! - Configuration file loading (TOML/YAML)
//! - Configuration validation

pub mod config;
pub mod file_loader;
pub mod loader;
pub mod validator;

pub use config::{Config, ObservabilityConfig, SharingConfig};
pub use file_loader::{ConfigFileError, load_from_file, load_from_toml, load_from_yaml};
pub use loader::load_from_env;
pub use validator::validate;
