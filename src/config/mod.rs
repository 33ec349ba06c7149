//! Configuration module
//!
//! This module contains components for loading and validating configuration.

mod loader;
mod model;

pub use loader::{expand_path, load_config, load_or_default, parse_config, resolve_config_path};
pub use model::{CommitIdentity, Config, ConverterConfig, PublishConfig, TriggerConfig};
