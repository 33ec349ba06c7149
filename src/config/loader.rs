//! Configuration loading functionality
//!
//! This module contains functions for locating, loading and validating
//! configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use log::{debug, info};
use serde_yaml::from_str;

use crate::errors::config_parsing_error;
use crate::utils::project_folder;

use super::model::Config;

/// Expands `~` and environment variables in a path
///
/// Unknown variables leave the path untouched apart from the tilde.
pub fn expand_path(path: &str) -> String {
    match shellexpand::full(path) {
        Ok(expanded) => expanded.to_string(),
        Err(_) => shellexpand::tilde(path).to_string(),
    }
}

/// Parses configuration from YAML text, expands paths and validates it
pub fn parse_config(content: &str) -> Result<Config> {
    // An empty document deserializes to unit, not to a mapping
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    let mut config: Config =
        from_str(content).map_err(|e| config_parsing_error(e, "Please check the YAML syntax."))?;

    config.expand_paths();
    config.validate()?;

    Ok(config)
}

/// Loads a configuration from a file
///
/// # Errors
/// Returns an error if the file cannot be read or if the configuration is invalid
pub fn load_config(file: &Path) -> Result<Config> {
    let file_content = fs::read(file).map_err(|e| {
        anyhow!(
            "Failed to read configuration file {}: {}",
            file.display(),
            e
        )
    })?;

    let content_str = String::from_utf8(file_content).map_err(|e| {
        anyhow!(
            "Configuration file {} contains invalid UTF-8 characters: {}",
            file.display(),
            e
        )
    })?;

    parse_config(&content_str)
        .map_err(|e| anyhow!("Invalid configuration file {}: {:#}", file.display(), e))
}

/// Finds the configuration file to use
///
/// Relative paths are looked up in the repository root first and then in
/// the user configuration directory. Returns `None` when neither exists.
pub fn resolve_config_path(repo_root: &Path, config: &Path) -> Option<PathBuf> {
    if config.is_absolute() {
        return config.exists().then(|| config.to_path_buf());
    }

    let in_repo = repo_root.join(config);
    if in_repo.exists() {
        return Some(in_repo);
    }

    let in_user_dir = project_folder()?.config_dir().join(config);
    in_user_dir.exists().then_some(in_user_dir)
}

/// Loads the configuration file if there is one, otherwise the defaults
///
/// # Returns
/// * The configuration and the file it came from, if any
pub fn load_or_default(repo_root: &Path, config: &Path) -> Result<(Config, Option<PathBuf>)> {
    match resolve_config_path(repo_root, config) {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            let loaded = load_config(&path)?;
            info!("Configuration loaded from {}", path.display());
            Ok((loaded, Some(path)))
        }
        None => {
            info!(
                "No configuration file {} found, using defaults",
                config.display()
            );
            Ok((Config::default(), None))
        }
    }
}
