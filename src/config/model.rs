//! Configuration data structures
//!
//! This module contains the data structures for configuration. Every field
//! has a default, so an empty file (or no file at all) describes the
//! standard layout: statements in `faturas/`, results in `output/`.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_COMMIT_EMAIL, DEFAULT_COMMIT_NAME, DEFAULT_COMMIT_TEMPLATE, DEFAULT_CONVERTER_PROGRAM,
    DEFAULT_CONVERTER_SCRIPT, DEFAULT_DONE_SUFFIX, DEFAULT_INPUT_DIR, DEFAULT_INPUT_PATTERN,
    DEFAULT_LOG_NAME, DEFAULT_OUTPUT_DIR, DEFAULT_REMOTE, DEFAULT_TIMESTAMP_FORMAT,
    DEFAULT_TRIGGER_PATTERN, TIMESTAMP_PLACEHOLDER,
};

use super::loader::expand_path;

/// Configuration for one converter job
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory scanned for input statements
    pub input_dir: PathBuf,
    /// Pattern selecting input files inside `input_dir`
    pub input_pattern: String,
    /// Directory receiving relocated outputs and the run log
    pub output_dir: PathBuf,
    /// Suffix of completed converter outputs
    pub done_suffix: String,
    /// File name of the combined converter log
    pub log_name: String,
    pub converter: ConverterConfig,
    pub trigger: TriggerConfig,
    pub publish: PublishConfig,
}

/// How the external converter is invoked
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConverterConfig {
    /// Interpreter running the script; `None` executes the script directly
    pub program: Option<String>,
    /// Converter script path, relative to the repository root
    pub script: PathBuf,
    /// Extra arguments placed between the script and the input files
    pub args: Vec<String>,
}

/// Changed-path patterns that activate the job
///
/// The converter script path is always added on top of these.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TriggerConfig {
    pub paths: Vec<String>,
}

/// Identity recorded on bot commits
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

/// Settings for committing and pushing the artifacts
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PublishConfig {
    /// Skip the publisher entirely when false
    pub enabled: bool,
    pub identity: CommitIdentity,
    /// Commit message; `{timestamp}` is replaced at commit time
    pub message_template: String,
    /// chrono format string for the timestamp
    pub timestamp_format: String,
    pub remote: String,
    /// Branch to push to; the checked-out branch when unset
    pub branch: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            input_pattern: DEFAULT_INPUT_PATTERN.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            done_suffix: DEFAULT_DONE_SUFFIX.to_string(),
            log_name: DEFAULT_LOG_NAME.to_string(),
            converter: ConverterConfig::default(),
            trigger: TriggerConfig::default(),
            publish: PublishConfig::default(),
        }
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            program: Some(DEFAULT_CONVERTER_PROGRAM.to_string()),
            script: PathBuf::from(DEFAULT_CONVERTER_SCRIPT),
            args: Vec::new(),
        }
    }
}

impl Default for TriggerConfig {
    fn default() -> Self {
        TriggerConfig {
            paths: vec![DEFAULT_TRIGGER_PATTERN.to_string()],
        }
    }
}

impl Default for CommitIdentity {
    fn default() -> Self {
        CommitIdentity {
            name: DEFAULT_COMMIT_NAME.to_string(),
            email: DEFAULT_COMMIT_EMAIL.to_string(),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            enabled: true,
            identity: CommitIdentity::default(),
            message_template: DEFAULT_COMMIT_TEMPLATE.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
            branch: None,
        }
    }
}

impl Config {
    /// Path of the combined converter log
    pub fn log_path(&self) -> PathBuf {
        self.output_dir.join(&self.log_name)
    }

    /// Returns a copy with every relative path resolved against `root`
    ///
    /// Absolute paths (after `~` and environment expansion) are kept as they are.
    pub fn rooted_at(&self, root: &Path) -> Config {
        let mut config = self.clone();
        config.input_dir = root.join(&self.input_dir);
        config.output_dir = root.join(&self.output_dir);
        config.converter.script = root.join(&self.converter.script);
        config
    }

    /// Expands `~` and environment variables in every path-like field
    pub fn expand_paths(&mut self) {
        self.input_dir = PathBuf::from(expand_path(&self.input_dir.to_string_lossy()));
        self.output_dir = PathBuf::from(expand_path(&self.output_dir.to_string_lossy()));
        self.converter.script = PathBuf::from(expand_path(&self.converter.script.to_string_lossy()));
        if let Some(program) = &self.converter.program {
            self.converter.program = Some(expand_path(program));
        }
    }

    /// Validates the configuration
    ///
    /// # Errors
    /// Returns an error with a detailed message if validation fails
    pub fn validate(&self) -> Result<()> {
        if self.input_pattern.trim().is_empty() {
            return Err(anyhow!("input_pattern must not be empty."));
        }
        glob::Pattern::new(&self.input_pattern)
            .map_err(|e| anyhow!("input_pattern '{}' is not a valid glob: {}", self.input_pattern, e))?;

        if self.done_suffix.trim().is_empty() {
            return Err(anyhow!(
                "done_suffix must not be empty, otherwise every input file would be relocated."
            ));
        }

        if self.log_name.trim().is_empty() || self.log_name.contains(['/', '\\']) {
            return Err(anyhow!(
                "log_name '{}' must be a plain file name inside output_dir.",
                self.log_name
            ));
        }

        if self.converter.script.as_os_str().is_empty() {
            return Err(anyhow!("converter.script must point to the converter."));
        }

        if let Some(program) = &self.converter.program
            && program.trim().is_empty()
        {
            return Err(anyhow!(
                "converter.program is empty; remove it to execute the script directly."
            ));
        }

        for pattern in &self.trigger.paths {
            glob::Pattern::new(pattern)
                .map_err(|e| anyhow!("Trigger pattern '{}' is not a valid glob: {}", pattern, e))?;
        }

        let publish = &self.publish;
        if publish.identity.name.trim().is_empty() || publish.identity.email.trim().is_empty() {
            return Err(anyhow!("publish.identity needs both a name and an email."));
        }

        if publish.message_template.trim().is_empty() {
            return Err(anyhow!("publish.message_template must not be empty."));
        }

        if !publish.message_template.contains(TIMESTAMP_PLACEHOLDER) {
            log::warn!(
                "Commit template '{}' has no {} placeholder; every commit will share one message",
                publish.message_template,
                TIMESTAMP_PLACEHOLDER
            );
        }

        if StrftimeItems::new(&publish.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(anyhow!(
                "publish.timestamp_format '{}' is not a valid strftime format.",
                publish.timestamp_format
            ));
        }

        if publish.remote.trim().is_empty() {
            return Err(anyhow!("publish.remote must not be empty."));
        }

        Ok(())
    }
}
