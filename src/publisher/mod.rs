//! Publisher module
//!
//! Stages the artifacts of a run, commits them when the index actually
//! changed and pushes the result.

mod git;

pub use git::GitRepository;

use std::fmt::Write;
use std::fs::read_dir;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use log::info;

use crate::config::PublishConfig;
use crate::constants::TIMESTAMP_PLACEHOLDER;
use crate::errors::{Result, file_operation_error, generic_error};

/// How the publish step ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The staged artifacts matched `HEAD`; no commit was made
    NothingToCommit,
    /// A commit was recorded
    Committed {
        message: String,
        /// Branch the commit was pushed to, if it was pushed
        pushed_to: Option<String>,
    },
}

/// Renders the commit message for a run finishing at `now`
///
/// # Errors
/// Returns an error if `timestamp_format` is not a valid chrono format.
pub fn format_commit_message<Tz>(
    template: &str,
    timestamp_format: &str,
    now: &DateTime<Tz>,
) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut timestamp = String::new();
    write!(timestamp, "{}", now.format(timestamp_format)).map_err(|_| {
        generic_error(&format!(
            "Invalid timestamp format for commit messages: {timestamp_format}"
        ))
    })?;
    Ok(template.replace(TIMESTAMP_PLACEHOLDER, &timestamp))
}

/// Lists the artifacts to stage: every CSV in `output_dir` plus the run log
pub fn collect_artifacts(output_dir: &Path, log_path: &Path) -> Result<Vec<PathBuf>> {
    let mut artifacts = Vec::new();

    match read_dir(output_dir) {
        Ok(entries) => {
            for entry in entries {
                let path = entry
                    .map_err(|e| file_operation_error(e, output_dir.to_path_buf(), "list"))?
                    .path();
                let is_csv = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
                if is_csv && path.is_file() {
                    artifacts.push(path);
                }
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(file_operation_error(e, output_dir.to_path_buf(), "list")),
    }
    artifacts.sort();

    if log_path.is_file() {
        artifacts.push(log_path.to_path_buf());
    }

    Ok(artifacts)
}

/// Commits and pushes artifacts with a fixed bot identity
#[derive(Debug, Clone)]
pub struct Publisher {
    repository: GitRepository,
    config: PublishConfig,
    push: bool,
}

impl Publisher {
    pub fn new(repository: GitRepository, config: PublishConfig) -> Self {
        Publisher {
            repository,
            config,
            push: true,
        }
    }

    /// Disables the push after committing
    pub fn without_push(mut self) -> Self {
        self.push = false;
        self
    }

    /// Stages, commits and pushes `artifacts`, timestamping the commit now
    pub fn publish(&self, artifacts: &[PathBuf]) -> Result<PublishOutcome> {
        self.publish_at(artifacts, &Local::now())
    }

    /// Same as [`Publisher::publish`] with an explicit commit time
    ///
    /// # Errors
    /// Staging, committing or pushing failures are returned as they are;
    /// an unchanged index is [`PublishOutcome::NothingToCommit`], not an error.
    pub fn publish_at<Tz>(&self, artifacts: &[PathBuf], now: &DateTime<Tz>) -> Result<PublishOutcome>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.repository.stage(artifacts)?;

        if !self.repository.has_staged_changes()? {
            info!("Artifacts are unchanged, nothing to commit");
            return Ok(PublishOutcome::NothingToCommit);
        }

        let message = format_commit_message(
            &self.config.message_template,
            &self.config.timestamp_format,
            now,
        )?;
        self.repository.commit(&message, &self.config.identity)?;
        info!("Committed artifacts: {message}");

        if !self.push {
            info!("Push disabled, leaving the commit local");
            return Ok(PublishOutcome::Committed {
                message,
                pushed_to: None,
            });
        }

        let branch = match &self.config.branch {
            Some(branch) => branch.clone(),
            None => self.repository.current_branch()?,
        };
        self.repository.push(&self.config.remote, &branch)?;
        info!("Pushed to {}/{}", self.config.remote, branch);

        Ok(PublishOutcome::Committed {
            message,
            pushed_to: Some(branch),
        })
    }
}
