//! Changed-path matching
//!
//! A push activates the job when at least one changed path matches one of
//! the configured glob patterns or is the converter script itself.

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use log::{debug, info};

use crate::config::Config;
use crate::errors::{Result, glob_pattern_error};

/// `*` stays inside one path segment; only `**/` crosses directories
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled trigger rules for one job
#[derive(Debug, Clone)]
pub struct TriggerEvaluator {
    patterns: Vec<Pattern>,
    converter_script: PathBuf,
}

impl TriggerEvaluator {
    /// Builds an evaluator from raw glob patterns and the converter script path
    ///
    /// # Errors
    /// Returns an error if any of the patterns is not a valid glob
    pub fn new<S: AsRef<str>>(patterns: &[S], converter_script: &Path) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p.as_ref()).map_err(|e| glob_pattern_error(e, p.as_ref())))
            .collect::<Result<Vec<Pattern>>>()?;

        Ok(TriggerEvaluator {
            patterns,
            converter_script: normalize_changed_path(converter_script),
        })
    }

    /// Builds an evaluator from the job configuration
    ///
    /// An absolute converter path is made relative to `repo_root`, because
    /// changed paths are always reported relative to the repository.
    pub fn from_config(config: &Config, repo_root: &Path) -> Result<Self> {
        let script = &config.converter.script;
        let script = script.strip_prefix(repo_root).unwrap_or(script);
        Self::new(&config.trigger.paths, script)
    }

    /// Returns true if a single changed path activates the job
    pub fn is_match(&self, changed: &Path) -> bool {
        let changed = normalize_changed_path(changed);
        if changed == self.converter_script {
            return true;
        }
        self.patterns
            .iter()
            .any(|pattern| pattern.matches_path_with(&changed, MATCH_OPTIONS))
    }

    /// Returns the changed paths that activate the job
    pub fn matching(&self, changed: &[PathBuf]) -> Vec<PathBuf> {
        changed
            .iter()
            .filter(|path| self.is_match(path))
            .cloned()
            .collect()
    }

    /// Decides whether the job runs for the given set of changed paths
    pub fn should_run(&self, changed: &[PathBuf]) -> bool {
        let matched = self.matching(changed);
        if matched.is_empty() {
            info!(
                "None of the {} changed paths match the trigger",
                changed.len()
            );
            return false;
        }

        for path in &matched {
            debug!("Trigger matched {}", path.display());
        }
        info!(
            "{} of {} changed paths match the trigger",
            matched.len(),
            changed.len()
        );
        true
    }
}

/// Drops `.` components so `./faturas/a.txt` and `faturas/a.txt` compare equal
pub fn normalize_changed_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}
