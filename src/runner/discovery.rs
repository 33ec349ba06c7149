//! Input discovery
//!
//! Expands the input pattern against the input directory. An empty result is
//! a normal outcome and never reaches the converter as a literal pattern.

use std::fs::{create_dir_all, read_dir};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use log::{debug, warn};

use crate::errors::{Result, file_operation_error, glob_pattern_error};
use crate::utils::{file_name_str, is_hidden_file};

/// Like a shell glob: `*` does not match a leading dot
const INPUT_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Lists the input files in `input_dir` whose names match `pattern`
///
/// The listing is not recursive and is sorted so the converter sees the
/// same argument order on every run.
///
/// # Errors
/// Returns an error if the pattern is invalid or the directory cannot be read.
/// A missing directory is not an error and yields an empty list.
pub fn collect_inputs(input_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = Pattern::new(pattern).map_err(|e| glob_pattern_error(e, pattern))?;

    let entries = match read_dir(input_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Input directory {} does not exist", input_dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(file_operation_error(e, input_dir.to_path_buf(), "list")),
    };

    let mut inputs = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| file_operation_error(e, input_dir.to_path_buf(), "list"))?
            .path();
        if !path.is_file() || is_hidden_file(&path) {
            continue;
        }
        if matcher.matches_with(file_name_str(&path)?, INPUT_MATCH_OPTIONS) {
            inputs.push(path);
        }
    }
    inputs.sort();

    debug!(
        "Found {} input files matching {} in {}",
        inputs.len(),
        pattern,
        input_dir.display()
    );

    Ok(inputs)
}

/// Creates the output directory if it is absent
pub fn ensure_output_dir(output_dir: &Path) -> Result<()> {
    create_dir_all(output_dir)
        .map_err(|e| file_operation_error(e, output_dir.to_path_buf(), "create directory"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_collect_inputs_is_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        for name in ["mar.txt", "jan.txt", "fev.txt", "jan_done.csv", ".hidden.txt"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let inputs = collect_inputs(dir.path(), "*.txt").unwrap();
        let names: Vec<_> = inputs
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["fev.txt", "jan.txt", "mar.txt"]);
    }

    #[test]
    fn test_collect_inputs_empty_directory() {
        let dir = tempdir().unwrap();
        assert!(collect_inputs(dir.path(), "*.txt").unwrap().is_empty());
    }

    #[test]
    fn test_collect_inputs_missing_directory() {
        let dir = tempdir().unwrap();
        let inputs = collect_inputs(&dir.path().join("faturas"), "*.txt").unwrap();
        assert!(inputs.is_empty());
    }

    #[test]
    fn test_collect_inputs_invalid_pattern() {
        let dir = tempdir().unwrap();
        assert!(collect_inputs(dir.path(), "[").is_err());
    }

    #[test]
    fn test_ensure_output_dir_is_idempotent() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("output").join("nested");

        ensure_output_dir(&output).unwrap();
        ensure_output_dir(&output).unwrap();
        assert!(output.is_dir());
    }
}
