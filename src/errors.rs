use glob::PatternError;
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Custom error type for the converter job
#[derive(Debug)]
pub enum Error {
    /// Error related to file operations
    FileOperation {
        source: io::Error,
        path: PathBuf,
        operation: String,
    },
    /// Error related to glob pattern matching
    GlobPattern {
        source: PatternError,
        pattern: String,
    },
    /// Error related to configuration parsing
    ConfigParsing {
        source: Box<dyn StdError + Send + Sync>,
        detail: String,
    },
    /// Error related to path operations
    PathOperation { path: PathBuf, operation: String },
    /// An external program could not be started at all
    CommandSpawn { source: io::Error, program: String },
    /// The converter ran and exited with a non-zero status
    ConverterFailed {
        program: String,
        code: Option<i32>,
        log: PathBuf,
    },
    /// A git invocation failed
    Git { operation: String, detail: String },
    /// Error when a filename is not valid Unicode
    InvalidFilename { path: PathBuf },
    /// Error when a directory is not found
    DirectoryNotFound { path: PathBuf },
    /// Generic error with a message
    Generic { message: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileOperation {
                path, operation, ..
            } => {
                write!(f, "Failed to {} file: {}", operation, path.display())
            }
            Error::GlobPattern { pattern, .. } => {
                write!(f, "Invalid glob pattern: {pattern}")
            }
            Error::ConfigParsing { detail, .. } => {
                write!(f, "Configuration parsing error: {detail}")
            }
            Error::PathOperation { path, operation } => {
                write!(f, "Failed to {} path: {}", operation, path.display())
            }
            Error::CommandSpawn { program, .. } => {
                write!(f, "Failed to start '{program}'")
            }
            Error::ConverterFailed { program, code, log } => match code {
                Some(code) => write!(
                    f,
                    "Converter '{program}' exited with status {code} (see {})",
                    log.display()
                ),
                None => write!(
                    f,
                    "Converter '{program}' was terminated by a signal (see {})",
                    log.display()
                ),
            },
            Error::Git { operation, detail } => {
                write!(f, "git {operation} failed: {detail}")
            }
            Error::InvalidFilename { path } => {
                write!(f, "Filename is not valid unicode: {}", path.display())
            }
            Error::DirectoryNotFound { path } => {
                write!(f, "Directory not found: {}", path.display())
            }
            Error::Generic { message } => {
                write!(f, "{message}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::FileOperation { source, .. } => Some(source),
            Error::GlobPattern { source, .. } => Some(source),
            Error::ConfigParsing { source, .. } => Some(source.as_ref()),
            Error::CommandSpawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Custom Result type for the converter job
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create a file operation error
pub fn file_operation_error(err: io::Error, path: PathBuf, operation: &str) -> Error {
    Error::FileOperation {
        source: err,
        path,
        operation: operation.to_string(),
    }
}

/// Helper function to create a glob pattern error
pub fn glob_pattern_error(err: PatternError, pattern: &str) -> Error {
    Error::GlobPattern {
        source: err,
        pattern: pattern.to_string(),
    }
}

/// Helper function to create a config parsing error
pub fn config_parsing_error<E: StdError + Send + Sync + 'static>(err: E, detail: &str) -> Error {
    Error::ConfigParsing {
        source: Box::new(err),
        detail: detail.to_string(),
    }
}

/// Helper function to create a path operation error
pub fn path_operation_error(path: PathBuf, operation: &str) -> Error {
    Error::PathOperation {
        path,
        operation: operation.to_string(),
    }
}

/// Helper function to create an error for a program that could not be started
pub fn command_spawn_error(err: io::Error, program: &str) -> Error {
    Error::CommandSpawn {
        source: err,
        program: program.to_string(),
    }
}

/// Helper function to create a converter failure error
pub fn converter_failed_error(program: &str, code: Option<i32>, log: PathBuf) -> Error {
    Error::ConverterFailed {
        program: program.to_string(),
        code,
        log,
    }
}

/// Helper function to create a git error
pub fn git_error(operation: &str, detail: &str) -> Error {
    Error::Git {
        operation: operation.to_string(),
        detail: detail.trim().to_string(),
    }
}

/// Helper function to create an invalid filename error
pub fn invalid_filename_error(path: PathBuf) -> Error {
    Error::InvalidFilename { path }
}

/// Helper function to create a directory not found error
pub fn directory_not_found_error(path: PathBuf) -> Error {
    Error::DirectoryNotFound { path }
}

/// Helper function to create a generic error
pub fn generic_error(message: &str) -> Error {
    Error::Generic {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_operation_error() {
        let path = PathBuf::from("/test/path");
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = file_operation_error(io_error, path.clone(), "move");

        let error_string = format!("{error}");
        assert!(
            error_string.contains("move"),
            "Error message should contain the operation"
        );
        assert!(
            error_string.contains("/test/path"),
            "Error message should contain the path"
        );
        assert!(error.source().is_some());
    }

    #[test]
    fn test_glob_pattern_error() {
        let pattern_error = glob::Pattern::new("[").err().unwrap();
        let error = glob_pattern_error(pattern_error, "test-glob-pattern");

        let error_string = format!("{error}");
        assert!(
            error_string.contains("test-glob-pattern"),
            "Error message should contain the pattern"
        );
    }

    #[test]
    fn test_config_parsing_error() {
        let io_error = io::Error::new(io::ErrorKind::InvalidData, "Invalid YAML");
        let error = config_parsing_error(io_error, "Missing required field");

        let error_string = format!("{error}");
        assert!(error_string.contains("Missing required field"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_path_operation_error() {
        let error = path_operation_error(PathBuf::from("/"), "get filename of");
        assert_eq!(format!("{error}"), "Failed to get filename of path: /");
    }

    #[test]
    fn test_command_spawn_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "No such file");
        let error = command_spawn_error(io_error, "python");

        assert_eq!(format!("{error}"), "Failed to start 'python'");
        assert!(error.source().is_some());
    }

    #[test]
    fn test_converter_failed_error() {
        let error = converter_failed_error("python", Some(2), PathBuf::from("output/run.log"));
        let error_string = format!("{error}");
        assert!(error_string.contains("status 2"));
        assert!(error_string.contains("output/run.log"));

        let error = converter_failed_error("python", None, PathBuf::from("output/run.log"));
        assert!(format!("{error}").contains("signal"));
    }

    #[test]
    fn test_git_error_trims_detail() {
        let error = git_error("push", "  rejected: non-fast-forward\n");
        assert_eq!(
            format!("{error}"),
            "git push failed: rejected: non-fast-forward"
        );
    }

    #[test]
    fn test_directory_not_found_error() {
        let path = PathBuf::from("/test/nonexistent");
        let error = directory_not_found_error(path);

        assert!(format!("{error}").contains("/test/nonexistent"));
    }

    #[test]
    fn test_invalid_filename_error() {
        let error = invalid_filename_error(PathBuf::from("/test/invalid:file"));
        assert!(format!("{error}").contains("/test/invalid:file"));
    }

    #[test]
    fn test_generic_error() {
        let error = generic_error("Something went wrong");
        assert_eq!(format!("{error}"), "Something went wrong");
    }
}
