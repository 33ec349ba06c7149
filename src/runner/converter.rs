//! Converter invocation
//!
//! Runs the external converter once over the whole batch. Its stdout and
//! stderr share one log file, truncated at the start of every run.

use std::ffi::OsString;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::config::ConverterConfig;
use crate::constants::NO_INPUTS_LOG_LINE;
use crate::errors::{Result, command_spawn_error, converter_failed_error, file_operation_error};

/// What happened when the converter step ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterOutcome {
    /// False when there were no inputs and the converter was skipped
    pub invoked: bool,
    /// Number of input files passed to the converter
    pub inputs: usize,
    /// Combined stdout/stderr log
    pub log_path: PathBuf,
}

/// The external converter, bound to the directory it runs in
#[derive(Debug, Clone)]
pub struct Converter {
    program: Option<String>,
    script: PathBuf,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl Converter {
    pub fn new(config: &ConverterConfig, working_dir: &Path) -> Self {
        Converter {
            program: config.program.clone(),
            script: config.script.clone(),
            args: config.args.clone(),
            working_dir: working_dir.to_path_buf(),
        }
    }

    /// Name used in logs and errors
    pub fn display_name(&self) -> String {
        match &self.program {
            Some(program) => format!("{} {}", program, self.relative(&self.script).display()),
            None => self.relative(&self.script).display().to_string(),
        }
    }

    /// Program and arguments for one invocation over `inputs`
    ///
    /// Paths under the working directory are passed relative to it.
    pub fn command_line(&self, inputs: &[PathBuf]) -> (OsString, Vec<OsString>) {
        let script = self.relative(&self.script).as_os_str().to_os_string();
        let mut args = Vec::with_capacity(inputs.len() + self.args.len() + 1);

        let program = match &self.program {
            Some(program) => {
                args.push(script);
                OsString::from(program)
            }
            None => self.script.as_os_str().to_os_string(),
        };

        args.extend(self.args.iter().map(OsString::from));
        args.extend(inputs.iter().map(|p| self.relative(p).as_os_str().to_os_string()));

        (program, args)
    }

    /// Invokes the converter over every input file
    ///
    /// With no inputs the converter is not started; the log is rewritten
    /// with a single explanatory line instead.
    ///
    /// # Errors
    /// * `Error::CommandSpawn` if the program cannot be started
    /// * `Error::ConverterFailed` if it exits with a non-zero status
    pub fn run(&self, inputs: &[PathBuf], log_path: &Path) -> Result<ConverterOutcome> {
        let mut log = File::create(log_path)
            .map_err(|e| file_operation_error(e, log_path.to_path_buf(), "create"))?;

        if inputs.is_empty() {
            info!("No input files to convert, skipping the converter");
            writeln!(log, "{NO_INPUTS_LOG_LINE}")
                .map_err(|e| file_operation_error(e, log_path.to_path_buf(), "write"))?;
            return Ok(ConverterOutcome {
                invoked: false,
                inputs: 0,
                log_path: log_path.to_path_buf(),
            });
        }

        let stderr_log = log
            .try_clone()
            .map_err(|e| file_operation_error(e, log_path.to_path_buf(), "duplicate handle of"))?;

        let (program, args) = self.command_line(inputs);
        let name = self.display_name();
        info!("Running {} over {} input files", name, inputs.len());
        debug!("Converter command line: {program:?} {args:?}");

        let status = Command::new(&program)
            .args(&args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(stderr_log))
            .status()
            .map_err(|e| command_spawn_error(e, &name))?;

        if !status.success() {
            return Err(converter_failed_error(
                &name,
                status.code(),
                log_path.to_path_buf(),
            ));
        }

        info!("Converter finished, output captured in {}", log_path.display());

        Ok(ConverterOutcome {
            invoked: true,
            inputs: inputs.len(),
            log_path: log_path.to_path_buf(),
        })
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.working_dir).unwrap_or(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use std::fs;
    use tempfile::tempdir;

    fn shell_converter(dir: &Path, body: &str) -> Converter {
        let script = dir.join("convert.sh");
        fs::write(&script, body).unwrap();
        let config = ConverterConfig {
            program: Some("sh".to_string()),
            script,
            args: Vec::new(),
        };
        Converter::new(&config, dir)
    }

    #[test]
    fn test_command_line_relative_to_working_dir() {
        let config = ConverterConfig {
            program: Some("python".to_string()),
            script: PathBuf::from("/repo/src/itau_batch_txt2csv.py"),
            args: vec!["-v".to_string()],
        };
        let converter = Converter::new(&config, Path::new("/repo"));

        let (program, args) = converter.command_line(&[
            PathBuf::from("/repo/faturas/fev.txt"),
            PathBuf::from("/repo/faturas/jan.txt"),
        ]);
        assert_eq!(program, OsString::from("python"));
        assert_eq!(
            args,
            vec![
                OsString::from("src/itau_batch_txt2csv.py"),
                OsString::from("-v"),
                OsString::from("faturas/fev.txt"),
                OsString::from("faturas/jan.txt"),
            ]
        );
        assert_eq!(converter.display_name(), "python src/itau_batch_txt2csv.py");
    }

    #[test]
    fn test_command_line_without_interpreter() {
        let config = ConverterConfig {
            program: None,
            script: PathBuf::from("/repo/bin/convert"),
            args: Vec::new(),
        };
        let converter = Converter::new(&config, Path::new("/repo"));

        let (program, args) = converter.command_line(&[PathBuf::from("/repo/a.txt")]);
        assert_eq!(program, OsString::from("/repo/bin/convert"));
        assert_eq!(args, vec![OsString::from("a.txt")]);
    }

    #[test]
    fn test_no_inputs_skips_converter_and_rewrites_log() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("run.log");
        fs::write(&log_path, "previous run\n").unwrap();
        let converter = shell_converter(dir.path(), "exit 1\n");

        let outcome = converter.run(&[], &log_path).unwrap();
        assert!(!outcome.invoked);
        assert_eq!(
            fs::read_to_string(&log_path).unwrap(),
            format!("{NO_INPUTS_LOG_LINE}\n")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_run_captures_stdout_and_stderr() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("run.log");
        let input = dir.path().join("jan.txt");
        fs::write(&input, "01/05 LOJA 10,00\n").unwrap();
        let converter = shell_converter(
            dir.path(),
            "for f in \"$@\"; do echo \"converted $f\"; done\necho oops >&2\n",
        );

        let outcome = converter.run(&[input], &log_path).unwrap();
        assert!(outcome.invoked);
        assert_eq!(outcome.inputs, 1);

        let log = fs::read_to_string(&log_path).unwrap();
        assert!(log.contains("converted jan.txt"), "log was: {log}");
        assert!(log.contains("oops"), "log was: {log}");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_fatal() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("run.log");
        let input = dir.path().join("jan.txt");
        fs::write(&input, "").unwrap();
        let converter = shell_converter(dir.path(), "echo broken; exit 3\n");

        let error = converter.run(&[input], &log_path).unwrap_err();
        match error {
            Error::ConverterFailed { code, .. } => assert_eq!(code, Some(3)),
            other => panic!("unexpected error: {other}"),
        }
        assert!(fs::read_to_string(&log_path).unwrap().contains("broken"));
    }

    #[test]
    fn test_missing_program_is_a_spawn_error() {
        let dir = tempdir().unwrap();
        let config = ConverterConfig {
            program: Some("definitely-not-a-real-interpreter".to_string()),
            script: dir.path().join("convert.py"),
            args: Vec::new(),
        };
        let converter = Converter::new(&config, dir.path());

        let error = converter
            .run(&[dir.path().join("a.txt")], &dir.path().join("run.log"))
            .unwrap_err();
        assert!(matches!(error, Error::CommandSpawn { .. }));
    }
}
