//! Thin wrapper over the `git` binary
//!
//! Every call runs in the repository working directory and fails with the
//! captured stderr when git exits with a non-zero status.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use log::{debug, trace};

use crate::config::CommitIdentity;
use crate::errors::{Result, command_spawn_error, directory_not_found_error, git_error};

/// A git working tree the job publishes into
#[derive(Debug, Clone)]
pub struct GitRepository {
    workdir: PathBuf,
}

impl GitRepository {
    /// Opens the working tree at `workdir`
    ///
    /// # Errors
    /// Returns an error if the directory is missing or is not inside a git
    /// working tree.
    pub fn open(workdir: &Path) -> Result<Self> {
        if !workdir.is_dir() {
            return Err(directory_not_found_error(workdir.to_path_buf()));
        }
        let repository = GitRepository {
            workdir: workdir.to_path_buf(),
        };
        repository.run("rev-parse", ["rev-parse", "--is-inside-work-tree"])?;
        Ok(repository)
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new("git");
        command
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null());
        command
    }

    fn execute(&self, operation: &str, mut command: Command) -> Result<Output> {
        trace!("git {operation}: {command:?}");
        command
            .output()
            .map_err(|e| command_spawn_error(e, "git"))
    }

    fn check(operation: &str, output: Output) -> Result<Output> {
        if output.status.success() {
            return Ok(output);
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = if stderr.trim().is_empty() {
            String::from_utf8_lossy(&output.stdout).to_string()
        } else {
            stderr.to_string()
        };
        Err(git_error(operation, &detail))
    }

    fn run<I, S>(&self, operation: &str, args: I) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.execute(operation, self.command(args))?;
        Self::check(operation, output)
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.workdir).unwrap_or(path)
    }

    /// Name of the checked-out branch
    ///
    /// # Errors
    /// Returns an error on a detached HEAD, where there is no branch to push to.
    pub fn current_branch(&self) -> Result<String> {
        let output = self.run("rev-parse", ["rev-parse", "--abbrev-ref", "HEAD"])?;
        let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if branch == "HEAD" {
            return Err(git_error(
                "rev-parse",
                "HEAD is detached; set publish.branch to choose the push target",
            ));
        }
        Ok(branch)
    }

    /// Paths changed between `rev` and `HEAD`, relative to the repository root
    ///
    /// Names are NUL-separated and unquoted, so non-ASCII paths come back
    /// verbatim.
    pub fn changed_files_since(&self, rev: &str) -> Result<Vec<PathBuf>> {
        let output = self.run(
            "diff",
            [
                "-c",
                "core.quotePath=false",
                "diff",
                "--name-only",
                "-z",
                rev,
                "HEAD",
                "--",
            ],
        )?;
        Ok(String::from_utf8_lossy(&output.stdout)
            .split('\0')
            .filter(|name| !name.is_empty())
            .map(PathBuf::from)
            .collect())
    }

    /// Adds the given files to the index
    pub fn stage(&self, paths: &[PathBuf]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec![OsStr::new("add"), OsStr::new("--")];
        args.extend(paths.iter().map(|p| self.relative(p).as_os_str()));
        self.run("add", args)?;
        debug!("Staged {} paths", paths.len());
        Ok(())
    }

    /// Whether the index differs from `HEAD`
    ///
    /// `git diff --cached --quiet` exits 1 when there are differences and 0
    /// when there are none; anything else is a real failure.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let output = self.execute("diff", self.command(["diff", "--cached", "--quiet"]))?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Self::check("diff", output).map(|_| false),
        }
    }

    /// Records the index as a commit authored and committed by `identity`
    ///
    /// The identity is handed to this one git process through its
    /// environment; no git configuration is written.
    pub fn commit(&self, message: &str, identity: &CommitIdentity) -> Result<()> {
        let mut command = self.command(["commit", "--quiet", "-m", message]);
        command
            .env("GIT_AUTHOR_NAME", &identity.name)
            .env("GIT_AUTHOR_EMAIL", &identity.email)
            .env("GIT_COMMITTER_NAME", &identity.name)
            .env("GIT_COMMITTER_EMAIL", &identity.email);
        let output = self.execute("commit", command)?;
        Self::check("commit", output)?;
        Ok(())
    }

    /// Pushes `HEAD` to `branch` on `remote`
    pub fn push(&self, remote: &str, branch: &str) -> Result<()> {
        let refspec = format!("HEAD:refs/heads/{branch}");
        self.run("push", ["push", remote, refspec.as_str()])?;
        Ok(())
    }
}
