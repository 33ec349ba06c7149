//! Scratch repositories for job tests
//!
//! Each fixture is a working tree with an `origin` bare remote, a stub
//! converter under `src/convert.sh` and a configuration pointing at it.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::{TempDir, tempdir};

/// Writes `<stem>_done.csv` next to every input
pub const CONVERTING_STUB: &str = r#"for f in "$@"; do
  printf 'a,b\n1,2\n' > "${f%.txt}_done.csv"
  echo "converted $f"
done
"#;

/// Exits non-zero without producing anything
pub const FAILING_STUB: &str = "echo 'parse error' >&2\nexit 2\n";

/// Succeeds but writes no CSV
pub const SILENT_STUB: &str = "echo \"nothing to do for $#\"\n";

pub const CONFIG: &str = "converter:\n  program: sh\n  script: src/convert.sh\n";

pub struct Fixture {
    pub dir: TempDir,
    pub repo: PathBuf,
    pub remote: PathBuf,
}

pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

impl Fixture {
    /// Creates a repository with the given converter and input files
    pub fn new(converter: &str, inputs: &[(&str, &str)]) -> Fixture {
        let dir = tempdir().expect("Failed to create temp directory");
        let remote = dir.path().join("remote.git");
        let repo = dir.path().join("work");
        fs::create_dir_all(&repo).unwrap();

        git(dir.path(), &["init", "--quiet", "--bare", "remote.git"]);
        git(&repo, &["init", "--quiet"]);
        git(&repo, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        git(&repo, &["config", "user.name", "Test User"]);
        git(&repo, &["config", "user.email", "test@example.com"]);
        git(&repo, &["config", "commit.gpgsign", "false"]);

        fs::create_dir_all(repo.join("src")).unwrap();
        fs::write(repo.join("src/convert.sh"), converter).unwrap();
        fs::write(repo.join("txt2csv.yaml"), CONFIG).unwrap();
        fs::create_dir_all(repo.join("faturas")).unwrap();
        fs::write(repo.join("faturas/.gitkeep"), "").unwrap();
        for (name, content) in inputs {
            fs::write(repo.join("faturas").join(name), content).unwrap();
        }

        git(&repo, &["add", "-A"]);
        git(&repo, &["commit", "--quiet", "-m", "initial"]);
        git(&repo, &["remote", "add", "origin", remote.to_str().unwrap()]);
        git(&repo, &["push", "--quiet", "origin", "main"]);

        Fixture { dir, repo, remote }
    }

    pub fn commit_count(&self) -> usize {
        git(&self.repo, &["rev-list", "--count", "HEAD"])
            .parse()
            .unwrap()
    }

    pub fn remote_subject(&self) -> String {
        git(&self.remote, &["log", "-1", "--format=%s", "main"])
    }

    pub fn tracked_files(&self) -> Vec<String> {
        git(&self.repo, &["ls-tree", "-r", "--name-only", "HEAD"])
            .lines()
            .map(str::to_string)
            .collect()
    }
}
