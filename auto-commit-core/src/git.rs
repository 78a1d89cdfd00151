use anyhow::{anyhow, Context, Result};
use encoding_rs::UTF_8;
use git2::Repository;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::debug;

use crate::error::AutoCommitError;

/// a discovered working tree plus the git executable used to drive it
#[derive(Debug, Clone)]
pub struct GitRepo {
    workdir: PathBuf,
    git: PathBuf,
}

/// staged file list and diff text read from a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedChanges {
    pub files: Vec<String>,
    pub diff: String,
}

impl GitRepo {
    /// locate the repository containing `path` and the git binary to run in it
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, AutoCommitError> {
        Self::locate(path.as_ref()).map_err(AutoCommitError::NoRepositoryOrNoStagedChanges)
    }

    fn locate(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .with_context(|| format!("failed to open git repository at {}", path.display()))?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| anyhow!("repository at {} has no working tree", repo.path().display()))?
            .to_path_buf();
        let git = which::which("git").context("git executable not found on PATH")?;
        debug!(workdir = %workdir.display(), git = %git.display(), "discovered repository");
        Ok(Self { workdir, git })
    }

    /// root of the working tree every git call runs in
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// repository-relative paths of every staged file, in git's order
    pub fn list_staged_files(&self) -> Result<Vec<String>, AutoCommitError> {
        let stdout = self
            .run(&["-c", "core.quotePath=false", "diff", "--cached", "--no-color", "--name-only"])
            .map_err(AutoCommitError::NoRepositoryOrNoStagedChanges)?;
        Ok(parse_file_list(&stdout))
    }

    /// full unified diff of the index against HEAD; empty when git cannot produce it
    ///
    /// colour and external diff drivers are disabled so user config cannot change the format
    pub fn get_staged_diff_text(&self) -> String {
        let args = ["-c", "core.quotePath=false", "diff", "--cached", "--no-color", "--no-ext-diff"];
        match self.run(&args) {
            Ok(diff) => diff,
            Err(e) => {
                debug!("staged diff unavailable, continuing without line counts: {e:#}");
                String::new()
            }
        }
    }

    /// read everything the classifier needs; an empty file list is its own failure
    pub fn read_staged_changes(&self) -> Result<StagedChanges, AutoCommitError> {
        let files = self.list_staged_files()?;
        if files.is_empty() {
            return Err(AutoCommitError::NothingStaged);
        }
        let diff = self.get_staged_diff_text();
        debug!(files = files.len(), diff_bytes = diff.len(), "read staged changes");
        Ok(StagedChanges { files, diff })
    }

    /// create a commit whose message is exactly `message`; returns git's summary output
    ///
    /// stderr is inherited so hook output shows up while the hooks run
    pub fn commit(&self, message: &str) -> Result<String, AutoCommitError> {
        let args = ["commit", "-m", message];
        let mut command = self.command(&args);
        command.stderr(Stdio::inherit());
        self.execute(&args, command)
            .map_err(AutoCommitError::CommitFailed)
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        self.execute(args, self.command(args))
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(&self.git);
        command.current_dir(&self.workdir).args(args);
        command
    }

    fn execute(&self, args: &[&str], mut command: Command) -> Result<String> {
        debug!(?args, "running git");
        let output = command
            .output()
            .with_context(|| format!("failed to execute {}", self.git.display()))?;
        check_output(args, output)
    }
}

fn check_output(args: &[&str], output: Output) -> Result<String> {
    if output.status.success() {
        return Ok(decode_output(&output.stdout));
    }

    let stderr = decode_output(&output.stderr);
    let detail = if stderr.trim().is_empty() {
        decode_output(&output.stdout)
    } else {
        stderr
    };
    // name only the subcommand; `commit -m` carries the whole message
    let subcommand = args.iter().find(|a| !a.starts_with('-') && !a.contains('=')).unwrap_or(&"");
    Err(anyhow!("{}", detail.trim()).context(format!("git {subcommand} exited with {}", output.status)))
}

/// split git's newline-separated name list, dropping blank entries
pub fn parse_file_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// decode process output as utf-8, replacing malformed sequences
fn decode_output(bytes: &[u8]) -> String {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if had_errors {
        debug!("git output contained invalid utf-8; replaced malformed sequences");
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_list_drops_blank_and_padded_lines() {
        let files = parse_file_list("src/a.js\n\n  README.md  \n\t\nCargo.toml\n");
        assert_eq!(files, vec!["src/a.js", "README.md", "Cargo.toml"]);
    }

    #[test]
    fn whitespace_only_listing_is_empty() {
        assert!(parse_file_list(" \n\n \t\n").is_empty());
    }

    #[test]
    fn malformed_utf8_is_replaced_not_rejected() {
        let decoded = decode_output(b"caf\xe9.md\n");
        assert!(decoded.starts_with("caf"));
        assert!(decoded.ends_with(".md\n"));
        assert!(decoded.contains('\u{FFFD}'));
    }

    #[test]
    fn failed_git_calls_outside_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        let repo = GitRepo {
            workdir: dir.path().to_path_buf(),
            git: which::which("git").unwrap(),
        };

        assert_eq!(repo.get_staged_diff_text(), "");
        assert!(matches!(
            repo.list_staged_files(),
            Err(AutoCommitError::NoRepositoryOrNoStagedChanges(_))
        ));
    }

    #[test]
    fn unicode_paths_survive_decoding() {
        assert_eq!(decode_output("docs/ñandú.md".as_bytes()), "docs/ñandú.md");
    }
}
