//! [`Git`] implementation that shells out to the `git` executable.

use std::path::PathBuf;
use std::process::{Command, Output};

use chrono::Local;
use gitnotes_core::{RemoteComparison, Repository};

use crate::error::GitError;
use crate::status::parse_branch_status;
use crate::Git;

/// Author and committer used for automatic commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CommitIdentity {
    name: &'static str,
    email: &'static str,
}

const IDENTITY: CommitIdentity = CommitIdentity {
    name: "Git notes",
    email: "git-notes@noemail.com",
};

/// Runs git as a child process with the repository as working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    binary: PathBuf,
    identity: CommitIdentity,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    /// `git` from `PATH`, default identity.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("git"),
            identity: IDENTITY,
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Run git and capture its output, whatever the exit status.
    fn output(&self, repo: &Repository, args: &[&str]) -> Result<Output, GitError> {
        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(&repo.path)
            .output()
            .map_err(|source| GitError::Spawn {
                command: args.join(" "),
                path: repo.path.clone(),
                source,
            })?;

        tracing::debug!(
            repo = %repo,
            command = %args.join(" "),
            status = ?output.status.code(),
            stdout = %String::from_utf8_lossy(&output.stdout).trim(),
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "git finished",
        );
        Ok(output)
    }

    /// Run git and return stdout, failing on a non-zero exit.
    fn run(&self, repo: &Repository, args: &[&str]) -> Result<String, GitError> {
        let output = self.output(repo, args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stderr = if stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr
            };
            return Err(GitError::Command {
                command: args.join(" "),
                path: repo.path.clone(),
                code: output.status.code(),
                stderr,
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Git for GitCli {
    fn is_dirty(&self, repo: &Repository) -> Result<bool, GitError> {
        let out = self.run(repo, &["status", "--porcelain"])?;
        Ok(!out.trim().is_empty())
    }

    fn remote_comparison(&self, repo: &Repository) -> Result<RemoteComparison, GitError> {
        self.run(repo, &["fetch"])?;
        let status = self.run(repo, &["status", "--branch", "--porcelain"])?;
        Ok(parse_branch_status(&status, &repo.branch)?)
    }

    fn stage_and_commit(&self, repo: &Repository) -> Result<(), GitError> {
        self.run(repo, &["add", "--all"])?;

        let name = format!("user.name={}", self.identity.name);
        let email = format!("user.email={}", self.identity.email);
        let message = format!("Committed at {}", Local::now().format("%Y-%m-%d %H:%M:%S %z"));
        self.run(
            repo,
            &[
                "-c",
                name.as_str(),
                "-c",
                email.as_str(),
                "commit",
                "-m",
                message.as_str(),
            ],
        )?;
        Ok(())
    }

    fn push(&self, repo: &Repository) -> Result<(), GitError> {
        self.run(repo, &["push", "origin", repo.branch.as_str(), "-u"])?;
        Ok(())
    }

    /// A failed merge leaves conflict markers in the working tree; the next
    /// reconciliation commits that tree as-is, markers included.
    fn merge(&self, repo: &Repository) -> Result<(), GitError> {
        let upstream = repo.upstream_ref();
        let output = self.output(
            repo,
            &[
                "merge",
                upstream.as_str(),
                "--allow-unrelated-histories",
                "--no-commit",
            ],
        )?;
        if !output.status.success() {
            tracing::warn!(
                repo = %repo,
                code = ?output.status.code(),
                "merge did not complete cleanly; conflicted tree left for the next commit",
            );
        }
        Ok(())
    }
}
