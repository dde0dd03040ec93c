//! Error types for gitnotes-git.

use std::path::PathBuf;

use thiserror::Error;

use crate::status::StatusParseError;

/// All errors that can arise from running git against a working copy.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git process could not be started at all.
    #[error("failed to launch `git {command}` in {path}: {source}")]
    Spawn {
        command: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// git ran and exited unsuccessfully.
    #[error("`git {command}` failed in {path} (exit code {code:?}): {stderr}")]
    Command {
        command: String,
        path: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    /// The branch status line did not match the tracked branch.
    #[error(transparent)]
    Status(#[from] StatusParseError),
}
