//! # gitnotes-git
//!
//! The boundary to the `git` executable.
//!
//! [`Git`] is the capability the reconciler depends on; [`GitCli`] implements
//! it by shelling out, and [`status::parse_branch_status`] turns the porcelain
//! branch line into a typed [`RemoteComparison`](gitnotes_core::RemoteComparison)
//! without touching a process.

pub mod cli;
pub mod error;
pub mod status;

pub use cli::GitCli;
pub use error::GitError;
pub use status::{parse_branch_status, StatusParseError};

use gitnotes_core::{RemoteComparison, Repository};

/// Git operations needed to inspect and repair one working copy.
///
/// Every call is blocking. Async callers go through `spawn_blocking`.
pub trait Git: Send + Sync {
    /// `true` when `status --porcelain` reports any change, tracked or not.
    fn is_dirty(&self, repo: &Repository) -> Result<bool, GitError>;

    /// Fetch, then compare the tracked branch with `origin/<branch>`.
    fn remote_comparison(&self, repo: &Repository) -> Result<RemoteComparison, GitError>;

    /// Stage everything and commit it with the synthetic identity.
    fn stage_and_commit(&self, repo: &Repository) -> Result<(), GitError>;

    /// Push the tracked branch to `origin`, setting upstream tracking.
    fn push(&self, repo: &Repository) -> Result<(), GitError>;

    /// Merge `origin/<branch>` without committing. Conflicts are not errors.
    fn merge(&self, repo: &Repository) -> Result<(), GitError>;
}
