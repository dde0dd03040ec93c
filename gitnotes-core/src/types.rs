//! Domain types shared by every git-notes crate.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! Nothing here caches repository state: a [`SyncState`] is always derived
//! fresh from the working tree by the inspector.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for the branch a repository tracks on `origin`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchName(pub String);

impl BranchName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for BranchName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BranchName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A local working copy kept in sync with `origin/<branch>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    /// Working-tree root; every git command runs with this as its cwd.
    pub path: PathBuf,
    pub branch: BranchName,
}

impl Repository {
    pub fn new(path: impl Into<PathBuf>, branch: impl Into<BranchName>) -> Self {
        Self {
            path: path.into(),
            branch: branch.into(),
        }
    }

    /// `origin/<branch>`, the ref merged when the repository is out of sync.
    pub fn upstream_ref(&self) -> String {
        format!("origin/{}", self.branch)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.branch)
    }
}

/// Ahead/behind facts parsed from a `git status --branch --porcelain` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemoteComparison {
    /// `false` when the branch has no `...origin/<branch>` counterpart yet.
    pub has_upstream: bool,
    pub ahead: bool,
    pub behind: bool,
}

impl RemoteComparison {
    /// Comparison for a branch that has never been pushed.
    pub fn no_upstream() -> Self {
        Self::default()
    }

    /// Classification of a clean working tree with this comparison.
    pub fn state(&self) -> SyncState {
        if !self.has_upstream {
            SyncState::Ahead
        } else if self.behind {
            SyncState::OutOfSync
        } else if self.ahead {
            SyncState::Ahead
        } else {
            SyncState::Sync
        }
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Point-in-time classification of a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncState {
    /// The state could not be determined (status or fetch failed).
    Error,
    /// The working tree has staged, unstaged or untracked changes.
    Dirty,
    /// Local commits are not on the remote, or no upstream exists yet.
    Ahead,
    /// The remote has commits the local branch lacks.
    OutOfSync,
    Sync,
}

impl SyncState {
    /// The remediation for this state, if any.
    pub fn action(&self) -> Option<Action> {
        match self {
            SyncState::Dirty => Some(Action::Commit),
            SyncState::Ahead => Some(Action::Push),
            SyncState::OutOfSync => Some(Action::Merge),
            SyncState::Error | SyncState::Sync => None,
        }
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncState::Error => write!(f, "error"),
            SyncState::Dirty => write!(f, "dirty"),
            SyncState::Ahead => write!(f, "ahead"),
            SyncState::OutOfSync => write!(f, "out-of-sync"),
            SyncState::Sync => write!(f, "sync"),
        }
    }
}

/// A corrective git operation applied by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// `add --all` followed by a commit with the synthetic identity.
    Commit,
    /// `push origin <branch> -u`.
    Push,
    /// `merge origin/<branch> --no-commit`.
    Merge,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Commit => write!(f, "commit"),
            Action::Push => write!(f, "push"),
            Action::Merge => write!(f, "merge"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
