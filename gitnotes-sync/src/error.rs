//! Error types for gitnotes-sync.

use gitnotes_core::{Action, Repository, SyncState};
use gitnotes_git::GitError;
use thiserror::Error;

/// All errors that can end a reconciliation run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Status or fetch failed, or the branch line was unexpected.
    #[error("unable to determine the state of {repo}: {source}")]
    Detection {
        repo: Repository,
        #[source]
        source: GitError,
    },

    /// Dispatch was asked to act on [`SyncState::Error`].
    #[error("the state of {repo} is unknown; no action taken")]
    UnknownState { repo: Repository },

    /// A commit, push or merge subprocess failed.
    #[error("{action} failed for {repo}: {source}")]
    Action {
        repo: Repository,
        action: Action,
        #[source]
        source: GitError,
    },

    /// The same state was observed before and after an action.
    #[error("state of {repo} doesn't change ({state}); no progress possible")]
    Convergence { repo: Repository, state: SyncState },
}

impl SyncError {
    /// `true` for failures to work out the repository state.
    pub fn is_detection(&self) -> bool {
        matches!(
            self,
            SyncError::Detection { .. } | SyncError::UnknownState { .. }
        )
    }
}
