//! Classification of a repository into a [`SyncState`].

use gitnotes_core::{Repository, SyncState};
use gitnotes_git::Git;

use crate::error::SyncError;

/// Classify `repo`. A dirty tree is `Dirty` without contacting the remote.
pub fn classify(git: &dyn Git, repo: &Repository) -> Result<SyncState, SyncError> {
    let detection = |source| SyncError::Detection {
        repo: repo.clone(),
        source,
    };

    if git.is_dirty(repo).map_err(detection)? {
        return Ok(SyncState::Dirty);
    }
    let comparison = git.remote_comparison(repo).map_err(detection)?;
    Ok(comparison.state())
}

/// [`classify`] for display. A detection failure is logged and reported as
/// [`SyncState::Error`] together with its cause.
pub fn classify_or_error(git: &dyn Git, repo: &Repository) -> (SyncState, Option<SyncError>) {
    match classify(git, repo) {
        Ok(state) => (state, None),
        Err(err) => {
            tracing::warn!(repo = %repo, error = %err, "state detection failed");
            (SyncState::Error, Some(err))
        }
    }
}
