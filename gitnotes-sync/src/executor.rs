//! Per-state remediation.

use gitnotes_core::{Action, Repository, SyncState};
use gitnotes_git::Git;

use crate::error::SyncError;

/// Apply the action `state` calls for and report which one ran.
///
/// `Sync` is a no-op. `Error` is a no-op that fails with
/// [`SyncError::UnknownState`]: the state carries no cause, so the
/// underlying detection error is not available here. Callers that classify
/// with [`crate::inspector::classify`] get that error first and never
/// dispatch `Error`. Merge conflicts are absorbed by [`Git::merge`] and
/// never reach this level.
pub fn apply(git: &dyn Git, repo: &Repository, state: SyncState) -> Result<Option<Action>, SyncError> {
    let Some(action) = state.action() else {
        return match state {
            SyncState::Error => Err(SyncError::UnknownState { repo: repo.clone() }),
            _ => Ok(None),
        };
    };

    tracing::info!(repo = %repo, state = %state, action = %action, "applying action");
    let result = match action {
        Action::Commit => git.stage_and_commit(repo),
        Action::Push => git.push(repo),
        Action::Merge => git.merge(repo),
    };
    result.map_err(|source| SyncError::Action {
        repo: repo.clone(),
        action,
        source,
    })?;
    Ok(Some(action))
}
