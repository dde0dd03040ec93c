//! The detect → act → detect loop for one repository.

use std::sync::Arc;
use std::time::Instant;

use gitnotes_core::{Action, Repository, SyncState};
use gitnotes_git::Git;
use serde::Serialize;

use crate::error::SyncError;
use crate::{executor, inspector};

/// One classify → act → classify cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub from: SyncState,
    pub action: Option<Action>,
    pub to: SyncState,
}

/// Outcome of a successful [`Reconciler::converge`] run.
#[derive(Debug, Clone, Serialize)]
pub struct ConvergeReport {
    pub repo: Repository,
    /// Every state observed, starting with the initial classification and
    /// ending with `Sync`.
    pub states: Vec<SyncState>,
    pub actions: Vec<Action>,
    pub duration_ms: u128,
}

impl ConvergeReport {
    /// `true` when the repository was already in sync.
    pub fn was_noop(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Drives a repository to [`SyncState::Sync`] through a [`Git`] adapter.
///
/// Holds no per-repository state; one instance serves every repository.
#[derive(Clone)]
pub struct Reconciler {
    git: Arc<dyn Git>,
}

impl Reconciler {
    pub fn new(git: Arc<dyn Git>) -> Self {
        Self { git }
    }

    pub fn classify(&self, repo: &Repository) -> Result<SyncState, SyncError> {
        inspector::classify(self.git.as_ref(), repo)
    }

    /// Classify without failing; see [`inspector::classify_or_error`].
    pub fn inspect(&self, repo: &Repository) -> (SyncState, Option<SyncError>) {
        inspector::classify_or_error(self.git.as_ref(), repo)
    }

    /// Apply the action for the current state once and classify again.
    pub fn step(&self, repo: &Repository) -> Result<Step, SyncError> {
        let from = self.classify(repo)?;
        let action = executor::apply(self.git.as_ref(), repo, from)?;
        let to = self.classify(repo)?;
        Ok(Step { from, action, to })
    }

    /// Repeat actions until `repo` is in sync.
    ///
    /// Stops with [`SyncError::Convergence`] as soon as an action leaves the
    /// state unchanged. The worst expected path, a merge conflict, still moves
    /// every step: `OutOfSync → Dirty → Ahead → Sync`.
    pub fn converge(&self, repo: &Repository) -> Result<ConvergeReport, SyncError> {
        let started = Instant::now();
        let mut state = self.classify(repo)?;
        tracing::info!(repo = %repo, state = %state, "starting state");

        let mut states = vec![state];
        let mut actions = Vec::new();

        while state != SyncState::Sync {
            if let Some(action) = executor::apply(self.git.as_ref(), repo, state)? {
                actions.push(action);
            }

            let next = self.classify(repo)?;
            tracing::info!(repo = %repo, state = %next, "next state");
            if next == state {
                return Err(SyncError::Convergence {
                    repo: repo.clone(),
                    state,
                });
            }
            states.push(next);
            state = next;
        }

        Ok(ConvergeReport {
            repo: repo.clone(),
            states,
            actions,
            duration_ms: started.elapsed().as_millis(),
        })
    }
}
