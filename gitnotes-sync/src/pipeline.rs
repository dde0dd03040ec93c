//! One-shot convergence over the configured repositories, used by
//! `git-notes sync`.

use std::path::{Path, PathBuf};

use gitnotes_core::Repository;

use crate::{ConvergeReport, Reconciler, SyncError};

/// Scope for a sync pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncScope {
    /// Converge every configured repository.
    All,
    /// Converge only the repository at this path.
    Repository(PathBuf),
}

/// Result of converging one repository.
#[derive(Debug)]
pub struct RepoOutcome {
    pub repo: Repository,
    pub result: Result<ConvergeReport, SyncError>,
}

/// Converge each repository in `scope`, in configuration order.
///
/// A failure in one repository never stops the others.
pub fn run(reconciler: &Reconciler, repos: &[Repository], scope: &SyncScope) -> Vec<RepoOutcome> {
    repos
        .iter()
        .filter(|repo| in_scope(repo, scope))
        .map(|repo| {
            let result = reconciler.converge(repo);
            if let Err(err) = &result {
                tracing::error!(repo = %repo, error = %err, "syncing failed");
            }
            RepoOutcome {
                repo: repo.clone(),
                result,
            }
        })
        .collect()
}

fn in_scope(repo: &Repository, scope: &SyncScope) -> bool {
    match scope {
        SyncScope::All => true,
        SyncScope::Repository(path) => same_path(&repo.path, path),
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
