//! Polling change detection for one working tree.

use std::sync::Arc;
use std::time::Duration;

use gitnotes_core::{Repository, WatchSettings};
use gitnotes_git::Git;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::notify::{offer, pause, Delivery, Notifier};

/// Announces local changes of a repository to its supervisor.
pub trait Watcher: Send + Sync {
    /// Spawn the watch loop. It runs until `shutdown` fires or `notify`
    /// closes.
    fn watch(
        &self,
        repo: Repository,
        notify: Notifier,
        shutdown: broadcast::Receiver<()>,
    ) -> JoinHandle<()>;
}

/// Outcome of one [`GitWatcher::check`] cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Clean,
    Notified,
    /// Dirty, but a notification was already pending.
    Coalesced,
    /// Shutdown or a closed channel interrupted the cycle.
    Stopped,
}

/// [`Watcher`] that asks git whether the working tree is dirty.
///
/// Only `status --porcelain` is run; remote state is left to the scheduler.
#[derive(Clone)]
pub struct GitWatcher {
    git: Arc<dyn Git>,
    check_interval: Duration,
    delay_before_event: Duration,
    delay_after_event: Duration,
}

impl GitWatcher {
    pub fn new(git: Arc<dyn Git>, settings: &WatchSettings) -> Self {
        Self {
            git,
            check_interval: settings.check_interval(),
            delay_before_event: settings.delay_before_event(),
            delay_after_event: settings.delay_after_event(),
        }
    }

    /// One cycle: dirty check, then debounce, notify and cool down.
    pub async fn check(
        &self,
        repo: &Repository,
        notify: &Notifier,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> Check {
        let dirty = tokio::select! {
            _ = shutdown.recv() => return Check::Stopped,
            dirty = self.is_dirty(repo) => dirty,
        };
        if !dirty {
            return Check::Clean;
        }

        tracing::info!(repo = %repo, "changes detected");
        if !pause(self.delay_before_event, shutdown).await {
            return Check::Stopped;
        }
        let outcome = match offer(notify, repo, "watcher") {
            Delivery::Sent => Check::Notified,
            Delivery::Coalesced => Check::Coalesced,
            Delivery::Closed => return Check::Stopped,
        };
        if !pause(self.delay_after_event, shutdown).await {
            return Check::Stopped;
        }
        outcome
    }

    async fn is_dirty(&self, repo: &Repository) -> bool {
        let git = self.git.clone();
        let target = repo.clone();
        match tokio::task::spawn_blocking(move || git.is_dirty(&target)).await {
            Ok(Ok(dirty)) => dirty,
            Ok(Err(err)) => {
                tracing::warn!(repo = %repo, error = %err, "dirty check failed");
                false
            }
            Err(err) => {
                tracing::warn!(repo = %repo, error = %err, "dirty check task failed");
                false
            }
        }
    }
}

impl Watcher for GitWatcher {
    fn watch(
        &self,
        repo: Repository,
        notify: Notifier,
        mut shutdown: broadcast::Receiver<()>,
    ) -> JoinHandle<()> {
        let watcher = self.clone();
        tokio::spawn(async move {
            tracing::debug!(repo = %repo, interval = ?watcher.check_interval, "watching working tree");
            loop {
                if !pause(watcher.check_interval, &mut shutdown).await {
                    break;
                }
                if watcher.check(&repo, &notify, &mut shutdown).await == Check::Stopped {
                    break;
                }
            }
            tracing::debug!(repo = %repo, "watcher stopped");
        })
    }
}
