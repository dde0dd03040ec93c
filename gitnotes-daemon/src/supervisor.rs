//! Per-repository supervision: converge once, then converge again for every
//! notification from the watcher or the scheduler.

use std::sync::Arc;
use std::time::Duration;

use gitnotes_core::Repository;
use gitnotes_sync::Reconciler;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::notify;
use crate::scheduler::schedule_recurring;
use crate::watcher::Watcher;

/// Keeps one repository in sync until shutdown.
pub trait Monitor: Send + Sync {
    fn start_monitoring(
        &self,
        repo: Repository,
        watcher: Arc<dyn Watcher>,
        reconciler: Reconciler,
        shutdown: broadcast::Sender<()>,
    ) -> JoinHandle<()>;
}

#[derive(Debug, Clone, Copy)]
pub struct RepoSupervisor {
    schedule_interval: Duration,
}

impl RepoSupervisor {
    pub fn new(schedule_interval: Duration) -> Self {
        Self { schedule_interval }
    }
}

impl Monitor for RepoSupervisor {
    fn start_monitoring(
        &self,
        repo: Repository,
        watcher: Arc<dyn Watcher>,
        reconciler: Reconciler,
        shutdown: broadcast::Sender<()>,
    ) -> JoinHandle<()> {
        let interval = self.schedule_interval;
        // Subscribe before spawning so a shutdown sent right after this call
        // reaches every task.
        let mut shutdown_rx = shutdown.subscribe();
        let scheduler_shutdown = shutdown.subscribe();
        let watcher_shutdown = shutdown.subscribe();

        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown_rx.recv() => return,
                _ = converge(&reconciler, &repo) => {}
            }

            let (notify_tx, mut notify_rx) = notify::channel();
            let scheduler = schedule_recurring(
                repo.clone(),
                notify_tx.clone(),
                interval,
                scheduler_shutdown,
            );
            let watching = watcher.watch(repo.clone(), notify_tx, watcher_shutdown);
            tracing::info!(repo = %repo, "git-notes is monitoring");

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    next = notify_rx.recv() => {
                        let Some(target) = next else { break };
                        tokio::select! {
                            _ = shutdown_rx.recv() => break,
                            _ = converge(&reconciler, &target) => {}
                        }
                    }
                }
            }

            drop(notify_rx);
            for (task, handle) in [("scheduler", scheduler), ("watcher", watching)] {
                if let Err(err) = handle.await {
                    tracing::warn!(repo = %repo, task, error = %err, "producer join failure");
                }
            }
            tracing::info!(repo = %repo, "stopped monitoring");
        })
    }
}

/// Converge `repo` off the async runtime. Failures are logged, never raised.
async fn converge(reconciler: &Reconciler, repo: &Repository) {
    let reconciler = reconciler.clone();
    let target = repo.clone();
    match tokio::task::spawn_blocking(move || reconciler.converge(&target)).await {
        Ok(Ok(report)) => tracing::info!(
            repo = %repo,
            actions = report.actions.len(),
            duration_ms = report.duration_ms as u64,
            "repository in sync",
        ),
        Ok(Err(err)) => tracing::error!(repo = %repo, error = %err, "syncing failed"),
        Err(err) => tracing::error!(repo = %repo, error = %err, "sync task join failure"),
    }
}
