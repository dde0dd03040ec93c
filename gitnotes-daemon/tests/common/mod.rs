#![allow(dead_code)]

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use gitnotes_core::{RemoteComparison, Repository, WatchSettings};
use gitnotes_daemon::{Notifier, Watcher};
use gitnotes_git::{Git, GitError};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

pub fn repo() -> Repository {
    Repository::new("/notes", "main")
}

/// Fast settings for real-time tests.
pub fn quick_settings() -> WatchSettings {
    WatchSettings {
        check_interval_ms: 10,
        delay_before_event_ms: 0,
        delay_after_event_ms: 0,
        schedule_interval_secs: 3_600,
    }
}

/// Poll `condition` every 10ms, failing the test after five seconds.
pub async fn wait_until(what: &str, mut condition: impl FnMut() -> bool) {
    let polling = async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    };
    tokio::time::timeout(Duration::from_secs(5), polling)
        .await
        .unwrap_or_else(|_| panic!("timed out waiting for {what}"));
}

pub async fn finishes<T>(what: &str, task: impl Future<Output = T>) -> T {
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .unwrap_or_else(|_| panic!("{what} did not finish"))
}

/// A working copy whose upstream always accepts pushes.
#[derive(Default)]
pub struct FakeGit {
    pub dirty: AtomicBool,
    pub ahead: AtomicBool,
    pub offline: AtomicBool,
    pub broken_status: AtomicBool,
    pub dirty_checks: AtomicUsize,
    pub fetches: AtomicUsize,
    pub commits: AtomicUsize,
    pub pushes: AtomicUsize,
}

impl FakeGit {
    pub fn dirty() -> Self {
        let git = Self::default();
        git.dirty.store(true, Ordering::SeqCst);
        git
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

fn failure(command: &str, repo: &Repository) -> GitError {
    GitError::Command {
        command: command.to_string(),
        path: repo.path.clone(),
        code: Some(128),
        stderr: "fatal: simulated failure".to_string(),
    }
}

impl Git for FakeGit {
    fn is_dirty(&self, repo: &Repository) -> Result<bool, GitError> {
        self.dirty_checks.fetch_add(1, Ordering::SeqCst);
        if self.broken_status.load(Ordering::SeqCst) {
            return Err(failure("status", repo));
        }
        Ok(self.dirty.load(Ordering::SeqCst))
    }

    fn remote_comparison(&self, repo: &Repository) -> Result<RemoteComparison, GitError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(failure("fetch", repo));
        }
        Ok(RemoteComparison {
            has_upstream: true,
            ahead: self.ahead.load(Ordering::SeqCst),
            behind: false,
        })
    }

    fn stage_and_commit(&self, repo: &Repository) -> Result<(), GitError> {
        if !self.dirty.swap(false, Ordering::SeqCst) {
            return Err(failure("commit", repo));
        }
        self.ahead.store(true, Ordering::SeqCst);
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn push(&self, _repo: &Repository) -> Result<(), GitError> {
        self.ahead.store(false, Ordering::SeqCst);
        self.pushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn merge(&self, _repo: &Repository) -> Result<(), GitError> {
        Ok(())
    }
}

/// Watcher driven by the test: hands its notifier out instead of polling.
#[derive(Default)]
pub struct ManualWatcher {
    notifier: Mutex<Option<Notifier>>,
}

impl ManualWatcher {
    pub fn notifier(&self) -> Option<Notifier> {
        self.notifier.lock().expect("notifier lock").clone()
    }
}

impl Watcher for ManualWatcher {
    fn watch(
        &self,
        _repo: Repository,
        notify: Notifier,
        mut shutdown: broadcast::Receiver<()>,
    ) -> JoinHandle<()> {
        *self.notifier.lock().expect("notifier lock") = Some(notify);
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
        })
    }
}
