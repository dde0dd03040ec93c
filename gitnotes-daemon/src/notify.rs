//! The per-repository notification channel shared by the producers
//! (watcher, scheduler) and the supervisor.

use std::time::Duration;

use gitnotes_core::Repository;
use tokio::sync::{broadcast, mpsc};

/// Pending notifications per repository. One is enough: any number of
/// requests made while a convergence is queued collapse into that one.
pub const NOTIFY_CAPACITY: usize = 1;

pub type Notifier = mpsc::Sender<Repository>;
pub type NotifyReceiver = mpsc::Receiver<Repository>;

pub fn channel() -> (Notifier, NotifyReceiver) {
    mpsc::channel(NOTIFY_CAPACITY)
}

/// What happened to one offered notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// A notification was already pending, so this one was dropped.
    Coalesced,
    /// The supervisor is gone.
    Closed,
}

/// Offer `repo` to the supervisor without waiting for room.
pub fn offer(notify: &Notifier, repo: &Repository, source: &'static str) -> Delivery {
    match notify.try_send(repo.clone()) {
        Ok(()) => {
            tracing::debug!(repo = %repo, source, "notification sent");
            Delivery::Sent
        }
        Err(mpsc::error::TrySendError::Full(_)) => {
            tracing::debug!(repo = %repo, source, "notification coalesced");
            Delivery::Coalesced
        }
        Err(mpsc::error::TrySendError::Closed(_)) => Delivery::Closed,
    }
}

/// Sleep for `duration` unless shutdown arrives first.
///
/// Returns `false` on shutdown. A closed or lagged shutdown channel counts
/// as shutdown.
pub(crate) async fn pause(duration: Duration, shutdown: &mut broadcast::Receiver<()>) -> bool {
    tokio::select! {
        _ = shutdown.recv() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> Repository {
        Repository::new("/notes", "master")
    }

    #[tokio::test]
    async fn second_offer_is_coalesced_until_consumed() {
        let (tx, mut rx) = channel();
        assert_eq!(offer(&tx, &repo(), "test"), Delivery::Sent);
        assert_eq!(offer(&tx, &repo(), "test"), Delivery::Coalesced);

        assert_eq!(rx.recv().await, Some(repo()));
        assert_eq!(offer(&tx, &repo(), "test"), Delivery::Sent);
    }

    #[tokio::test]
    async fn offer_to_dropped_receiver_is_closed() {
        let (tx, rx) = channel();
        drop(rx);
        assert_eq!(offer(&tx, &repo(), "test"), Delivery::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_returns_false_on_shutdown() {
        let (shutdown_tx, mut shutdown_rx) = broadcast::channel(1);
        shutdown_tx.send(()).expect("send shutdown");
        assert!(!pause(Duration::from_secs(3600), &mut shutdown_rx).await);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_completes_without_shutdown() {
        let (_shutdown_tx, mut shutdown_rx) = broadcast::channel::<()>(1);
        assert!(pause(Duration::from_secs(5), &mut shutdown_rx).await);
    }
}
