//! Periodic reconciliation, independent of detected changes.

use std::time::Duration;

use gitnotes_core::Repository;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::notify::{offer, Delivery, Notifier};

/// Spawn a timer that offers `repo` to its supervisor every `interval`.
///
/// The first notification comes one full interval after the call. Ticks
/// missed while the runtime was busy are skipped, and a tick that finds a
/// notification already pending is coalesced into it. Stops on shutdown or
/// when the supervisor drops its receiver.
///
/// # Panics
///
/// Panics if `interval` is zero; the config loader rejects that value.
pub fn schedule_recurring(
    repo: Repository,
    notify: Notifier,
    interval: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                _ = ticker.tick() => {
                    if offer(&notify, &repo, "schedule") == Delivery::Closed {
                        break;
                    }
                }
            }
        }
        tracing::debug!(repo = %repo, "scheduler stopped");
    })
}
