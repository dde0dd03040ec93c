//! Long-running supervision: per repository, a watcher and a scheduler feed
//! a single supervisor that converges the repository on every notification.

mod error;
pub mod notify;
mod runtime;
pub mod scheduler;
pub mod supervisor;
pub mod watcher;

pub use error::DaemonError;
pub use notify::{Notifier, NotifyReceiver, NOTIFY_CAPACITY};
pub use runtime::{init_tracing, run, start_blocking};
pub use scheduler::schedule_recurring;
pub use supervisor::{Monitor, RepoSupervisor};
pub use watcher::{Check, GitWatcher, Watcher};
