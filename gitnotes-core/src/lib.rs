//! git-notes core library: domain types, configuration loading, errors.
//!
//! - [`types`]: repository identity, sync states and remote comparison
//! - [`config`]: repository list and watch timings
//! - [`error`]: [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, WatchSettings, DEFAULT_BRANCH};
pub use error::ConfigError;
pub use types::{Action, BranchName, RemoteComparison, Repository, SyncState};
