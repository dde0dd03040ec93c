//! # gitnotes-sync
//!
//! The reconciliation engine: classify a repository, apply the remediation
//! for its state, and repeat until it is in sync or stops making progress.
//!
//! Call [`Reconciler::converge`] for one repository, or [`pipeline::run`] to
//! converge every configured repository once.

pub mod error;
pub mod executor;
pub mod inspector;
pub mod pipeline;
pub mod reconciler;

pub use error::SyncError;
pub use reconciler::{ConvergeReport, Reconciler, Step};
