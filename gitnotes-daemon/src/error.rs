use thiserror::Error;

/// Error surface for the supervision runtime.
///
/// Per-repository sync failures never reach this type; they are logged and
/// swallowed by the supervisor.
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("failed to build tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("ctrl-c handler failed: {0}")]
    Signal(#[source] std::io::Error),

    #[error("{task} task join failure: {source}")]
    Join {
        task: String,
        #[source]
        source: tokio::task::JoinError,
    },
}
