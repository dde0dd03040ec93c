//! Process entry points: wire the adapters, supervise every repository and
//! wait for shutdown.

use std::sync::Arc;
use std::time::Duration;

use gitnotes_core::{Config, Repository};
use gitnotes_git::{Git, GitCli};
use gitnotes_sync::Reconciler;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::error::DaemonError;
use crate::supervisor::{Monitor, RepoSupervisor};
use crate::watcher::{GitWatcher, Watcher};

/// How long blocking git calls may keep the runtime alive after shutdown.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Supervise every configured repository and block the current thread until
/// Ctrl-C.
pub fn start_blocking(config: &Config) -> Result<(), DaemonError> {
    init_tracing();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(DaemonError::Runtime)?;

    let git: Arc<dyn Git> = Arc::new(GitCli::new());
    let watcher = Arc::new(GitWatcher::new(git.clone(), &config.watch));
    let monitor = Arc::new(RepoSupervisor::new(config.watch.schedule_interval()));
    let (shutdown, _) = broadcast::channel::<()>(16);

    let result = runtime.block_on(run(config.repos.clone(), git, watcher, monitor, shutdown));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

/// Start one monitor per repository and wait for shutdown.
///
/// Shutdown is either a message on `shutdown` or Ctrl-C, which is then
/// broadcast to every monitor. Returns once all monitors have stopped.
pub async fn run(
    repos: Vec<Repository>,
    git: Arc<dyn Git>,
    watcher: Arc<dyn Watcher>,
    monitor: Arc<dyn Monitor>,
    shutdown: broadcast::Sender<()>,
) -> Result<(), DaemonError> {
    let mut shutdown_rx = shutdown.subscribe();
    let reconciler = Reconciler::new(git);

    if repos.is_empty() {
        tracing::warn!("no repositories configured");
    }
    let handles: Vec<(String, JoinHandle<()>)> = repos
        .into_iter()
        .map(|repo| {
            let label = repo.to_string();
            let handle = monitor.start_monitoring(
                repo,
                watcher.clone(),
                reconciler.clone(),
                shutdown.clone(),
            );
            (label, handle)
        })
        .collect();

    tokio::select! {
        _ = shutdown_rx.recv() => {}
        signal = tokio::signal::ctrl_c() => {
            signal.map_err(DaemonError::Signal)?;
            tracing::info!("received ctrl-c, shutting down");
            let _ = shutdown.send(());
        }
    }

    let mut first_failure = None;
    for (label, handle) in handles {
        if let Err(err) = handle_join(&label, handle.await) {
            tracing::error!(error = %err, "monitor stopped abnormally");
            first_failure.get_or_insert(err);
        }
    }
    first_failure.map_or(Ok(()), Err)
}

fn handle_join(task: &str, result: Result<(), tokio::task::JoinError>) -> Result<(), DaemonError> {
    result.map_err(|source| DaemonError::Join {
        task: task.to_string(),
        source,
    })
}

/// Install the `fmt` subscriber on stderr, filtered by `RUST_LOG` (default
/// `info`). Later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
