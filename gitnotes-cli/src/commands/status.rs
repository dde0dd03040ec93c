//! `git-notes status`: classify every repository without changing it.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use gitnotes_core::{Config, Repository, SyncState};
use gitnotes_sync::Reconciler;

/// Arguments for `git-notes status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self, config: &Config) -> Result<()> {
        let reconciler = super::reconciler();
        let rows: Vec<RepoStatus> = config
            .repos
            .iter()
            .map(|repo| RepoStatus::inspect(&reconciler, repo))
            .collect();

        if self.json {
            print_json(rows)
        } else {
            print_table(rows);
            Ok(())
        }
    }
}

#[derive(Debug, Serialize)]
struct RepoStatus {
    path: String,
    branch: String,
    state: SyncState,
    /// Pending remediation, if any.
    action: Option<String>,
    error: Option<String>,
}

impl RepoStatus {
    fn inspect(reconciler: &Reconciler, repo: &Repository) -> Self {
        let (state, error) = reconciler.inspect(repo);
        Self {
            path: repo.path.display().to_string(),
            branch: repo.branch.to_string(),
            state,
            action: state.action().map(|action| action.to_string()),
            error: error.map(|err| err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct StatusSummaryJson {
    repos: usize,
    in_sync: usize,
    errors: usize,
}

#[derive(Serialize)]
struct StatusReportJson {
    summary: StatusSummaryJson,
    repos: Vec<RepoStatus>,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "")]
    indicator: String,
    #[tabled(rename = "repository")]
    path: String,
    #[tabled(rename = "branch")]
    branch: String,
    #[tabled(rename = "state")]
    state: String,
    #[tabled(rename = "detail")]
    detail: String,
}

fn count(rows: &[RepoStatus], state: SyncState) -> usize {
    rows.iter().filter(|row| row.state == state).count()
}

fn print_json(rows: Vec<RepoStatus>) -> Result<()> {
    let payload = StatusReportJson {
        summary: StatusSummaryJson {
            repos: rows.len(),
            in_sync: count(&rows, SyncState::Sync),
            errors: count(&rows, SyncState::Error),
        },
        repos: rows,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_table(rows: Vec<RepoStatus>) {
    println!(
        "git-notes v{} | {} repositories | {} in sync | {} errors",
        env!("CARGO_PKG_VERSION"),
        rows.len(),
        count(&rows, SyncState::Sync),
        count(&rows, SyncState::Error),
    );
    if rows.is_empty() {
        println!("No repositories configured.");
        return;
    }

    let table_rows: Vec<StatusTableRow> = rows
        .into_iter()
        .map(|row| StatusTableRow {
            indicator: indicator(row.state),
            path: row.path,
            branch: row.branch,
            state: row.state.to_string(),
            detail: row
                .error
                .or_else(|| row.action.map(|action| format!("needs {action}")))
                .unwrap_or_else(|| "up to date".to_string()),
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn indicator(state: SyncState) -> String {
    match state {
        SyncState::Sync => "■".green().bold().to_string(),
        SyncState::Dirty => "■".yellow().bold().to_string(),
        SyncState::Ahead => "■".cyan().bold().to_string(),
        SyncState::OutOfSync => "■".magenta().bold().to_string(),
        SyncState::Error => "■".red().bold().to_string(),
    }
}
