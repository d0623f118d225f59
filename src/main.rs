//! pr-sweep binary entry point

mod cli;

use clap::Parser;
use cli::style::Stylize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Approve (and optionally merge) matching open pull requests across many
/// cloned repositories
#[derive(Debug, Parser)]
#[command(name = "pr-sweep", version, about)]
struct Cli {
    /// Exact pull request title to act on
    #[arg(long)]
    title: String,

    /// Merge each approved pull request as well
    #[arg(long)]
    merge: bool,

    /// Attempt the merge even when the approve call failed
    #[arg(long, requires = "merge")]
    merge_unapproved: bool,

    /// Sweep these checkouts instead of the configured clones directory
    #[arg(long, num_args = 1..)]
    repos: Vec<PathBuf>,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker pool size (overrides the configured value)
    #[arg(long)]
    jobs: Option<usize>,

    /// Remote whose URL identifies each repository on the server
    #[arg(long)]
    remote: Option<String>,

    /// List and match only; perform no state-changing calls
    #[arg(long)]
    dry_run: bool,

    /// Show the plan and ask before acting
    #[arg(long)]
    confirm: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli::sweep::RunOptions {
        title: cli.title,
        merge: cli.merge,
        merge_unapproved: cli.merge_unapproved,
        repos: cli.repos,
        config_path: cli.config,
        jobs: cli.jobs,
        remote: cli.remote,
        dry_run: cli.dry_run,
        confirm: cli.confirm,
    };

    match cli::sweep::run_sweep(options).await {
        Ok(summary) if summary.all_ok() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            anstream::eprintln!("{} {e}", "error:".warn());
            ExitCode::FAILURE
        }
    }
}
