//! Sweep command - approve and optionally merge across all checkouts

use crate::cli::style::{Stylize, bar_style, check, cross, link};
use anstream::println;
use dialoguer::Confirm;
use indicatif::ProgressBar;
use pr_sweep::api::BitbucketService;
use pr_sweep::batch::{SweepOptions, run_bounded, sweep_repo};
use pr_sweep::config::load_config;
use pr_sweep::error::{Error, Result};
use pr_sweep::types::{MergeGate, RepoOutcome, StepStatus};
use std::path::PathBuf;
use std::sync::Arc;

/// Options for the sweep run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Exact pull request title to act on
    pub title: String,
    /// Merge each approved pull request as well
    pub merge: bool,
    /// Attempt the merge even when the approve call failed
    pub merge_unapproved: bool,
    /// Explicit checkouts overriding the configured clones directory
    pub repos: Vec<PathBuf>,
    /// Config file override
    pub config_path: Option<PathBuf>,
    /// Worker pool size override
    pub jobs: Option<usize>,
    /// Remote name override
    pub remote: Option<String>,
    /// List and match only; perform no state-changing calls
    pub dry_run: bool,
    /// Preview the plan and prompt before executing
    pub confirm: bool,
}

/// Aggregate numbers for the final report and exit status
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepSummary {
    /// Repositories attempted
    pub repos: usize,
    /// Pull requests matched across all repositories
    pub matched: usize,
    /// Approve calls that succeeded
    pub approved: usize,
    /// Merge calls that succeeded
    pub merged: usize,
    /// Repositories with at least one failure
    pub failed_repos: usize,
}

impl SweepSummary {
    /// Whether every attempted repository completed without failure
    #[must_use]
    pub const fn all_ok(&self) -> bool {
        self.failed_repos == 0
    }
}

/// Run the sweep command
pub async fn run_sweep(options: RunOptions) -> Result<SweepSummary> {
    let config = load_config(options.config_path.as_deref())?;

    let repos = if options.repos.is_empty() {
        config.cloned_repos()?
    } else {
        options.repos.clone()
    };

    if repos.is_empty() {
        println!("{}", "No repositories to sweep.".muted());
        return Ok(SweepSummary::default());
    }

    let jobs = options.jobs.unwrap_or(config.jobs);
    let remote = options
        .remote
        .clone()
        .unwrap_or_else(|| config.remote.clone());

    let api = Arc::new(BitbucketService::new(
        &config.base_url,
        config.auth_header()?,
        config.username.clone(),
        config.timeout(),
    )?);

    let sweep_options = Arc::new(SweepOptions {
        title: options.title.clone(),
        merge: options.merge,
        gate: if options.merge_unapproved {
            MergeGate::BestEffort
        } else {
            MergeGate::RequireApproval
        },
        remote,
        dry_run: options.dry_run,
    });

    if options.confirm && !options.dry_run {
        print_preview(&repos, &sweep_options);
        if !Confirm::new()
            .with_prompt("Proceed?")
            .default(true)
            .interact()
            .map_err(|e| Error::Internal(format!("failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(SweepSummary::default());
        }
        println!();
    }

    println!(
        "{} {} {}",
        "Sweeping".emphasis(),
        format!("{} repositories for", repos.len()).muted(),
        format!("\"{}\"", sweep_options.title).accent()
    );

    #[allow(clippy::cast_possible_truncation)]
    let bar = ProgressBar::new(repos.len() as u64);
    bar.set_style(bar_style());

    let outcomes = run_bounded(jobs, repos, |repo| {
        let api = Arc::clone(&api);
        let sweep_options = Arc::clone(&sweep_options);
        let bar = bar.clone();
        async move {
            let outcome = sweep_repo(&repo, api.as_ref(), &sweep_options).await;
            bar.inc(1);
            outcome
        }
    })
    .await;

    bar.finish_and_clear();

    Ok(report(&outcomes, options.dry_run))
}

/// Print per-repository results and compute the aggregate summary
fn report(outcomes: &[RepoOutcome], dry_run: bool) -> SweepSummary {
    let mut summary = SweepSummary {
        repos: outcomes.len(),
        ..Default::default()
    };

    for outcome in outcomes {
        summary.matched += outcome.requests.len();
        summary.approved += outcome.approved();
        summary.merged += outcome.merged();
        if !outcome.is_success() {
            summary.failed_repos += 1;
        }
        print_outcome(outcome);
    }

    println!();
    if dry_run {
        println!(
            "{} {} matching pull request(s) across {} repositories",
            "Dry run:".emphasis(),
            summary.matched.accent(),
            summary.repos.accent()
        );
    } else {
        println!(
            "{} {} approved, {} merged ({} matched across {} repositories)",
            format!("{} Sweep complete:", check()).success(),
            summary.approved.accent(),
            summary.merged.accent(),
            summary.matched,
            summary.repos
        );
        if summary.failed_repos > 0 {
            println!(
                "{}",
                format!("{} {} repositories had failures", cross(), summary.failed_repos).warn()
            );
        }
    }

    summary
}

/// Print one repository's results
fn print_outcome(outcome: &RepoOutcome) {
    if let Some(ref error) = outcome.error {
        println!("{} {}", cross(), outcome.repo.emphasis());
        println!("    {}", error.warn());
        return;
    }

    if outcome.requests.is_empty() {
        println!(
            "{} {} {}",
            "·".muted(),
            outcome.repo.muted(),
            "no matching pull requests".muted()
        );
        return;
    }

    let glyph = if outcome.is_success() { check() } else { cross() };
    println!("{glyph} {}", outcome.repo.emphasis());
    for request in &outcome.requests {
        let label = format!("#{} {}", request.id, request.title);
        let label = request
            .url
            .as_deref()
            .map_or_else(|| label.clone(), |url| link(&label, url));
        println!("    {label}");
        print_step("approve", &request.approve);
        print_step("merge", &request.merge);
    }
}

/// Print the status line for one remote action
fn print_step(name: &str, status: &StepStatus) {
    match status {
        StepStatus::Done => println!("      {} {name}", check()),
        StepStatus::Failed(reason) => println!("      {} {name}: {}", cross(), reason.warn()),
        StepStatus::Skipped => println!("      {} {name} skipped", "-".muted()),
    }
}

/// Print the plan for --confirm
fn print_preview(repos: &[PathBuf], options: &SweepOptions) {
    println!("{}:", "Sweep plan".emphasis());
    println!("  Title: {}", options.title.accent());
    println!(
        "  Action: {}",
        if options.merge {
            "approve + merge"
        } else {
            "approve"
        }
        .accent()
    );
    if options.merge {
        println!("  Merge gate: {}", options.gate.accent());
    }
    println!("  Repositories: {}", repos.len().accent());
    for repo in repos {
        println!("    {} {}", "·".muted(), repo.display());
    }
    println!();
}
