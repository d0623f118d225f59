//! Batch execution
//!
//! The bounded-parallelism runner and the per-repository sweep it drives.

mod runner;
mod sweep;

pub use runner::{BatchOutcome, run_bounded};
pub use sweep::{SweepOptions, match_requests, sweep_repo, sweep_target};
