//! Bulk-approve and merge matching pull requests across cloned repositories.
//!
//! `pr-sweep` scans a set of local git checkouts, resolves each one to the
//! project/repository pair the hosting server knows it by, finds open pull
//! requests whose title matches exactly, approves them under a configured
//! identity, and optionally merges them. Repositories are swept concurrently
//! by a bounded worker pool; one repository's failure never aborts the rest.

pub mod api;
pub mod batch;
pub mod config;
pub mod error;
pub mod repo;
pub mod types;
