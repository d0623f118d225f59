//! Local checkout resolution
//!
//! Maps a checkout on disk to the project/slug pair the hosting server knows
//! it by, by reading the configured remote URL from the checkout's git
//! config. The URL's last two path segments identify the repository.

use crate::error::{Error, Result};
use crate::types::RemoteTarget;
use std::path::Path;

/// Read the configured URL for `remote` from the checkout at `path`
pub fn remote_url(path: &Path, remote: &str) -> Result<String> {
    let repo = gix::open(path)
        .map_err(|e| Error::Resolve(format!("{}: not a git checkout: {e}", path.display())))?;

    let key = format!("remote.{remote}.url");
    let config = repo.config_snapshot();
    let url = config
        .string(key.as_str())
        .ok_or_else(|| Error::Resolve(format!("{}: no {key} configured", path.display())))?;

    Ok(url.to_string())
}

/// Parse a remote URL into its `(project, slug)` pair
///
/// A trailing `.git` suffix and trailing slashes are ignored. A URL with
/// fewer than two path segments cannot identify a repository.
pub fn parse_remote_target(url: &str) -> Result<RemoteTarget> {
    let trimmed = url.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    let mut segments = trimmed.rsplit('/');
    let slug = segments.next().filter(|s| !s.is_empty());
    let project = segments.next().filter(|s| !s.is_empty());

    match (project, slug) {
        (Some(project), Some(slug)) => Ok(RemoteTarget {
            project: project.to_string(),
            slug: slug.to_string(),
        }),
        _ => Err(Error::Resolve(format!(
            "cannot extract project and repository from remote URL {url:?}"
        ))),
    }
}

/// Resolve the checkout at `path` to its remote target
pub fn resolve_target(path: &Path, remote: &str) -> Result<RemoteTarget> {
    let url = remote_url(path, remote)?;
    parse_remote_target(&url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_https_url_with_git_suffix() {
        let target = parse_remote_target("https://host/scm/PROJ/repo.git").unwrap();
        assert_eq!(target.project, "PROJ");
        assert_eq!(target.slug, "repo");
    }

    #[test]
    fn test_parse_https_url_without_git_suffix() {
        let target = parse_remote_target("https://host/scm/PROJ/repo").unwrap();
        assert_eq!(target.project, "PROJ");
        assert_eq!(target.slug, "repo");
    }

    #[test]
    fn test_parse_ssh_url() {
        let target = parse_remote_target("ssh://git@host:7999/PROJ/repo.git").unwrap();
        assert_eq!(target.project, "PROJ");
        assert_eq!(target.slug, "repo");
    }

    #[test]
    fn test_parse_strips_trailing_slashes() {
        let target = parse_remote_target("https://host/scm/PROJ/repo.git///").unwrap();
        assert_eq!(target.project, "PROJ");
        assert_eq!(target.slug, "repo");
    }

    #[test]
    fn test_parse_single_segment_fails() {
        let result = parse_remote_target("repo.git");
        match result {
            Err(Error::Resolve(msg)) => assert!(msg.contains("repo.git")),
            other => panic!("expected Resolve error, got: {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_url_fails() {
        assert!(parse_remote_target("").is_err());
    }

    /// Lay out a minimal but valid git directory with one remote configured
    fn fake_checkout(url: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let git = temp.path().join(".git");
        fs::create_dir_all(git.join("objects").join("info")).unwrap();
        fs::create_dir_all(git.join("objects").join("pack")).unwrap();
        fs::create_dir_all(git.join("refs").join("heads")).unwrap();
        fs::create_dir_all(git.join("refs").join("tags")).unwrap();
        fs::write(git.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        fs::write(
            git.join("config"),
            format!(
                "[core]\n\trepositoryformatversion = 0\n[remote \"origin\"]\n\turl = {url}\n"
            ),
        )
        .unwrap();
        temp
    }

    #[test]
    fn test_remote_url_reads_configured_remote() {
        let checkout = fake_checkout("https://host/scm/PROJ/repo.git");
        let url = remote_url(checkout.path(), "origin").unwrap();
        assert_eq!(url, "https://host/scm/PROJ/repo.git");
    }

    #[test]
    fn test_remote_url_missing_remote_fails() {
        let checkout = fake_checkout("https://host/scm/PROJ/repo.git");
        let result = remote_url(checkout.path(), "upstream");
        assert!(matches!(result, Err(Error::Resolve(_))));
    }

    #[test]
    fn test_remote_url_not_a_checkout_fails() {
        let temp = TempDir::new().unwrap();
        let result = remote_url(temp.path(), "origin");
        assert!(matches!(result, Err(Error::Resolve(_))));
    }

    #[test]
    fn test_resolve_target_end_to_end() {
        let checkout = fake_checkout("https://host/scm/PROJ/repo.git");
        let target = resolve_target(checkout.path(), "origin").unwrap();
        assert_eq!(target.to_string(), "PROJ/repo");
    }
}
