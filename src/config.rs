//! Configuration loading
//!
//! Settings live in a TOML file, by default at
//! `<user config dir>/pr-sweep/config.toml`. The API token may be kept out
//! of the file and supplied via the `PR_SWEEP_TOKEN` environment variable.

use crate::error::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable consulted when the config file has no token
pub const TOKEN_ENV_VAR: &str = "PR_SWEEP_TOKEN";

const CONFIG_DIR: &str = "pr-sweep";
const CONFIG_FILE: &str = "config.toml";

fn default_jobs() -> usize {
    8
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Tool configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Host (or URL) of the hosting server's REST API
    pub base_url: String,
    /// User slug whose approval is recorded on the server
    pub username: String,
    /// API token; falls back to [`TOKEN_ENV_VAR`] when absent
    #[serde(default)]
    pub token: Option<String>,
    /// Directory containing the managed clones
    #[serde(default)]
    pub repos_dir: Option<PathBuf>,
    /// Worker pool size
    #[serde(default = "default_jobs")]
    pub jobs: usize,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Remote whose URL identifies each checkout on the server
    #[serde(default = "default_remote")]
    pub remote: String,
}

/// Default config file location
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load configuration from `path`, or from the default location
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()
            .ok_or_else(|| Error::Config("no user config directory available".to_string()))?,
    };

    let content = fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

    Ok(config)
}

impl Config {
    /// Resolve the API token from the config file or the environment
    pub fn api_token(&self) -> Result<String> {
        if let Some(ref token) = self.token {
            return Ok(token.clone());
        }
        env::var(TOKEN_ENV_VAR).map_err(|_| {
            Error::Config(format!("no token in config and {TOKEN_ENV_VAR} is not set"))
        })
    }

    /// Basic `Authorization` header value for the configured identity
    pub fn auth_header(&self) -> Result<String> {
        let token = self.api_token()?;
        let credential = STANDARD.encode(format!("{}:{token}", self.username));
        Ok(format!("Basic {credential}"))
    }

    /// Enumerate git checkouts under `repos_dir`, sorted by path
    pub fn cloned_repos(&self) -> Result<Vec<PathBuf>> {
        let Some(ref dir) = self.repos_dir else {
            return Err(Error::Config(
                "no repos_dir configured; pass --repos or set repos_dir".to_string(),
            ));
        };

        let entries = fs::read_dir(dir)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", dir.display())))?;

        let mut repos = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| Error::Config(format!("failed to read {}: {e}", dir.display())))?;
            let path = entry.path();
            if path.is_dir() && path.join(".git").exists() {
                repos.push(path);
            }
        }
        repos.sort();
        Ok(repos)
    }

    /// Per-request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
