// src/config.rs
//! User configuration and the per-run execution context

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const JIRA_URL_ENV: &str = "JIRA_URL";
pub const DEFAULT_TIMEOUT_MS: u64 = 30000;

const JISC_DIR: &str = ".jisc";
const CONFIG_FILE: &str = "config.json";

/// Settings read from `~/.jisc/config.json`. Every field is optional; a
/// missing file is the same as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub jira_url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Resolved connection settings for the Jira instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

/// `~/.jisc`, home of user task sets, template overrides and the config file.
pub fn jisc_home() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Failed to determine the home directory")?;
    Ok(home.join(JISC_DIR))
}

impl GlobalConfig {
    pub fn load() -> Result<Self> {
        let path = jisc_home()?.join(CONFIG_FILE);
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GlobalConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Combine the `JIRA_URL` environment value (wins when non-empty) with the
    /// configured fallback.
    pub fn resolve_jira(&self, env_url: Option<String>) -> Result<JiraConfig> {
        let base_url = env_url
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.jira_url.clone().filter(|url| !url.trim().is_empty()))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "{} is not set. Export it (e.g. {}=https://example.atlassian.net) or add \"jira_url\" to ~/{}/{}",
                    JIRA_URL_ENV,
                    JIRA_URL_ENV,
                    JISC_DIR,
                    CONFIG_FILE
                )
            })?;

        Ok(JiraConfig {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout_ms: self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
        })
    }
}

/// Credentials and target story for one submission pass. Only the collector
/// mutates it, and only between passes.
#[derive(Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    pub username: String,
    pub password: String,
    pub story_key: String,
    pub project_key: String,
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("username", &self.username)
            .field("password", &"********")
            .field("story_key", &self.story_key)
            .field("project_key", &self.project_key)
            .finish()
    }
}

/// Suggested project key for a story key: everything before the first `-`.
pub fn derive_project_key(story_key: &str) -> String {
    story_key.split('-').next().unwrap_or_default().to_string()
}

/// Login name of the local user, offered as the default Jira username.
pub fn system_username() -> Option<String> {
    ["USER", "USERNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|name| name.trim().to_string())
        .find(|name| !name.is_empty())
}
