use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML configuration. Every field overrides the matching CLI
/// value when present.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    pub port: Option<u16>,
    pub logging_level: Option<String>,
    pub repo_owner: Option<String>,
    pub repo_name: Option<String>,
    pub github_api_url: Option<String>,
    pub github_timeout_sec: Option<u64>,
    pub branch_preferences: Option<Vec<String>>,
    pub user_agent: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
