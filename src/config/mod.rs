mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};

use crate::server::RequestsLoggingLevel;

pub const DEFAULT_OWNER: &str = "hehonghui";
pub const DEFAULT_REPO: &str = "awesome-english-ebooks";

/// CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub repo_owner: String,
    pub repo_name: String,
    pub github_api_url: String,
    pub github_timeout_sec: u64,
    pub branch_preferences: Vec<String>,
    pub user_agent: String,
}

/// Resolved application configuration; constructed once at startup and
/// passed explicitly to the components that need it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub repo_owner: String,
    pub repo_name: String,
    pub github_api_url: String,
    pub github_timeout_sec: u64,
    pub branch_preferences: Vec<String>,
    pub user_agent: String,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file
    /// config. TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let repo_owner = file.repo_owner.unwrap_or_else(|| cli.repo_owner.clone());
        let repo_name = file.repo_name.unwrap_or_else(|| cli.repo_name.clone());
        if repo_owner.is_empty() || repo_name.is_empty() {
            bail!("repo_owner and repo_name must not be empty");
        }

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        Ok(AppConfig {
            port: file.port.unwrap_or(cli.port),
            logging_level,
            repo_owner,
            repo_name,
            github_api_url: file
                .github_api_url
                .unwrap_or_else(|| cli.github_api_url.clone()),
            github_timeout_sec: file.github_timeout_sec.unwrap_or(cli.github_timeout_sec),
            branch_preferences: file
                .branch_preferences
                .unwrap_or_else(|| cli.branch_preferences.clone()),
            user_agent: file.user_agent.unwrap_or_else(|| cli.user_agent.clone()),
        })
    }

    pub fn repo_slug(&self) -> String {
        format!("{}/{}", self.repo_owner, self.repo_name)
    }
}

fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    clap::ValueEnum::from_str(s, true).ok()
}
