use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use newsstand_server::config::{AppConfig, CliConfig, FileConfig, DEFAULT_OWNER, DEFAULT_REPO};
use newsstand_server::github::GithubClient;
use newsstand_server::server::{run_server, RequestsLoggingLevel, ServerConfig};

#[derive(Parser, Debug)]
struct CliArgs {
    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Owner of the GitHub repository holding the magazine files.
    #[clap(long, default_value = DEFAULT_OWNER)]
    pub repo_owner: String,

    /// Name of the GitHub repository holding the magazine files.
    #[clap(long, default_value = DEFAULT_REPO)]
    pub repo_name: String,

    /// Base URL of the GitHub REST API.
    #[clap(long, default_value = "https://api.github.com")]
    pub github_api_url: String,

    /// Timeout in seconds for GitHub requests.
    #[clap(long, default_value_t = 30)]
    pub github_timeout_sec: u64,

    /// Branch names to prefer, in order, when reading the repository.
    #[clap(
        long = "branch-preference",
        default_values_t = ["master".to_string(), "main".to_string()]
    )]
    pub branch_preferences: Vec<String>,

    /// User-Agent header sent on GitHub requests.
    #[clap(long, default_value = "newsstand-server")]
    pub user_agent: String,

    /// Path to a TOML config file; values there override CLI flags.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        port: cli_args.port,
        logging_level: cli_args.logging_level,
        repo_owner: cli_args.repo_owner,
        repo_name: cli_args.repo_name,
        github_api_url: cli_args.github_api_url,
        github_timeout_sec: cli_args.github_timeout_sec,
        branch_preferences: cli_args.branch_preferences,
        user_agent: cli_args.user_agent,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!(
        "Serving issues from https://github.com/{}",
        config.repo_slug()
    );

    let github = Arc::new(GithubClient::new(
        config.github_api_url.clone(),
        config.repo_owner.clone(),
        config.repo_name.clone(),
        &config.user_agent,
        config.github_timeout_sec,
    ));

    let server_config = ServerConfig {
        requests_logging_level: config.logging_level.clone(),
        port: config.port,
        repo_slug: config.repo_slug(),
    };

    run_server(server_config, github, config.branch_preferences.clone()).await
}
