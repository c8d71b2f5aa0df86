use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use axum::{
    extract::State,
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use super::feed::feed;
use super::state::ServerState;
use super::{log_requests, ServerConfig};
use crate::github::GithubFetcher;
use crate::magazines::{FileType, Magazine};
use crate::resolver::IssueResolver;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn status(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
    };
    Json(stats)
}

async fn unknown_path(State(state): State<ServerState>, uri: Uri) -> Response {
    (
        StatusCode::BAD_REQUEST,
        format!(
            "Can not recognize the request path: {}\n{}",
            uri.path(),
            usage(&state.config)
        ),
    )
        .into_response()
}

/// Usage text for invalid requests.
pub(super) fn usage(config: &ServerConfig) -> String {
    let magazines = Magazine::ALL
        .iter()
        .map(|m| m.key())
        .collect::<Vec<_>>()
        .join(", ");
    let filetypes = FileType::ALL
        .iter()
        .map(|t| t.extension())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "\nThis is a tool to get the download link of English magazines from https://github.com/{}\n\
         usage:\n\
         \x20   /feed?magazine=<MAGAZINE>&date=<DATE>&filetype=<FILE_TYPE>&action=<ACTION>\n\
         \n\
         \x20   <MAGAZINE>  (required)  one of: {}\n\
         \x20   <FILE_TYPE> (required)  one of: {}\n\
         \x20   <DATE>      (optional)  issue date as YYYYMMDD; the issue published nearest\n\
         \x20                           to it is returned, defaults to the latest issue\n\
         \x20   <ACTION>    (optional)  url, redirect or download, defaults to url\n\
         \n\
         \x20   /feed?magazine=the_economist&filetype=pdf&action=url\n",
        config.repo_slug, magazines, filetypes,
    )
}

impl ServerState {
    fn new(config: ServerConfig, github: Arc<dyn GithubFetcher>, resolver: Arc<IssueResolver>) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            github,
            resolver,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

pub fn make_app(
    config: ServerConfig,
    github: Arc<dyn GithubFetcher>,
    branch_preferences: Vec<String>,
) -> Router {
    let resolver = Arc::new(IssueResolver::new(github.clone(), branch_preferences));
    let state = ServerState::new(config, github, resolver);

    Router::new()
        .route("/feed", get(feed))
        .route("/status", get(status))
        .fallback(unknown_path)
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state)
}

pub async fn run_server(
    config: ServerConfig,
    github: Arc<dyn GithubFetcher>,
    branch_preferences: Vec<String>,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, github, branch_preferences);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Ready to serve at port {}!", port);

    Ok(axum::serve(listener, app).await?)
}
