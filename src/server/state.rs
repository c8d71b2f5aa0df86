use axum::extract::FromRef;
use std::sync::Arc;
use std::time::Instant;

use crate::github::GithubFetcher;
use crate::resolver::IssueResolver;

use super::ServerConfig;

pub type GuardedFetcher = Arc<dyn GithubFetcher>;
pub type GuardedResolver = Arc<IssueResolver>;

/// Immutable per-process state shared by every request handler.
#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub github: GuardedFetcher,
    pub resolver: GuardedResolver,
    pub hash: String,
}

impl FromRef<ServerState> for GuardedFetcher {
    fn from_ref(input: &ServerState) -> Self {
        input.github.clone()
    }
}

impl FromRef<ServerState> for GuardedResolver {
    fn from_ref(input: &ServerState) -> Self {
        input.resolver.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
