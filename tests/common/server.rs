//! Test server lifecycle management
//!
//! Spawns the real application on a random port, wired to a stub GitHub
//! host. The server shuts down when the handle is dropped.

use newsstand_server::github::GithubClient;
use newsstand_server::server::server::make_app;
use newsstand_server::server::{RequestsLoggingLevel, ServerConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    _shutdown_tx: oneshot::Sender<()>,
}

impl TestServer {
    pub async fn spawn(github_api_url: &str) -> TestServer {
        let github = Arc::new(GithubClient::new(
            github_api_url.to_string(),
            "stub-owner".to_string(),
            "stub-repo".to_string(),
            "newsstand-server-tests",
            5,
        ));
        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port: 0,
            repo_slug: "stub-owner/stub-repo".to_string(),
        };
        let app = make_app(
            config,
            github,
            vec!["master".to_string(), "main".to_string()],
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        TestServer {
            base_url: format!("http://{}", addr),
            _shutdown_tx: shutdown_tx,
        }
    }
}
