//! In-process stand-in for the GitHub REST API.
//!
//! Serves the branch-listing, git-trees and contents endpoints plus a raw
//! download route, backed by a fixture repository. Counts every request so
//! tests can assert that a code path made no outbound calls at all.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use base64::Engine;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Fixture repository served by the stub.
pub struct StubRepo {
    pub branches: Vec<String>,
    /// Branch the tree listing exists for; any other branch yields 404.
    pub tree_branch: String,
    pub tree_paths: Vec<String>,
    pub truncated: bool,
    /// Bytes of every file in the repository.
    pub file_bytes: Vec<u8>,
    /// Embed the file bytes as base64 in contents responses.
    pub inline_content: bool,
    /// Respond 500 to every request.
    pub broken: bool,
}

impl Default for StubRepo {
    fn default() -> Self {
        StubRepo {
            branches: vec!["master".to_string()],
            tree_branch: "master".to_string(),
            tree_paths: Vec::new(),
            truncated: false,
            file_bytes: b"not really a pdf".to_vec(),
            inline_content: false,
            broken: false,
        }
    }
}

#[derive(Clone)]
struct StubState {
    repo: Arc<StubRepo>,
    base_url: String,
    hits: Arc<AtomicUsize>,
}

impl StubState {
    fn record(&self) -> Option<Response> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        if self.repo.broken {
            Some(StatusCode::INTERNAL_SERVER_ERROR.into_response())
        } else {
            None
        }
    }
}

/// A running stub server. Shuts down when dropped.
pub struct GithubStub {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    _shutdown_tx: oneshot::Sender<()>,
}

impl GithubStub {
    pub async fn spawn(repo: StubRepo) -> GithubStub {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);
        let hits = Arc::new(AtomicUsize::new(0));

        let state = StubState {
            repo: Arc::new(repo),
            base_url: base_url.clone(),
            hits: hits.clone(),
        };
        let app = Router::new()
            .route("/repos/{owner}/{repo}/branches", get(branches))
            .route("/repos/{owner}/{repo}/git/trees/{branch}", get(tree))
            .route("/repos/{owner}/{repo}/contents/{*path}", get(contents))
            .route("/raw/{*path}", get(raw))
            .with_state(state);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        GithubStub {
            base_url,
            hits,
            _shutdown_tx: shutdown_tx,
        }
    }

    /// Number of requests the stub has served so far.
    pub fn request_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn branches(State(state): State<StubState>) -> Response {
    if let Some(error) = state.record() {
        return error;
    }
    let body: Vec<Value> = state
        .repo
        .branches
        .iter()
        .map(|name| json!({ "name": name }))
        .collect();
    Json(body).into_response()
}

async fn tree(
    State(state): State<StubState>,
    Path((_owner, _repo, branch)): Path<(String, String, String)>,
) -> Response {
    if let Some(error) = state.record() {
        return error;
    }
    if branch != state.repo.tree_branch {
        return StatusCode::NOT_FOUND.into_response();
    }

    let entries: Vec<Value> = state
        .repo
        .tree_paths
        .iter()
        .map(|path| {
            json!({
                "path": path,
                "mode": "100644",
                "type": "blob",
                "sha": "0000000000000000000000000000000000000000",
                "size": state.repo.file_bytes.len(),
            })
        })
        .collect();
    Json(json!({
        "sha": "stub",
        "tree": entries,
        "truncated": state.repo.truncated,
    }))
    .into_response()
}

async fn contents(
    State(state): State<StubState>,
    Path((_owner, _repo, path)): Path<(String, String, String)>,
) -> Response {
    if let Some(error) = state.record() {
        return error;
    }
    if !state.repo.tree_paths.contains(&path) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let name = path.rsplit('/').next().unwrap_or(path.as_str());
    let mut body = json!({
        "type": "file",
        "name": name,
        "path": path,
        "size": state.repo.file_bytes.len(),
        "download_url": format!("{}/raw/{}", state.base_url, path),
    });
    if state.repo.inline_content {
        // Wrapped in newlines, like the real contents API
        let encoded = base64::engine::general_purpose::STANDARD.encode(&state.repo.file_bytes);
        body["content"] = json!(format!("{}\n", encoded));
        body["encoding"] = json!("base64");
    }
    Json(body).into_response()
}

async fn raw(
    State(state): State<StubState>,
    Path(_path): Path<String>,
) -> Response {
    if let Some(error) = state.record() {
        return error;
    }
    state.repo.file_bytes.clone().into_response()
}
