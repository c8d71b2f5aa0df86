//! HTTP client for the GitHub REST API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use super::models::{BranchRef, RepoContent, RepoTree};

/// Read-only repository operations the feed pipeline depends on.
///
/// The production implementation is [`GithubClient`]; tests substitute an
/// in-memory fake.
#[async_trait]
pub trait GithubFetcher: Send + Sync {
    /// List every branch of the configured repository.
    async fn list_branches(&self) -> Result<Vec<BranchRef>>;

    /// Fetch the complete recursive file listing for a branch.
    async fn get_tree(&self, branch: &str) -> Result<RepoTree>;

    /// Fetch content metadata (including the download URL) for one path.
    async fn get_content(&self, path: &str) -> Result<RepoContent>;

    /// Fetch raw bytes from a download URL.
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// Unauthenticated `reqwest` client scoped to a single owner/repo pair.
pub struct GithubClient {
    client: reqwest::Client,
    api_base_url: String,
    owner: String,
    repo: String,
}

impl GithubClient {
    /// Create a new GitHub client.
    ///
    /// # Arguments
    /// * `api_base_url` - Base URL of the REST API (e.g., "https://api.github.com")
    /// * `owner` / `repo` - The repository to read from
    /// * `user_agent` - Sent on every request; GitHub rejects requests without one
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(
        api_base_url: String,
        owner: String,
        repo: String,
        user_agent: &str,
        timeout_sec: u64,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        // Ensure api_base_url doesn't have trailing slash
        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        Self {
            client,
            api_base_url,
            owner,
            repo,
        }
    }

    fn repo_url(&self, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base_url, self.owner, self.repo, tail
        )
    }

    /// Get the base URL of the REST API.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

#[async_trait]
impl GithubFetcher for GithubClient {
    async fn list_branches(&self) -> Result<Vec<BranchRef>> {
        let url = self.repo_url("branches");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to list branches")?;

        if !response.status().is_success() {
            anyhow::bail!("Branch listing failed with status: {}", response.status());
        }

        response
            .json()
            .await
            .context("Failed to parse branch listing response")
    }

    async fn get_tree(&self, branch: &str) -> Result<RepoTree> {
        let url = format!("{}?recursive=1", self.repo_url(&format!("git/trees/{}", branch)));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch tree for branch {}", branch))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Tree fetch for branch {} failed with status: {}",
                branch,
                response.status()
            );
        }

        response
            .json()
            .await
            .context("Failed to parse tree response")
    }

    async fn get_content(&self, path: &str) -> Result<RepoContent> {
        let url = self.repo_url(&format!("contents/{}", path));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch content for {}", path))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Content fetch for {} failed with status: {}",
                path,
                response.status()
            );
        }

        response
            .json()
            .await
            .context("Failed to parse content response")
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to connect for download")?;

        if !response.status().is_success() {
            anyhow::bail!("Download failed with status: {}", response.status());
        }

        let bytes = response
            .bytes()
            .await
            .context("Failed to read download body")?;

        Ok(bytes.to_vec())
    }
}
