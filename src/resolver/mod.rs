//! Issue resolution pipeline: branch discovery, tree listing, candidate
//! filtering and nearest-date selection.

mod issue_date;
mod matcher;

pub use issue_date::{distance_from, extract_issue_date, UNDATED_DISTANCE};
pub use matcher::IssueFilter;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::github::models::{RepoContent, TreeEntry};
use crate::github::GithubFetcher;
use crate::magazines::{FileType, Magazine};

/// Errors produced by the resolution and delivery pipeline.
///
/// Upstream-dependent variants are never retried, and a missing issue is
/// deliberately distinct from an upstream outage.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Branch discovery failed: {0}")]
    BranchDiscovery(#[source] anyhow::Error),

    #[error("Tree fetch failed for branch {branch}: {source}")]
    TreeFetch {
        branch: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("No {file_type} issue of {magazine} found in the repository")]
    NoMatchingIssue {
        magazine: Magazine,
        file_type: FileType,
    },

    #[error("Content fetch failed for {path}: {source}")]
    ContentFetch {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Upstream byte fetch failed: {0}")]
    ByteFetch(#[source] anyhow::Error),
}

/// Resolves one feed request to a concrete repository path.
///
/// Holds no per-request state; a single instance serves every request.
pub struct IssueResolver {
    github: Arc<dyn GithubFetcher>,
    branch_preferences: Vec<String>,
}

impl IssueResolver {
    pub fn new(github: Arc<dyn GithubFetcher>, branch_preferences: Vec<String>) -> Self {
        Self {
            github,
            branch_preferences,
        }
    }

    /// Pick the branch to read from: the first configured preference that
    /// exists upstream, otherwise the first branch the host returned.
    ///
    /// Upstream listing order is unspecified, so when no preference matches
    /// nothing may rely on which branch wins.
    async fn resolve_branch(&self) -> Result<String, FeedError> {
        let branches = self
            .github
            .list_branches()
            .await
            .map_err(FeedError::BranchDiscovery)?;

        if branches.is_empty() {
            return Err(FeedError::BranchDiscovery(anyhow!(
                "branch listing returned no branches"
            )));
        }

        if let Some(preferred) = self
            .branch_preferences
            .iter()
            .find(|preference| branches.iter().any(|branch| &branch.name == *preference))
        {
            return Ok(preferred.clone());
        }

        Ok(branches[0].name.clone())
    }

    /// Resolve `magazine`/`file_type` to the path of the issue dated closest
    /// to `requested`.
    ///
    /// Performs exactly one branch-listing call and one tree call; any
    /// upstream failure propagates immediately, unretried.
    pub async fn resolve(
        &self,
        magazine: Magazine,
        requested: DateTime<Utc>,
        file_type: FileType,
    ) -> Result<String, FeedError> {
        let branch = self.resolve_branch().await?;
        debug!("Resolving {} {} against branch {}", magazine, file_type, branch);

        let tree = self
            .github
            .get_tree(&branch)
            .await
            .map_err(|source| FeedError::TreeFetch {
                branch: branch.clone(),
                source,
            })?;
        if tree.truncated {
            warn!(
                "Tree listing for branch {} is truncated, matching against partial results",
                branch
            );
        }

        let filter = IssueFilter::new(magazine, file_type);
        let candidates = filter.filter(&tree.tree);
        if candidates.is_empty() {
            return Err(FeedError::NoMatchingIssue {
                magazine,
                file_type,
            });
        }

        let mut ranked: Vec<(i64, &TreeEntry)> = candidates
            .into_iter()
            .map(|entry| {
                let distance = distance_from(requested, extract_issue_date(&entry.path));
                (distance, entry)
            })
            .collect();
        // Stable sort: equidistant candidates keep their listing order.
        ranked.sort_by_key(|(distance, _)| *distance);

        let (distance, best) = &ranked[0];
        debug!("Selected {} at distance {}s", best.path, distance);
        Ok(best.path.clone())
    }

    /// Fetch content metadata for a resolved path.
    pub async fn fetch_content(&self, path: &str) -> Result<RepoContent, FeedError> {
        self.github
            .get_content(path)
            .await
            .map_err(|source| FeedError::ContentFetch {
                path: path.to_string(),
                source,
            })
    }
}
