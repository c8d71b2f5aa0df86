//! Models for the GitHub REST API responses the feed pipeline consumes.
//!
//! These types match the JSON shapes of the branches, git-trees and
//! repository-contents endpoints. Fields the pipeline never reads are left
//! out; serde ignores them on deserialization.

use serde::Deserialize;

/// One entry of `GET /repos/{owner}/{repo}/branches`.
#[derive(Clone, Debug, Deserialize)]
pub struct BranchRef {
    pub name: String,
}

/// Recursive git tree listing for one branch.
#[derive(Clone, Debug, Deserialize)]
pub struct RepoTree {
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
    /// Set by the host when the listing was too large to return in full.
    /// The pipeline surfaces this but never follows up with more requests.
    #[serde(default)]
    pub truncated: bool,
}

/// One row of the recursive tree listing.
#[derive(Clone, Debug, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(default)]
    pub mode: String,
    #[serde(rename = "type", default)]
    pub entry_type: String,
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// File metadata from `GET /repos/{owner}/{repo}/contents/{path}`.
#[derive(Clone, Debug, Deserialize)]
pub struct RepoContent {
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub size: u64,
    /// Base64 payload, present only for files small enough for the host to
    /// inline. Oversized files come back with an empty string and
    /// `encoding: "none"`.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
    pub download_url: String,
}

impl RepoContent {
    /// The inline base64 payload, when the host actually embedded one.
    pub fn inline_content(&self) -> Option<&str> {
        match (self.content.as_deref(), self.encoding.as_deref()) {
            (Some(content), Some("base64")) if !content.trim().is_empty() => Some(content),
            _ => None,
        }
    }
}
