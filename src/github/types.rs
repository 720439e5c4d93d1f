//! GitHub API type definitions

use serde::{Deserialize, Serialize};

/// `owner/repo` pair every repository-scoped endpoint is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into().trim().to_string(),
            repo: repo.into().trim().to_string(),
        }
    }

    /// API path prefix, e.g. `/repos/acme/demo`
    pub fn api_path(&self) -> String {
        format!(
            "/repos/{}/{}",
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.repo)
        )
    }
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Authenticated user (`GET /user`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
}

/// Repository metadata (`GET /repos/{owner}/{repo}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub full_name: Option<String>,
    /// Missing on some minimal responses; callers fall back to `main`.
    pub default_branch: Option<String>,
    #[serde(default)]
    pub private: bool,
}

/// A git reference (`GET .../git/ref/heads/{branch}`, `POST .../git/refs`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitRef {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub object: GitObject,
}

/// Object a reference points at
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitObject {
    pub sha: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Body for `POST .../git/refs`
#[derive(Debug, Clone, Serialize)]
pub struct CreateRefRequest {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub sha: String,
}

/// Existing content at a path (`GET .../contents/{path}?ref=...`).
///
/// Only the blob SHA matters here; it is the optimistic-concurrency token
/// required to overwrite the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentInfo {
    pub sha: Option<String>,
    pub path: Option<String>,
}

/// Body for `PUT .../contents/{path}`
#[derive(Debug, Clone, Serialize)]
pub struct PutContentRequest {
    pub message: String,
    /// Base64 of the raw file bytes
    pub content: String,
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

/// Response of `PUT .../contents/{path}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PutContentResponse {
    pub content: Option<ContentInfo>,
    pub commit: Option<CommitInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    pub sha: String,
}

/// The branch files get committed onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchTarget {
    pub name: String,
    /// Head commit of the base branch when the target was created from it.
    pub base_sha: Option<String>,
}

impl BranchTarget {
    pub fn existing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_sha: None,
        }
    }
}
