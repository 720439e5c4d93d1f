//! Branch resolution: find the default branch and create upload branches

use crate::di::traits::GitHubApi;
use crate::github::client::FALLBACK_BRANCH;
use crate::github::types::{BranchTarget, RepoId};
use tracing::{info, warn};
use ziplift_core::GitHubError;

/// Whether [`BranchResolver::ensure_branch`] made a new ref
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchStatus {
    Created,
    /// The ref already existed and is reused as-is
    Reused,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchResolution {
    pub target: BranchTarget,
    pub status: BranchStatus,
}

/// Resolves the branch files are committed onto
pub struct BranchResolver<'a> {
    api: &'a dyn GitHubApi,
    repo: &'a RepoId,
}

impl<'a> BranchResolver<'a> {
    pub fn new(api: &'a dyn GitHubApi, repo: &'a RepoId) -> Self {
        Self { api, repo }
    }

    /// The repository's default branch, or `main` when the metadata has none
    pub async fn default_branch(&self) -> Result<String, GitHubError> {
        let repo = self.api.get_repo(self.repo).await?;
        Ok(repo
            .default_branch
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| FALLBACK_BRANCH.to_string()))
    }

    /// Make sure `new_branch` exists, creating it from the head of `base_branch`.
    ///
    /// A missing base branch is fatal. A create rejected with 422 because
    /// the ref already exists counts as success; every other failure
    /// (including a 409) is returned, so calling this twice with the same
    /// name returns the same branch both times.
    pub async fn ensure_branch(
        &self,
        base_branch: &str,
        new_branch: &str,
    ) -> Result<BranchResolution, GitHubError> {
        let base_ref = self.api.get_branch_ref(self.repo, base_branch).await?;
        let base_sha = base_ref.object.sha;

        let status = match self
            .api
            .create_branch_ref(self.repo, new_branch, &base_sha)
            .await
        {
            Ok(_) => {
                info!(branch = new_branch, base = base_branch, "created branch");
                BranchStatus::Created
            }
            Err(e) if e.is_already_exists() => {
                warn!(branch = new_branch, "branch already exists, reusing it");
                BranchStatus::Reused
            }
            Err(e) => return Err(e),
        };

        Ok(BranchResolution {
            target: BranchTarget {
                name: new_branch.to_string(),
                base_sha: Some(base_sha),
            },
            status,
        })
    }
}
