//! Trait definitions for dependency injection

use crate::github::types::{
    ContentInfo, GitHubRepo, GitHubUser, GitRef, PutContentRequest, PutContentResponse, RepoId,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use ziplift_core::GitHubError;

/// Trait for the GitHub REST endpoints the upload pipeline consumes
///
/// Every method is one round trip. Failures are always [`GitHubError`] so
/// callers can branch on its kind (404 during probes, 422 on duplicate refs).
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// `GET /user`
    async fn get_user(&self) -> Result<GitHubUser, GitHubError>;

    /// `GET /repos/{owner}/{repo}`
    async fn get_repo(&self, repo: &RepoId) -> Result<GitHubRepo, GitHubError>;

    /// `GET /repos/{owner}/{repo}/git/ref/heads/{branch}`
    async fn get_branch_ref(&self, repo: &RepoId, branch: &str) -> Result<GitRef, GitHubError>;

    /// `POST /repos/{owner}/{repo}/git/refs`
    async fn create_branch_ref(
        &self,
        repo: &RepoId,
        branch: &str,
        sha: &str,
    ) -> Result<GitRef, GitHubError>;

    /// `GET /repos/{owner}/{repo}/contents/{path}?ref={branch}`
    async fn get_content(
        &self,
        repo: &RepoId,
        path: &str,
        branch: &str,
    ) -> Result<ContentInfo, GitHubError>;

    /// `PUT /repos/{owner}/{repo}/contents/{path}`
    async fn put_content(
        &self,
        repo: &RepoId,
        path: &str,
        request: &PutContentRequest,
    ) -> Result<PutContentResponse, GitHubError>;
}

/// Trait for reading the current date
///
/// Default branch names are date-stamped, so tests pin the date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
