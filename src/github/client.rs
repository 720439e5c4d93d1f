//! GitHub API client implementation

use crate::config::Config;
use crate::di::traits::GitHubApi;
use crate::github::types::{
    ContentInfo, CreateRefRequest, GitHubRepo, GitHubUser, GitRef, PutContentRequest,
    PutContentResponse, RepoId,
};
use async_trait::async_trait;
use reqwest::{header, Client as HttpClient, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use ziplift_core::{GitHubError, ZipliftError, ZipliftResult};

/// Branch used when the repository metadata carries no `default_branch`.
pub const FALLBACK_BRANCH: &str = "main";

/// Authenticated GitHub REST client.
///
/// One network round trip per call. No retries, no caching; every non-2xx
/// response becomes a [`GitHubError`].
pub struct GitHubClient {
    http_client: HttpClient,
    api_url: String,
}

impl GitHubClient {
    /// Create a client bound to `token`
    pub fn new(config: &Config, token: &str) -> ZipliftResult<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ZipliftError::Validation(
                "GitHub token must not be empty".to_string(),
            ));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ZipliftError::Config(format!("Invalid user agent: {}", e)))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ZipliftError::Validation("Invalid GitHub token".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ZipliftError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Issue one API request and parse the JSON body.
    ///
    /// The body is read as text first so empty bodies are tolerated; a body
    /// that is not JSON yields `Ok(None)` on success.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>, GitHubError> {
        let url = format!("{}{}", self.api_url, path);
        let mut builder = self.http_client.request(method.clone(), &url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let json = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str::<Value>(&text).ok()
        };

        debug!(%method, path, status = status.as_u16(), "GitHub API call");

        if !status.is_success() {
            return Err(GitHubError::from_response(status.as_u16(), &text, json));
        }

        Ok(json)
    }

    async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, GitHubError> {
        let json = self
            .request(method, path, body)
            .await?
            .ok_or_else(|| GitHubError::transport(format!("Empty response from {}", path)))?;

        serde_json::from_value(json).map_err(|e| {
            GitHubError::transport(format!("Failed to parse GitHub API response: {}", e))
        })
    }

    /// Get the user the token belongs to
    pub async fn get_user(&self) -> Result<GitHubUser, GitHubError> {
        self.request_as(Method::GET, "/user", None).await
    }

    /// Get repository information
    pub async fn get_repo(&self, repo: &RepoId) -> Result<GitHubRepo, GitHubError> {
        self.request_as(Method::GET, &repo.api_path(), None).await
    }

    /// Get the reference of a branch
    pub async fn get_branch_ref(&self, repo: &RepoId, branch: &str) -> Result<GitRef, GitHubError> {
        let path = format!("{}/git/ref/heads/{}", repo.api_path(), encode_path(branch));
        self.request_as(Method::GET, &path, None).await
    }

    /// Create `refs/heads/<branch>` pointing at `sha`
    pub async fn create_branch_ref(
        &self,
        repo: &RepoId,
        branch: &str,
        sha: &str,
    ) -> Result<GitRef, GitHubError> {
        let body = CreateRefRequest {
            ref_name: format!("refs/heads/{}", branch),
            sha: sha.to_string(),
        };
        let body = to_body(&body)?;
        let path = format!("{}/git/refs", repo.api_path());
        self.request_as(Method::POST, &path, Some(&body)).await
    }

    /// Get the content metadata at `path` on `branch`
    pub async fn get_content(
        &self,
        repo: &RepoId,
        path: &str,
        branch: &str,
    ) -> Result<ContentInfo, GitHubError> {
        let url_path = format!(
            "{}/contents/{}?ref={}",
            repo.api_path(),
            encode_path(path),
            urlencoding::encode(branch)
        );
        let json = self.request(Method::GET, &url_path, None).await?;

        // A directory listing comes back as an array and has no blob SHA
        match json {
            Some(value @ Value::Object(_)) => serde_json::from_value(value).map_err(|e| {
                GitHubError::transport(format!("Failed to parse content response: {}", e))
            }),
            _ => Ok(ContentInfo {
                sha: None,
                path: Some(path.to_string()),
            }),
        }
    }

    /// Create or update the file at `path`
    pub async fn put_content(
        &self,
        repo: &RepoId,
        path: &str,
        request: &PutContentRequest,
    ) -> Result<PutContentResponse, GitHubError> {
        let body = to_body(request)?;
        let url_path = format!("{}/contents/{}", repo.api_path(), encode_path(path));
        self.request_as(Method::PUT, &url_path, Some(&body)).await
    }
}

/// Percent-encode each segment of a slash-separated path
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn to_body<T: serde::Serialize>(body: &T) -> Result<Value, GitHubError> {
    serde_json::to_value(body)
        .map_err(|e| GitHubError::transport(format!("Failed to encode request body: {}", e)))
}

// Implement GitHubApi trait
#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_user(&self) -> Result<GitHubUser, GitHubError> {
        Self::get_user(self).await
    }

    async fn get_repo(&self, repo: &RepoId) -> Result<GitHubRepo, GitHubError> {
        Self::get_repo(self, repo).await
    }

    async fn get_branch_ref(&self, repo: &RepoId, branch: &str) -> Result<GitRef, GitHubError> {
        Self::get_branch_ref(self, repo, branch).await
    }

    async fn create_branch_ref(
        &self,
        repo: &RepoId,
        branch: &str,
        sha: &str,
    ) -> Result<GitRef, GitHubError> {
        Self::create_branch_ref(self, repo, branch, sha).await
    }

    async fn get_content(
        &self,
        repo: &RepoId,
        path: &str,
        branch: &str,
    ) -> Result<ContentInfo, GitHubError> {
        Self::get_content(self, repo, path, branch).await
    }

    async fn put_content(
        &self,
        repo: &RepoId,
        path: &str,
        request: &PutContentRequest,
    ) -> Result<PutContentResponse, GitHubError> {
        Self::put_content(self, repo, path, request).await
    }
}
