//! Mock implementations of service traits for testing

use super::traits::{Clock, GitHubApi};
use crate::github::types::{
    CommitInfo, ContentInfo, GitHubRepo, GitHubUser, GitObject, GitRef, PutContentRequest,
    PutContentResponse, RepoId,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use ziplift_core::GitHubError;

/// In-memory GitHub for testing
///
/// Models one repository with branches and files. Every call is recorded so
/// tests can assert on what was (and was not) sent.
///
/// # Example
///
/// ```
/// use ziplift::di::mocks::MockGitHubApi;
///
/// let github = MockGitHubApi::new()
///     .with_default_branch("trunk")
///     .with_file("trunk", "README.md", "blob-readme");
/// assert!(github.calls().is_empty());
/// ```
pub struct MockGitHubApi {
    state: Mutex<MockState>,
}

struct MockState {
    login: Option<String>,
    repo_exists: bool,
    default_branch: Option<String>,
    branches: HashMap<String, String>,
    files: HashMap<(String, String), String>,
    probe_failures: HashMap<String, u16>,
    put_failures: HashMap<String, u16>,
    calls: Vec<String>,
    puts: Vec<(String, PutContentRequest)>,
    next_blob: usize,
}

impl Default for MockGitHubApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGitHubApi {
    /// Repository `main` at `base-sha`, token owned by `octocat`
    pub fn new() -> Self {
        let mut branches = HashMap::new();
        branches.insert("main".to_string(), "base-sha".to_string());
        Self {
            state: Mutex::new(MockState {
                login: Some("octocat".to_string()),
                repo_exists: true,
                default_branch: Some("main".to_string()),
                branches,
                files: HashMap::new(),
                probe_failures: HashMap::new(),
                put_failures: HashMap::new(),
                calls: Vec::new(),
                puts: Vec::new(),
                next_blob: 1,
            }),
        }
    }

    /// Rename the default branch (keeps the same head SHA)
    pub fn with_default_branch(self, name: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let sha = state
                .default_branch
                .take()
                .and_then(|old| state.branches.remove(&old))
                .unwrap_or_else(|| "base-sha".to_string());
            state.branches.insert(name.to_string(), sha);
            state.default_branch = Some(name.to_string());
        }
        self
    }

    /// Repository metadata without a `default_branch` field
    pub fn without_default_branch(self) -> Self {
        self.state.lock().unwrap().default_branch = None;
        self
    }

    /// Token rejected with 401
    pub fn with_invalid_token(self) -> Self {
        self.state.lock().unwrap().login = None;
        self
    }

    /// Repository answers 404
    pub fn without_repo(self) -> Self {
        self.state.lock().unwrap().repo_exists = false;
        self
    }

    /// Add a branch at `sha`
    pub fn with_branch(self, name: &str, sha: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .branches
            .insert(name.to_string(), sha.to_string());
        self
    }

    /// Add an existing file on `branch` with blob `sha`
    pub fn with_file(self, branch: &str, path: &str, sha: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .files
            .insert((branch.to_string(), path.to_string()), sha.to_string());
        self
    }

    /// Make the existence probe for `path` fail with `status`
    pub fn fail_probe(self, path: &str, status: u16) -> Self {
        self.state
            .lock()
            .unwrap()
            .probe_failures
            .insert(path.to_string(), status);
        self
    }

    /// Make the PUT for `path` fail with `status`
    pub fn fail_put(self, path: &str, status: u16) -> Self {
        self.state
            .lock()
            .unwrap()
            .put_failures
            .insert(path.to_string(), status);
        self
    }

    /// Every call so far, e.g. `"GET /user"`, `"PUT src/a.js"`
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Every PUT body so far, with its path
    pub fn puts(&self) -> Vec<(String, PutContentRequest)> {
        self.state.lock().unwrap().puts.clone()
    }

    /// Current blob SHA of `path` on `branch`
    pub fn file_sha(&self, branch: &str, path: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .files
            .get(&(branch.to_string(), path.to_string()))
            .cloned()
    }

    /// Whether `branch` exists
    pub fn has_branch(&self, branch: &str) -> bool {
        self.state.lock().unwrap().branches.contains_key(branch)
    }
}

fn error(status: u16, message: &str) -> GitHubError {
    GitHubError::from_response(status, "", Some(json!({ "message": message })))
}

#[async_trait]
impl GitHubApi for MockGitHubApi {
    async fn get_user(&self) -> Result<GitHubUser, GitHubError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("GET /user".to_string());
        match &state.login {
            Some(login) => Ok(GitHubUser {
                login: login.clone(),
            }),
            None => Err(error(401, "Bad credentials")),
        }
    }

    async fn get_repo(&self, repo: &RepoId) -> Result<GitHubRepo, GitHubError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("GET {}", repo.api_path()));
        if !state.repo_exists {
            return Err(error(404, "Not Found"));
        }
        Ok(GitHubRepo {
            full_name: Some(repo.to_string()),
            default_branch: state.default_branch.clone(),
            private: false,
        })
    }

    async fn get_branch_ref(&self, _repo: &RepoId, branch: &str) -> Result<GitRef, GitHubError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("GET ref {}", branch));
        match state.branches.get(branch) {
            Some(sha) => Ok(GitRef {
                ref_name: format!("refs/heads/{}", branch),
                object: GitObject {
                    sha: sha.clone(),
                    kind: Some("commit".to_string()),
                },
            }),
            None => Err(error(404, "Not Found")),
        }
    }

    async fn create_branch_ref(
        &self,
        _repo: &RepoId,
        branch: &str,
        sha: &str,
    ) -> Result<GitRef, GitHubError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("POST ref {}", branch));
        if state.branches.contains_key(branch) {
            return Err(error(422, "Reference already exists"));
        }
        state.branches.insert(branch.to_string(), sha.to_string());
        Ok(GitRef {
            ref_name: format!("refs/heads/{}", branch),
            object: GitObject {
                sha: sha.to_string(),
                kind: Some("commit".to_string()),
            },
        })
    }

    async fn get_content(
        &self,
        _repo: &RepoId,
        path: &str,
        branch: &str,
    ) -> Result<ContentInfo, GitHubError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("GET {}", path));
        if let Some(status) = state.probe_failures.get(path) {
            return Err(error(*status, "Probe failed"));
        }
        match state.files.get(&(branch.to_string(), path.to_string())) {
            Some(sha) => Ok(ContentInfo {
                sha: Some(sha.clone()),
                path: Some(path.to_string()),
            }),
            None => Err(error(404, "Not Found")),
        }
    }

    async fn put_content(
        &self,
        _repo: &RepoId,
        path: &str,
        request: &PutContentRequest,
    ) -> Result<PutContentResponse, GitHubError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("PUT {}", path));
        state.puts.push((path.to_string(), request.clone()));
        if let Some(status) = state.put_failures.get(path) {
            return Err(error(*status, "Put failed"));
        }
        if !state.branches.contains_key(&request.branch) {
            return Err(error(404, "Branch not found"));
        }

        let key = (request.branch.clone(), path.to_string());
        if state.files.get(&key) != request.sha.as_ref() {
            return Err(error(409, "sha does not match"));
        }

        let sha = format!("blob-{}", state.next_blob);
        state.next_blob += 1;
        state.files.insert(key, sha.clone());
        Ok(PutContentResponse {
            content: Some(ContentInfo {
                sha: Some(sha.clone()),
                path: Some(path.to_string()),
            }),
            commit: Some(CommitInfo {
                sha: format!("commit-{}", sha),
            }),
        })
    }
}

/// Clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        Self(NaiveDate::from_ymd_opt(year, month, day).expect("valid date"))
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
