use crate::archive::{check_limits, format_bytes, ArchiveExtractor};
use crate::di::ServiceContainer;
use crate::github::types::{BranchTarget, GitHubUser, RepoId};
use crate::github::{BranchResolver, BranchStatus};
use crate::sync::{FileSyncEngine, ProgressObserver, UploadProgress};
use crate::upload::activity_log::ActivityLog;
use crate::upload::branch_name::resolve_branch_name;
use crate::upload::session::{Credentials, Session};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use ziplift_core::{ZipliftError, ZipliftResult};

/// Where uploaded files land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchMode {
    /// Commit straight onto the repository's default branch
    Default,
    /// Commit onto a (possibly new) branch cut from the default branch
    #[default]
    New,
}

#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    pub branch_mode: BranchMode,
    /// Only used with [`BranchMode::New`]; defaults to `upload-YYYY-MM-DD`
    pub branch_name: Option<String>,
    /// Falls back to the configured commit message
    pub commit_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub branch: String,
    /// `None` in [`BranchMode::Default`]
    pub branch_status: Option<BranchStatus>,
    pub uploaded: usize,
    /// Web link to the branch tree
    pub url: String,
}

/// Runs the upload pipeline end to end
///
/// Stages run in order (default branch, optional branch creation, file
/// sync) and the first failure ends the run. Every stage writes to the
/// session's activity log.
pub struct UploadOrchestrator {
    services: ServiceContainer,
    cancel: Option<Arc<AtomicBool>>,
}

impl UploadOrchestrator {
    pub fn new(services: ServiceContainer) -> Self {
        Self {
            services,
            cancel: None,
        }
    }

    /// Stop the file sync before the next file once `flag` is set
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// End the session: reset it and drop the services, whose GitHub client
    /// holds the only other copy of the token
    pub fn close(self, session: &mut Session) {
        session.reset();
    }

    /// Validate the token and make sure the repository is reachable
    pub async fn check_access(&self, session: &mut Session) -> ZipliftResult<GitHubUser> {
        let repo = require_credentials(session)?.repo.clone();
        let github = self.services.github();
        let log = session.log_mut();

        let result = async {
            log.info("→ Validating token…");
            let user = github.get_user().await?;
            log.ok(format!("✔ Token valid for @{}", user.login));

            log.info("→ Checking repository access…");
            github.get_repo(&repo).await?;
            log.ok(format!("✔ Repo found: {}", repo));
            Ok::<_, ZipliftError>(user)
        }
        .await;

        if let Err(e) = &result {
            log.error(format!("✖ {}", e));
        }
        result
    }

    /// Extract `archive_path` into the session, replacing any previous files
    pub fn load_archive(&self, session: &mut Session, archive_path: &Path) -> ZipliftResult<()> {
        session.clear_files();
        session.log_mut().info("→ Reading ZIP…");

        let extractor = ArchiveExtractor::new(self.services.config().archive_limits());
        match extractor.extract(archive_path) {
            Ok(archive) => {
                session.log_mut().ok(format!(
                    "✔ Extracted {} files ({})",
                    archive.files.len(),
                    format_bytes(archive.total_bytes)
                ));
                session.load_archive(archive);
                Ok(())
            }
            Err(e) => {
                session.log_mut().error(format!("✖ {}", e));
                Err(e)
            }
        }
    }

    /// Push the session's files and return the branch link
    pub async fn run(
        &self,
        session: &mut Session,
        options: &UploadOptions,
        observer: &mut dyn ProgressObserver,
    ) -> ZipliftResult<UploadOutcome> {
        let result = self.run_stages(session, options, observer).await;
        match &result {
            Ok(outcome) => {
                let log = session.log_mut();
                log.ok("✔ Upload complete.");
                log.ok(format!("✔ {}", outcome.url));
            }
            Err(e) => session.log_mut().error(format!("✖ Upload failed: {}", e)),
        }
        result
    }

    async fn run_stages(
        &self,
        session: &mut Session,
        options: &UploadOptions,
        observer: &mut dyn ProgressObserver,
    ) -> ZipliftResult<UploadOutcome> {
        let config = self.services.config();
        let repo = require_credentials(session)?.repo.clone();

        // Everything that can be rejected locally is rejected before the
        // first request goes out
        let commit_message = options
            .commit_message
            .clone()
            .unwrap_or_else(|| config.commit_message.clone());
        if commit_message.trim().is_empty() {
            return Err(ZipliftError::Validation(
                "Commit message must not be empty".to_string(),
            ));
        }
        check_limits(session.files(), config.archive_limits())?;
        let new_branch = match options.branch_mode {
            BranchMode::New => Some(resolve_branch_name(
                options.branch_name.as_deref(),
                self.services.clock().today(),
            )?),
            BranchMode::Default => None,
        };

        let github = self.services.github();
        let resolver = BranchResolver::new(github, &repo);

        session.log_mut().info("→ Resolving default branch…");
        let default_branch = resolver.default_branch().await?;
        session
            .log_mut()
            .ok(format!("✔ Default branch: {}", default_branch));

        let (target, branch_status) = match new_branch {
            Some(name) => {
                session
                    .log_mut()
                    .info(format!("→ Creating/using branch: {}", name));
                let resolution = resolver.ensure_branch(&default_branch, &name).await?;
                let log = session.log_mut();
                if let Some(sha) = &resolution.target.base_sha {
                    log.ok(format!("✔ Base branch SHA: {}", short_sha(sha)));
                }
                match resolution.status {
                    BranchStatus::Created => log.ok(format!("✔ Created branch {}", name)),
                    BranchStatus::Reused => {
                        log.warn(format!("⚠ Branch already exists, will reuse: {}", name))
                    }
                }
                (resolution.target, Some(resolution.status))
            }
            None => (BranchTarget::existing(default_branch), None),
        };

        session.log_mut().info("→ Uploading files…");
        let (files, log) = session.files_and_log();
        let mut engine = FileSyncEngine::new(github, &repo);
        if let Some(flag) = &self.cancel {
            engine = engine.with_cancel(Arc::clone(flag));
        }
        let mut logging = LoggingObserver {
            log,
            every: config.progress_log_every.max(1),
            inner: observer,
        };
        let progress = engine
            .sync_files(&target, files, &commit_message, &mut logging)
            .await?;
        session.log_mut().ok(format!(
            "✔ Uploaded {}/{} files",
            progress.done, progress.total
        ));

        let url = branch_url(&config.web_url, &repo, &target.name);
        info!(repo = %repo, branch = %target.name, files = progress.done, "upload finished");

        Ok(UploadOutcome {
            branch: target.name,
            branch_status,
            uploaded: progress.done,
            url,
        })
    }
}

fn require_credentials(session: &Session) -> ZipliftResult<&Credentials> {
    session
        .credentials()
        .ok_or_else(|| ZipliftError::Validation("No GitHub credentials in session".to_string()))
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

/// `https://github.com/{owner}/{repo}/tree/{branch}`
pub fn branch_url(web_url: &str, repo: &RepoId, branch: &str) -> String {
    format!(
        "{}/{}/{}/tree/{}",
        web_url.trim_end_matches('/'),
        repo.owner,
        repo.repo,
        urlencoding::encode(branch)
    )
}

/// Mirrors progress into the activity log every `every` files and at the end
struct LoggingObserver<'a> {
    log: &'a mut ActivityLog,
    every: usize,
    inner: &'a mut dyn ProgressObserver,
}

impl ProgressObserver for LoggingObserver<'_> {
    fn on_progress(&mut self, progress: &UploadProgress) {
        if progress.done % self.every == 0 || progress.is_complete() {
            self.log.info(format!(
                "→ Uploaded {}/{} ({})",
                progress.done, progress.total, progress.last_path
            ));
        }
        self.inner.on_progress(progress);
    }
}
