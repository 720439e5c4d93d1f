use crate::archive::ExtractedFile;
use crate::di::traits::GitHubApi;
use crate::github::types::{BranchTarget, PutContentRequest, RepoId};
use crate::sync::encode::encode_chunked;
use crate::sync::progress::{ProgressObserver, UploadProgress};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;
use ziplift_core::{sanitize_path, GitHubError, ZipliftError, ZipliftResult};

/// Pushes extracted files to a branch through the Contents API.
///
/// Files go up strictly one at a time, in the order given. The Contents API
/// has no bulk endpoint, so every file is its own commit; the first failure
/// stops the queue and files already pushed stay committed.
pub struct FileSyncEngine<'a> {
    api: &'a dyn GitHubApi,
    repo: &'a RepoId,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> FileSyncEngine<'a> {
    pub fn new(api: &'a dyn GitHubApi, repo: &'a RepoId) -> Self {
        Self {
            api,
            repo,
            cancel: None,
        }
    }

    /// Stop before the next file once `flag` is set
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Upload every file onto `target`, reporting after each one.
    ///
    /// On success the returned progress has `done == total`. If file *k*
    /// fails, the observer has seen exactly *k - 1* events.
    pub async fn sync_files(
        &self,
        target: &BranchTarget,
        files: &[ExtractedFile],
        commit_message: &str,
        observer: &mut dyn ProgressObserver,
    ) -> ZipliftResult<UploadProgress> {
        let paths = files
            .iter()
            .map(|f| {
                let path = sanitize_path(&f.path);
                if path.is_empty() {
                    Err(ZipliftError::Validation(format!(
                        "Archive path {:?} is empty after sanitizing",
                        f.path
                    )))
                } else {
                    Ok(path)
                }
            })
            .collect::<ZipliftResult<Vec<_>>>()?;

        let mut progress = UploadProgress::new(files.len());

        for (file, path) in files.iter().zip(paths) {
            if self.is_cancelled() {
                return Err(GitHubError::transport(format!(
                    "Upload cancelled after {}/{} files",
                    progress.done, progress.total
                ))
                .into());
            }

            self.upload_one(target, file, &path, commit_message)
                .await
                .map_err(|mut e| {
                    e.message = format!("{}: {}", path, e.message);
                    ZipliftError::GitHub(e)
                })?;

            progress.done += 1;
            progress.last_path = path;
            observer.on_progress(&progress);
        }

        Ok(progress)
    }

    async fn upload_one(
        &self,
        target: &BranchTarget,
        file: &ExtractedFile,
        path: &str,
        commit_message: &str,
    ) -> Result<(), GitHubError> {
        let sha = self.existing_sha(&target.name, path).await?;
        debug!(path, size = file.size, update = sha.is_some(), "uploading file");

        let request = PutContentRequest {
            message: commit_message.to_string(),
            content: encode_chunked(&file.bytes),
            branch: target.name.clone(),
            sha,
        };
        self.api.put_content(self.repo, path, &request).await?;
        Ok(())
    }

    /// Blob SHA of the file currently at `path`, if there is one
    async fn existing_sha(&self, branch: &str, path: &str) -> Result<Option<String>, GitHubError> {
        match self.api.get_content(self.repo, path, branch).await {
            Ok(info) => Ok(info.sha),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::SeqCst))
            .unwrap_or(false)
    }
}
