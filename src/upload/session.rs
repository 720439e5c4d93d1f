use crate::archive::{ExtractedArchive, ExtractedFile};
use crate::github::types::RepoId;
use crate::upload::activity_log::ActivityLog;
use std::fmt;

/// Token plus target repository for one session. Held in memory only.
#[derive(Clone)]
pub struct Credentials {
    pub token: String,
    pub repo: RepoId,
}

impl Credentials {
    pub fn new(token: impl Into<String>, owner: &str, repo: &str) -> Self {
        Self {
            token: token.into().trim().to_string(),
            repo: RepoId::new(owner, repo),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("repo", &self.repo)
            .finish()
    }
}

/// Everything one upload attempt works on
///
/// Passed explicitly to each orchestrator operation; [`Session::reset`]
/// wipes it back to the initial state.
#[derive(Debug, Default)]
pub struct Session {
    credentials: Option<Credentials>,
    files: Vec<ExtractedFile>,
    total_bytes: u64,
    log: ActivityLog,
}

impl Session {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
            ..Default::default()
        }
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// Replace the file list with a freshly extracted archive
    pub fn load_archive(&mut self, archive: ExtractedArchive) {
        self.total_bytes = archive.total_bytes;
        self.files = archive.files;
    }

    pub fn files(&self) -> &[ExtractedFile] {
        &self.files
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Drop extracted files (e.g. before re-reading an archive)
    pub fn clear_files(&mut self) {
        self.files.clear();
        self.total_bytes = 0;
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut ActivityLog {
        &mut self.log
    }

    /// Files to upload alongside the log, borrowed at the same time
    pub(crate) fn files_and_log(&mut self) -> (&[ExtractedFile], &mut ActivityLog) {
        (&self.files, &mut self.log)
    }

    /// Forget credentials, files and log lines.
    ///
    /// Services built from the token keep their own copy; use
    /// `UploadOrchestrator::close` to drop both together.
    pub fn reset(&mut self) {
        self.credentials = None;
        self.clear_files();
        self.log.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let creds = Credentials::new("ghp_secret", "acme", "demo");
        let debug = format!("{:?}", Session::new(creds));
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_credentials_trimmed() {
        let creds = Credentials::new(" ghp_x \n", " acme", "demo ");
        assert_eq!(creds.token, "ghp_x");
        assert_eq!(creds.repo.to_string(), "acme/demo");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = Session::new(Credentials::new("t", "acme", "demo"));
        session.load_archive(ExtractedArchive {
            files: vec![ExtractedFile::new("a.txt", b"abc".to_vec())],
            total_bytes: 3,
            skipped: 0,
        });
        session.log_mut().info("loaded");

        assert_eq!(session.files().len(), 1);
        assert_eq!(session.total_bytes(), 3);

        session.reset();
        assert!(session.credentials().is_none());
        assert!(session.files().is_empty());
        assert_eq!(session.total_bytes(), 0);
        assert!(session.log().is_empty());
    }
}
