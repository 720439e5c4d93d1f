use crate::archive::ArchiveLimits;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use ziplift_core::core::path::config_file;
use ziplift_core::{ZipliftError, ZipliftResult};

/// Runtime settings. The token is deliberately not one of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// GitHub REST API base URL (GitHub Enterprise: `https://host/api/v3`)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Web URL used to build the final branch link
    #[serde(default = "default_web_url")]
    pub web_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of files extracted from one archive
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Maximum total extracted size in bytes
    #[serde(default = "default_max_total_bytes")]
    pub max_total_bytes: u64,

    /// Commit message used when none is given on the command line
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Append a progress line to the activity log every N files
    #[serde(default = "default_progress_log_every")]
    pub progress_log_every: usize,

    /// User-Agent header sent to GitHub
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_web_url() -> String {
    "https://github.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_files() -> usize {
    2000
}

fn default_max_total_bytes() -> u64 {
    60 * 1024 * 1024
}

fn default_commit_message() -> String {
    "Upload from ZIP via ziplift".to_string()
}

fn default_progress_log_every() -> usize {
    25
}

fn default_user_agent() -> String {
    concat!("ziplift/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            web_url: default_web_url(),
            timeout_secs: default_timeout_secs(),
            max_files: default_max_files(),
            max_total_bytes: default_max_total_bytes(),
            commit_message: default_commit_message(),
            progress_log_every: default_progress_log_every(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Load config from the platform-specific config directory
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\ziplift\config.yaml
    /// - Linux: ~/.config/ziplift/config.yaml
    /// - macOS: ~/Library/Application Support/ziplift/config.yaml
    ///
    /// A missing file yields the defaults.
    pub fn load() -> ZipliftResult<Self> {
        let config_path = config_file()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> ZipliftResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ZipliftError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ZipliftResult<()> {
        if self.timeout_secs == 0 {
            return Err(ZipliftError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.progress_log_every == 0 {
            return Err(ZipliftError::Config(
                "progress_log_every must be greater than zero".to_string(),
            ));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ZipliftError::Config(format!(
                "api_url must be an http(s) URL, got {}",
                self.api_url
            )));
        }
        Ok(())
    }

    /// Archive limits derived from this config
    pub fn archive_limits(&self) -> ArchiveLimits {
        ArchiveLimits {
            max_files: self.max_files,
            max_total_bytes: self.max_total_bytes,
        }
    }
}
