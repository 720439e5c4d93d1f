//! Service container for dependency injection

use super::traits::{Clock, GitHubApi, SystemClock};
use crate::config::Config;
use crate::github::GitHubClient;
use std::sync::Arc;
use ziplift_core::ZipliftResult;

/// Service container for one upload session
///
/// Holds the services the orchestrator needs through trait objects so tests
/// can swap in [`mocks`](super::mocks) or a client pointed at a mock server.
///
/// # Example (Testing)
///
/// ```
/// use ziplift::config::Config;
/// use ziplift::di::{ServiceContainer, mocks::*};
/// use std::sync::Arc;
///
/// let github = Arc::new(MockGitHubApi::new());
/// let clock = Arc::new(FixedClock::ymd(2026, 1, 2));
/// let container = ServiceContainer::with_providers(Config::default(), github, clock);
/// assert_eq!(container.config().max_files, 2000);
/// ```
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<Config>,
    pub github: Arc<dyn GitHubApi>,
    pub clock: Arc<dyn Clock>,
}

impl ServiceContainer {
    /// Create a container with production implementations bound to `token`
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or the HTTP client cannot be
    /// built from the config.
    pub fn new(config: Config, token: &str) -> ZipliftResult<Self> {
        let github = GitHubClient::new(&config, token)?;
        Ok(Self {
            config: Arc::new(config),
            github: Arc::new(github),
            clock: Arc::new(SystemClock),
        })
    }

    /// Create a service container with custom provider implementations
    pub fn with_providers(
        config: Config,
        github: Arc<dyn GitHubApi>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            github,
            clock,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        self.config.as_ref()
    }

    /// Get the GitHub API
    pub fn github(&self) -> &dyn GitHubApi {
        self.github.as_ref()
    }

    /// Get the clock
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}
