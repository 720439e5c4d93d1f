//! Dependency injection infrastructure for ziplift
//!
//! The orchestrator only talks to GitHub and the clock through the traits in
//! [`traits`], which keeps the pipeline testable without a network.

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::{Clock, GitHubApi, SystemClock};
