//! GitHub integration
//!
//! This module provides functionality for interacting with GitHub to:
//! - Validate a token and check repository access
//! - Resolve the default branch and create upload branches
//! - Probe for and create or update files through the Contents API

pub mod branch;
pub mod client;
pub mod types;

pub use branch::{BranchResolution, BranchResolver, BranchStatus};
pub use client::GitHubClient;
pub use types::{BranchTarget, GitHubRepo, GitHubUser, RepoId};
