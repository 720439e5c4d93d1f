//! ziplift: push the contents of a ZIP archive to a GitHub branch
//!
//! This crate provides the main ziplift library, re-exporting core
//! functionality from `ziplift-core` and organizing the upload pipeline:
//! archive extraction, branch resolution, file sync and the orchestrator
//! that sequences them.

pub use ziplift_core::{
    format_error_with_help, sanitize_path, ErrorHelp, ErrorKind, GitHubError, ZipliftError,
    ZipliftResult,
};

/// Core module re-exported from ziplift-core.
pub mod core {
    pub use ziplift_core::core::*;
}

/// Configuration management.
pub mod config;

/// ZIP extraction, filtering and limits.
pub mod archive;

/// GitHub REST client and branch resolution.
pub mod github;

/// Sequential file upload through the Contents API.
pub mod sync;

/// Sessions, activity log and the end-to-end orchestrator.
pub mod upload;

/// Dependency injection infrastructure.
pub mod di;
