//! Core utilities shared by the ziplift crates.
//!
//! Holds the error taxonomy used across the upload pipeline, the archive
//! path sanitizer and platform directory helpers.

pub mod core;

pub use core::error::{ErrorKind, GitHubError, ZipliftError, ZipliftResult};
pub use core::error_help::{format_error_with_help, ErrorHelp};
pub use core::sanitize::sanitize_path;
