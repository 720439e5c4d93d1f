pub mod error;
pub mod error_help;
pub mod path;
pub mod sanitize;

pub use error::{ErrorKind, GitHubError, ZipliftError, ZipliftResult};
