//! Human-facing hints attached to errors when the CLI reports a failure.

use crate::core::error::{ErrorKind, ZipliftError};

/// Suggestion text for an error, if one is useful.
pub trait ErrorHelp {
    fn help(&self) -> Option<&'static str>;
}

impl ErrorHelp for ZipliftError {
    fn help(&self) -> Option<&'static str> {
        match self.kind() {
            ErrorKind::Auth => Some(
                "Check that the token is valid and has `contents: write` access to the repository.",
            ),
            ErrorKind::NotFound => Some(
                "Check the owner/repository spelling. Private repositories also answer 404 when the token cannot see them.",
            ),
            ErrorKind::Conflict => Some(
                "The remote changed while uploading. Re-run the upload to pick up the new file SHAs.",
            ),
            ErrorKind::Validation => match self {
                ZipliftError::Config(_) => Some("Run `ziplift config path` to locate the config file."),
                _ => None,
            },
            ErrorKind::Transport => None,
        }
    }
}

/// Format an error for the terminal, with a hint line when one applies.
pub fn format_error_with_help(err: &ZipliftError) -> String {
    match err.help() {
        Some(help) => format!("✖ {}\n  hint: {}", err, help),
        None => format!("✖ {}", err),
    }
}
