use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub type ZipliftResult<T> = Result<T, ZipliftError>;

/// Coarse classification every failure in the pipeline maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid or insufficient token.
    Auth,
    /// HTTP 404. Expected while probing for existing files, fatal elsewhere.
    NotFound,
    /// Something already exists (branch ref, stale content SHA).
    Conflict,
    /// Input rejected before any network call.
    Validation,
    /// Any other non-2xx response, network failure or timeout.
    Transport,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Auth => write!(f, "auth"),
            ErrorKind::NotFound => write!(f, "not-found"),
            ErrorKind::Conflict => write!(f, "conflict"),
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Transport => write!(f, "transport"),
        }
    }
}

/// A failed GitHub API call.
///
/// Constructed only at the client boundary, so every remote failure has the
/// same shape regardless of which endpoint produced it.
#[derive(Debug, Clone)]
pub struct GitHubError {
    pub kind: ErrorKind,
    pub message: String,
    /// `None` when the request never produced a response (DNS, TLS, timeout).
    pub http_status: Option<u16>,
    pub raw_payload: Option<Value>,
}

impl GitHubError {
    /// Build an error from a non-2xx response.
    ///
    /// The message comes from the body's `message` or `error` field, then the
    /// raw body text, then a generic `HTTP <status>`.
    pub fn from_response(status: u16, text: &str, payload: Option<Value>) -> Self {
        let message = payload
            .as_ref()
            .and_then(|p| {
                p.get("message")
                    .and_then(Value::as_str)
                    .or_else(|| p.get("error").and_then(Value::as_str))
            })
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .or_else(|| {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| format!("HTTP {}", status));

        let kind = classify(status, &message, payload.as_ref());

        Self {
            kind,
            message,
            http_status: Some(status),
            raw_payload: payload,
        }
    }

    /// Build an error for a request that never got a response.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: message.into(),
            http_status: None,
            raw_payload: None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    pub fn is_conflict(&self) -> bool {
        self.kind == ErrorKind::Conflict
    }

    /// A 422 saying the object (e.g. a branch ref) is already there.
    ///
    /// Narrower than [`is_conflict`](Self::is_conflict): a 409 such as
    /// "Git Repository is empty." is a conflict but not a duplicate.
    pub fn is_already_exists(&self) -> bool {
        self.http_status == Some(422) && self.kind == ErrorKind::Conflict
    }
}

impl fmt::Display for GitHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.http_status {
            Some(status) => write!(f, "{} (HTTP {})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for GitHubError {}

impl From<reqwest::Error> for GitHubError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("GitHub API request timed out: {}", err)
        } else {
            format!("GitHub API request failed: {}", err)
        };
        Self {
            kind: ErrorKind::Transport,
            message,
            http_status: err.status().map(|s| s.as_u16()),
            raw_payload: None,
        }
    }
}

/// Map an HTTP status (plus body) onto an [`ErrorKind`].
///
/// GitHub answers a duplicate ref with 422 and an `already_exists` validation
/// code on some endpoints, or only the "Reference already exists" message on
/// others, so both are checked.
fn classify(status: u16, message: &str, payload: Option<&Value>) -> ErrorKind {
    match status {
        403 if is_rate_limited(message) => ErrorKind::Transport,
        401 | 403 => ErrorKind::Auth,
        404 => ErrorKind::NotFound,
        409 => ErrorKind::Conflict,
        422 if has_already_exists_code(payload)
            || message.to_ascii_lowercase().contains("already exists") =>
        {
            ErrorKind::Conflict
        }
        _ => ErrorKind::Transport,
    }
}

fn is_rate_limited(message: &str) -> bool {
    message.to_ascii_lowercase().contains("rate limit")
}

fn has_already_exists_code(payload: Option<&Value>) -> bool {
    payload
        .and_then(|p| p.get("errors"))
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .any(|e| e.get("code").and_then(Value::as_str) == Some("already_exists"))
        })
        .unwrap_or(false)
}

#[derive(Error, Debug)]
pub enum ZipliftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Archive too large, too many files, empty, unreadable, or bad input.
    /// Always raised before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),
}

impl ZipliftError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ZipliftError::GitHub(e) => e.kind,
            ZipliftError::Validation(_) | ZipliftError::Config(_) => ErrorKind::Validation,
            ZipliftError::Io(_) => ErrorKind::Transport,
        }
    }

    /// HTTP status of the underlying GitHub failure, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ZipliftError::GitHub(e) => e.http_status,
            _ => None,
        }
    }
}
