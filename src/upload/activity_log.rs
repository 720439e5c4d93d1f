use chrono::Local;
use std::collections::VecDeque;
use std::fmt;

/// Lines kept before the oldest is dropped
pub const ACTIVITY_LOG_CAPACITY: usize = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Ok,
    Warn,
    Error,
}

/// One timestamped status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Local wall-clock time, `HH:MM:SS`
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp, self.message)
    }
}

type Listener = Box<dyn FnMut(&LogLine) + Send>;

/// Capped, append-only log of what the upload did, for the user
///
/// Separate from `tracing` output: this is the human-facing record of a
/// session and is cleared on [`Session::reset`](super::Session::reset).
pub struct ActivityLog {
    lines: VecDeque<LogLine>,
    capacity: usize,
    listener: Option<Listener>,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ActivityLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityLog")
            .field("lines", &self.lines.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::with_capacity(ACTIVITY_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(ACTIVITY_LOG_CAPACITY)),
            capacity: capacity.max(1),
            listener: None,
        }
    }

    /// Call `listener` with every line as it is appended
    pub fn set_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&LogLine) + Send + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        let line = LogLine {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level,
            message: message.into(),
        };
        if let Some(listener) = self.listener.as_mut() {
            listener(&line);
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message);
    }

    pub fn ok(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Ok, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Warn, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Error, message);
    }

    pub fn lines(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every line. The listener stays attached.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_lines_are_timestamped() {
        let mut log = ActivityLog::new();
        log.ok("Token valid for @octocat");

        let line = log.lines().next().unwrap();
        assert_eq!(line.level, LogLevel::Ok);
        assert_eq!(line.timestamp.len(), 8);
        assert!(line.to_string().ends_with("] Token valid for @octocat"));
    }

    #[test]
    fn test_capped_at_capacity() {
        let mut log = ActivityLog::new();
        for i in 0..(ACTIVITY_LOG_CAPACITY + 50) {
            log.info(format!("line {}", i));
        }
        assert_eq!(log.len(), ACTIVITY_LOG_CAPACITY);
        assert_eq!(log.lines().next().unwrap().message, "line 50");
        assert_eq!(
            log.lines().last().unwrap().message,
            format!("line {}", ACTIVITY_LOG_CAPACITY + 49)
        );
    }

    #[test]
    fn test_listener_sees_every_line() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut log = ActivityLog::with_capacity(1);
        log.set_listener(move |line| sink.lock().unwrap().push(line.message.clone()));
        log.info("a");
        log.error("b");

        assert_eq!(*seen.lock().unwrap(), ["a", "b"]);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut log = ActivityLog::new();
        log.warn("x");
        log.clear();
        assert!(log.is_empty());
    }
}
