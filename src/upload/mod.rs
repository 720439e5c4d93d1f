//! Upload sessions and the end-to-end pipeline

pub mod activity_log;
pub mod branch_name;
pub mod orchestrator;
pub mod session;

pub use activity_log::{ActivityLog, LogLevel, LogLine, ACTIVITY_LOG_CAPACITY};
pub use orchestrator::{BranchMode, UploadOptions, UploadOrchestrator, UploadOutcome};
pub use session::{Credentials, Session};
