//! File sync: push extracted files to a branch, one at a time

pub mod encode;
pub mod engine;
pub mod progress;

pub use engine::FileSyncEngine;
pub use progress::{NoProgress, ProgressObserver, UploadProgress};
