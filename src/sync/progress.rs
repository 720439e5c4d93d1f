/// Snapshot of a running sync. `done` only ever increases.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadProgress {
    pub done: usize,
    pub total: usize,
    /// Path of the file that just completed
    pub last_path: String,
}

impl UploadProgress {
    pub fn new(total: usize) -> Self {
        Self {
            done: 0,
            total,
            last_path: String::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.done == self.total
    }
}

/// Receives one event per completed file, in order
pub trait ProgressObserver {
    fn on_progress(&mut self, progress: &UploadProgress);
}

impl<F> ProgressObserver for F
where
    F: FnMut(&UploadProgress),
{
    fn on_progress(&mut self, progress: &UploadProgress) {
        self(progress)
    }
}

/// Observer that ignores every event
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _progress: &UploadProgress) {}
}
