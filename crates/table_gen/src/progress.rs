use std::sync::{Arc, Mutex};

/// What happened to one shape's job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Finished,
    /// table already on disk
    Skipped,
    Failed,
    /// stop requested before the job started
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub finished: usize,
    pub skipped: usize,
    pub failed: usize,
    pub cancelled: usize,
}

impl ProgressSnapshot {
    pub fn total(&self) -> usize {
        self.finished + self.skipped + self.failed + self.cancelled
    }
}

pub type Progress = Arc<Mutex<ProgressSnapshot>>;

pub fn create_progress() -> Progress {
    Arc::new(Mutex::new(ProgressSnapshot::default()))
}

pub fn get_progress_snapshot(progress: &Progress) -> ProgressSnapshot {
    *progress.lock().unwrap_or_else(|p| p.into_inner())
}

pub fn record(progress: &Progress, outcome: JobOutcome) {
    let mut guard = progress.lock().unwrap_or_else(|p| p.into_inner());
    match outcome {
        JobOutcome::Finished => guard.finished += 1,
        JobOutcome::Skipped => guard.skipped += 1,
        JobOutcome::Failed => guard.failed += 1,
        JobOutcome::Cancelled => guard.cancelled += 1,
    }
}
