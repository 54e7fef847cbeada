use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a worker within one run.
///
/// `AwaitingFinalize` and `Finalizing` are only reachable by the designated finalizer;
/// every other worker goes straight from `Reducing` to `Done`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WorkerState {
    /// No message received yet.
    Idle,
    /// Receiving and mapping file assignments.
    Mapping,
    /// Map acknowledged; waiting for a letter range.
    AwaitingReduceAssignment,
    Reducing,
    /// Reduce acknowledged; the designated finalizer keeps listening.
    AwaitingFinalize,
    Finalizing,
    Done,
}

impl WorkerState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkerState::Done)
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// What a worker did during a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkerReport {
    pub rank: u32,
    pub files_mapped: Vec<String>,
    /// Non-empty tokens recorded into the intermediate store.
    pub occurrences_written: usize,
    /// Words whose output list this worker produced.
    pub words_reduced: usize,
    pub letter_range: Option<String>,
    /// Report lines written, if this worker built the final report.
    pub report_lines: Option<usize>,
}
