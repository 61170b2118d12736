//! What happened to each track during a run.

use broadcast::{IssueUrl, RunId, RunMode, TrackId};

/// Result of visiting one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Shown in a dry-run preview.
    Listed { active: bool },
    /// An issue was created.
    Created { url: IssueUrl },
    /// The tracker refused the issue or its reply was unreadable.
    Failed { reason: String },
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackOutcome {
    pub track: TrackId,
    pub outcome: Outcome,
}

/// Summary of a completed run. Tracks appear in the order they were visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub run_id: RunId,
    pub mode: RunMode,
    pub outcomes: Vec<TrackOutcome>,
}

impl RunReport {
    pub(crate) fn new(run_id: RunId, mode: RunMode) -> Self {
        Self {
            run_id,
            mode,
            outcomes: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, track: &TrackId, outcome: Outcome) {
        self.outcomes.push(TrackOutcome {
            track: track.clone(),
            outcome,
        });
    }

    /// Number of tracks listed in a preview.
    pub fn listed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Listed { .. }))
    }

    /// Number of issues created.
    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Created { .. }))
    }

    /// Number of tracks whose submission failed.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|t| pred(&t.outcome)).count()
    }
}
