//! Blazon run orchestration.
//!
//! [`Runner`] drives one invocation of the tool: it fetches the track
//! directory, applies the [`TrackSelection`] for the [`RunMode`], and then
//! either prints a preview or submits the ticket to each selected track, one
//! at a time, pausing before every write to stay under the tracker's rate
//! limit.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** The runner sequences calls between the domain
//! rules in [`broadcast`] and the [`TrackDirectory`] / [`IssueTracker`] ports.
//! It contains no HTTP code of its own.
//!
//! ## Output
//!
//! User-facing output (the preview, created issue URLs) goes to the writer
//! passed to [`Runner::run`]. Per-track failures are reported as `tracing`
//! error events, never on the output writer.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use broadcast::{
    DirectoryError, ErrorTier, IssueTracker, IssueTrackerError, RunId, RunMode, Ticket, Track,
    TrackDirectory, TrackId, TrackSelection,
};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

pub mod report;

pub use report::{Outcome, RunReport, TrackOutcome};

/// Pause before each issue submission when none is configured.
pub const DEFAULT_SUBMIT_INTERVAL: Duration = Duration::from_millis(1200);

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("Submission to track '{track}' failed: {source}")]
    Submission {
        track: TrackId,
        #[source]
        source: IssueTrackerError,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub mode: RunMode,
    pub selection: TrackSelection,
    /// Fixed pause before each submission.
    pub submit_interval: Duration,
}

impl RunnerConfig {
    /// Settings for `mode` over `selection`, paced by
    /// [`DEFAULT_SUBMIT_INTERVAL`].
    pub fn new(mode: RunMode, selection: TrackSelection) -> Self {
        Self {
            mode,
            selection,
            submit_interval: DEFAULT_SUBMIT_INTERVAL,
        }
    }

    /// Overrides the pause before each submission.
    pub fn with_submit_interval(mut self, interval: Duration) -> Self {
        self.submit_interval = interval;
        self
    }
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Drives one run over injected [`TrackDirectory`] and [`IssueTracker`]
/// implementations.
pub struct Runner {
    directory: Arc<dyn TrackDirectory>,
    tracker: Arc<dyn IssueTracker>,
    config: RunnerConfig,
}

impl Runner {
    /// Creates a runner; nothing is fetched until [`Runner::run`].
    pub fn new(
        directory: Arc<dyn TrackDirectory>,
        tracker: Arc<dyn IssueTracker>,
        config: RunnerConfig,
    ) -> Self {
        Self {
            directory,
            tracker,
            config,
        }
    }

    /// Runs once: fetch tracks, then preview or submit.
    ///
    /// Returns an error only for failures that end the run (directory fetch,
    /// transport failure while submitting, output failing during a preview).
    /// Issues the tracker refused are logged and recorded in the report.
    #[instrument(skip_all, fields(run_id = %run_id, mode = ?self.config.mode))]
    pub async fn run<W: Write>(
        &self,
        run_id: RunId,
        ticket: &Ticket,
        out: &mut W,
    ) -> Result<RunReport, RunError> {
        let tracks = self.directory.list_tracks().await?;
        info!(
            tracks = tracks.len(),
            exercise = self.config.selection.exercise(),
            "Fetched track directory"
        );

        let mut report = RunReport::new(run_id, self.config.mode);
        match self.config.mode {
            RunMode::DryRun => self.preview(&tracks, ticket, out, &mut report)?,
            RunMode::Submit => self.submit(run_id, &tracks, ticket, out, &mut report).await?,
        }
        Ok(report)
    }

    fn preview<W: Write>(
        &self,
        tracks: &[Track],
        ticket: &Ticket,
        out: &mut W,
        report: &mut RunReport,
    ) -> Result<(), RunError> {
        write!(out, "Title:\n{}\n\nBody:\n{}\n\n", ticket.title, ticket.body)?;
        writeln!(out, "This issue would be submitted to the following tracks:")?;

        for track in self.config.selection.select(tracks, RunMode::DryRun) {
            let status = if track.active { "" } else { " (inactive)" };
            writeln!(out, "- {}{}", track.id, status)?;
            report.record(
                &track.id,
                Outcome::Listed {
                    active: track.active,
                },
            );
        }

        writeln!(out, "\nTo submit, rerun the command with the --yes flag.")?;
        Ok(())
    }

    /// Output failures are logged, not returned; later tracks are still
    /// submitted.
    async fn submit<W: Write>(
        &self,
        run_id: RunId,
        tracks: &[Track],
        ticket: &Ticket,
        out: &mut W,
        report: &mut RunReport,
    ) -> Result<(), RunError> {
        for track in tracks {
            if !self.config.selection.includes(track, RunMode::Submit) {
                debug!(track = %track.id, active = track.active, "Skipping track");
                continue;
            }

            tokio::time::sleep(self.config.submit_interval).await;

            match self.tracker.create_issue(track, ticket).await {
                Ok(url) => {
                    if let Err(e) = writeln!(out, "{url}") {
                        warn!(
                            run_id = %run_id,
                            track = %track.id,
                            %url,
                            "Failed to print issue URL: {e}"
                        );
                    }
                    report.record(&track.id, Outcome::Created { url });
                }
                Err(err) if err.tier() == ErrorTier::Recoverable => {
                    error!(
                        run_id = %run_id,
                        track = %track.id,
                        language = %track.language,
                        status = err.status(),
                        "{} {}",
                        track.language,
                        err
                    );
                    report.record(
                        &track.id,
                        Outcome::Failed {
                            reason: err.to_string(),
                        },
                    );
                }
                Err(err) => {
                    return Err(RunError::Submission {
                        track: track.id.clone(),
                        source: err,
                    });
                }
            }
        }
        Ok(())
    }
}
