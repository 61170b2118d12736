//! Top-level error and error-tier types for the Blazon domain.
//!
//! [`BlazonError`] covers problems with the input the user supplied.
//! Adapter-level errors ([`crate::DirectoryError`], [`crate::IssueTrackerError`])
//! live next to the port traits that produce them.
//!
//! [`ErrorTier`] says whether the run can carry on past an issue tracker
//! error. Directory errors need no tier: they always end the run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error tiers
// ---------------------------------------------------------------------------

/// Whether a failure ends the run or only the current track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorTier {
    /// The run cannot continue; the process exits non-zero.
    Fatal,
    /// Logged against the current track; the loop moves on to the next one.
    Recoverable,
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Errors in the ticket the user asked to submit.
///
/// Always [`ErrorTier::Fatal`]: nothing is sent when the ticket is invalid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlazonError {
    /// Title or body was empty and no ticket file was given.
    #[error("Both a title and a body are required when no file is given")]
    IncompleteTicket,

    /// The ticket file has no newline, so there is no subject line to split off.
    #[error("First line of file must contain the subject line of the issue.")]
    MissingSubjectLine,
}
