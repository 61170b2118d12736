//! Port traits implemented by the infrastructure crates.
//!
//! The runner only ever talks to a [`TrackDirectory`] and an [`IssueTracker`];
//! `directory` and `github` supply the HTTP implementations, tests supply
//! in-memory fakes.

use async_trait::async_trait;
use thiserror::Error;

use crate::{ErrorTier, IssueUrl, Ticket, Track};

// ---------------------------------------------------------------------------
// Track directory
// ---------------------------------------------------------------------------

/// Failure to obtain the list of tracks.
///
/// Always fatal: with no tracks there is nothing to target.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The request could not be sent or the response could not be read.
    #[error("Track directory request failed: {message}")]
    Transport { message: String },

    /// The directory answered with a non-success status.
    #[error("Track directory returned HTTP {status}")]
    Status { status: u16 },

    /// The response body was not a valid track listing.
    #[error("Track directory response could not be decoded: {message}")]
    Decode { message: String },
}

/// Source of the tracks an issue can be submitted to.
#[async_trait]
pub trait TrackDirectory: Send + Sync {
    /// Returns every track in directory order.
    async fn list_tracks(&self) -> Result<Vec<Track>, DirectoryError>;
}

// ---------------------------------------------------------------------------
// Issue tracker
// ---------------------------------------------------------------------------

/// Failure to create an issue on one track's repository.
#[derive(Debug, Error)]
pub enum IssueTrackerError {
    /// The request could not be sent at all.
    #[error("Issue request failed: {message}")]
    Transport { message: String },

    /// The tracker answered with a status other than 200 or 201.
    #[error("ERROR ({status}) {body}")]
    Rejected { status: u16, body: String },

    /// The tracker accepted the issue but its reply could not be decoded.
    #[error("Issue response could not be decoded: {message}")]
    Decode { message: String },
}

impl IssueTrackerError {
    /// Transport failures end the run; anything the server answered only
    /// fails the current track.
    pub fn tier(&self) -> ErrorTier {
        match self {
            Self::Transport { .. } => ErrorTier::Fatal,
            Self::Rejected { .. } | Self::Decode { .. } => ErrorTier::Recoverable,
        }
    }

    /// HTTP status attached to the failure, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

/// Creates issues on a track's repository.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Opens `ticket` as a new issue on `track` and returns its browser URL.
    async fn create_issue(&self, track: &Track, ticket: &Ticket)
        -> Result<IssueUrl, IssueTrackerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_failures_are_fatal() {
        let transport = IssueTrackerError::Transport {
            message: "connection refused".into(),
        };
        let rejected = IssueTrackerError::Rejected {
            status: 422,
            body: "{}".into(),
        };
        let decode = IssueTrackerError::Decode {
            message: "missing field".into(),
        };
        assert_eq!(transport.tier(), ErrorTier::Fatal);
        assert_eq!(rejected.tier(), ErrorTier::Recoverable);
        assert_eq!(decode.tier(), ErrorTier::Recoverable);
        assert_eq!(rejected.status(), Some(422));
        assert_eq!(decode.status(), None);
    }
}
