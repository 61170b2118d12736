//! Blazon track directory adapter.
//!
//! Implements [`broadcast::TrackDirectory`] by fetching the public track
//! listing with one unauthenticated `GET` and decoding
//! `{"tracks": [{"id", "language", "active", "problems": [{"slug"}]}]}`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport and payload decoding live here. The
//! runner sees only [`broadcast::TrackDirectory`].

use async_trait::async_trait;
use broadcast::{DirectoryError, Track, TrackDirectory};
use serde::Deserialize;
use tracing::{debug, instrument};

/// Public track listing used when no other endpoint is configured.
pub const DEFAULT_TRACKS_URL: &str = "http://x.exercism.io/v3/tracks";

/// User agent sent with every request.
pub const USER_AGENT: &str = "exercism/blazon";

#[derive(Debug, Deserialize)]
struct TracksPayload {
    tracks: Vec<Track>,
}

/// [`TrackDirectory`] backed by an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpTrackDirectory {
    client: reqwest::Client,
    url: String,
}

impl HttpTrackDirectory {
    /// Creates a directory reading from `url` with its own client.
    pub fn new(url: impl Into<String>) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DirectoryError::Transport {
                message: e.to_string(),
            })?;
        Ok(Self::with_client(client, url))
    }

    /// Creates a directory that shares an existing client.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl TrackDirectory for HttpTrackDirectory {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn list_tracks(&self) -> Result<Vec<Track>, DirectoryError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DirectoryError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| DirectoryError::Transport {
            message: e.to_string(),
        })?;
        let payload: TracksPayload =
            serde_json::from_slice(&bytes).map_err(|e| DirectoryError::Decode {
                message: e.to_string(),
            })?;

        debug!(count = payload.tracks.len(), "Decoded track listing");
        Ok(payload.tracks)
    }
}
