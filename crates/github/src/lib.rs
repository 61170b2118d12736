//! Blazon GitHub infrastructure adapter.
//!
//! Implements [`broadcast::IssueTracker`] against the GitHub REST API: one
//! `POST /repos/{organization}/x{track}/issues` per track, authenticated with
//! a static personal access token.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. Request
//! construction, authentication headers, and response classification live
//! here; the runner only sees [`broadcast::IssueTrackerError`] and decides
//! from its tier whether to continue.
//!
//! ## Response handling
//!
//! | Response | Result |
//! |----------|--------|
//! | 200 / 201 with `html_url` | `Ok(IssueUrl)` |
//! | 200 / 201 without a usable `html_url` | `IssueTrackerError::Decode` |
//! | any other status | `IssueTrackerError::Rejected` carrying the body text |
//! | request never completed | `IssueTrackerError::Transport` |

use async_trait::async_trait;
use broadcast::{IssueTracker, IssueTrackerError, IssueUrl, Ticket, Track, TrackId};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument};

/// GitHub REST API root used when no other is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Owner of the track repositories.
pub const DEFAULT_ORGANIZATION: &str = "exercism";

/// Environment variable holding the access token.
pub const TOKEN_ENV_VAR: &str = "BLAZON_GITHUB_API_TOKEN";

/// User agent sent with every request; GitHub rejects requests without one.
pub const USER_AGENT: &str = "exercism/blazon";

const GITHUB_JSON: &str = "application/vnd.github+json";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// A GitHub access token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wraps a token, returning `None` if it is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

/// Where and as whom issues are created.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub api_base_url: String,
    pub organization: String,
    /// Sent as `Authorization: token <value>`. Requests go out
    /// unauthenticated when absent, which GitHub answers with 401.
    pub token: Option<ApiToken>,
}

impl GithubConfig {
    /// Configuration for the public API and the default organization.
    pub fn new(token: Option<ApiToken>) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            token,
        }
    }

    /// Points at another API host, e.g. GitHub Enterprise or a mock server.
    /// A trailing slash is ignored.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Owner of the `x<track>` repositories.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    /// Issues endpoint of the repository backing `track`.
    pub fn issues_url(&self, track: &TrackId) -> String {
        format!(
            "{}/repos/{}/x{}/issues",
            self.api_base_url.trim_end_matches('/'),
            self.organization,
            track
        )
    }
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CreatedIssue {
    html_url: String,
}

/// [`IssueTracker`] that opens issues on GitHub.
#[derive(Debug, Clone)]
pub struct GithubIssueTracker {
    client: reqwest::Client,
    config: GithubConfig,
}

impl GithubIssueTracker {
    /// Creates a tracker with its own HTTP client.
    pub fn new(config: GithubConfig) -> Result<Self, IssueTrackerError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| IssueTrackerError::Transport {
                message: e.to_string(),
            })?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a tracker that shares an existing client.
    pub fn with_client(client: reqwest::Client, config: GithubConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl IssueTracker for GithubIssueTracker {
    #[instrument(skip(self, track, ticket), fields(track = %track.id))]
    async fn create_issue(
        &self,
        track: &Track,
        ticket: &Ticket,
    ) -> Result<IssueUrl, IssueTrackerError> {
        let url = self.config.issues_url(&track.id);
        debug!(%url, "Creating issue");

        let mut request = self.client.post(&url).header(ACCEPT, GITHUB_JSON).json(ticket);
        if let Some(token) = &self.config.token {
            request = request.header(AUTHORIZATION, format!("token {}", token.expose()));
        }

        let response = request
            .send()
            .await
            .map_err(|e| IssueTrackerError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            let bytes = response.bytes().await.map_err(|e| IssueTrackerError::Decode {
                message: e.to_string(),
            })?;
            let created: CreatedIssue =
                serde_json::from_slice(&bytes).map_err(|e| IssueTrackerError::Decode {
                    message: e.to_string(),
                })?;
            return IssueUrl::new(created.html_url).ok_or_else(|| IssueTrackerError::Decode {
                message: "empty html_url".to_string(),
            });
        }

        let body = response.text().await.map_err(|e| IssueTrackerError::Decode {
            message: e.to_string(),
        })?;
        Err(IssueTrackerError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
