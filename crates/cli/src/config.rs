//! Validated run configuration built from the parsed arguments.
//!
//! Everything the binary needs is resolved here, before any network call:
//! the ticket (reading the ticket file if one was given), the run mode and
//! track selection, and the GitHub settings. Anything missing or unreadable
//! is reported as a [`ConfigError`] and ends the process.

use std::path::PathBuf;
use std::time::Duration;

use broadcast::{BlazonError, Labels, RunMode, Ticket, TrackSelection};
use github::{ApiToken, GithubConfig};
use thiserror::Error;

use crate::args::Args;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither a file nor both title and body were supplied; usage is printed.
    #[error("Either --file, or both --title and --body, must be given")]
    MissingTicketInput,

    #[error("Failed to read ticket file '{}': {source}", path.display())]
    TicketFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Ticket(#[from] BlazonError),

    #[error("BLAZON_GITHUB_API_TOKEN must be set to submit issues")]
    MissingToken,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub ticket: Ticket,
    pub mode: RunMode,
    pub selection: TrackSelection,
    pub submit_interval: Duration,
    pub tracks_url: String,
    pub github: GithubConfig,
}

impl Config {
    /// Builds the configuration from `args` and the raw value of the token
    /// environment variable.
    ///
    /// The token is only required when actually submitting.
    pub fn from_args(args: &Args, token: Option<String>) -> Result<Self, ConfigError> {
        let ticket = load_ticket(args)?;
        let mode = RunMode::from_confirmation(args.yes);

        let token = token.and_then(ApiToken::new);
        if mode == RunMode::Submit && token.is_none() {
            return Err(ConfigError::MissingToken);
        }

        let github = GithubConfig::new(token)
            .with_api_base_url(args.api_url.clone())
            .with_organization(args.organization.clone());

        Ok(Self {
            ticket,
            mode,
            selection: TrackSelection::new(args.exercise.clone()),
            submit_interval: Duration::from_millis(args.interval_ms),
            tracks_url: args.tracks_url.clone(),
            github,
        })
    }
}

fn load_ticket(args: &Args) -> Result<Ticket, ConfigError> {
    let labels = Labels::parse(&args.labels);

    let Some(path) = &args.file else {
        if args.title.is_empty() || args.body.is_empty() {
            return Err(ConfigError::MissingTicketInput);
        }
        return Ok(Ticket::new(args.title.clone(), args.body.clone(), labels)?);
    };

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::TicketFile {
        path: path.clone(),
        source,
    })?;
    Ok(Ticket::from_document(&content, labels)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    fn args(argv: &[&str]) -> Args {
        let mut full = vec!["blazon"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn flags_build_a_dry_run() {
        let config = Config::from_args(
            &args(&["--title", "T", "--body", "B", "--labels", "a, b ,c"]),
            None,
        )
        .unwrap();

        assert_eq!(config.mode, RunMode::DryRun);
        assert_eq!(config.ticket.title, "T");
        assert_eq!(config.ticket.labels.as_slice(), ["a", "b", "c"]);
        assert_eq!(config.submit_interval, Duration::from_millis(1200));
        assert!(config.github.token.is_none());
    }

    #[test]
    fn file_overrides_title_and_body() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Subject\n\nline1\nline2\n").unwrap();
        let path = file.path().to_str().unwrap();

        let config = Config::from_args(
            &args(&["--title", "ignored", "--body", "ignored", "--file", path]),
            None,
        )
        .unwrap();

        assert_eq!(config.ticket.title, "Subject");
        assert_eq!(config.ticket.body, "line1\nline2");
    }

    #[test]
    fn missing_title_or_body_requires_usage() {
        let err = Config::from_args(&args(&["--title", "T"]), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingTicketInput));

        let err = Config::from_args(&args(&[]), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingTicketInput));
    }

    #[test]
    fn unreadable_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.md");

        let err = Config::from_args(&args(&["--file", missing.to_str().unwrap()]), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::TicketFile { .. }));
    }

    #[test]
    fn file_without_subject_line_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "no newline here").unwrap();

        let err = Config::from_args(&args(&["--file", file.path().to_str().unwrap()]), None)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Ticket(BlazonError::MissingSubjectLine)
        ));
    }

    #[test]
    fn submitting_requires_a_token() {
        let argv = args(&["--title", "T", "--body", "B", "--yes"]);

        let err = Config::from_args(&argv, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));

        let err = Config::from_args(&argv, Some(String::new())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken));

        let config = Config::from_args(&argv, Some("ghp_x".into())).unwrap();
        assert_eq!(config.mode, RunMode::Submit);
        assert!(config.github.token.is_some());
    }

    #[test]
    fn exercise_and_endpoints_flow_through() {
        let config = Config::from_args(
            &args(&[
                "--title",
                "T",
                "--body",
                "B",
                "--exercise",
                "two-fer",
                "--tracks-url",
                "http://localhost:1/v3/tracks",
                "--api-url",
                "http://localhost:2",
                "--organization",
                "acme",
                "--interval-ms",
                "0",
            ]),
            None,
        )
        .unwrap();

        assert_eq!(config.selection.exercise(), "two-fer");
        assert_eq!(config.tracks_url, "http://localhost:1/v3/tracks");
        assert_eq!(config.github.api_base_url, "http://localhost:2");
        assert_eq!(config.github.organization, "acme");
        assert_eq!(config.submit_interval, Duration::ZERO);
    }
}
