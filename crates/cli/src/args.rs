//! Command-line arguments.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Flags that earlier releases accepted with a single dash (`-title`, `-yes`).
const LEGACY_FLAGS: &[&str] = &[
    "title", "body", "file", "labels", "exercise", "yes", "version",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Submit an issue to the repository of every Exercism track.
///
/// Without --yes only a preview is printed.
#[derive(Debug, Parser)]
#[command(name = "blazon", disable_version_flag = true)]
pub struct Args {
    /// The title of your issue.
    #[arg(long, default_value = "")]
    pub title: String,

    /// The body of your issue.
    #[arg(long, default_value = "")]
    pub body: String,

    /// The file containing the title and body of the issue (overrides --title and --body).
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// A comma-separated list of labels to add.
    #[arg(long, default_value = "")]
    pub labels: String,

    /// The slug of the relevant exercise (optional). If no exercise is passed,
    /// the issue will be submitted to all active tracks.
    #[arg(long, default_value = "")]
    pub exercise: String,

    /// Actually submit issues. Without this flag, a dry run is performed.
    #[arg(long)]
    pub yes: bool,

    /// Version of binary.
    #[arg(long)]
    pub version: bool,

    /// Track directory endpoint.
    #[arg(long, env = "BLAZON_TRACKS_URL", default_value = directory::DEFAULT_TRACKS_URL)]
    pub tracks_url: String,

    /// GitHub REST API root.
    #[arg(long, env = "BLAZON_GITHUB_API_URL", default_value = github::DEFAULT_API_BASE_URL)]
    pub api_url: String,

    /// Owner of the track repositories.
    #[arg(long, default_value = github::DEFAULT_ORGANIZATION)]
    pub organization: String,

    /// Pause before each submission, in milliseconds.
    #[arg(long, default_value_t = runner::DEFAULT_SUBMIT_INTERVAL.as_millis() as u64)]
    pub interval_ms: u64,

    /// Log line format on stderr.
    #[arg(long, value_enum, env = "BLAZON_LOG_FORMAT", default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Rewrites single-dash long flags (`-title x`, `-file=a.md`) to their
/// double-dash form so existing scripts keep working. Nothing after a bare
/// `--` is touched.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut rewriting = true;
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 || !rewriting {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                rewriting = false;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') && is_legacy_flag(rest) => {
                    OsString::from(format!("-{text}"))
                }
                _ => arg,
            }
        })
        .collect()
}

fn is_legacy_flag(rest: &str) -> bool {
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LEGACY_FLAGS.contains(&name)
}
