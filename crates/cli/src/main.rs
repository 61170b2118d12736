//! Blazon CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse arguments**, accepting the single-dash flags of earlier releases.
//! 2. **Wire observability**: `tracing-subscriber` on stderr, optionally with
//!    an OpenTelemetry OTLP exporter.
//! 3. **Validate configuration**: build the ticket, resolve the run mode, and
//!    check the access token before touching the network.
//! 4. **Construct infrastructure**: one shared `reqwest::Client` behind an
//!    `HttpTrackDirectory` and a `GithubIssueTracker`, injected into `Runner`.
//!
//! Exit status is 1 for missing input or any fatal error. Issues that GitHub
//! refuses for individual tracks are logged and do not affect it.
//!
//! Once the subscriber is installed, fatal errors are reported through
//! `tracing` like every other log line; only a failure to install it falls
//! back to a bare `eprintln!`.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use broadcast::RunId;
use clap::{CommandFactory, Parser};
use directory::HttpTrackDirectory;
use github::{GithubIssueTracker, TOKEN_ENV_VAR, USER_AGENT};
use runner::{RunReport, Runner, RunnerConfig};
use tracing::{error, info};

mod args;
mod config;
mod observability;

use args::Args;
use config::{Config, ConfigError};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse_from(args::normalize_legacy_flags(std::env::args_os()));

    if args.version {
        println!("Blazon version: {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let telemetry = match observability::init(args.log_format) {
        Ok(telemetry) => telemetry,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let code = match Config::from_args(&args, std::env::var(TOKEN_ENV_VAR).ok()) {
        Ok(config) => {
            let run_id = RunId::new_random();
            match run(run_id, config).await {
                Ok(report) => {
                    info!(
                        run_id = %report.run_id,
                        mode = ?report.mode,
                        listed = report.listed(),
                        created = report.created(),
                        failed = report.failed(),
                        "Run complete"
                    );
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(run_id = %run_id, "{e:#}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(ConfigError::MissingTicketInput) => {
            let _ = Args::command().write_help(&mut io::stderr());
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    };

    telemetry.shutdown();
    code
}

async fn run(run_id: RunId, config: Config) -> anyhow::Result<RunReport> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")?;

    let directory = Arc::new(HttpTrackDirectory::with_client(
        client.clone(),
        config.tracks_url,
    ));
    let tracker = Arc::new(GithubIssueTracker::with_client(client, config.github));
    let runner = Runner::new(
        directory,
        tracker,
        RunnerConfig::new(config.mode, config.selection)
            .with_submit_interval(config.submit_interval),
    );

    let mut stdout = io::stdout().lock();
    let report = runner
        .run(run_id, &config.ticket, &mut stdout)
        .await
        .context("Run aborted")?;
    Ok(report)
}
