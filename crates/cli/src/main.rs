//! Weekly report CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: flags with environment fallbacks, validated
//!    into a [`config::ReportConfig`] before any network call.
//! 2. **Wire observability**: `tracing-subscriber` with a pretty or JSON
//!    layer on stderr, plus an optional OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure**: one `GithubClient` per token, injected
//!    into the `workflow` functions.
//! 4. **Emit the result**: the markdown report (or JSON records) on
//!    `--dry-run`, otherwise the URL of the filed issue.
//!
//! Any failure exits non-zero.

mod config;
mod observability;
mod run;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use contributions::{Clock, ReportError, ReportRunId, SystemClock};
use tracing::{error, info_span, Instrument};

use crate::config::{Cli, ReportConfig};
use crate::observability::{init_tracing, shutdown_tracing, TracingConfig};
use crate::run::{run, RunOutcome};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = TracingConfig {
        format: cli.log_format,
        debug: cli.debug,
        otel: cli.otel,
    };
    if let Err(err) = init_tracing(&tracing_config) {
        eprintln!("error: failed to initialise tracing: {err:#}");
        return ExitCode::FAILURE;
    }

    let run_id = ReportRunId::new_random();
    let result = execute(&cli)
        .instrument(info_span!("report_run", run_id = %run_id))
        .await;

    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(run_id = %run_id, error = %format!("{err:#}"), "Report run failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    };

    shutdown_tracing();
    code
}

async fn execute(cli: &Cli) -> anyhow::Result<()> {
    let clock = SystemClock;
    let config =
        ReportConfig::from_cli(cli, clock.today()).context("invalid configuration")?;

    match run(&config, &clock).await {
        Ok(RunOutcome::Report(markdown)) => {
            print!("{markdown}");
            Ok(())
        }
        Ok(RunOutcome::Records(accounts)) => {
            let json = serde_json::to_string_pretty(&accounts)
                .context("failed to serialise contribution records")?;
            println!("{json}");
            Ok(())
        }
        Ok(RunOutcome::Published(published)) => {
            println!("{}", published.issue.url);
            Ok(())
        }
        // The issue exists even though the board link failed.
        Err(ReportError::ProjectLinkFailed { issue_url, source }) => {
            println!("{issue_url}");
            Err(anyhow::Error::new(*source).context(format!(
                "issue {issue_url} was created but could not be added to the project"
            )))
        }
        Err(err) => Err(anyhow::Error::new(err).context("report run failed")),
    }
}
