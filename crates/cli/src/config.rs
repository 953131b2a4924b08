//! Command-line arguments and their validation into a [`ReportConfig`].
//!
//! Every flag has an environment-variable fallback so the binary can run
//! unattended from a scheduled workflow. Validation happens before any
//! network call; a rejected configuration never reaches GitHub.

use std::time::Duration;

use chrono::{Days, Months, NaiveDate};
use clap::{Parser, ValueEnum};
use contributions::{
    parse_start_date, Credential, OrganizationName, OwnerLogin, ProjectNumber, ReportError,
    RepositoryName, Username,
};
use github::{GithubClientConfig, DEFAULT_GRAPHQL_ENDPOINT};

/// Days covered by a report when no start date is given.
pub const DEFAULT_WINDOW_DAYS: u64 = 7;

/// GitHub rejects a contributions window spanning more than a year.
pub const MAX_WINDOW_MONTHS: u32 = 12;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, compact.
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Collects weekly GitHub contributions and files them as an issue.
#[derive(Debug, Parser)]
#[command(name = "weekly-report", version, about)]
pub struct Cli {
    /// Access token of an account to report on. Repeat for several accounts.
    #[arg(
        long = "token",
        env = "GITHUB_TOKENS",
        value_delimiter = ',',
        hide_env_values = true,
        required = true
    )]
    pub tokens: Vec<String>,

    /// First day of the report (YYYY-MM-DD). Defaults to seven days ago.
    #[arg(long, env = "REPORT_SINCE")]
    pub since: Option<String>,

    /// Organization the tracking repository and project belong to.
    /// Defaults to the owner.
    #[arg(long, env = "REPORT_ORGANIZATION")]
    pub organization: Option<String>,

    /// Login owning the tracking repository and project board.
    #[arg(long, env = "REPORT_OWNER")]
    pub owner: Option<String>,

    /// Tracking repository, as `name` or `owner/name`.
    #[arg(long, env = "REPORT_REPOSITORY")]
    pub repository: Option<String>,

    /// Assignee of the report issue. Defaults to the first account's login.
    #[arg(long, env = "REPORT_ASSIGNEE")]
    pub assignee: Option<String>,

    /// Project board number to add the issue to.
    #[arg(long, env = "REPORT_PROJECT_NUMBER")]
    pub project_number: Option<u32>,

    /// GraphQL endpoint.
    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = DEFAULT_GRAPHQL_ENDPOINT)]
    pub endpoint: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "GITHUB_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Print the report instead of filing it.
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, print the fetched records as JSON instead of markdown.
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Drop accounts whose fetch fails instead of failing the run.
    #[arg(long)]
    pub keep_going: bool,

    /// Log output format.
    #[arg(long, env = "REPORT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Enable debug logging unless RUST_LOG is set.
    #[arg(long)]
    pub debug: bool,

    /// Export spans to an OTLP collector (OTEL_EXPORTER_OTLP_ENDPOINT).
    #[arg(long)]
    pub otel: bool,
}

/// Where the report issue is filed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    pub organization: OrganizationName,
    pub owner: OwnerLogin,
    pub repository: RepositoryName,
    pub assignee: Option<Username>,
    pub project_number: Option<ProjectNumber>,
}

/// What to do with the rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Markdown,
    Json,
    Publish(PublishTarget),
}

/// Validated configuration of one run.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub credentials: Vec<Credential>,
    pub since: NaiveDate,
    pub output: Output,
    pub keep_going: bool,
    pub client: GithubClientConfig,
}

impl ReportConfig {
    /// Validates parsed arguments. `today` anchors the default start date.
    pub fn from_cli(cli: &Cli, today: NaiveDate) -> Result<Self, ReportError> {
        let credentials = cli
            .tokens
            .iter()
            .filter_map(|t| Credential::new(t.as_str()))
            .collect::<Vec<_>>();
        if credentials.is_empty() {
            return Err(ReportError::configuration("at least one token is required"));
        }

        let since = match &cli.since {
            Some(value) => parse_start_date(value)?,
            None => today
                .checked_sub_days(Days::new(DEFAULT_WINDOW_DAYS))
                .ok_or_else(|| ReportError::configuration("cannot compute default start date"))?,
        };
        if since > today {
            return Err(ReportError::configuration(format!(
                "start date {since} is in the future"
            )));
        }
        // The window ends now, so a start exactly a year back already spans more than a year.
        let earliest = today
            .checked_sub_months(Months::new(MAX_WINDOW_MONTHS))
            .ok_or_else(|| ReportError::configuration("cannot compute earliest start date"))?;
        if since <= earliest {
            return Err(ReportError::configuration(format!(
                "start date {since} is more than a year before {today}"
            )));
        }

        if cli.timeout_secs == 0 {
            return Err(ReportError::configuration("timeout must be at least one second"));
        }

        let output = if cli.dry_run {
            if cli.json {
                Output::Json
            } else {
                Output::Markdown
            }
        } else {
            Output::Publish(publish_target(cli)?)
        };

        Ok(Self {
            credentials,
            since,
            output,
            keep_going: cli.keep_going,
            client: GithubClientConfig {
                endpoint: cli.endpoint.clone(),
                timeout: Duration::from_secs(cli.timeout_secs),
                ..GithubClientConfig::default()
            },
        })
    }
}

fn publish_target(cli: &Cli) -> Result<PublishTarget, ReportError> {
    let repository = cli
        .repository
        .as_deref()
        .ok_or_else(|| ReportError::configuration("--repository is required unless --dry-run"))?;

    // `owner/name` carries its own owner.
    let (owner, name) = match repository.split_once('/') {
        Some((owner, name)) => {
            if let Some(flag) = cli.owner.as_deref() {
                if flag != owner {
                    return Err(ReportError::configuration(format!(
                        "--owner {flag} conflicts with repository {repository}"
                    )));
                }
            }
            (owner, name)
        }
        None => {
            let owner = cli.owner.as_deref().ok_or_else(|| {
                ReportError::configuration("--owner is required when --repository has no owner")
            })?;
            (owner, repository)
        }
    };

    let owner = OwnerLogin::new(owner).ok_or_else(|| ReportError::configuration("owner is empty"))?;
    let repository = RepositoryName::new(name)
        .ok_or_else(|| ReportError::configuration("repository name is empty"))?;
    let organization = match cli.organization.as_deref() {
        Some(org) => OrganizationName::new(org)
            .ok_or_else(|| ReportError::configuration("organization is empty"))?,
        None => OrganizationName::new(owner.as_str())
            .ok_or_else(|| ReportError::configuration("organization is empty"))?,
    };

    let project_number = match cli.project_number {
        Some(n) => Some(
            ProjectNumber::new(n)
                .ok_or_else(|| ReportError::configuration("project number must be positive"))?,
        ),
        None => None,
    };

    Ok(PublishTarget {
        organization,
        owner,
        repository,
        assignee: cli.assignee.as_deref().and_then(Username::new),
        project_number,
    })
}
