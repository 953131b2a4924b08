//! Contribution Fetcher.
//!
//! For each credential: resolve the authenticated login, then query its
//! contributions since the start date. Per-credential pipelines run
//! concurrently; results are returned in credential order.

use chrono::NaiveDate;
use contributions::{
    AccountContributions, ContributionSource, Credential, IdentityResolver, ReportError,
};
use futures::future::{join_all, try_join_all};
use tracing::{debug, info, info_span, Instrument};

/// Fetches the contributions of one account.
pub async fn fetch_account<C>(client: &C, since: NaiveDate) -> Result<AccountContributions, ReportError>
where
    C: IdentityResolver + ContributionSource,
{
    let username = client.authenticated_username().await?;
    debug!(username = %username, "Resolved authenticated user");

    let record = client.contributions(&username, since).await?;
    info!(
        username = %username,
        issue_repositories = record.issue_contributions_by_repository.as_ref().map_or(0, Vec::len),
        pull_request_repositories = record
            .pull_request_contributions_by_repository
            .as_ref()
            .map_or(0, Vec::len),
        review_repositories = record
            .pull_request_review_contributions_by_repository
            .as_ref()
            .map_or(0, Vec::len),
        "Fetched contributions"
    );

    Ok(AccountContributions { username, record })
}

/// Fetches the contributions of every credential.
///
/// `connect` builds the client bound to one credential. The first failure of
/// any account fails the whole batch; see [`fetch_contributions_settled`] to
/// keep the accounts that succeeded.
pub async fn fetch_contributions<C, F>(
    credentials: &[Credential],
    since: NaiveDate,
    connect: F,
) -> Result<Vec<AccountContributions>, ReportError>
where
    C: IdentityResolver + ContributionSource,
    F: Fn(&Credential) -> Result<C, ReportError>,
{
    info!(accounts = credentials.len(), since = %since, "Fetching contributions");
    try_join_all(account_pipelines(credentials, since, &connect)).await
}

/// Like [`fetch_contributions`], but waits for every account and returns one
/// result per credential, in credential order.
pub async fn fetch_contributions_settled<C, F>(
    credentials: &[Credential],
    since: NaiveDate,
    connect: F,
) -> Vec<Result<AccountContributions, ReportError>>
where
    C: IdentityResolver + ContributionSource,
    F: Fn(&Credential) -> Result<C, ReportError>,
{
    info!(accounts = credentials.len(), since = %since, "Fetching contributions (settled)");
    join_all(account_pipelines(credentials, since, &connect)).await
}

fn account_pipelines<'a, C, F>(
    credentials: &'a [Credential],
    since: NaiveDate,
    connect: &'a F,
) -> impl Iterator<Item = impl std::future::Future<Output = Result<AccountContributions, ReportError>> + 'a>
where
    C: IdentityResolver + ContributionSource + 'a,
    F: Fn(&Credential) -> Result<C, ReportError>,
{
    credentials.iter().enumerate().map(move |(account, credential)| {
        let client = connect(credential);
        async move {
            let client = client?;
            fetch_account(&client, since).await
        }
        .instrument(info_span!("fetch_account", account))
    })
}
