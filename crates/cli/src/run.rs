//! One report run: fetch every account, render, then print or publish.

use contributions::{
    assemble_report, AccountContributions, Clock, Credential, IssueRequest, PublishedIssue,
    ReportError,
};
use github::{GithubClient, GithubClientConfig};
use tracing::{info, warn};
use workflow::{create_issue, fetch_contributions, fetch_contributions_settled};

use crate::config::{Output, PublishTarget, ReportConfig};

/// Result of a run, for the caller to print.
#[derive(Debug)]
pub enum RunOutcome {
    Report(String),
    Records(Vec<AccountContributions>),
    Published(PublishedIssue),
}

pub async fn run(config: &ReportConfig, clock: &dyn Clock) -> Result<RunOutcome, ReportError> {
    let fetched = fetch(config).await?;
    let (credentials, accounts): (Vec<Credential>, Vec<AccountContributions>) =
        fetched.into_iter().unzip();
    let report = assemble_report(&accounts);

    match &config.output {
        Output::Markdown => Ok(RunOutcome::Report(report)),
        Output::Json => Ok(RunOutcome::Records(accounts)),
        Output::Publish(target) => {
            let request = issue_request(target, &accounts, report)?;
            // Issues are filed with the token of the first account that fetched.
            let credential = credentials
                .first()
                .ok_or_else(|| ReportError::configuration("no account was fetched"))?;
            let client = connect(credential, &config.client)?;
            let published = create_issue(&client, clock, &request).await?;
            info!(url = %published.issue.url, number = published.issue.number, "Report published");
            Ok(RunOutcome::Published(published))
        }
    }
}

/// Fetched accounts paired with the credential that fetched them, in
/// credential order.
async fn fetch(
    config: &ReportConfig,
) -> Result<Vec<(Credential, AccountContributions)>, ReportError> {
    let connect_with = |credential: &Credential| connect(credential, &config.client);

    if !config.keep_going {
        let accounts =
            fetch_contributions(&config.credentials, config.since, connect_with).await?;
        return Ok(config.credentials.iter().cloned().zip(accounts).collect());
    }

    let results =
        fetch_contributions_settled(&config.credentials, config.since, connect_with).await;

    let mut fetched = Vec::new();
    let mut first_error = None;
    for (index, (credential, result)) in config.credentials.iter().zip(results).enumerate() {
        match result {
            Ok(account) => fetched.push((credential.clone(), account)),
            Err(err) => {
                warn!(account = index, error = %err, "Skipping account");
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) if fetched.is_empty() => Err(err),
        _ => Ok(fetched),
    }
}

fn connect(credential: &Credential, config: &GithubClientConfig) -> Result<GithubClient, ReportError> {
    GithubClient::new(credential.clone(), config)
}

fn issue_request(
    target: &PublishTarget,
    accounts: &[AccountContributions],
    body: String,
) -> Result<IssueRequest, ReportError> {
    let assignee = match (&target.assignee, accounts.first()) {
        (Some(assignee), _) => assignee.clone(),
        (None, Some(account)) => account.username.clone(),
        (None, None) => {
            return Err(ReportError::configuration(
                "no assignee given and no account was fetched",
            ))
        }
    };

    Ok(IssueRequest {
        organization: target.organization.clone(),
        owner: target.owner.clone(),
        repository: target.repository.clone(),
        assignee,
        project_number: target.project_number,
        body,
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use chrono::NaiveDate;
    use contributions::{
        ContributionRecord, FixedClock, OrganizationName, OwnerLogin, RepositoryName, Username,
    };
    use mockito::{Matcher, Mock, ServerGuard};
    use serde_json::json;

    fn target(assignee: Option<&str>) -> PublishTarget {
        PublishTarget {
            organization: OrganizationName::new("octo-org").unwrap(),
            owner: OwnerLogin::new("octo").unwrap(),
            repository: RepositoryName::new("reports").unwrap(),
            assignee: assignee.and_then(Username::new),
            project_number: None,
        }
    }

    fn account(login: &str) -> AccountContributions {
        AccountContributions {
            username: Username::new(login).unwrap(),
            record: ContributionRecord::default(),
        }
    }

    #[test]
    fn assignee_defaults_to_first_account() {
        let request =
            issue_request(&target(None), &[account("alice"), account("bob")], "body".into())
                .unwrap();
        assert_eq!(request.assignee.as_str(), "alice");
        assert_eq!(request.body, "body");
    }

    #[test]
    fn explicit_assignee_wins() {
        let request = issue_request(&target(Some("hubot")), &[account("alice")], String::new())
            .unwrap();
        assert_eq!(request.assignee.as_str(), "hubot");
    }

    #[test]
    fn no_assignee_and_no_accounts_is_a_configuration_error() {
        let err = issue_request(&target(None), &[], String::new()).unwrap_err();
        assert!(matches!(err, ReportError::Configuration { .. }));
    }

    // -----------------------------------------------------------------------
    // Runs against a mock GraphQL server
    // -----------------------------------------------------------------------

    fn config_for(
        server: &ServerGuard,
        tokens: &[&str],
        keep_going: bool,
        output: Output,
    ) -> ReportConfig {
        ReportConfig {
            credentials: tokens.iter().filter_map(|t| Credential::new(*t)).collect(),
            since: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            output,
            keep_going,
            client: GithubClientConfig {
                endpoint: format!("{}/graphql", server.url()),
                timeout: Duration::from_secs(5),
                ..GithubClientConfig::default()
            },
        }
    }

    /// `token` authenticates as `login` and has no contributions.
    async fn mock_account(server: &mut ServerGuard, token: &str, login: &str) -> Vec<Mock> {
        let bearer = format!("Bearer {token}");
        let viewer = server
            .mock("POST", "/graphql")
            .match_header("authorization", bearer.as_str())
            .match_body(Matcher::Regex("query Viewer".to_string()))
            .with_status(200)
            .with_body(json!({ "data": { "viewer": { "login": login } } }).to_string())
            .create_async()
            .await;
        let contributions = server
            .mock("POST", "/graphql")
            .match_header("authorization", bearer.as_str())
            .match_body(Matcher::Regex("query Contributions".to_string()))
            .with_status(200)
            .with_body(
                json!({ "data": { "user": { "contributionsCollection": {
                    "issueContributionsByRepository": [],
                    "pullRequestContributionsByRepository": [],
                    "pullRequestReviewContributionsByRepository": []
                }}}})
                .to_string(),
            )
            .create_async()
            .await;
        vec![viewer, contributions]
    }

    async fn mock_rejected_token(server: &mut ServerGuard, token: &str) -> Mock {
        server
            .mock("POST", "/graphql")
            .match_header("authorization", format!("Bearer {token}").as_str())
            .with_status(401)
            .with_body(r#"{"message":"Bad credentials"}"#)
            .create_async()
            .await
    }

    fn usernames(fetched: &[(Credential, AccountContributions)]) -> Vec<&str> {
        fetched.iter().map(|(_, a)| a.username.as_str()).collect()
    }

    #[tokio::test]
    async fn keep_going_drops_failed_accounts_and_keeps_order() {
        let mut server = mockito::Server::new_async().await;
        let _rejected = mock_rejected_token(&mut server, "bad").await;
        let _alice = mock_account(&mut server, "alice-token", "alice").await;
        let _bob = mock_account(&mut server, "bob-token", "bob").await;

        let config = config_for(
            &server,
            &["alice-token", "bad", "bob-token"],
            true,
            Output::Markdown,
        );
        let fetched = fetch(&config).await.unwrap();

        assert_eq!(usernames(&fetched), vec!["alice", "bob"]);
        assert_eq!(fetched[1].0, Credential::new("bob-token").unwrap());
    }

    #[tokio::test]
    async fn keep_going_fails_when_every_account_fails() {
        let mut server = mockito::Server::new_async().await;
        let _first = mock_rejected_token(&mut server, "bad").await;
        let _second = mock_rejected_token(&mut server, "worse").await;

        let config = config_for(&server, &["bad", "worse"], true, Output::Markdown);
        let err = fetch(&config).await.unwrap_err();

        assert!(matches!(err, ReportError::Authentication { .. }));
    }

    #[tokio::test]
    async fn without_keep_going_one_failure_fails_the_run() {
        let mut server = mockito::Server::new_async().await;
        let _rejected = mock_rejected_token(&mut server, "bad").await;
        let _alice = mock_account(&mut server, "alice-token", "alice").await;

        let config = config_for(&server, &["bad", "alice-token"], false, Output::Markdown);
        let err = fetch(&config).await.unwrap_err();

        assert!(matches!(err, ReportError::Authentication { .. }));
    }

    #[tokio::test]
    async fn keep_going_publishes_with_first_successful_token() {
        let mut server = mockito::Server::new_async().await;
        let _rejected = mock_rejected_token(&mut server, "bad").await;
        let _good = mock_account(&mut server, "good", "octocat").await;
        let user = server
            .mock("POST", "/graphql")
            .match_header("authorization", "Bearer good")
            .match_body(Matcher::Regex("query UserId".to_string()))
            .with_status(200)
            .with_body(json!({ "data": { "user": { "id": "U_1" } } }).to_string())
            .create_async()
            .await;
        let repository = server
            .mock("POST", "/graphql")
            .match_header("authorization", "Bearer good")
            .match_body(Matcher::Regex("query RepositoryId".to_string()))
            .with_status(200)
            .with_body(json!({ "data": { "repository": { "id": "R_1" } } }).to_string())
            .create_async()
            .await;
        let create = server
            .mock("POST", "/graphql")
            .match_header("authorization", "Bearer good")
            .match_body(Matcher::Regex("mutation CreateIssue".to_string()))
            .with_status(200)
            .with_body(
                json!({ "data": { "createIssue": { "issue": {
                    "id": "I_1",
                    "number": 5,
                    "url": "https://github.com/octo/reports/issues/5"
                }}}})
                .to_string(),
            )
            .create_async()
            .await;

        let config = config_for(&server, &["bad", "good"], true, Output::Publish(target(None)));
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 3, 18).unwrap());
        let outcome = run(&config, &clock).await.unwrap();

        let published = match outcome {
            RunOutcome::Published(published) => published,
            other => panic!("expected a published issue, got {other:?}"),
        };
        assert_eq!(published.issue.url, "https://github.com/octo/reports/issues/5");
        assert!(published.project_item.is_none());
        user.assert_async().await;
        repository.assert_async().await;
        create.assert_async().await;
    }
}
