//! HTTP transport for the GitHub GraphQL API.

use std::time::Duration;

use contributions::{Credential, ReportError};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::graphql::{GithubError, GraphQLRequest, GraphQLResponse};

/// Public GitHub GraphQL endpoint.
pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

/// Transport settings shared by every client of a run.
#[derive(Debug, Clone)]
pub struct GithubClientConfig {
    /// GraphQL endpoint (override for GitHub Enterprise or tests).
    pub endpoint: String,
    /// `User-Agent` header; GitHub rejects requests without one.
    pub user_agent: String,
    /// Per-request timeout. A hung call fails with a transport error.
    pub timeout: Duration,
}

impl Default for GithubClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GRAPHQL_ENDPOINT.to_string(),
            user_agent: concat!("weekly-report/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// GraphQL client bound to one credential.
///
/// Implements every port trait of the `contributions` crate; see the
/// `resolver`, `activity`, and `issues` modules.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    endpoint: String,
    credential: Credential,
}

impl GithubClient {
    /// Builds a client for `credential`.
    pub fn new(credential: Credential, config: &GithubClientConfig) -> Result<Self, ReportError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| ReportError::configuration(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            credential,
        })
    }

    /// Runs one GraphQL operation and returns its `data`.
    #[instrument(skip(self, query, variables), fields(endpoint = %self.endpoint))]
    pub(crate) async fn execute<V, R>(
        &self,
        operation: &'static str,
        query: &str,
        variables: V,
    ) -> Result<R, GithubError>
    where
        V: Serialize,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.credential.expose())
            .json(&GraphQLRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "GraphQL response received");

        if !status.is_success() {
            let retry_after = retry_after(response.headers());
            let exhausted = rate_limit_exhausted(response.headers());
            let body = response.text().await.unwrap_or_default();
            return Err(GithubError::from_status(status, retry_after, exhausted, body));
        }

        let payload: GraphQLResponse<R> = response.json().await?;
        payload.into_data()
    }
}

fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

fn rate_limit_exhausted(headers: &HeaderMap) -> bool {
    headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}
