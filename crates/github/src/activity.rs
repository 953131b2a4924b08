//! Contributions query.

use async_trait::async_trait;
use chrono::NaiveDate;
use contributions::{
    start_of_day_rfc3339, ContributionRecord, ContributionSource, LookupKind, ReportError, Username,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::client::GithubClient;
use crate::queries::CONTRIBUTIONS_QUERY;

#[derive(Debug, Deserialize)]
struct ContributionsData {
    user: Option<UserContributions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserContributions {
    contributions_collection: ContributionRecord,
}

#[async_trait]
impl ContributionSource for GithubClient {
    #[instrument(skip_all, fields(username = %username, since = %since))]
    async fn contributions(
        &self,
        username: &Username,
        since: NaiveDate,
    ) -> Result<ContributionRecord, ReportError> {
        let variables = json!({
            "username": username.as_str(),
            "from": start_of_day_rfc3339(since),
        });

        let data: ContributionsData = self
            .execute("contributions", CONTRIBUTIONS_QUERY, variables)
            .await
            .map_err(|e| e.into_report_error(Some((LookupKind::User, username.as_str()))))?;

        data.user
            .map(|user| user.contributions_collection)
            .ok_or_else(|| ReportError::not_found(LookupKind::User, username.as_str()))
    }
}
