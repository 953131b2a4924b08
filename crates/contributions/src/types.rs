//! Contribution record and issue value types.
//!
//! The record types mirror the `contributionsCollection` object returned by
//! the GitHub GraphQL API field-for-field (camelCase on the wire), so a
//! response can be deserialised straight into a [`ContributionRecord`].

use serde::{Deserialize, Serialize};

use crate::{
    IssueNodeId, OrganizationName, OwnerLogin, ProjectItemId, ProjectNumber, RepositoryFullName,
    RepositoryName, RepositoryNodeId, UserNodeId, Username,
};

// ---------------------------------------------------------------------------
// Contribution record
// ---------------------------------------------------------------------------

/// The contributions of one account over one date range.
///
/// Each grouping is `None` when the account had no activity of that kind (or
/// the API omitted the field). A grouping that is present but empty is kept
/// as `Some(vec![])`; the renderers treat the two cases differently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRecord {
    #[serde(default)]
    pub issue_contributions_by_repository: Option<Vec<RepositoryContributions<IssueContribution>>>,

    #[serde(default)]
    pub pull_request_contributions_by_repository:
        Option<Vec<RepositoryContributions<PullRequestContribution>>>,

    #[serde(default)]
    pub pull_request_review_contributions_by_repository:
        Option<Vec<RepositoryContributions<PullRequestReviewContribution>>>,
}

/// Repository reference attached to every grouping entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRef {
    /// `"owner/name"`.
    pub name_with_owner: String,
    pub url: String,
}

impl RepositoryRef {
    /// The repository key, or `None` when the API returned no name.
    /// Unnamed entries are left out of every report section.
    pub fn full_name(&self) -> Option<RepositoryFullName> {
        RepositoryFullName::new(self.name_with_owner.as_str())
    }
}

/// One repository's entry inside a grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryContributions<N> {
    pub repository: RepositoryRef,
    pub contributions: ContributionConnection<N>,
}

/// A single page of contribution nodes plus the total count.
///
/// `total_count` may exceed `nodes.len()`; only the first page is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionConnection<N> {
    pub total_count: u64,
    #[serde(default = "Vec::new")]
    pub nodes: Vec<N>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueContribution {
    pub issue: IssueDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDetails {
    /// ISO-8601 timestamp as returned by the API.
    pub created_at: String,
    pub title: String,
    pub url: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestContribution {
    pub pull_request: PullRequestDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestDetails {
    pub created_at: String,
    pub title: String,
    pub url: String,
    pub changed_files: u64,
    pub state: String,
}

/// A submitted review.
///
/// Only the reviewed pull request is carried; the report lists pull requests
/// that were reviewed, not the reviews themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestReviewContribution {
    pub pull_request: ReviewedPullRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedPullRequest {
    pub created_at: String,
    pub title: String,
    pub url: String,
    pub state: String,
}

/// A [`ContributionRecord`] together with the account it was fetched for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountContributions {
    pub username: Username,
    pub record: ContributionRecord,
}

// ---------------------------------------------------------------------------
// Issue publishing
// ---------------------------------------------------------------------------

/// Where and how the weekly report issue is filed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRequest {
    pub organization: OrganizationName,
    pub owner: OwnerLogin,
    pub repository: RepositoryName,
    pub assignee: Username,
    /// Project board to attach the issue to. `None` skips the project lookup
    /// and the link mutation entirely.
    pub project_number: Option<ProjectNumber>,
    pub body: String,
}

/// Input of the create-issue mutation, all identifiers already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub repository_id: RepositoryNodeId,
    pub assignee_id: UserNodeId,
    pub title: String,
    pub body: String,
}

/// The issue returned by the create-issue mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub id: IssueNodeId,
    pub number: u64,
    pub url: String,
}

/// Outcome of a complete publish: the issue and, when requested, its board item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedIssue {
    pub issue: CreatedIssue,
    pub project_item: Option<ProjectItemId>,
}
