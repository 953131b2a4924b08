//! Port traits implemented by infrastructure crates.
//!
//! Each trait is one facet of the GitHub API as seen by the workflow. One
//! implementing value is bound to exactly one [`crate::Credential`]; fetching
//! for several accounts means constructing several clients.
//!
//! Every method is a single round trip with no retry. Failures are returned
//! as [`ReportError`] and never swallowed.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    ContributionRecord, CreatedIssue, IssueNodeId, NewIssue, OrganizationName, OwnerLogin,
    ProjectItemId, ProjectNodeId, ProjectNumber, ReportError, RepositoryName, RepositoryNodeId,
    UserNodeId, Username,
};

/// Maps human-readable names to opaque node identifiers.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Login of the account the credential belongs to.
    ///
    /// Fails with [`ReportError::Authentication`] for an invalid or expired token.
    async fn authenticated_username(&self) -> Result<Username, ReportError>;

    /// Node id of the user with the given login.
    async fn user_id(&self, username: &Username) -> Result<UserNodeId, ReportError>;

    /// Node id of project board `number` owned by `owner`.
    ///
    /// `organization` scopes the lookup for logging and error reporting; the
    /// board is resolved under `owner`.
    async fn project_id(
        &self,
        organization: &OrganizationName,
        owner: &OwnerLogin,
        number: ProjectNumber,
    ) -> Result<ProjectNodeId, ReportError>;

    /// Node id of repository `owner/name`.
    async fn repository_id(
        &self,
        organization: &OrganizationName,
        owner: &OwnerLogin,
        name: &RepositoryName,
    ) -> Result<RepositoryNodeId, ReportError>;
}

/// Source of contribution records.
#[async_trait]
pub trait ContributionSource: Send + Sync {
    /// Contributions of `username` from the start of `since` (UTC) until now.
    async fn contributions(
        &self,
        username: &Username,
        since: NaiveDate,
    ) -> Result<ContributionRecord, ReportError>;
}

/// Creates issues.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, ReportError>;
}

/// Attaches issues to project boards.
#[async_trait]
pub trait ProjectBoard: Send + Sync {
    async fn add_issue_to_project(
        &self,
        project: &ProjectNodeId,
        issue: &IssueNodeId,
    ) -> Result<ProjectItemId, ReportError>;
}
