//! Core domain for the weekly GitHub contributions report.
//!
//! This crate contains the contribution record model, the per-repository
//! summary, the markdown renderers, and the port traits that infrastructure
//! crates implement to talk to GitHub.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; the `github` crate defines *how* to supply it
//! and the `workflow` crate sequences the calls.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype names and node identifiers (`Username`, `RepositoryNodeId`, etc.) |
//! | [`types`] | Contribution record model and issue value types |
//! | [`summary`] | Ordered per-repository aggregation (`RepoSummary`) |
//! | [`templates`] | Markdown section templates and placeholder substitution |
//! | [`render`] | Section generators and report assembly |
//! | [`clock`] | Injected clock and date helpers |
//! | [`ports`] | Traits implemented by the GitHub adapter |
//! | [`errors`] | `ReportError` |

pub mod clock;
pub mod errors;
pub mod identifiers;
pub mod ports;
pub mod render;
pub mod summary;
pub mod templates;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use clock::{parse_start_date, report_title, start_of_day_rfc3339, Clock, FixedClock, SystemClock};
pub use errors::{LookupKind, ReportError};
pub use identifiers::{
    Credential, IssueNodeId, OrganizationName, OwnerLogin, ProjectItemId, ProjectNodeId,
    ProjectNumber, ReportRunId, RepositoryFullName, RepositoryName, RepositoryNodeId, UserNodeId,
    Username,
};
pub use ports::{ContributionSource, IdentityResolver, IssueTracker, ProjectBoard};
pub use render::{
    assemble_report, generate_repo_pull_request_reviews, generate_repo_pull_requests,
    generate_repo_issues, generate_repo_summary,
};
pub use summary::{RepoSummary, RepoSummaryRow};
pub use types::{
    AccountContributions, ContributionConnection, ContributionRecord, CreatedIssue, IssueContribution,
    IssueDetails, IssueRequest, NewIssue, PublishedIssue, PullRequestContribution,
    PullRequestDetails, PullRequestReviewContribution, RepositoryContributions, RepositoryRef,
    ReviewedPullRequest,
};
