//! Error type shared by every crate in the workspace.
//!
//! [`ReportError`] covers the three failure families of the GitHub API
//! (authentication, not-found, transport/API), the partial-success outcome of
//! publishing, and input validation. Nothing in the workspace recovers from
//! these locally; each one propagates to the caller.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Lookup kinds
// ---------------------------------------------------------------------------

/// The kind of object a failed name → node id lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    User,
    Project,
    Repository,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LookupKind::User => "user",
            LookupKind::Project => "project",
            LookupKind::Repository => "repository",
        };
        f.write_str(label)
    }
}

// ---------------------------------------------------------------------------
// Report errors
// ---------------------------------------------------------------------------

/// Errors produced while fetching, rendering, or publishing a report.
#[derive(Debug, Error, Serialize, Deserialize)]
pub enum ReportError {
    /// The credential was rejected (invalid, expired, or revoked).
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Message returned by the API, if any.
        message: String,
    },

    /// A user, project, or repository name did not resolve to a node.
    ///
    /// Also produced when the object exists but is not visible to the
    /// credential; GitHub does not distinguish the two.
    #[error("{kind} not found: {name}")]
    NotFound {
        /// What was being looked up.
        kind: LookupKind,
        /// The human-readable name that failed to resolve.
        name: String,
    },

    /// The API refused the request because a rate limit was exhausted.
    ///
    /// The request is not retried; `retry_after` is reported for the operator.
    #[error("Rate limited by the GitHub API")]
    RateLimited {
        /// Delay suggested by the `retry-after` header, when present.
        retry_after: Option<Duration>,
    },

    /// The request never produced a usable HTTP response (network failure,
    /// timeout, unexpected status, undecodable body).
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the failure.
        message: String,
    },

    /// The API answered with GraphQL errors or a payload missing expected data.
    #[error("GitHub API error: {message}")]
    Api {
        /// Concatenated GraphQL error messages or a description of the gap.
        message: String,
    },

    /// The issue was created but attaching it to the project board failed.
    ///
    /// The issue is not deleted; `issue_url` points at it so an operator can
    /// attach it by hand.
    #[error("Issue {issue_url} was created but could not be added to the project")]
    ProjectLinkFailed {
        /// URL of the issue that was created.
        issue_url: String,
        /// Why the link mutation failed.
        #[source]
        source: Box<ReportError>,
    },

    /// Inputs were rejected before any network call was made.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// The start date could not be parsed as an ISO-8601 calendar date.
    #[error("Invalid start date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },
}

impl ReportError {
    /// Shorthand for a [`ReportError::NotFound`].
    pub fn not_found(kind: LookupKind, name: impl Into<String>) -> Self {
        ReportError::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Shorthand for a [`ReportError::Api`].
    pub fn api(message: impl Into<String>) -> Self {
        ReportError::Api {
            message: message.into(),
        }
    }

    /// Shorthand for a [`ReportError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        ReportError::Transport {
            message: message.into(),
        }
    }

    /// Shorthand for a [`ReportError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        ReportError::Configuration {
            message: message.into(),
        }
    }
}
