//! GraphQL envelope types and transport error classification.

use std::time::Duration;

use contributions::{LookupKind, ReportError};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of a GraphQL POST.
#[derive(Debug, Serialize)]
pub struct GraphQLRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

/// Envelope of every GraphQL response.
#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

/// One entry of the `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    /// GitHub's machine-readable error type (`NOT_FOUND`, `RATE_LIMITED`, ...).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl<T> GraphQLResponse<T> {
    /// Returns `data`, or the errors that replaced it.
    ///
    /// GitHub can return partial data alongside errors; any error fails the
    /// call so a not-found lookup is never mistaken for success.
    pub fn into_data(self) -> Result<T, GithubError> {
        match (self.data, self.errors) {
            (_, Some(errors)) if !errors.is_empty() => Err(GithubError::GraphQl(errors)),
            (Some(data), _) => Ok(data),
            (None, _) => Err(GithubError::MissingData),
        }
    }
}

// ---------------------------------------------------------------------------
// Adapter errors
// ---------------------------------------------------------------------------

/// Failures of a single GraphQL round trip, before domain context is attached.
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unauthorized ({status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("rate limited")]
    RateLimited { retry_after: Option<Duration> },

    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{}", join_messages(.0))]
    GraphQl(Vec<GraphQLError>),

    #[error("response contained no data")]
    MissingData,
}

impl GithubError {
    /// Classifies a non-success HTTP response.
    pub fn from_status(
        status: StatusCode,
        retry_after: Option<Duration>,
        rate_limit_exhausted: bool,
        body: String,
    ) -> Self {
        let mentions_rate_limit = body.to_ascii_lowercase().contains("rate limit");
        match status {
            StatusCode::UNAUTHORIZED => GithubError::Unauthorized {
                status: status.as_u16(),
                body,
            },
            StatusCode::TOO_MANY_REQUESTS => GithubError::RateLimited { retry_after },
            StatusCode::FORBIDDEN if rate_limit_exhausted || mentions_rate_limit => {
                GithubError::RateLimited { retry_after }
            }
            _ => GithubError::Status {
                status: status.as_u16(),
                body,
            },
        }
    }

    /// Returns `true` if GitHub reported that the looked-up object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GithubError::GraphQl(errors)
            if errors.iter().any(|e| e.kind.as_deref() == Some("NOT_FOUND")))
    }

    /// Converts to a [`ReportError`], mapping not-found responses onto `lookup`.
    pub fn into_report_error(self, lookup: Option<(LookupKind, &str)>) -> ReportError {
        if let Some((kind, name)) = lookup {
            if self.is_not_found() {
                return ReportError::not_found(kind, name);
            }
        }

        match self {
            GithubError::Http(err) => ReportError::transport(err.to_string()),
            GithubError::Unauthorized { body, .. } => ReportError::Authentication { message: body },
            GithubError::RateLimited { retry_after } => ReportError::RateLimited { retry_after },
            GithubError::Status { .. } => ReportError::transport(self.to_string()),
            GithubError::GraphQl(errors)
                if errors.iter().any(|e| e.kind.as_deref() == Some("RATE_LIMITED")) =>
            {
                ReportError::RateLimited { retry_after: None }
            }
            GithubError::GraphQl(_) | GithubError::MissingData => ReportError::api(self.to_string()),
        }
    }
}

impl From<GithubError> for ReportError {
    fn from(err: GithubError) -> Self {
        err.into_report_error(None)
    }
}

fn join_messages(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
