//! Newtype domain identifiers.
//!
//! GitHub mixes human-readable names (logins, repository names) with opaque
//! node identifiers that only the mutation API understands. Each of them is a
//! distinct newtype so a [`UserNodeId`] can never be passed where a
//! [`RepositoryNodeId`] is expected, even though both are strings on the wire.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Human-readable names
// ---------------------------------------------------------------------------

string_id! {
    /// A GitHub login (e.g. `"octocat"`).
    Username
}

string_id! {
    /// An organization login used as the scope of project and repository lookups.
    OrganizationName
}

string_id! {
    /// The login owning the tracking repository and project board.
    OwnerLogin
}

string_id! {
    /// A bare repository name, without the owner prefix.
    RepositoryName
}

string_id! {
    /// Identifies a repository in `"owner/name"` format.
    ///
    /// This is the key of the per-repository summary; GitHub reports it as
    /// `nameWithOwner`.
    RepositoryFullName
}

// ---------------------------------------------------------------------------
// Opaque node identifiers (assigned by GitHub, required by mutations)
// ---------------------------------------------------------------------------

string_id! {
    /// Node id of a GitHub user.
    UserNodeId
}

string_id! {
    /// Node id of a GitHub Projects (v2) board.
    ProjectNodeId
}

string_id! {
    /// Node id of a GitHub repository.
    RepositoryNodeId
}

string_id! {
    /// Node id of a GitHub issue.
    IssueNodeId
}

string_id! {
    /// Node id of an item on a project board.
    ProjectItemId
}

// ---------------------------------------------------------------------------

/// The number of a project board as shown in its URL (`.../projects/7`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectNumber(u32);

impl ProjectNumber {
    /// Creates a project number, returning `None` for zero.
    pub fn new(value: u32) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Returns the underlying integer value.
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ProjectNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// An access token identifying exactly one GitHub account.
///
/// The token never appears in `Debug` or `Display` output, so it is safe to
/// hold in structs that are logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Creates a credential, returning `None` if the token is empty or blank.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let t = token.into();
        let trimmed = t.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the raw token for use in an `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed, generated locally
// ---------------------------------------------------------------------------

/// Identifies a single report run (one CLI invocation).
///
/// Attached to the root span so all activity from a run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportRunId(Uuid);

impl ReportRunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for ReportRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
