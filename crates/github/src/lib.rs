//! Weekly report GitHub infrastructure adapter.
//!
//! Implements the port traits defined in the [`contributions`] crate
//! (`IdentityResolver`, `ContributionSource`, `IssueTracker`, `ProjectBoard`)
//! over the GitHub GraphQL API using `reqwest`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. Request
//! framing, authentication headers, and the mapping of HTTP and GraphQL
//! failures onto [`contributions::ReportError`] live here; the workflow never
//! sees them.
//!
//! One [`GithubClient`] is bound to one credential. There is no pagination
//! and no retry: each trait method is exactly one round trip.

mod activity;
pub mod client;
pub mod graphql;
mod issues;
pub mod queries;
mod resolver;

pub use client::{GithubClient, GithubClientConfig, DEFAULT_GRAPHQL_ENDPOINT};
pub use graphql::GithubError;
