//! Weekly report orchestration.
//!
//! This crate sequences calls between the pure domain in [`contributions`]
//! and the GitHub port traits: fetching contributions for each account, and
//! filing the finished report as an issue.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Functions here are generic over the port traits
//! and contain no rendering or transport logic of their own.

pub mod fetcher;
pub mod publisher;

pub use fetcher::{fetch_account, fetch_contributions, fetch_contributions_settled};
pub use publisher::create_issue;
