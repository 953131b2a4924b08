//! Per-repository aggregation of a contribution record.
//!
//! [`RepoSummary`] is an insertion-ordered map keyed by repository full name.
//! It is built in two phases:
//!
//! 1. **Union.** Every repository key from the issue, pull request, and review
//!    groupings (in that order) is inserted once with zeroed counters.
//! 2. **Population.** One pass per grouping overwrites only that grouping's
//!    counter with the entry's `totalCount`.
//!
//! Counters are overwritten, never summed: GitHub lists a repository at most
//! once per grouping.
//!
//! Entries with an empty `nameWithOwner` are skipped here and by the detail
//! renderers in [`crate::render`], so the summary keys always match the
//! repositories shown in the other sections.

use std::collections::HashMap;

use crate::{ContributionRecord, RepositoryContributions, RepositoryFullName};

/// Activity counts for one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoSummaryRow {
    pub url: String,
    pub issues: u64,
    pub pull_requests: u64,
    pub pull_request_reviews: u64,
}

/// Ordered mapping from repository full name to its [`RepoSummaryRow`].
///
/// Iteration order is first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoSummary {
    rows: Vec<(RepositoryFullName, RepoSummaryRow)>,
    index: HashMap<RepositoryFullName, usize>,
}

impl RepoSummary {
    /// Builds the summary of `record` with the union-then-populate merge.
    pub fn from_record(record: &ContributionRecord) -> Self {
        let mut summary = RepoSummary::default();

        if let Some(groups) = &record.issue_contributions_by_repository {
            summary.insert_keys(groups);
        }
        if let Some(groups) = &record.pull_request_contributions_by_repository {
            summary.insert_keys(groups);
        }
        if let Some(groups) = &record.pull_request_review_contributions_by_repository {
            summary.insert_keys(groups);
        }

        if let Some(groups) = &record.issue_contributions_by_repository {
            summary.populate(groups, |row, count| row.issues = count);
        }
        if let Some(groups) = &record.pull_request_contributions_by_repository {
            summary.populate(groups, |row, count| row.pull_requests = count);
        }
        if let Some(groups) = &record.pull_request_review_contributions_by_repository {
            summary.populate(groups, |row, count| row.pull_request_reviews = count);
        }

        summary
    }

    /// Number of repositories.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when no grouping contributed a repository.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up the row of one repository.
    pub fn get(&self, name: &str) -> Option<&RepoSummaryRow> {
        let key = RepositoryFullName::new(name)?;
        self.index.get(&key).map(|&i| &self.rows[i].1)
    }

    /// Rows in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&RepositoryFullName, &RepoSummaryRow)> {
        self.rows.iter().map(|(name, row)| (name, row))
    }

    fn insert_keys<N>(&mut self, groups: &[RepositoryContributions<N>]) {
        for group in groups {
            let Some(key) = group.repository.full_name() else {
                tracing::warn!(url = %group.repository.url, "Skipping repository without a name");
                continue;
            };
            if self.index.contains_key(&key) {
                continue;
            }
            self.index.insert(key.clone(), self.rows.len());
            self.rows.push((
                key,
                RepoSummaryRow {
                    url: group.repository.url.clone(),
                    ..RepoSummaryRow::default()
                },
            ));
        }
    }

    fn populate<N>(
        &mut self,
        groups: &[RepositoryContributions<N>],
        set: impl Fn(&mut RepoSummaryRow, u64),
    ) {
        for group in groups {
            let Some(key) = group.repository.full_name() else {
                continue;
            };
            if let Some(&i) = self.index.get(&key) {
                set(&mut self.rows[i].1, group.contributions.total_count);
            }
        }
    }
}
