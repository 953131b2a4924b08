//! Markdown rendering of contribution records.
//!
//! Every function here is pure: the same record always renders to the same
//! bytes. The three detail sections return an empty string when their
//! grouping is absent; a present but empty grouping renders the table header
//! with no rows. Repository entries without a name are skipped in every
//! section, matching [`RepoSummary`].

use crate::templates::{
    render_template, ISSUES_TEMPLATE, ISSUE_ROW_TEMPLATE, PULL_REQUESTS_TEMPLATE,
    PULL_REQUEST_REVIEWS_TEMPLATE, PULL_REQUEST_REVIEW_ROW_TEMPLATE, PULL_REQUEST_ROW_TEMPLATE,
    SUMMARY_ROW_TEMPLATE, SUMMARY_TEMPLATE,
};
use crate::{AccountContributions, ContributionRecord, RepoSummary, RepositoryContributions};

/// Summary table: one row per repository with issue, pull request, and review counts.
pub fn generate_repo_summary(record: &ContributionRecord) -> String {
    let summary = RepoSummary::from_record(record);

    let rows = summary
        .iter()
        .map(|(name, row)| {
            let issues = row.issues.to_string();
            let pull_requests = row.pull_requests.to_string();
            let reviews = row.pull_request_reviews.to_string();
            render_template(
                SUMMARY_ROW_TEMPLATE,
                &[
                    ("repository", name.as_str()),
                    ("repositoryUrl", row.url.as_str()),
                    ("issues", issues.as_str()),
                    ("pullRequests", pull_requests.as_str()),
                    ("pullRequestReviews", reviews.as_str()),
                ],
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    render_template(SUMMARY_TEMPLATE, &[("rows", rows.as_str())])
}

/// Issues created, one row per issue in source order.
pub fn generate_repo_issues(record: &ContributionRecord) -> String {
    let Some(groups) = &record.issue_contributions_by_repository else {
        return String::new();
    };

    let mut rows = Vec::new();
    for group in named(groups) {
        for node in &group.contributions.nodes {
            let issue = &node.issue;
            let title = escape_cell(&issue.title);
            rows.push(render_template(
                ISSUE_ROW_TEMPLATE,
                &[
                    ("repository", group.repository.name_with_owner.as_str()),
                    ("repositoryUrl", group.repository.url.as_str()),
                    ("createdAt", date_prefix(&issue.created_at)),
                    ("title", title.as_str()),
                    ("url", issue.url.as_str()),
                    ("state", issue.state.as_str()),
                ],
            ));
        }
    }

    render_template(ISSUES_TEMPLATE, &[("rows", rows.join("\n").as_str())])
}

/// Pull requests opened, with the number of changed files.
pub fn generate_repo_pull_requests(record: &ContributionRecord) -> String {
    let Some(groups) = &record.pull_request_contributions_by_repository else {
        return String::new();
    };

    let mut rows = Vec::new();
    for group in named(groups) {
        for node in &group.contributions.nodes {
            let pr = &node.pull_request;
            let title = escape_cell(&pr.title);
            let changed_files = pr.changed_files.to_string();
            rows.push(render_template(
                PULL_REQUEST_ROW_TEMPLATE,
                &[
                    ("repository", group.repository.name_with_owner.as_str()),
                    ("repositoryUrl", group.repository.url.as_str()),
                    ("createdAt", date_prefix(&pr.created_at)),
                    ("title", title.as_str()),
                    ("url", pr.url.as_str()),
                    ("changedFiles", changed_files.as_str()),
                    ("state", pr.state.as_str()),
                ],
            ));
        }
    }

    render_template(PULL_REQUESTS_TEMPLATE, &[("rows", rows.join("\n").as_str())])
}

/// Pull requests reviewed.
///
/// Rows describe the reviewed pull request (its creation date, title, URL and
/// state), not the review.
pub fn generate_repo_pull_request_reviews(record: &ContributionRecord) -> String {
    let Some(groups) = &record.pull_request_review_contributions_by_repository else {
        return String::new();
    };

    let mut rows = Vec::new();
    for group in named(groups) {
        for node in &group.contributions.nodes {
            let pr = &node.pull_request;
            let title = escape_cell(&pr.title);
            rows.push(render_template(
                PULL_REQUEST_REVIEW_ROW_TEMPLATE,
                &[
                    ("repository", group.repository.name_with_owner.as_str()),
                    ("repositoryUrl", group.repository.url.as_str()),
                    ("createdAt", date_prefix(&pr.created_at)),
                    ("title", title.as_str()),
                    ("url", pr.url.as_str()),
                    ("state", pr.state.as_str()),
                ],
            ));
        }
    }

    render_template(PULL_REQUEST_REVIEWS_TEMPLATE, &[("rows", rows.join("\n").as_str())])
}

/// Full report body: per account, a heading followed by its non-empty sections.
pub fn assemble_report(accounts: &[AccountContributions]) -> String {
    if accounts.is_empty() {
        return String::new();
    }

    accounts
        .iter()
        .map(|account| {
            let record = &account.record;
            let mut parts = vec![format!("### @{}", account.username)];
            parts.extend(
                [
                    generate_repo_summary(record),
                    generate_repo_issues(record),
                    generate_repo_pull_requests(record),
                    generate_repo_pull_request_reviews(record),
                ]
                .into_iter()
                .filter(|section| !section.is_empty())
                .map(|section| section.trim_end().to_string()),
            );
            parts.join("\n\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
        + "\n"
}

fn named<N>(
    groups: &[RepositoryContributions<N>],
) -> impl Iterator<Item = &RepositoryContributions<N>> {
    groups.iter().filter(|group| group.repository.full_name().is_some())
}

/// `YYYY-MM-DD` prefix of an ISO-8601 timestamp.
fn date_prefix(timestamp: &str) -> &str {
    timestamp.get(..10).unwrap_or(timestamp)
}

/// Keeps free text from breaking out of a table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_prefix_truncates_to_ten_characters() {
        assert_eq!(date_prefix("2024-03-15T10:22:31Z"), "2024-03-15");
    }

    #[test]
    fn date_prefix_keeps_short_values() {
        assert_eq!(date_prefix("2024"), "2024");
    }

    #[test]
    fn escape_cell_neutralises_pipes_and_newlines() {
        assert_eq!(escape_cell("a | b\nc"), "a \\| b c");
        assert_eq!(escape_cell("plain"), "plain");
    }

    #[test]
    fn unnamed_repositories_are_left_out_of_every_section() {
        let record: ContributionRecord = serde_json::from_value(serde_json::json!({
            "issueContributionsByRepository": [
                {
                    "repository": { "nameWithOwner": "", "url": "https://x/unnamed" },
                    "contributions": { "totalCount": 1, "nodes": [{ "issue": {
                        "createdAt": "2024-01-02T00:00:00Z",
                        "title": "Hidden",
                        "url": "https://x/hidden",
                        "state": "OPEN"
                    }}]}
                },
                {
                    "repository": { "nameWithOwner": "a/b", "url": "https://x/a/b" },
                    "contributions": { "totalCount": 1, "nodes": [{ "issue": {
                        "createdAt": "2024-01-01T00:00:00Z",
                        "title": "Shown",
                        "url": "https://x/shown",
                        "state": "OPEN"
                    }}]}
                }
            ]
        }))
        .unwrap();

        let summary = generate_repo_summary(&record);
        let issues = generate_repo_issues(&record);

        assert_eq!(summary.matches("| [").count(), 1);
        assert!(summary.contains("[a/b](https://x/a/b)"));
        assert!(!summary.contains("https://x/unnamed"));
        assert!(issues.contains("Shown"));
        assert!(!issues.contains("Hidden"));
        assert!(!issues.contains("https://x/unnamed"));
    }
}
