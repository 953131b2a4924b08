//! Behavior of the report section generators over whole records.

use contributions::{
    assemble_report, generate_repo_issues, generate_repo_pull_request_reviews,
    generate_repo_pull_requests, generate_repo_summary, AccountContributions, ContributionRecord,
    Username,
};
use serde_json::json;

fn record(value: serde_json::Value) -> ContributionRecord {
    serde_json::from_value(value).expect("valid record json")
}

fn single_issue_record() -> ContributionRecord {
    record(json!({
        "issueContributionsByRepository": [{
            "repository": { "nameWithOwner": "a/b", "url": "https://x/a/b" },
            "contributions": {
                "totalCount": 2,
                "nodes": [{ "issue": {
                    "createdAt": "2024-01-01T00:00:00Z",
                    "title": "T1",
                    "url": "https://x/1",
                    "state": "OPEN"
                }}]
            }
        }]
    }))
}

fn full_record() -> ContributionRecord {
    record(json!({
        "issueContributionsByRepository": [{
            "repository": { "nameWithOwner": "octo/api", "url": "https://github.com/octo/api" },
            "contributions": { "totalCount": 1, "nodes": [{ "issue": {
                "createdAt": "2024-03-15T10:22:31Z",
                "title": "Crash on start",
                "url": "https://github.com/octo/api/issues/4",
                "state": "CLOSED"
            }}]}
        }],
        "pullRequestContributionsByRepository": [
            {
                "repository": { "nameWithOwner": "octo/web", "url": "https://github.com/octo/web" },
                "contributions": { "totalCount": 2, "nodes": [
                    { "pullRequest": {
                        "createdAt": "2024-03-11T08:00:00Z",
                        "title": "Add login page",
                        "url": "https://github.com/octo/web/pull/10",
                        "changedFiles": 12,
                        "state": "MERGED"
                    }},
                    { "pullRequest": {
                        "createdAt": "2024-03-12T08:00:00Z",
                        "title": "Fix typo",
                        "url": "https://github.com/octo/web/pull/11",
                        "changedFiles": 1,
                        "state": "OPEN"
                    }}
                ]}
            },
            {
                "repository": { "nameWithOwner": "octo/api", "url": "https://github.com/octo/api" },
                "contributions": { "totalCount": 1, "nodes": [{ "pullRequest": {
                    "createdAt": "2024-03-13T08:00:00Z",
                    "title": "Handle | in names",
                    "url": "https://github.com/octo/api/pull/5",
                    "changedFiles": 3,
                    "state": "OPEN"
                }}]}
            }
        ],
        "pullRequestReviewContributionsByRepository": [{
            "repository": { "nameWithOwner": "other/lib", "url": "https://github.com/other/lib" },
            "contributions": { "totalCount": 4, "nodes": [{ "pullRequest": {
                "createdAt": "2024-03-01T00:00:00Z",
                "title": "Bump deps",
                "url": "https://github.com/other/lib/pull/99",
                "state": "MERGED"
            }}]}
        }]
    }))
}

// ---------------------------------------------------------------------------
// Absent groupings
// ---------------------------------------------------------------------------

#[test]
fn empty_record_renders_header_only_summary_and_empty_sections() {
    let record = ContributionRecord::default();

    let summary = generate_repo_summary(&record);
    assert_eq!(
        summary,
        "#### Summary\n\n\
         | Repository | Issues | Pull Requests | Pull Request Reviews |\n\
         | :--- | ---: | ---: | ---: |\n\n"
    );
    assert_eq!(generate_repo_issues(&record), "");
    assert_eq!(generate_repo_pull_requests(&record), "");
    assert_eq!(generate_repo_pull_request_reviews(&record), "");
}

#[test]
fn present_but_empty_grouping_renders_header_without_rows() {
    let record = record(json!({ "pullRequestContributionsByRepository": [] }));

    let prs = generate_repo_pull_requests(&record);
    assert!(prs.starts_with("#### Pull Requests\n"));
    assert!(!prs.contains("| ["));
}

// ---------------------------------------------------------------------------
// Single-issue scenario
// ---------------------------------------------------------------------------

#[test]
fn single_issue_summary_counts_total_count() {
    let summary = generate_repo_summary(&single_issue_record());
    assert!(summary.ends_with("| [a/b](https://x/a/b) | 2 | 0 | 0 |\n"));
    assert_eq!(summary.matches("| [").count(), 1);
}

#[test]
fn single_issue_detail_row() {
    let issues = generate_repo_issues(&single_issue_record());
    assert_eq!(
        issues,
        "#### Issues\n\n\
         | Repository | Created | Title | State |\n\
         | :--- | :--- | :--- | :--- |\n\
         | [a/b](https://x/a/b) | 2024-01-01 | [T1](https://x/1) | OPEN |\n"
    );
}

#[test]
fn single_issue_has_no_pull_request_sections() {
    let record = single_issue_record();
    assert_eq!(generate_repo_pull_requests(&record), "");
    assert_eq!(generate_repo_pull_request_reviews(&record), "");
}

// ---------------------------------------------------------------------------
// Full record
// ---------------------------------------------------------------------------

#[test]
fn summary_rows_follow_first_seen_order() {
    let summary = generate_repo_summary(&full_record());
    let rows: Vec<&str> = summary.lines().filter(|l| l.starts_with("| [")).collect();
    assert_eq!(
        rows,
        vec![
            "| [octo/api](https://github.com/octo/api) | 1 | 1 | 0 |",
            "| [octo/web](https://github.com/octo/web) | 0 | 2 | 0 |",
            "| [other/lib](https://github.com/other/lib) | 0 | 0 | 4 |",
        ]
    );
}

#[test]
fn pull_request_rows_carry_changed_files_in_source_order() {
    let prs = generate_repo_pull_requests(&full_record());
    let rows: Vec<&str> = prs.lines().filter(|l| l.starts_with("| [")).collect();
    assert_eq!(
        rows,
        vec![
            "| [octo/web](https://github.com/octo/web) | 2024-03-11 | [Add login page](https://github.com/octo/web/pull/10) | 12 | MERGED |",
            "| [octo/web](https://github.com/octo/web) | 2024-03-12 | [Fix typo](https://github.com/octo/web/pull/11) | 1 | OPEN |",
            "| [octo/api](https://github.com/octo/api) | 2024-03-13 | [Handle \\| in names](https://github.com/octo/api/pull/5) | 3 | OPEN |",
        ]
    );
}

#[test]
fn review_rows_describe_the_reviewed_pull_request() {
    let reviews = generate_repo_pull_request_reviews(&full_record());
    assert!(reviews.contains(
        "| [other/lib](https://github.com/other/lib) | 2024-03-01 | [Bump deps](https://github.com/other/lib/pull/99) | MERGED |"
    ));
}

#[test]
fn issue_dates_are_truncated() {
    let issues = generate_repo_issues(&full_record());
    assert!(issues.contains("| 2024-03-15 |"));
    assert!(!issues.contains("10:22:31"));
}

#[test]
fn generators_are_idempotent() {
    let record = full_record();
    assert_eq!(generate_repo_summary(&record), generate_repo_summary(&record));
    assert_eq!(generate_repo_issues(&record), generate_repo_issues(&record));
    assert_eq!(
        generate_repo_pull_requests(&record),
        generate_repo_pull_requests(&record)
    );
    assert_eq!(
        generate_repo_pull_request_reviews(&record),
        generate_repo_pull_request_reviews(&record)
    );
}

// ---------------------------------------------------------------------------
// Report assembly
// ---------------------------------------------------------------------------

#[test]
fn report_contains_a_heading_per_account_and_skips_empty_sections() {
    let accounts = vec![
        AccountContributions {
            username: Username::new("octocat").unwrap(),
            record: single_issue_record(),
        },
        AccountContributions {
            username: Username::new("hubot").unwrap(),
            record: ContributionRecord::default(),
        },
    ];

    let report = assemble_report(&accounts);

    let octocat = report.find("### @octocat").unwrap();
    let hubot = report.find("### @hubot").unwrap();
    assert!(octocat < hubot);
    assert_eq!(report.matches("#### Summary").count(), 2);
    assert_eq!(report.matches("#### Issues").count(), 1);
    assert!(!report.contains("#### Pull Requests"));
    assert!(report.ends_with('\n'));
}

#[test]
fn report_of_no_accounts_is_empty() {
    assert_eq!(assemble_report(&[]), "");
}
