//! GraphQL documents sent to the GitHub API.
//!
//! Contribution connections request a single page (`first: 100`); the
//! `totalCount` of each connection is exact even when nodes are truncated.

pub const VIEWER_QUERY: &str = r#"
query Viewer {
  viewer {
    login
  }
}
"#;

pub const USER_ID_QUERY: &str = r#"
query UserId($login: String!) {
  user(login: $login) {
    id
  }
}
"#;

pub const PROJECT_ID_QUERY: &str = r#"
query ProjectId($owner: String!, $number: Int!) {
  repositoryOwner(login: $owner) {
    ... on ProjectV2Owner {
      projectV2(number: $number) {
        id
      }
    }
  }
}
"#;

pub const REPOSITORY_ID_QUERY: &str = r#"
query RepositoryId($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    id
  }
}
"#;

/// Contributions of `$username` from `$from` until now.
///
/// `to` is omitted, so the API's default end bound (the current time) applies.
pub const CONTRIBUTIONS_QUERY: &str = r#"
query Contributions($username: String!, $from: DateTime!) {
  user(login: $username) {
    contributionsCollection(from: $from) {
      issueContributionsByRepository(maxRepositories: 100) {
        repository {
          nameWithOwner
          url
        }
        contributions(first: 100) {
          totalCount
          nodes {
            issue {
              createdAt
              title
              url
              state
            }
          }
        }
      }
      pullRequestContributionsByRepository(maxRepositories: 100) {
        repository {
          nameWithOwner
          url
        }
        contributions(first: 100) {
          totalCount
          nodes {
            pullRequest {
              createdAt
              title
              url
              changedFiles
              state
            }
          }
        }
      }
      pullRequestReviewContributionsByRepository(maxRepositories: 100) {
        repository {
          nameWithOwner
          url
        }
        contributions(first: 100) {
          totalCount
          nodes {
            pullRequest {
              createdAt
              title
              url
              state
            }
          }
        }
      }
    }
  }
}
"#;

pub const CREATE_ISSUE_MUTATION: &str = r#"
mutation CreateIssue($repositoryId: ID!, $assigneeIds: [ID!], $title: String!, $body: String) {
  createIssue(input: {
    repositoryId: $repositoryId,
    assigneeIds: $assigneeIds,
    title: $title,
    body: $body
  }) {
    issue {
      id
      number
      url
    }
  }
}
"#;

pub const ADD_PROJECT_ITEM_MUTATION: &str = r#"
mutation AddProjectItem($projectId: ID!, $contentId: ID!) {
  addProjectV2ItemById(input: { projectId: $projectId, contentId: $contentId }) {
    item {
      id
    }
  }
}
"#;
