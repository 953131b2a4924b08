//! Issue creation and project board linkage.

use async_trait::async_trait;
use contributions::{
    CreatedIssue, IssueNodeId, IssueTracker, NewIssue, ProjectBoard, ProjectItemId, ProjectNodeId,
    ReportError,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::client::GithubClient;
use crate::queries::{ADD_PROJECT_ITEM_MUTATION, CREATE_ISSUE_MUTATION};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateIssueData {
    create_issue: CreateIssuePayload,
}

#[derive(Debug, Deserialize)]
struct CreateIssuePayload {
    issue: CreatedIssue,
}

#[derive(Debug, Deserialize)]
struct AddProjectItemData {
    #[serde(rename = "addProjectV2ItemById")]
    add_item: AddProjectItemPayload,
}

#[derive(Debug, Deserialize)]
struct AddProjectItemPayload {
    item: ProjectItem,
}

#[derive(Debug, Deserialize)]
struct ProjectItem {
    id: ProjectItemId,
}

#[async_trait]
impl IssueTracker for GithubClient {
    #[instrument(skip_all, fields(repository = %issue.repository_id, title = %issue.title))]
    async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue, ReportError> {
        let variables = json!({
            "repositoryId": issue.repository_id.as_str(),
            "assigneeIds": [issue.assignee_id.as_str()],
            "title": issue.title,
            "body": issue.body,
        });

        let data: CreateIssueData = self
            .execute("create_issue", CREATE_ISSUE_MUTATION, variables)
            .await?;
        Ok(data.create_issue.issue)
    }
}

#[async_trait]
impl ProjectBoard for GithubClient {
    #[instrument(skip_all, fields(project = %project, issue = %issue))]
    async fn add_issue_to_project(
        &self,
        project: &ProjectNodeId,
        issue: &IssueNodeId,
    ) -> Result<ProjectItemId, ReportError> {
        let variables = json!({
            "projectId": project.as_str(),
            "contentId": issue.as_str(),
        });

        let data: AddProjectItemData = self
            .execute("add_project_item", ADD_PROJECT_ITEM_MUTATION, variables)
            .await?;
        Ok(data.add_item.item.id)
    }
}
