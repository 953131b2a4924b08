//! Name → node id lookups.

use async_trait::async_trait;
use contributions::{
    IdentityResolver, LookupKind, OrganizationName, OwnerLogin, ProjectNodeId, ProjectNumber,
    ReportError, RepositoryName, RepositoryNodeId, UserNodeId, Username,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::client::GithubClient;
use crate::queries::{PROJECT_ID_QUERY, REPOSITORY_ID_QUERY, USER_ID_QUERY, VIEWER_QUERY};

#[derive(Debug, Deserialize)]
struct NodeRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ViewerData {
    viewer: Viewer,
}

#[derive(Debug, Deserialize)]
struct Viewer {
    login: String,
}

#[derive(Debug, Deserialize)]
struct UserData {
    user: Option<NodeRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectData {
    repository_owner: Option<ProjectOwner>,
}

#[derive(Debug, Deserialize)]
struct ProjectOwner {
    #[serde(rename = "projectV2", default)]
    project_v2: Option<NodeRef>,
}

#[derive(Debug, Deserialize)]
struct RepositoryData {
    repository: Option<NodeRef>,
}

#[async_trait]
impl IdentityResolver for GithubClient {
    #[instrument(skip_all)]
    async fn authenticated_username(&self) -> Result<Username, ReportError> {
        let data: ViewerData = self.execute("viewer", VIEWER_QUERY, json!({})).await?;
        Username::new(data.viewer.login)
            .ok_or_else(|| ReportError::api("viewer login was empty"))
    }

    #[instrument(skip_all, fields(username = %username))]
    async fn user_id(&self, username: &Username) -> Result<UserNodeId, ReportError> {
        let lookup = Some((LookupKind::User, username.as_str()));
        let data: UserData = self
            .execute("user_id", USER_ID_QUERY, json!({ "login": username.as_str() }))
            .await
            .map_err(|e| e.into_report_error(lookup))?;

        data.user
            .and_then(|node| UserNodeId::new(node.id))
            .ok_or_else(|| ReportError::not_found(LookupKind::User, username.as_str()))
    }

    #[instrument(skip_all, fields(organization = %organization, owner = %owner, number = number.as_u32()))]
    async fn project_id(
        &self,
        organization: &OrganizationName,
        owner: &OwnerLogin,
        number: ProjectNumber,
    ) -> Result<ProjectNodeId, ReportError> {
        let name = format!("{owner}#{number} ({organization})");
        let data: ProjectData = self
            .execute(
                "project_id",
                PROJECT_ID_QUERY,
                json!({ "owner": owner.as_str(), "number": number.as_u32() }),
            )
            .await
            .map_err(|e| e.into_report_error(Some((LookupKind::Project, name.as_str()))))?;

        data.repository_owner
            .and_then(|project_owner| project_owner.project_v2)
            .and_then(|node| ProjectNodeId::new(node.id))
            .ok_or_else(|| ReportError::not_found(LookupKind::Project, name))
    }

    #[instrument(skip_all, fields(organization = %organization, owner = %owner, name = %name))]
    async fn repository_id(
        &self,
        organization: &OrganizationName,
        owner: &OwnerLogin,
        name: &RepositoryName,
    ) -> Result<RepositoryNodeId, ReportError> {
        let full_name = format!("{owner}/{name}");
        let data: RepositoryData = self
            .execute(
                "repository_id",
                REPOSITORY_ID_QUERY,
                json!({ "owner": owner.as_str(), "name": name.as_str() }),
            )
            .await
            .map_err(|e| e.into_report_error(Some((LookupKind::Repository, full_name.as_str()))))?;

        data.repository
            .and_then(|node| RepositoryNodeId::new(node.id))
            .ok_or_else(|| ReportError::not_found(LookupKind::Repository, full_name))
    }
}
