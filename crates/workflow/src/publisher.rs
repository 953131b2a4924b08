//! Issue Publisher.
//!
//! resolve → create → link:
//!
//! 1. The assignee, project (when requested), and repository node ids are
//!    resolved concurrently. All must succeed before anything is written.
//! 2. The issue is created with the resolved ids.
//! 3. When a project was requested the issue is added to it. A failure here
//!    is reported as [`ReportError::ProjectLinkFailed`]; the issue is kept.

use contributions::{
    report_title, Clock, IdentityResolver, IssueRequest, IssueTracker, NewIssue, ProjectBoard,
    PublishedIssue, ReportError,
};
use tracing::{info, instrument, warn};

/// Files the weekly report described by `request`.
#[instrument(
    skip_all,
    fields(
        owner = %request.owner,
        repository = %request.repository,
        assignee = %request.assignee,
        project = ?request.project_number.map(|n| n.as_u32()),
    )
)]
pub async fn create_issue<C>(
    client: &C,
    clock: &dyn Clock,
    request: &IssueRequest,
) -> Result<PublishedIssue, ReportError>
where
    C: IdentityResolver + IssueTracker + ProjectBoard,
{
    let title = report_title(clock.today());

    let project_lookup = async {
        match request.project_number {
            Some(number) => client
                .project_id(&request.organization, &request.owner, number)
                .await
                .map(Some),
            None => Ok(None),
        }
    };

    let (assignee_id, project_id, repository_id) = tokio::try_join!(
        client.user_id(&request.assignee),
        project_lookup,
        client.repository_id(&request.organization, &request.owner, &request.repository),
    )?;

    let issue = client
        .create_issue(&NewIssue {
            repository_id,
            assignee_id,
            title,
            body: request.body.clone(),
        })
        .await?;
    info!(number = issue.number, url = %issue.url, "Created report issue");

    let Some(project_id) = project_id else {
        return Ok(PublishedIssue {
            issue,
            project_item: None,
        });
    };

    match client.add_issue_to_project(&project_id, &issue.id).await {
        Ok(item) => {
            info!(item = %item, "Added issue to project");
            Ok(PublishedIssue {
                issue,
                project_item: Some(item),
            })
        }
        Err(source) => {
            warn!(url = %issue.url, error = %source, "Issue created but project link failed");
            Err(ReportError::ProjectLinkFailed {
                issue_url: issue.url,
                source: Box::new(source),
            })
        }
    }
}
