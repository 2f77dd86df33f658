use validator::Validate;

use crate::{
    entities::project::{NewProjectRequest, Project, UpdateProjectRequest},
    errors::AppError,
    repositories::project::ProjectRepository,
    utils::valid_id::valid_id,
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        ProjectHandler { project_repo }
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects().await
    }

    /// Creates a project with the next free id
    pub async fn create_project(&self, request: NewProjectRequest) -> Result<Project, AppError> {
        request.validate()?;

        let project = self.project_repo.create_project(request).await?;
        tracing::info!(project_id = project.id, "Project created");

        Ok(project)
    }

    /// Merges the provided fields into an existing project
    pub async fn update_project(
        &self,
        id: &str,
        request: UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        let id = valid_id(id, "project")?;
        request.validate()?;

        let project = self.project_repo.update_project(id, &request).await?;
        tracing::info!(project_id = id, "Project updated");

        Ok(project)
    }

    /// Deleting an unknown id is not an error.
    pub async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        let id = valid_id(id, "project")?;

        if self.project_repo.delete_project(id).await? {
            tracing::info!(project_id = id, "Project deleted");
        }
        Ok(())
    }
}
