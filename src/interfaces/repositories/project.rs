use async_trait::async_trait;

use crate::{
    entities::project::{NewProjectRequest, Project, UpdateProjectRequest},
    errors::AppError,
    repositories::json_repo::JsonProjectRepo,
};

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;
    async fn create_project(&self, new_project: NewProjectRequest) -> Result<Project, AppError>;
    async fn update_project(&self, id: u64, changes: &UpdateProjectRequest) -> Result<Project, AppError>;
    /// Returns whether a project was removed.
    async fn delete_project(&self, id: u64) -> Result<bool, AppError>;
    async fn count_projects_in_category(&self, category: &str) -> Result<usize, AppError>;
    /// Rewrites `from` to `to` on every matching project; persists only when something changed.
    async fn reassign_category(&self, from: &str, to: &str) -> Result<usize, AppError>;
}

#[async_trait]
impl ProjectRepository for JsonProjectRepo {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        Ok(self.store.load().await.items)
    }

    async fn create_project(&self, new_project: NewProjectRequest) -> Result<Project, AppError> {
        let mut writer = self.store.write().await;

        let id = writer.collection.next_id()?;
        let project = new_project.into_project(id);
        writer.collection.items.push(project.clone());
        writer.commit().await?;

        Ok(project)
    }

    async fn update_project(&self, id: u64, changes: &UpdateProjectRequest) -> Result<Project, AppError> {
        let mut writer = self.store.write().await;

        let project = writer.collection
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;
        changes.apply_to(project);
        let updated = project.clone();

        writer.commit().await?;
        Ok(updated)
    }

    async fn delete_project(&self, id: u64) -> Result<bool, AppError> {
        let mut writer = self.store.write().await;

        if writer.collection.remove(id).is_none() {
            return Ok(false);
        }

        writer.commit().await?;
        Ok(true)
    }

    async fn count_projects_in_category(&self, category: &str) -> Result<usize, AppError> {
        let collection = self.store.load().await;
        Ok(collection.items.iter().filter(|p| p.category == category).count())
    }

    async fn reassign_category(&self, from: &str, to: &str) -> Result<usize, AppError> {
        let mut writer = self.store.write().await;

        let mut changed = 0;
        for project in writer.collection.items.iter_mut().filter(|p| p.category == from) {
            project.category = to.to_string();
            changed += 1;
        }

        if changed > 0 {
            writer.commit().await?;
        }
        Ok(changed)
    }
}
