use tokio::sync::Mutex;
use validator::Validate;

use crate::{
    entities::category::{Category, NewCategoryRequest, UpdateCategoryRequest},
    errors::AppError,
    repositories::{category::CategoryRepository, project::ProjectRepository},
    utils::valid_id::valid_id,
};

/// Category operations; holds the project repository for the rename cascade and the in-use check.
///
/// Updates and deletes run one at a time under `mutation_lock`, so a rename and
/// its project cascade finish before the next category change starts.
pub struct CategoryHandler<C, P>
where
    C: CategoryRepository,
    P: ProjectRepository,
{
    pub category_repo: C,
    pub project_repo: P,
    mutation_lock: Mutex<()>,
}

impl<C, P> CategoryHandler<C, P>
where
    C: CategoryRepository,
    P: ProjectRepository,
{
    pub fn new(category_repo: C, project_repo: P) -> Self {
        CategoryHandler {
            category_repo,
            project_repo,
            mutation_lock: Mutex::new(()),
        }
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.category_repo.list_categories().await
    }

    pub async fn create_category(&self, request: NewCategoryRequest) -> Result<Category, AppError> {
        request.validate()?;
        let (value, label) = request.normalized()?;

        let category = self.category_repo.create_category(value, label).await?;
        tracing::info!(category_id = category.id, value = %category.value, "Category created");

        Ok(category)
    }

    /// Updates a category; a changed `value` is carried over to every project that used the old one.
    pub async fn update_category(
        &self,
        id: &str,
        request: UpdateCategoryRequest,
    ) -> Result<Category, AppError> {
        let id = valid_id(id, "category")?;
        request.validate()?;
        let (value, label) = request.normalized()?;

        let _serialized = self.mutation_lock.lock().await;
        let update = self.category_repo.update_category(id, value, label).await?;
        let category = update.category;

        if update.previous_value != category.value {
            let moved = self.project_repo
                .reassign_category(&update.previous_value, &category.value)
                .await?;
            tracing::info!(
                category_id = id,
                from = %update.previous_value,
                to = %category.value,
                projects = moved,
                "Category renamed"
            );
        }

        Ok(category)
    }

    /// Refuses to delete a category that any project still references.
    pub async fn delete_category(&self, id: &str) -> Result<(), AppError> {
        let id = valid_id(id, "category")?;

        let _serialized = self.mutation_lock.lock().await;
        let category = self.category_repo.get_category(id).await?;
        let in_use = self.project_repo.count_projects_in_category(&category.value).await?;
        if in_use > 0 {
            return Err(AppError::BadRequest(format!(
                "Category is used by {} project(s) and cannot be deleted",
                in_use
            )));
        }

        self.category_repo.delete_category(id).await?;
        tracing::info!(category_id = id, value = %category.value, "Category deleted");
        Ok(())
    }
}
