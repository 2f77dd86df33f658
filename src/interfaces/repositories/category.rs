use async_trait::async_trait;

use crate::{
    entities::category::Category,
    errors::AppError,
    repositories::json_repo::JsonCategoryRepo,
};

/// Result of an update: the stored category plus the value it had before.
#[derive(Debug, Clone)]
pub struct CategoryUpdate {
    pub category: Category,
    pub previous_value: String,
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, AppError>;
    async fn get_category(&self, id: u64) -> Result<Category, AppError>;
    async fn create_category(&self, value: String, label: String) -> Result<Category, AppError>;
    async fn update_category(
        &self,
        id: u64,
        value: Option<String>,
        label: Option<String>,
    ) -> Result<CategoryUpdate, AppError>;
    async fn delete_category(&self, id: u64) -> Result<(), AppError>;
}

fn not_found() -> AppError {
    AppError::NotFound("Category not found".into())
}

fn duplicate_value() -> AppError {
    AppError::Conflict("Category value already exists".into())
}

#[async_trait]
impl CategoryRepository for JsonCategoryRepo {
    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.store.load().await.items)
    }

    async fn get_category(&self, id: u64) -> Result<Category, AppError> {
        self.store.load().await
            .get(id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_category(&self, value: String, label: String) -> Result<Category, AppError> {
        let mut writer = self.store.write().await;

        if writer.collection.items.iter().any(|c| c.value == value) {
            return Err(duplicate_value());
        }

        let id = writer.collection.next_id()?;
        let category = Category { id, value, label };
        writer.collection.items.push(category.clone());
        writer.commit().await?;

        Ok(category)
    }

    async fn update_category(
        &self,
        id: u64,
        value: Option<String>,
        label: Option<String>,
    ) -> Result<CategoryUpdate, AppError> {
        let mut writer = self.store.write().await;

        if let Some(value) = &value {
            if writer.collection.items.iter().any(|c| c.id != id && &c.value == value) {
                return Err(duplicate_value());
            }
        }

        let category = writer.collection.get_mut(id).ok_or_else(not_found)?;
        let previous_value = category.value.clone();
        if let Some(value) = value {
            category.value = value;
        }
        if let Some(label) = label {
            category.label = label;
        }
        let category = category.clone();

        writer.commit().await?;
        Ok(CategoryUpdate { category, previous_value })
    }

    async fn delete_category(&self, id: u64) -> Result<(), AppError> {
        let mut writer = self.store.write().await;

        writer.collection.remove(id).ok_or_else(not_found)?;
        writer.commit().await?;
        Ok(())
    }
}
