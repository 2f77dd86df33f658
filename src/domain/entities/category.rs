use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::AppError;

const MAX_VALUE_LENGTH: u64 = 100;
const MAX_LABEL_LENGTH: u64 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NewCategoryRequest {
    #[validate(length(max = MAX_VALUE_LENGTH))]
    pub value: String,

    #[validate(length(max = MAX_LABEL_LENGTH))]
    pub label: String,
}

impl NewCategoryRequest {
    /// Trimmed `(value, label)`; both are required.
    pub fn normalized(&self) -> Result<(String, String), AppError> {
        let value = self.value.trim();
        let label = self.label.trim();

        if value.is_empty() || label.is_empty() {
            return Err(AppError::BadRequest("Category value and label are required".into()));
        }

        Ok((value.to_string(), label.to_string()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateCategoryRequest {
    #[validate(length(max = MAX_VALUE_LENGTH))]
    pub value: Option<String>,

    #[validate(length(max = MAX_LABEL_LENGTH))]
    pub label: Option<String>,
}

impl UpdateCategoryRequest {
    /// Trimmed optional `(value, label)`; a provided field may not be blank.
    pub fn normalized(&self) -> Result<(Option<String>, Option<String>), AppError> {
        let value = self.value.as_deref().map(str::trim);
        let label = self.label.as_deref().map(str::trim);

        if value.is_some_and(str::is_empty) {
            return Err(AppError::BadRequest("Category value cannot be empty".into()));
        }
        if label.is_some_and(str::is_empty) {
            return Err(AppError::BadRequest("Category label cannot be empty".into()));
        }

        Ok((value.map(str::to_string), label.map(str::to_string)))
    }
}
