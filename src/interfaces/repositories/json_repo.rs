use std::{path::PathBuf, sync::Arc};

use crate::{
    db::json_store::{Identified, JsonFileStore},
    entities::{category::Category, project::Project},
};

impl Identified for Project {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Identified for Category {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Clones share one underlying store, and with it one write lock.
#[derive(Clone)]
pub struct JsonProjectRepo {
    pub store: Arc<JsonFileStore<Project>>,
}

#[derive(Clone)]
pub struct JsonCategoryRepo {
    pub store: Arc<JsonFileStore<Category>>,
}

impl JsonProjectRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonProjectRepo { store: Arc::new(JsonFileStore::new(path)) }
    }
}

impl JsonCategoryRepo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonCategoryRepo { store: Arc::new(JsonFileStore::new(path)) }
    }
}
