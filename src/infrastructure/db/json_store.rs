use std::{
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::{fs, sync::{Mutex, MutexGuard}};

use crate::errors::StoreError;

/// A record that carries a numeric id assigned by the store.
pub trait Identified {
    fn id(&self) -> u64;
}

/// In-memory copy of one JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Collection<T> {
    /// Highest id ever issued, so deleted ids are never handed out again.
    #[serde(default)]
    pub last_id: u64,
    #[serde(default)]
    pub items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection { last_id: 0, items: Vec::new() }
    }
}

impl<T: Identified> Collection<T> {
    /// Reserves the next id: one past the larger of the stored high-water mark and the largest id present.
    pub fn next_id(&mut self) -> Result<u64, StoreError> {
        let max_present = self.items.iter().map(Identified::id).max().unwrap_or(0);
        let id = self.last_id
            .max(max_present)
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted)?;
        self.last_id = id;
        Ok(id)
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn remove(&mut self, id: u64) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }
}

/// Accepts both the current envelope layout and a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDocument<T> {
    Envelope(Collection<T>),
    Bare(Vec<T>),
}

/// One JSON file holding a whole collection.
///
/// Reads never fail: a missing or unparsable file reads as an empty collection.
/// Writers go through [`JsonFileStore::write`], which holds the store's lock from
/// load to commit so read-modify-write cycles in this process never interleave.
pub struct JsonFileStore<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Identified,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            path: path.into(),
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Collection<T> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Collection::default(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Store unreadable, treating as empty");
                return Collection::default();
            }
        };

        match serde_json::from_slice::<StoredDocument<T>>(&raw) {
            Ok(StoredDocument::Envelope(collection)) => collection,
            Ok(StoredDocument::Bare(items)) => Collection { last_id: 0, items },
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Store is not valid JSON, treating as empty");
                Collection::default()
            }
        }
    }

    /// Locks the store and loads the current collection for modification.
    pub async fn write(&self) -> StoreWriter<'_, T> {
        let guard = self.write_lock.lock().await;
        let collection = self.load().await;
        StoreWriter { store: self, _guard: guard, collection }
    }

    async fn persist(&self, collection: &Collection<T>) -> Result<(), StoreError> {
        let path = self.path.display().to_string();

        let json = serde_json::to_vec_pretty(collection)
            .map_err(|source| StoreError::Serialize { path: path.clone(), source })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Write { path: path.clone(), source })?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &json)
            .await
            .map_err(|source| StoreError::Write { path: path.clone(), source })?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|source| StoreError::Write { path, source })?;

        Ok(())
    }
}

/// Exclusive handle on a store; dropping it without `commit` discards the changes.
pub struct StoreWriter<'a, T>
where
    T: Serialize + DeserializeOwned + Identified,
{
    store: &'a JsonFileStore<T>,
    _guard: MutexGuard<'a, ()>,
    pub collection: Collection<T>,
}

impl<T> StoreWriter<'_, T>
where
    T: Serialize + DeserializeOwned + Identified,
{
    pub async fn commit(self) -> Result<(), StoreError> {
        self.store.persist(&self.collection).await
    }
}
