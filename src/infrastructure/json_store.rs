//! File-backed item store: one JSON array, rewritten whole on append.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{errors::DomainError, item::Item, item::NewItem};
use crate::infrastructure::ItemStore;

pub struct JsonFileStore {
    path: PathBuf,
    // Serializes writers; readers go straight to the file.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_items(&self) -> Result<Vec<Item>, DomainError> {
        let raw = tokio::fs::read(&self.path).await.map_err(|err| {
            DomainError::storage(format!("failed to read {}: {err}", self.path.display()))
        })?;

        serde_json::from_slice(&raw).map_err(|err| {
            DomainError::storage(format!(
                "malformed item document {}: {err}",
                self.path.display()
            ))
        })
    }

    /// Rewrites the whole document through a sibling temp file so readers
    /// never observe a half-written array.
    fn write_items(&self, items: &[Item]) -> Result<(), DomainError> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|err| {
            DomainError::storage(format!("failed to create temp file in {}: {err}", parent.display()))
        })?;

        let payload = serde_json::to_vec_pretty(items)
            .map_err(|err| DomainError::internal(format!("failed to encode items: {err}")))?;
        tmp.write_all(&payload)
            .and_then(|()| tmp.flush())
            .map_err(|err| DomainError::storage(format!("failed to write items: {err}")))?;

        tmp.persist(&self.path).map_err(|err| {
            DomainError::storage(format!("failed to replace {}: {err}", self.path.display()))
        })?;

        Ok(())
    }
}

#[async_trait]
impl ItemStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Item>, DomainError> {
        self.read_items().await
    }

    async fn last_modified(&self) -> Result<SystemTime, DomainError> {
        let metadata = tokio::fs::metadata(&self.path).await.map_err(|err| {
            DomainError::storage(format!("failed to stat {}: {err}", self.path.display()))
        })?;

        metadata.modified().map_err(|err| {
            DomainError::storage(format!(
                "no modification time for {}: {err}",
                self.path.display()
            ))
        })
    }

    async fn append(&self, item: NewItem) -> Result<Item, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut items = self.read_items().await?;
        let id = items.iter().map(|item| item.id).max().unwrap_or(0) + 1;
        let created = Item {
            id,
            name: item.name,
            price: item.price,
        };

        items.push(created.clone());
        self.write_items(&items)?;
        debug!(id, path = %self.path.display(), "appended item");

        Ok(created)
    }
}
