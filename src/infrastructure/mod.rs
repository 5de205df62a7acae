use std::time::SystemTime;

use async_trait::async_trait;

use crate::domain::{errors::DomainError, item::Item, item::NewItem};

pub mod json_store;

pub use json_store::JsonFileStore;

/// Port over the persistent catalog document.
///
/// `load` always re-reads the source of truth; there is deliberately no
/// caching at this layer, so listings are consistent with the latest write.
/// `last_modified` is the cheap freshness signal the stats cache keys on.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn load(&self) -> Result<Vec<Item>, DomainError>;

    async fn last_modified(&self) -> Result<SystemTime, DomainError>;

    /// Appends an item, assigning its id, and rewrites the document.
    async fn append(&self, item: NewItem) -> Result<Item, DomainError>;
}
