use std::sync::Arc;

use crate::{
    application::dto::{CreateItemRequest, ItemsPageResponse, ListItemsQueryRequest},
    domain::{errors::DomainError, item::Item, item::NewItem, query},
    infrastructure::ItemStore,
};

/// Listing, lookup, and creation over the item store.
///
/// Every call loads the document fresh, so results always reflect the
/// latest write. The only cached derivation lives in
/// [`crate::application::stats_cache::StatsCache`].
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn ItemStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub async fn list_items(
        &self,
        request: ListItemsQueryRequest,
    ) -> Result<ItemsPageResponse, DomainError> {
        let items = self.store.load().await?;
        let page = query::run(&items, &request.into_query());
        Ok(ItemsPageResponse::from(page))
    }

    pub async fn get_item(&self, raw_id: &str) -> Result<Item, DomainError> {
        // An unparsable id cannot name any item, so it is a plain miss.
        let Ok(id) = raw_id.trim().parse::<u64>() else {
            return Err(DomainError::not_found("item not found"));
        };

        let items = self.store.load().await?;
        items
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| DomainError::not_found("item not found"))
    }

    pub async fn create_item(&self, request: CreateItemRequest) -> Result<Item, DomainError> {
        request.validate()?;

        self.store
            .append(NewItem {
                name: request.name.trim().to_string(),
                price: request.price,
            })
            .await
    }
}
