use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::DomainError,
    item::Item,
    query::{ItemQuery, ItemsPage},
};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Raw listing parameters as they arrive on the wire.
///
/// `page` and `limit` deserialize as strings on purpose: the contract is
/// coerce-to-default, never reject, and a typed integer field would turn
/// `?page=abc` into a 400 before the coercion could run.
#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQueryRequest {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default, alias = "pageSize")]
    pub limit: Option<String>,
}

impl ListItemsQueryRequest {
    pub fn into_query(self) -> ItemQuery {
        ItemQuery::from_raw(self.q.as_deref(), self.page.as_deref(), self.limit.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub total: usize,
    pub page: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

#[derive(Debug, Serialize)]
pub struct ItemsPageResponse {
    pub data: Vec<Item>,
    pub meta: PageMeta,
}

impl From<ItemsPage> for ItemsPageResponse {
    fn from(page: ItemsPage) -> Self {
        Self {
            data: page.items,
            meta: PageMeta {
                total: page.total,
                page: page.page,
                total_pages: page.total_pages,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
    pub price: f64,
}

impl CreateItemRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name must not be blank"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation(
                "price must be a non-negative number",
            ));
        }
        Ok(())
    }
}
