use std::sync::Arc;

use crate::{
    application::{catalog_service::CatalogService, stats_cache::StatsCache},
    infrastructure::ItemStore,
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub stats: Arc<StatsCache>,
}

impl AppState {
    /// Wires both services onto one shared store so listings and the stats
    /// cache observe the same document.
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(store.clone())),
            stats: Arc::new(StatsCache::new(store)),
        }
    }
}
