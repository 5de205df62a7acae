pub mod catalog_service;
pub mod dto;
pub mod stats_cache;
