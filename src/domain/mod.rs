pub mod errors;
pub mod item;
pub mod query;
pub mod stats;
