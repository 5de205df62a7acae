use serde::{Deserialize, Serialize};

/// A catalog entry as stored in the backing JSON document.
///
/// Items are immutable once written; there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub price: f64,
}

/// Input for creating an item. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub price: f64,
}
