//! Aggregate statistics over the full catalog.

use serde::{Deserialize, Serialize};

use crate::domain::item::Item;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    #[serde(rename = "averagePrice")]
    pub average_price: f64,
}

/// Computes item count and mean price. Pure; an empty collection averages
/// to zero rather than dividing by it.
pub fn compute(collection: &[Item]) -> Stats {
    let total = collection.len();
    let average_price = if total > 0 {
        collection.iter().map(|item| item.price).sum::<f64>() / total as f64
    } else {
        0.0
    };

    Stats {
        total,
        average_price,
    }
}
