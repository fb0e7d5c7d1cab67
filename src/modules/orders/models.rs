use serde::{Deserialize, Serialize};

use crate::catalog::Record;

/// A placed order. `total_price` is always computed by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub book_id: i64,
    pub quantity: i64,
    pub total_price: f64,
    /// Free-text label such as "pending" or "completed"; never interpreted
    pub status: String,
}

impl Record for Order {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Order placement payload. Any caller-supplied `total_price` is discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub id: i64,
    pub book_id: i64,
    pub quantity: i64,
    pub status: String,
}
