use serde::{Deserialize, Serialize};

use crate::catalog::Record;

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Caller-assigned identifier, unique among books
    pub id: i64,
    pub title: String,
    /// Author reference; not checked against the author collection
    pub author_id: i64,
    pub price: f64,
    /// Remaining purchasable quantity, decremented by orders
    pub stock: i64,
}

impl Record for Book {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Replacement for a book's mutable fields. An `id` in the body is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookUpdate {
    pub title: String,
    pub author_id: i64,
    pub price: f64,
    pub stock: i64,
}

/// Query string accepted by `GET /books`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBooksParams {
    pub author_id: Option<i64>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub sort_by: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}
