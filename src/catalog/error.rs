use std::fmt;

use bookstore_http::error::AppError;
use thiserror::Error;

/// Which collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Book,
    Author,
    Order,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Entity::Book => "Book",
            Entity::Author => "Author",
            Entity::Order => "Order",
        })
    }
}

/// Caller-correctable catalog failures. None of them mutate the catalog.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    #[error("{entity} not found")]
    NotFound { entity: Entity, id: i64 },

    #[error("{entity} with this ID already exists")]
    Conflict { entity: Entity, id: i64 },

    #[error("Not enough stock available")]
    InsufficientStock {
        book_id: i64,
        requested: i64,
        available: i64,
    },

    #[error("Order quantity puts stock out of range")]
    StockOutOfRange { book_id: i64, requested: i64 },
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { .. } => AppError::not_found(err.to_string()),
            CatalogError::Conflict { .. } => {
                AppError::bad_request_with_code("duplicate_id", err.to_string())
            }
            CatalogError::InsufficientStock { .. } => {
                AppError::bad_request_with_code("insufficient_stock", err.to_string())
            }
            CatalogError::StockOutOfRange { .. } => {
                AppError::bad_request_with_code("invalid_quantity", err.to_string())
            }
        }
    }
}
