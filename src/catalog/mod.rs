//! The in-memory record store behind every module.
//!
//! A [`Catalog`] owns the book, author, and order collections. It is built once
//! at startup and shared with the HTTP modules as a [`SharedCatalog`]; every
//! mutation runs under the write half of the lock, so order placement checks
//! and decrements stock atomically. Order ids are not unique; lookups return
//! the first order placed under an id.

mod collection;
mod error;
pub mod query;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::modules::authors::models::{Author, AuthorUpdate};
use crate::modules::books::models::{Book, BookUpdate};
use crate::modules::orders::models::{NewOrder, Order};

pub use collection::{Collection, Ledger, Record};
pub use error::{CatalogError, CatalogResult, Entity};
pub use query::BookListing;

/// Catalog handle shared between request handlers.
pub type SharedCatalog = Arc<RwLock<Catalog>>;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Collection<Book>,
    authors: Collection<Author>,
    orders: Ledger<Order>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The demo catalog a fresh process starts with: two books, their authors, no orders.
    pub fn seeded() -> Self {
        let books = [
            Book {
                id: 1,
                title: "1984".to_string(),
                author_id: 1,
                price: 15.99,
                stock: 100,
            },
            Book {
                id: 2,
                title: "To Kill a Mockingbird".to_string(),
                author_id: 2,
                price: 10.99,
                stock: 50,
            },
        ];
        let authors = [
            Author {
                id: 1,
                name: "George Orwell".to_string(),
                bio: Some("British novelist and essayist.".to_string()),
            },
            Author {
                id: 2,
                name: "Harper Lee".to_string(),
                bio: Some(
                    "American novelist best known for 'To Kill a Mockingbird'.".to_string(),
                ),
            },
        ];

        Self {
            books: books.into_iter().collect(),
            authors: authors.into_iter().collect(),
            orders: Ledger::new(),
        }
    }

    pub fn into_shared(self) -> SharedCatalog {
        Arc::new(RwLock::new(self))
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    // Books

    pub fn list_books(&self, listing: &BookListing) -> Vec<Book> {
        listing.run(self.books.iter())
    }

    pub fn get_book(&self, id: i64) -> CatalogResult<Book> {
        self.books.get(id).cloned().ok_or(CatalogError::NotFound {
            entity: Entity::Book,
            id,
        })
    }

    pub fn create_book(&mut self, book: Book) -> CatalogResult<Book> {
        let id = book.id;
        let created = self.books.insert(book).map_err(|_| CatalogError::Conflict {
            entity: Entity::Book,
            id,
        })?;
        tracing::info!(book_id = id, title = %created.title, "book created");
        Ok(created.clone())
    }

    pub fn update_book(&mut self, id: i64, update: BookUpdate) -> CatalogResult<Book> {
        let book = self.books.get_mut(id).ok_or(CatalogError::NotFound {
            entity: Entity::Book,
            id,
        })?;
        book.title = update.title;
        book.author_id = update.author_id;
        book.price = update.price;
        book.stock = update.stock;
        tracing::info!(book_id = id, "book updated");
        Ok(book.clone())
    }

    /// Remove a book if present. Returns whether anything was removed.
    pub fn delete_book(&mut self, id: i64) -> bool {
        let removed = self.books.remove(id).is_some();
        tracing::info!(book_id = id, removed, "book delete");
        removed
    }

    // Authors

    pub fn list_authors(&self) -> Vec<Author> {
        self.authors.iter().cloned().collect()
    }

    pub fn get_author(&self, id: i64) -> CatalogResult<Author> {
        self.authors.get(id).cloned().ok_or(CatalogError::NotFound {
            entity: Entity::Author,
            id,
        })
    }

    pub fn create_author(&mut self, author: Author) -> CatalogResult<Author> {
        let id = author.id;
        let created = self
            .authors
            .insert(author)
            .map_err(|_| CatalogError::Conflict {
                entity: Entity::Author,
                id,
            })?;
        tracing::info!(author_id = id, name = %created.name, "author created");
        Ok(created.clone())
    }

    pub fn update_author(&mut self, id: i64, update: AuthorUpdate) -> CatalogResult<Author> {
        let author = self.authors.get_mut(id).ok_or(CatalogError::NotFound {
            entity: Entity::Author,
            id,
        })?;
        author.name = update.name;
        author.bio = update.bio;
        tracing::info!(author_id = id, "author updated");
        Ok(author.clone())
    }

    /// Remove an author if present. Books referencing it are left alone.
    pub fn delete_author(&mut self, id: i64) -> bool {
        let removed = self.authors.remove(id).is_some();
        tracing::info!(author_id = id, removed, "author delete");
        removed
    }

    // Orders

    pub fn list_orders(&self) -> Vec<Order> {
        self.orders.iter().cloned().collect()
    }

    pub fn get_order(&self, id: i64) -> CatalogResult<Order> {
        self.orders.get(id).cloned().ok_or(CatalogError::NotFound {
            entity: Entity::Order,
            id,
        })
    }

    /// Place an order against a book's stock.
    ///
    /// All checks run before anything is written: a missing book, a quantity
    /// above the current stock, or one that would push stock out of range leave
    /// the catalog untouched.
    pub fn place_order(&mut self, request: NewOrder) -> CatalogResult<Order> {
        let book = self
            .books
            .get_mut(request.book_id)
            .ok_or(CatalogError::NotFound {
                entity: Entity::Book,
                id: request.book_id,
            })?;

        if book.stock < request.quantity {
            tracing::warn!(
                book_id = book.id,
                requested = request.quantity,
                available = book.stock,
                "order rejected for insufficient stock"
            );
            return Err(CatalogError::InsufficientStock {
                book_id: book.id,
                requested: request.quantity,
                available: book.stock,
            });
        }

        let remaining = book
            .stock
            .checked_sub(request.quantity)
            .ok_or(CatalogError::StockOutOfRange {
                book_id: book.id,
                requested: request.quantity,
            })?;

        book.stock = remaining;
        let order = Order {
            id: request.id,
            book_id: request.book_id,
            quantity: request.quantity,
            total_price: request.quantity as f64 * book.price,
            status: request.status,
        };
        tracing::info!(
            order_id = order.id,
            book_id = order.book_id,
            quantity = order.quantity,
            total_price = order.total_price,
            remaining_stock = book.stock,
            "order placed"
        );

        Ok(self.orders.push(order).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::query::{BookFilter, Pagination, SortOrder};

    fn new_book(id: i64, price: f64, stock: i64) -> Book {
        Book {
            id,
            title: format!("Title {id}"),
            author_id: 1,
            price,
            stock,
        }
    }

    fn order(id: i64, book_id: i64, quantity: i64) -> NewOrder {
        NewOrder {
            id,
            book_id,
            quantity,
            status: "pending".to_string(),
        }
    }

    #[test]
    fn seeded_catalog_has_demo_records() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.get_book(1).unwrap().title, "1984");
        assert_eq!(catalog.get_book(2).unwrap().stock, 50);
        assert_eq!(catalog.get_author(1).unwrap().name, "George Orwell");
        assert_eq!(catalog.list_authors().len(), 2);
        assert!(catalog.list_orders().is_empty());
    }

    #[test]
    fn created_book_is_returned_unchanged() {
        let mut catalog = Catalog::new();
        let book = new_book(10, 8.5, 3);
        assert_eq!(catalog.create_book(book.clone()).unwrap(), book);
        assert_eq!(catalog.get_book(10).unwrap(), book);
    }

    #[test]
    fn duplicate_book_id_conflicts_and_keeps_original() {
        let mut catalog = Catalog::seeded();
        let err = catalog.create_book(new_book(1, 1.0, 1)).unwrap_err();
        assert_eq!(
            err,
            CatalogError::Conflict {
                entity: Entity::Book,
                id: 1
            }
        );
        let original = catalog.get_book(1).unwrap();
        assert_eq!(original.title, "1984");
        assert_eq!(original.price, 15.99);
    }

    #[test]
    fn update_replaces_mutable_fields_only() {
        let mut catalog = Catalog::seeded();
        let updated = catalog
            .update_book(
                2,
                BookUpdate {
                    title: "Go Set a Watchman".to_string(),
                    author_id: 2,
                    price: 12.5,
                    stock: 7,
                },
            )
            .unwrap();
        assert_eq!(updated.id, 2);
        assert_eq!(catalog.get_book(2).unwrap(), updated);
    }

    #[test]
    fn update_missing_book_is_not_found() {
        let mut catalog = Catalog::new();
        let err = catalog
            .update_book(
                3,
                BookUpdate {
                    title: "x".to_string(),
                    author_id: 1,
                    price: 1.0,
                    stock: 1,
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::NotFound {
                entity: Entity::Book,
                id: 3
            }
        ));
    }

    #[test]
    fn deleting_missing_book_is_a_no_op() {
        let mut catalog = Catalog::seeded();
        assert!(!catalog.delete_book(99));
        assert_eq!(catalog.list_books(&BookListing::default()).len(), 2);
        assert!(catalog.delete_book(1));
        assert!(catalog.get_book(1).is_err());
    }

    #[test]
    fn deleting_author_keeps_their_books() {
        let mut catalog = Catalog::seeded();
        assert!(catalog.delete_author(1));
        assert!(catalog.get_author(1).is_err());
        assert_eq!(catalog.get_book(1).unwrap().author_id, 1);
    }

    #[test]
    fn author_update_can_clear_bio() {
        let mut catalog = Catalog::seeded();
        let author = catalog
            .update_author(
                2,
                AuthorUpdate {
                    name: "Nelle Harper Lee".to_string(),
                    bio: None,
                },
            )
            .unwrap();
        assert_eq!(author.bio, None);
        assert_eq!(catalog.get_author(2).unwrap().name, "Nelle Harper Lee");
    }

    #[test]
    fn order_computes_total_and_deducts_stock() {
        let mut catalog = Catalog::seeded();
        let placed = catalog.place_order(order(1, 1, 3)).unwrap();
        assert_eq!(placed.total_price, 47.97);
        assert_eq!(placed.status, "pending");
        assert_eq!(catalog.get_book(1).unwrap().stock, 97);

        let err = catalog.place_order(order(2, 1, 200)).unwrap_err();
        assert_eq!(
            err,
            CatalogError::InsufficientStock {
                book_id: 1,
                requested: 200,
                available: 97
            }
        );
        assert_eq!(catalog.get_book(1).unwrap().stock, 97);
        assert_eq!(catalog.list_orders().len(), 1);
    }

    #[test]
    fn order_may_drain_stock_exactly() {
        let mut catalog = Catalog::seeded();
        catalog.place_order(order(1, 2, 50)).unwrap();
        assert_eq!(catalog.get_book(2).unwrap().stock, 0);
        assert!(catalog.place_order(order(2, 2, 1)).is_err());
    }

    #[test]
    fn order_for_missing_book_changes_nothing() {
        let mut catalog = Catalog::seeded();
        let err = catalog.place_order(order(1, 42, 1)).unwrap_err();
        assert_eq!(
            err,
            CatalogError::NotFound {
                entity: Entity::Book,
                id: 42
            }
        );
        assert!(catalog.list_orders().is_empty());
    }

    #[test]
    fn repeated_order_id_is_accepted_and_lookup_finds_the_first() {
        let mut catalog = Catalog::seeded();
        catalog.place_order(order(1, 1, 1)).unwrap();
        let second = catalog.place_order(order(1, 2, 4)).unwrap();
        assert_eq!(second.book_id, 2);

        assert_eq!(catalog.get_book(1).unwrap().stock, 99);
        assert_eq!(catalog.get_book(2).unwrap().stock, 46);
        assert_eq!(catalog.list_orders().len(), 2);
        assert_eq!(catalog.get_order(1).unwrap().book_id, 1);
    }

    #[test]
    fn extreme_quantity_is_rejected_without_touching_stock() {
        let mut catalog = Catalog::seeded();
        let err = catalog.place_order(order(1, 1, i64::MIN)).unwrap_err();
        assert_eq!(
            err,
            CatalogError::StockOutOfRange {
                book_id: 1,
                requested: i64::MIN
            }
        );
        assert_eq!(catalog.get_book(1).unwrap().stock, 100);
        assert!(catalog.list_orders().is_empty());

        let restocked = catalog.place_order(order(2, 1, -5)).unwrap();
        assert_eq!(restocked.quantity, -5);
        assert_eq!(catalog.get_book(1).unwrap().stock, 105);
    }

    #[test]
    fn orders_list_in_insertion_order() {
        let mut catalog = Catalog::seeded();
        for id in [30, 10, 20] {
            catalog.place_order(order(id, 1, 1)).unwrap();
        }
        let ids: Vec<i64> = catalog.list_orders().iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
        assert!(matches!(
            catalog.get_order(99),
            Err(CatalogError::NotFound {
                entity: Entity::Order,
                ..
            })
        ));
    }

    #[test]
    fn price_max_listing_returns_cheap_book() {
        let catalog = Catalog::seeded();
        let listing = BookListing {
            filter: BookFilter {
                price_max: Some(12.0),
                ..BookFilter::default()
            },
            sort: SortOrder::Unsorted,
            pagination: Pagination::new(1, 10),
        };
        let books = catalog.list_books(&listing);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "To Kill a Mockingbird");
    }

    #[tokio::test]
    async fn concurrent_orders_never_oversell() {
        let shared = Catalog::seeded().into_shared();
        let mut handles = Vec::new();
        for id in 0..20 {
            let catalog = shared.clone();
            handles.push(tokio::spawn(async move {
                catalog.write().await.place_order(order(id, 2, 5)).is_ok()
            }));
        }

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 10);
        assert_eq!(shared.read().await.get_book(2).unwrap().stock, 0);
    }
}
