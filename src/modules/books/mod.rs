pub mod models;

use async_trait::async_trait;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookstore_http::error::AppError;
use bookstore_kernel::{InitCtx, Module};
use serde_json::json;

use crate::catalog::{BookListing, SharedCatalog};
use models::{Book, BookUpdate, ListBooksParams};

/// Book catalog: listing with filters, sorting and pagination, plus CRUD
pub struct BooksModule {
    state: BooksState,
}

#[derive(Clone)]
struct BooksState {
    catalog: SharedCatalog,
    default_limit: usize,
}

impl BooksModule {
    pub fn new(catalog: SharedCatalog, default_limit: usize) -> Self {
        Self {
            state: BooksState {
                catalog,
                default_limit,
            },
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.state.catalog.read().await.book_count();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books,
            default_limit = self.state.default_limit,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_books).post(create_book))
            .route("/health", get(health_check))
            .route("/{id}", get(get_book).put(update_book).delete(delete_book))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({ "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } });
        let book = json!({ "application/json": { "schema": { "$ref": "#/components/schemas/Book" } } });
        let id_param = json!({ "name": "id", "in": "path", "required": true, "schema": { "type": "integer" } });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "parameters": [
                            { "name": "author_id", "in": "query", "required": false, "schema": { "type": "integer" } },
                            { "name": "price_min", "in": "query", "required": false, "schema": { "type": "number" } },
                            { "name": "price_max", "in": "query", "required": false, "schema": { "type": "number" } },
                            { "name": "sort_by", "in": "query", "required": false, "schema": { "type": "string", "enum": ["price_asc", "price_desc"] } },
                            { "name": "page", "in": "query", "required": false, "schema": { "type": "integer", "default": 1 } },
                            { "name": "limit", "in": "query", "required": false, "schema": { "type": "integer", "default": self.state.default_limit } }
                        ],
                        "responses": {
                            "200": {
                                "description": "Filtered, sorted, paginated books",
                                "content": { "application/json": { "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Book" } } } }
                            },
                            "400": { "description": "Malformed query string", "content": error }
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": { "required": true, "content": book },
                        "responses": {
                            "201": { "description": "Created", "content": book },
                            "400": { "description": "A book with this id already exists", "content": error }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": [id_param],
                        "responses": {
                            "200": { "description": "The book", "content": book },
                            "404": { "description": "Book not found", "content": error }
                        }
                    },
                    "put": {
                        "summary": "Replace a book's title, author, price and stock",
                        "tags": ["Books"],
                        "parameters": [id_param],
                        "requestBody": { "required": true, "content": { "application/json": { "schema": { "$ref": "#/components/schemas/BookUpdate" } } } },
                        "responses": {
                            "200": { "description": "Updated book", "content": book },
                            "404": { "description": "Book not found", "content": error }
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [id_param],
                        "responses": { "204": { "description": "Deleted, or nothing to delete" } }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "title": { "type": "string" },
                            "author_id": { "type": "integer" },
                            "price": { "type": "number" },
                            "stock": { "type": "integer" }
                        },
                        "required": ["id", "title", "author_id", "price", "stock"]
                    },
                    "BookUpdate": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author_id": { "type": "integer" },
                            "price": { "type": "number" },
                            "stock": { "type": "integer" }
                        },
                        "required": ["title", "author_id", "price", "stock"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn list_books(
    State(state): State<BooksState>,
    params: Result<Query<ListBooksParams>, QueryRejection>,
) -> Result<Json<Vec<Book>>, AppError> {
    let Query(params) = params?;
    let listing = BookListing::from_params(&params, state.default_limit);
    let books = state.catalog.read().await.list_books(&listing);
    Ok(Json(books))
}

async fn get_book(
    State(state): State<BooksState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Book>, AppError> {
    let Path(id) = id?;
    let book = state.catalog.read().await.get_book(id)?;
    Ok(Json(book))
}

async fn create_book(
    State(state): State<BooksState>,
    body: Result<Json<Book>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let Json(book) = body?;
    let created = state.catalog.write().await.create_book(book)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_book(
    State(state): State<BooksState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<BookUpdate>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let Path(id) = id?;
    let Json(update) = body?;
    let updated = state.catalog.write().await.update_book(id, update)?;
    Ok(Json(updated))
}

async fn delete_book(
    State(state): State<BooksState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.catalog.write().await.delete_book(id);
    Ok(StatusCode::NO_CONTENT)
}

/// Create a new instance of the books module
pub fn create_module(catalog: SharedCatalog, default_limit: usize) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(catalog, default_limit))
}
