pub mod models;

use async_trait::async_trait;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookstore_http::error::AppError;
use bookstore_kernel::{InitCtx, Module};
use serde_json::json;

use crate::catalog::SharedCatalog;
use models::{Author, AuthorUpdate};

/// Author directory. Deleting an author never touches the books that reference it.
pub struct AuthorsModule {
    catalog: SharedCatalog,
}

impl AuthorsModule {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let authors = self.catalog.read().await.author_count();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            authors,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_authors).post(create_author))
            .route("/health", get(health_check))
            .route(
                "/{id}",
                get(get_author).put(update_author).delete(delete_author),
            )
            .with_state(self.catalog.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({ "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } });
        let author = json!({ "application/json": { "schema": { "$ref": "#/components/schemas/Author" } } });
        let id_param = json!({ "name": "id", "in": "path", "required": true, "schema": { "type": "integer" } });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List authors",
                        "tags": ["Authors"],
                        "responses": {
                            "200": {
                                "description": "Every author",
                                "content": { "application/json": { "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Author" } } } }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create an author",
                        "tags": ["Authors"],
                        "requestBody": { "required": true, "content": author },
                        "responses": {
                            "201": { "description": "Created", "content": author },
                            "400": { "description": "An author with this id already exists", "content": error }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get an author",
                        "tags": ["Authors"],
                        "parameters": [id_param],
                        "responses": {
                            "200": { "description": "The author", "content": author },
                            "404": { "description": "Author not found", "content": error }
                        }
                    },
                    "put": {
                        "summary": "Replace an author's name and bio",
                        "tags": ["Authors"],
                        "parameters": [id_param],
                        "requestBody": { "required": true, "content": { "application/json": { "schema": { "$ref": "#/components/schemas/AuthorUpdate" } } } },
                        "responses": {
                            "200": { "description": "Updated author", "content": author },
                            "404": { "description": "Author not found", "content": error }
                        }
                    },
                    "delete": {
                        "summary": "Delete an author",
                        "tags": ["Authors"],
                        "parameters": [id_param],
                        "responses": { "204": { "description": "Deleted, or nothing to delete" } }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Author": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "name": { "type": "string" },
                            "bio": { "type": ["string", "null"] }
                        },
                        "required": ["id", "name"]
                    },
                    "AuthorUpdate": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "bio": { "type": ["string", "null"] }
                        },
                        "required": ["name"]
                    }
                }
            }
        }))
    }
}

async fn health_check() -> &'static str {
    "authors module is healthy"
}

async fn list_authors(State(catalog): State<SharedCatalog>) -> Json<Vec<Author>> {
    Json(catalog.read().await.list_authors())
}

async fn get_author(
    State(catalog): State<SharedCatalog>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Author>, AppError> {
    let Path(id) = id?;
    let author = catalog.read().await.get_author(id)?;
    Ok(Json(author))
}

async fn create_author(
    State(catalog): State<SharedCatalog>,
    body: Result<Json<Author>, JsonRejection>,
) -> Result<(StatusCode, Json<Author>), AppError> {
    let Json(author) = body?;
    let created = catalog.write().await.create_author(author)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_author(
    State(catalog): State<SharedCatalog>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<AuthorUpdate>, JsonRejection>,
) -> Result<Json<Author>, AppError> {
    let Path(id) = id?;
    let Json(update) = body?;
    let updated = catalog.write().await.update_author(id, update)?;
    Ok(Json(updated))
}

async fn delete_author(
    State(catalog): State<SharedCatalog>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    catalog.write().await.delete_author(id);
    Ok(StatusCode::NO_CONTENT)
}

/// Create a new instance of the authors module
pub fn create_module(catalog: SharedCatalog) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(AuthorsModule::new(catalog))
}
