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
use models::{NewOrder, Order};

/// Order placement against book stock. Orders are append-only.
pub struct OrdersModule {
    catalog: SharedCatalog,
}

impl OrdersModule {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Module for OrdersModule {
    fn name(&self) -> &'static str {
        "orders"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "orders module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_orders).post(create_order))
            .route("/health", get(health_check))
            .route("/{id}", get(get_order))
            .with_state(self.catalog.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error = json!({ "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } });
        let order = json!({ "application/json": { "schema": { "$ref": "#/components/schemas/Order" } } });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List orders in placement order",
                        "tags": ["Orders"],
                        "responses": {
                            "200": {
                                "description": "Every order",
                                "content": { "application/json": { "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Order" } } } }
                            }
                        }
                    },
                    "post": {
                        "summary": "Place an order and deduct stock",
                        "description": "total_price is computed as quantity times the book's current price; any supplied value is ignored.",
                        "tags": ["Orders"],
                        "requestBody": { "required": true, "content": { "application/json": { "schema": { "$ref": "#/components/schemas/NewOrder" } } } },
                        "responses": {
                            "201": { "description": "Placed", "content": order },
                            "400": { "description": "Not enough stock, or the quantity puts stock out of range", "content": error },
                            "404": { "description": "Book not found", "content": error }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get the first order placed under an id",
                        "tags": ["Orders"],
                        "parameters": [{ "name": "id", "in": "path", "required": true, "schema": { "type": "integer" } }],
                        "responses": {
                            "200": { "description": "The order", "content": order },
                            "404": { "description": "Order not found", "content": error }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Order": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "book_id": { "type": "integer" },
                            "quantity": { "type": "integer" },
                            "total_price": { "type": "number" },
                            "status": { "type": "string", "example": "pending" }
                        },
                        "required": ["id", "book_id", "quantity", "total_price", "status"]
                    },
                    "NewOrder": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "book_id": { "type": "integer" },
                            "quantity": { "type": "integer" },
                            "status": { "type": "string", "example": "pending" }
                        },
                        "required": ["id", "book_id", "quantity", "status"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let placed = self.catalog.read().await.order_count();
        tracing::info!(module = self.name(), placed, "orders module stopped");
        Ok(())
    }
}

async fn health_check() -> &'static str {
    "orders module is healthy"
}

async fn create_order(
    State(catalog): State<SharedCatalog>,
    body: Result<Json<NewOrder>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let Json(request) = body?;
    let order = catalog.write().await.place_order(request)?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn list_orders(State(catalog): State<SharedCatalog>) -> Json<Vec<Order>> {
    Json(catalog.read().await.list_orders())
}

async fn get_order(
    State(catalog): State<SharedCatalog>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Order>, AppError> {
    let Path(id) = id?;
    let order = catalog.read().await.get_order(id)?;
    Ok(Json(order))
}

/// Create a new instance of the orders module
pub fn create_module(catalog: SharedCatalog) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(OrdersModule::new(catalog))
}
