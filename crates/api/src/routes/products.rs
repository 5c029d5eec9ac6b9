//! Product endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use entity_store::{EntityStore, Product};

use super::{AppState, DeletedResponse, parse_record_id};
use crate::error::ApiError;
use crate::extract::JsonBody;

/// GET /products
#[tracing::instrument(skip(state))]
pub async fn list<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.get_all().await?))
}

/// GET /products/{id}
#[tracing::instrument(skip(state))]
pub async fn get<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let record_id = parse_record_id(&id)?;
    let product = state
        .products
        .get_by_id(record_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product {id} not found")))?;
    Ok(Json(product))
}

/// POST /products
#[tracing::instrument(skip(state, product))]
pub async fn create<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(product): JsonBody<Product>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let created = state.products.create(product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /products/{id}
#[tracing::instrument(skip(state, product))]
pub async fn update<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(product): JsonBody<Product>,
) -> Result<Json<Product>, ApiError> {
    let record_id = parse_record_id(&id)?;
    let updated = state
        .products
        .update(record_id, product)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Product {id} not found")))?;
    Ok(Json(updated))
}

/// DELETE /products/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let record_id = parse_record_id(&id)?;
    state.products.delete(record_id).await?;
    Ok(Json(DeletedResponse::new("Product")))
}
