//! Supplier endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use entity_store::{EntityStore, Supplier};
use serde::Deserialize;

use super::{AppState, DeletedResponse, parse_record_id};
use crate::error::ApiError;
use crate::extract::JsonBody;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub term: String,
}

#[derive(Debug, Deserialize)]
pub struct NameParams {
    #[serde(default)]
    pub name: String,
}

/// GET /suppliers
#[tracing::instrument(skip(state))]
pub async fn list<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Supplier>>, ApiError> {
    Ok(Json(state.suppliers.get_all().await?))
}

/// GET /suppliers/{id}
#[tracing::instrument(skip(state))]
pub async fn get<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Supplier>, ApiError> {
    let record_id = parse_record_id(&id)?;
    let supplier = state
        .suppliers
        .get_by_id(record_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Supplier {id} not found")))?;
    Ok(Json(supplier))
}

/// POST /suppliers
#[tracing::instrument(skip(state, supplier))]
pub async fn create<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(supplier): JsonBody<Supplier>,
) -> Result<(StatusCode, Json<Supplier>), ApiError> {
    let created = state.suppliers.create(supplier).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /suppliers/{id}
#[tracing::instrument(skip(state, supplier))]
pub async fn update<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(supplier): JsonBody<Supplier>,
) -> Result<Json<Supplier>, ApiError> {
    let record_id = parse_record_id(&id)?;
    let updated = state
        .suppliers
        .update(record_id, supplier)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Supplier {id} not found")))?;
    Ok(Json(updated))
}

/// DELETE /suppliers/{id}: rejected with 409 while orders reference it.
#[tracing::instrument(skip(state))]
pub async fn delete<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let record_id = parse_record_id(&id)?;
    state.suppliers.delete(record_id).await?;
    Ok(Json(DeletedResponse::new("Supplier")))
}

/// GET /suppliers/search?term=
#[tracing::instrument(skip(state))]
pub async fn search<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Supplier>>, ApiError> {
    Ok(Json(state.suppliers.search(&params.term).await?))
}

/// GET /suppliers/by-name?name=: company-name matches only.
#[tracing::instrument(skip(state))]
pub async fn by_name<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<NameParams>,
) -> Result<Json<Vec<Supplier>>, ApiError> {
    Ok(Json(state.suppliers.find_by_company_name(&params.name).await?))
}
