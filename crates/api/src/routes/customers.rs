//! Customer endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use entity_store::{Customer, EntityStore};

use super::{AppState, DeletedResponse, parse_record_id};
use crate::error::ApiError;
use crate::extract::JsonBody;

/// GET /customers
#[tracing::instrument(skip(state))]
pub async fn list<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(state.customers.get_all().await?))
}

/// GET /customers/{id}
#[tracing::instrument(skip(state))]
pub async fn get<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    let record_id = parse_record_id(&id)?;
    let customer = state
        .customers
        .get_by_id(record_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Customer {id} not found")))?;
    Ok(Json(customer))
}

/// POST /customers
#[tracing::instrument(skip(state, customer))]
pub async fn create<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(customer): JsonBody<Customer>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let created = state.customers.create(customer).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /customers/{id}
#[tracing::instrument(skip(state, customer))]
pub async fn update<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(customer): JsonBody<Customer>,
) -> Result<Json<Customer>, ApiError> {
    let record_id = parse_record_id(&id)?;
    let updated = state
        .customers
        .update(record_id, customer)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Customer {id} not found")))?;
    Ok(Json(updated))
}

/// DELETE /customers/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let record_id = parse_record_id(&id)?;
    state.customers.delete(record_id).await?;
    Ok(Json(DeletedResponse::new("Customer")))
}

/// GET /customers/new-loyalty-customers: customers registered this week.
#[tracing::instrument(skip(state))]
pub async fn new_this_week<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<u64>, ApiError> {
    Ok(Json(state.customers.count_registered_this_week().await?))
}
