//! Supplier order endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::RecordId;
use domain::{NewSupplierOrder, SupplierOrder};
use entity_store::{EntityStore, lenient};
use serde::Deserialize;

use super::{AppState, parse_record_id};
use crate::error::ApiError;
use crate::extract::JsonBody;

// -- Request types --

/// Body of POST /supplier-orders.
///
/// Only the supplier's id is read; any other supplier fields the client
/// sends are ignored in favour of the stored supplier.
#[derive(Debug, Deserialize)]
pub struct CreateSupplierOrderRequest {
    pub supplier: Option<SupplierRef>,
    #[serde(default)]
    pub items: String,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub total: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct SupplierRef {
    #[serde(default, deserialize_with = "lenient::record_id")]
    pub id: Option<RecordId>,
}

// -- Handlers --

/// GET /supplier-orders: every order with its supplier.
#[tracing::instrument(skip(state))]
pub async fn list<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<SupplierOrder>>, ApiError> {
    Ok(Json(state.supplier_orders.get_all_orders().await?))
}

/// POST /supplier-orders: 404 when the supplier does not exist.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(req): JsonBody<CreateSupplierOrderRequest>,
) -> Result<(StatusCode, Json<SupplierOrder>), ApiError> {
    let supplier_id = req
        .supplier
        .and_then(|s| s.id)
        .ok_or_else(|| ApiError::BadRequest("supplier.id is required".to_string()))?;

    let order = state
        .supplier_orders
        .create_order(NewSupplierOrder::new(supplier_id, req.items, req.total))
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// DELETE /supplier-orders/{id}: empty 200, or 404 if absent.
#[tracing::instrument(skip(state))]
pub async fn delete<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let record_id = parse_record_id(&id)?;
    state.supplier_orders.delete_order(record_id).await?;
    Ok(StatusCode::OK)
}
