//! Employee endpoints, mounted under `/api/employees`.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::SortDirection;
use entity_store::{Employee, EntityStore};
use serde::Deserialize;

use super::suppliers::SearchParams;
use super::{AppState, DeletedResponse, parse_record_id};
use crate::error::ApiError;
use crate::extract::JsonBody;

#[derive(Debug, Deserialize)]
pub struct SalaryOrderParams {
    #[serde(default)]
    pub direction: SortDirection,
}

/// GET /api/employees
#[tracing::instrument(skip(state))]
pub async fn list<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.employees.get_all().await?))
}

/// GET /api/employees/{id}
#[tracing::instrument(skip(state))]
pub async fn get<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    let record_id = parse_record_id(&id)?;
    let employee = state
        .employees
        .get_by_id(record_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Employee {id} not found")))?;
    Ok(Json(employee))
}

/// POST /api/employees
#[tracing::instrument(skip(state, employee))]
pub async fn create<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(employee): JsonBody<Employee>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let created = state.employees.create(employee).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/employees/{id}: the stored hire date is kept.
#[tracing::instrument(skip(state, employee))]
pub async fn update<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonBody(employee): JsonBody<Employee>,
) -> Result<Json<Employee>, ApiError> {
    let record_id = parse_record_id(&id)?;
    let updated = state
        .employees
        .update(record_id, employee)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Employee {id} not found")))?;
    Ok(Json(updated))
}

/// DELETE /api/employees/{id}
#[tracing::instrument(skip(state))]
pub async fn delete<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let record_id = parse_record_id(&id)?;
    state.employees.delete(record_id).await?;
    Ok(Json(DeletedResponse::new("Employee")))
}

/// GET /api/employees/search?term=
#[tracing::instrument(skip(state))]
pub async fn search<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.employees.search(&params.term).await?))
}

/// GET /api/employees/by-salary?direction=asc|desc
#[tracing::instrument(skip(state))]
pub async fn by_salary<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<SalaryOrderParams>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.employees.list_by_salary(params.direction).await?))
}

/// GET /api/employees/department/{department}
#[tracing::instrument(skip(state))]
pub async fn by_department<S: EntityStore>(
    State(state): State<Arc<AppState<S>>>,
    Path(department): Path<String>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.employees.find_by_department(&department).await?))
}
