use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use models::department::DepartmentFields;
use models::record::Record;

use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct DepartmentRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
}

#[derive(Debug, Serialize)]
pub struct DepartmentIndexResponse {
    pub count: u64,
    pub items: Vec<DepartmentResponse>,
}

impl From<DepartmentRequest> for DepartmentFields {
    fn from(req: DepartmentRequest) -> Self {
        Self { name: req.name, description: req.description }
    }
}

fn map(rec: Record<DepartmentFields>) -> DepartmentResponse {
    DepartmentResponse {
        id: rec.id,
        name: rec.fields.name,
        description: rec.fields.description,
        created_at: rec.created_at,
        updated_at: rec.updated_at,
        version: rec.version,
    }
}

pub async fn index(
    State(state): State<ServerState>,
) -> Result<Json<DepartmentIndexResponse>, ApiError> {
    let count = state.departments.count().await?;
    let items = state.departments.find_all().await?.into_iter().map(map).collect();
    Ok(Json(DepartmentIndexResponse { count, items }))
}

pub async fn find_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let rec = state.departments.find_by_id(id).await?;
    Ok(Json(map(rec)))
}

pub async fn insert(
    State(state): State<ServerState>,
    Json(req): Json<DepartmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.departments.insert(req.into()).await?;
    info!(id = %created.id, "department created");
    let location = format!("/api/department/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(map(created))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DepartmentRequest>,
) -> Result<Json<DepartmentResponse>, ApiError> {
    let updated = state.departments.update(id, req.into()).await?;
    Ok(Json(map(updated)))
}

pub async fn delete_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.departments.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
