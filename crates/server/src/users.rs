use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use models::record::Record;
use models::user::UserFields;

use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
}

#[derive(Debug, Serialize)]
pub struct UserIndexResponse {
    pub count: u64,
    pub items: Vec<UserResponse>,
}

impl From<UserRequest> for UserFields {
    fn from(req: UserRequest) -> Self {
        Self { name: req.name, email: req.email }
    }
}

fn map(rec: Record<UserFields>) -> UserResponse {
    UserResponse {
        id: rec.id,
        name: rec.fields.name,
        email: rec.fields.email,
        created_at: rec.created_at,
        updated_at: rec.updated_at,
        version: rec.version,
    }
}

pub async fn index(State(state): State<ServerState>) -> Result<Json<UserIndexResponse>, ApiError> {
    let count = state.users.count().await?;
    let items = state.users.find_all().await?.into_iter().map(map).collect();
    Ok(Json(UserIndexResponse { count, items }))
}

pub async fn find_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let rec = state.users.find_by_id(id).await?;
    Ok(Json(map(rec)))
}

pub async fn insert(
    State(state): State<ServerState>,
    Json(req): Json<UserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.users.insert(req.into()).await?;
    info!(id = %created.id, "user created");
    let location = format!("/api/user/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(map(created))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let updated = state.users.update(id, req.into()).await?;
    Ok(Json(map(updated)))
}

pub async fn delete_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.users.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
