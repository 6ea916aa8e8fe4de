use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use models::comment::CommentFields;
use models::record::Record;

use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub role: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
}

#[derive(Debug, Serialize)]
pub struct CommentIndexResponse {
    pub count: u64,
    pub items: Vec<CommentResponse>,
}

impl From<CommentRequest> for CommentFields {
    fn from(req: CommentRequest) -> Self {
        Self { role: req.role, content: req.content }
    }
}

fn map(rec: Record<CommentFields>) -> CommentResponse {
    CommentResponse {
        id: rec.id,
        role: rec.fields.role,
        content: rec.fields.content,
        created_at: rec.created_at,
        updated_at: rec.updated_at,
        version: rec.version,
    }
}

pub async fn index(
    State(state): State<ServerState>,
) -> Result<Json<CommentIndexResponse>, ApiError> {
    let count = state.comments.count().await?;
    let items = state.comments.find_all().await?.into_iter().map(map).collect();
    Ok(Json(CommentIndexResponse { count, items }))
}

pub async fn find_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CommentResponse>, ApiError> {
    let rec = state.comments.find_by_id(id).await?;
    Ok(Json(map(rec)))
}

pub async fn insert(
    State(state): State<ServerState>,
    Json(req): Json<CommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.comments.insert(req.into()).await?;
    info!(id = %created.id, "comment created");
    let location = format!("/api/comment/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(map(created))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    let updated = state.comments.update(id, req.into()).await?;
    Ok(Json(map(updated)))
}

pub async fn delete_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.comments.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
