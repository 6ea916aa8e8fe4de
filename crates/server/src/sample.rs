use axum::extract::{Path, Query};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use service::sample_service;

use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SampleRequest {
    pub name: String,
    pub age: i32,
}

#[derive(Debug, Serialize)]
pub struct SampleResponse {
    pub name: String,
    pub age: i32,
}

#[derive(Debug, Deserialize)]
pub struct BmiRequest {
    pub height: f64,
    pub weight: f64,
}

async fn hello() -> &'static str {
    "Hello World!"
}

async fn path_param(Path(id): Path<i64>) -> String {
    format!("received {} as a path parameter", id)
}

async fn query_param(Query(q): Query<IdQuery>) -> String {
    format!("received {} as a query parameter", q.id)
}

async fn body_param(Json(id): Json<i64>) -> String {
    format!("received {} in the request body", id)
}

async fn echo_user(Json(req): Json<SampleRequest>) -> String {
    format!("received name:{}, age:{} in the request body", req.name, req.age)
}

async fn canned_user(Path(_id): Path<i64>) -> Json<SampleResponse> {
    Json(SampleResponse { name: "Ito".into(), age: 20 })
}

async fn square(Path(number): Path<i64>) -> Json<i64> {
    Json(sample_service::square(number))
}

async fn bmi(Json(req): Json<BmiRequest>) -> Json<f64> {
    Json(sample_service::bmi(req.weight, req.height))
}

/// Stateless demo routes kept alongside the CRUD resources.
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/sample", get(hello))
        .route("/sample/path/:id", get(path_param))
        .route("/sample/query", get(query_param))
        .route("/sample/body", post(body_param))
        .route("/sample/user", post(echo_user))
        .route("/sample/user/:id", get(canned_user))
        .route("/sample/square/:number", get(square))
        .route("/sample/bmi", post(bmi))
}
