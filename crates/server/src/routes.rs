use axum::{routing::get, Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use common::types::Health;

use crate::state::ServerState;
use crate::{comments, departments, sample, users};

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, sample routes, and one CRUD
/// router per resource type.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let api = Router::new()
        .route("/api/comment", get(comments::index).post(comments::insert))
        .route(
            "/api/comment/:id",
            get(comments::find_by_id).put(comments::update).delete(comments::delete_by_id),
        )
        .route("/api/user", get(users::index).post(users::insert))
        .route(
            "/api/user/:id",
            get(users::find_by_id).put(users::update).delete(users::delete_by_id),
        )
        .route("/api/department", get(departments::index).post(departments::insert))
        .route(
            "/api/department/:id",
            get(departments::find_by_id)
                .put(departments::update)
                .delete(departments::delete_by_id),
        );

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(sample::router())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
