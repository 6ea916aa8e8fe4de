use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::resource_service::ResourceService;
use service::storage::departments::DepartmentStore;
use service::storage::document::DocumentStore;
use service::storage::users::UserStore;

use crate::routes;
use crate::state::ServerState;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

fn data_dir() -> String {
    configs::load_default()
        .map(|cfg| cfg.storage.data_dir)
        .unwrap_or_else(|_| "data".to_string())
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // Comments live in the document-backed store.
    let comment_store = DocumentStore::new(format!("{}/comments.json", data_dir())).await?;

    // Users and departments live in Postgres.
    let db = models::db::connect().await?;

    let state = ServerState {
        comments: ResourceService::new(comment_store),
        users: ResourceService::new(Arc::new(UserStore::new(db.clone()))),
        departments: ResourceService::new(Arc::new(DepartmentStore::new(db))),
    };

    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    let addr = load_bind_addr()?;
    info!(%addr, "starting answer api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
