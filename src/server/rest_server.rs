use axum::{
    Json, Router,
    routing::{get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::rest::{
    panels::{get_panels, render_panel},
    refresh::{refresh_all, refresh_server},
    servers::{add_server, delete_server, get_servers, update_server},
    status::get_status,
    transfer::{export_to_file, export_servers, import_servers},
};
use crate::server::context::MonitorContext;

pub type AppState = MonitorContext;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/servers", get(get_servers).post(add_server))
        .route("/servers/{ip}", put(update_server).delete(delete_server))
        .route("/servers/{ip}/refresh", post(refresh_server))
        .route("/refresh", post(refresh_all))
        .route("/status", get(get_status))
        .route("/import", post(import_servers))
        .route("/export", get(export_servers).post(export_to_file))
        .route("/panels", get(get_panels))
        .route("/panels/{name}", get(render_panel))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn rest_server_start(state: AppState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("PACS monitor API listening on {}", addr);
    axum::serve(listener, app).await.map_err(|e| {
        log::error!("Failed to start server: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
