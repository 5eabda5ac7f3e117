use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::common::query::{ServerPage, ServerQuery, run_query};
use crate::common::server::ServerDescriptor;
use crate::rest::{ApiError, ApiResult};
use crate::server::rest_server::AppState;
use crate::traits::server_store::ServerStore;

pub async fn get_servers(
    State(st): State<AppState>,
    Query(query): Query<ServerQuery>,
) -> ApiResult<Json<ServerPage>> {
    let servers = st.store.get_all_servers().await?;
    Ok(Json(run_query(
        &servers,
        &st.cache,
        &query,
        st.config.default_page_size,
    )))
}

fn validate(server: &ServerDescriptor) -> ApiResult<()> {
    if server.address.trim().is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "ip must not be empty"));
    }
    if server.name.trim().is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "name must not be empty"));
    }
    Ok(())
}

pub async fn add_server(
    State(st): State<AppState>,
    Json(server): Json<ServerDescriptor>,
) -> ApiResult<(StatusCode, Json<ServerDescriptor>)> {
    validate(&server)?;
    if !st.store.insert_server(&server).await? {
        return Err(ApiError::new(
            StatusCode::CONFLICT,
            format!("server already exists: {}", server.address),
        ));
    }
    log::info!("Added server {} ({})", server.name, server.address);
    Ok((StatusCode::CREATED, Json(server)))
}

pub async fn update_server(
    State(st): State<AppState>,
    Path(ip): Path<String>,
    Json(server): Json<ServerDescriptor>,
) -> ApiResult<Json<ServerDescriptor>> {
    validate(&server)?;
    if server.address != ip {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            format!("body ip {} does not match path {}", server.address, ip),
        ));
    }
    if !st.store.update_server(&server).await? {
        return Err(ApiError::not_found(format!("server not found: {ip}")));
    }
    log::info!("Updated server {} ({})", server.name, server.address);
    Ok(Json(server))
}

pub async fn delete_server(
    State(st): State<AppState>,
    Path(ip): Path<String>,
) -> ApiResult<StatusCode> {
    if !st.store.delete_server(&ip).await? {
        return Err(ApiError::not_found(format!("server not found: {ip}")));
    }
    log::info!("Removed server {}", ip);
    Ok(StatusCode::NO_CONTENT)
}
