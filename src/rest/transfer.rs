use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::common::server::ServerDescriptor;
use crate::rest::{ApiError, ApiResult};
use crate::server::rest_server::AppState;
use crate::storage::transfer::{self, ImportSummary};
use crate::traits::server_store::ServerStore;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ImportRequest {
    Inline { servers: Vec<ServerDescriptor> },
    File { path: PathBuf },
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub path: PathBuf,
}

/// Maps a request path onto the configured transfer directory.
fn transfer_path(st: &AppState, requested: &Path) -> ApiResult<PathBuf> {
    transfer::resolve_transfer_path(Path::new(&st.config.transfer_dir), requested)
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))
}

pub async fn import_servers(
    State(st): State<AppState>,
    Json(req): Json<ImportRequest>,
) -> ApiResult<Json<ImportSummary>> {
    let summary = match req {
        ImportRequest::Inline { servers } => transfer::merge_servers(&st.store, servers).await?,
        ImportRequest::File { path } => {
            let path = transfer_path(&st, &path)?;
            transfer::import_servers(&st.store, &path).await?
        }
    };
    Ok(Json(summary))
}

pub async fn export_servers(State(st): State<AppState>) -> ApiResult<Json<Vec<ServerDescriptor>>> {
    Ok(Json(st.store.get_all_servers().await?))
}

pub async fn export_to_file(
    State(st): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let path = transfer_path(&st, &req.path)?;
    let exported = transfer::export_servers(&st.store, &path).await?;
    Ok(Json(serde_json::json!({ "exported": exported, "path": path })))
}
