use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::probe::scheduler::RefreshOutcome;
use crate::rest::{ApiError, ApiResult};
use crate::server::rest_server::AppState;

pub async fn refresh_all(State(st): State<AppState>) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    match st.spawn_refresh_all().await? {
        Some(_) => Ok((
            StatusCode::ACCEPTED,
            Json(serde_json::json!({ "outcome": "started" })),
        )),
        None => Ok((
            StatusCode::CONFLICT,
            Json(serde_json::json!({ "outcome": "already_running" })),
        )),
    }
}

pub async fn refresh_server(
    State(st): State<AppState>,
    Path(ip): Path<String>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    let Some((outcome, record)) = st.refresh_one(&ip).await? else {
        return Err(ApiError::not_found(format!("server not found: {ip}")));
    };
    let status = match outcome {
        RefreshOutcome::Completed { .. } => StatusCode::OK,
        RefreshOutcome::AlreadyRunning => StatusCode::CONFLICT,
    };
    Ok((
        status,
        Json(serde_json::json!({
            "refresh": outcome,
            "ip": ip,
            "liveness": record,
        })),
    ))
}
