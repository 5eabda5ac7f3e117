use axum::{
    Json,
    extract::{Path, State},
};

use crate::rest::{ApiError, ApiResult};
use crate::server::rest_server::AppState;
use crate::traits::panel::PanelContext;
use crate::traits::server_store::ServerStore;

pub async fn get_panels(State(st): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "panels": st.panels.names() }))
}

pub async fn render_panel(
    State(st): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let Some(panel) = st.panels.get(&name) else {
        return Err(ApiError::not_found(format!("panel not found: {name}")));
    };
    let servers = st.store.get_all_servers().await?;
    let ctx = PanelContext {
        servers: &servers,
        cache: &st.cache,
    };
    Ok(Json(panel.render(&ctx)))
}
