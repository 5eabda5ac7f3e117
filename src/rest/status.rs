use axum::{Json, extract::State};

use crate::server::rest_server::AppState;

pub async fn get_status(State(st): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "refreshing": st.scheduler.is_refreshing(),
        "generation": st.generation(),
        "records": st.cache.snapshot(),
    }))
}
