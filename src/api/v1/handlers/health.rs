/*
 * Responsibility
 * - GET /health (疎通用, 認可結果は見ない)
 * - JWT_SECRET 未設定は起動失敗にしないので、ここで見えるようにしておく
 */
use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "tokenVerification": if state.auth.is_configured() { "enabled" } else { "disabled" },
    }))
}
