/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /auth/role, /auth/role/{required}
 * - 認可コンテキストの付与 (middleware::auth::access) は app.rs 側で v1 全体に掛ける
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::{current_role, require_role},
    health::health,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/auth/role", get(current_role))
        .route("/auth/role/{required}", get(require_role))
}
