/*
 * Responsibility
 * - GET /auth/role           : 認可結果をそのまま返す (常に 200、判定は body の isAuthorized)
 * - GET /auth/role/{required}: required 以上の role を要求する (401 / 403)
 */
use axum::{Json, extract::Path};

use crate::{
    api::v1::{dto::auth::AuthorizationResponse, extractors::AuthCtxExtractor},
    error::AppError,
    services::auth::{Role, role::UnknownRole},
};

pub async fn current_role(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<AuthorizationResponse> {
    Json(ctx.result.into())
}

pub async fn require_role(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(required): Path<String>,
) -> Result<Json<AuthorizationResponse>, AppError> {
    let required: Role = required
        .parse()
        .map_err(|e: UnknownRole| AppError::bad_request("INVALID_ROLE", e.to_string()))?;

    ctx.require(required)?;

    Ok(Json(ctx.result.into()))
}
