/*
 * Responsibility
 * - /auth 系の response DTO
 * - JSON の形は `{ role, isAuthorized, error? }` で固定 (AuthorizationResult をそのまま包む)
 */
use serde::Serialize;

use crate::services::auth::AuthorizationResult;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct AuthorizationResponse(pub AuthorizationResult);

impl From<AuthorizationResult> for AuthorizationResponse {
    fn from(result: AuthorizationResult) -> Self {
        Self(result)
    }
}
