use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::state::AppState;

use super::AuthCtx;

/// Handler で AuthCtx を受け取るための extractor
///
/// access middleware が AuthCtx を request.extensions() に insert 済みであれば、それを使う。
/// middleware を通っていない route では、ここでヘッダから解決する。
pub struct AuthCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AuthCtxExtractor
where
    AppState: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<AuthCtx>() {
            return Ok(AuthCtxExtractor(ctx.clone()));
        }

        let result = state.auth.resolve_headers(&parts.headers).await;
        Ok(AuthCtxExtractor(AuthCtx::new(result)))
    }
}
