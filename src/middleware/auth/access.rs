//! bearer token 検証 → role 解決 → AuthCtx を extensions に入れる
//!
//! - リクエストを拒否しない。未認証でも AuthCtx (is_authorized = false) を入れて次に渡す
//! - 判定 (401/403) は handler 側で AuthCtx を見て行う (GraphQL resolver と同じ扱い)

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::state::AppState;

/// `/api/v1/*` に認証コンテキストを付与する middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = middleware::auth::access::apply(api::v1::routes(), state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let result = state.auth.resolve_headers(req.headers()).await;
    let auth_ctx = AuthCtx::new(result);

    tracing::debug!(
        user_id = auth_ctx.user_id().unwrap_or("-"),
        role = auth_ctx.result.role().map(|r| r.as_str()).unwrap_or(""),
        authorized = auth_ctx.result.is_authorized(),
        "auth context attached"
    );

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(auth_ctx);

    next.run(req).await
}
