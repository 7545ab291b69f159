/*
 * Responsibility
 * - Handler から見える「認可コンテキスト」の型
 * - middleware が解決して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - トークン検証や profile lookup は services/auth (RoleResolver) の責務
 * - role を信用する前に必ず is_authorized を見ること (require() がそれをやる)
 */

use crate::error::AppError;
use crate::services::auth::{AuthorizationResult, Role};

/// 認可結果付きのリクエストコンテキスト
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub result: AuthorizationResult,
}

impl AuthCtx {
    pub fn new(result: AuthorizationResult) -> Self {
        Self { result }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.result.user_id()
    }

    /// 最低限 `required` の role を要求する。
    ///
    /// - 未認証: 401 (エラーメッセージがあればそれを返す)
    /// - 認証済みだが権限不足: 403
    pub fn require(&self, required: Role) -> Result<Role, AppError> {
        let Some(role) = self.result.role().filter(|_| self.result.is_authorized()) else {
            let message = self
                .result
                .error()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "missing bearer token".to_string());
            return Err(AppError::unauthorized(message));
        };

        if role.satisfies(required) {
            Ok(role)
        } else {
            Err(AppError::Forbidden)
        }
    }
}
