/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - ex: auth: RoleResolver (profile repo を内部に持つ)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::RoleResolver;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<RoleResolver>,
}

impl AppState {
    pub fn new(auth: Arc<RoleResolver>) -> Self {
        Self { auth }
    }
}
