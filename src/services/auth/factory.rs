/// Factory: build `RoleResolver` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::repos::ProfileRepository;
use crate::services::auth::RoleResolver;

pub fn build_role_resolver(
    config: &Config,
    profiles: Arc<dyn ProfileRepository>,
) -> Arc<RoleResolver> {
    if config.auth.jwt_secret.is_none() {
        tracing::warn!("JWT_SECRET is not set; every bearer token will be rejected");
    }

    Arc::new(RoleResolver::new(&config.auth, profiles))
}
