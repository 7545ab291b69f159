//! Bearer token → role resolution.
//!
//! Flow:
//! - empty token                       → unauthorized, no error
//! - secret unset / verification fails → "Invalid token"
//! - no subject / no profile / stale   → "Authentication failed"
//! - profile found                     → role derived from the profile
//!
//! Every failure is folded into [`AuthorizationResult`]; nothing is returned as `Err`
//! to the caller.

use std::sync::Arc;

use axum::http::HeaderMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::config::AuthConfig;
use crate::repos::{ProfileRepository, error::RepoError};
use crate::services::auth::{
    access_jwt::{AccessJwtError, AccessTokenVerifier},
    role::Role,
    token,
};

/// Caller-visible failure. The message is the whole contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Authentication failed")]
    AuthenticationFailed,
}

impl Serialize for AuthFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Why a token was refused. Logged, never shown to the caller.
#[derive(Debug, Error)]
pub enum DenyReason {
    #[error("signing secret is not configured")]
    SecretMissing,
    #[error(transparent)]
    Verification(#[from] AccessJwtError),
    #[error("token carries no userId")]
    MissingSubject,
    #[error("no profile for user")]
    ProfileNotFound,
    #[error("token version mismatch (expected {expected}, stored {stored})")]
    TokenVersionMismatch { expected: i64, stored: i64 },
    #[error("profile lookup failed: {0}")]
    Repository(#[from] RepoError),
}

impl DenyReason {
    pub fn failure(&self) -> AuthFailure {
        match self {
            DenyReason::SecretMissing | DenyReason::Verification(_) => AuthFailure::InvalidToken,
            DenyReason::MissingSubject
            | DenyReason::ProfileNotFound
            | DenyReason::TokenVersionMismatch { .. }
            | DenyReason::Repository(_) => AuthFailure::AuthenticationFailed,
        }
    }
}

/// `{role, isAuthorized, error?}`.
///
/// Only the constructors below exist, so `is_authorized == role.is_some()` always holds,
/// and an error is only ever attached to an unauthorized result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationResult {
    #[serde(serialize_with = "role_or_empty")]
    role: Option<Role>,
    is_authorized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<AuthFailure>,
    #[serde(skip)]
    user_id: Option<String>,
}

fn role_or_empty<S: Serializer>(role: &Option<Role>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(role.map(|r| r.as_str()).unwrap_or(""))
}

impl AuthorizationResult {
    /// No credential was presented.
    pub fn anonymous() -> Self {
        Self {
            role: None,
            is_authorized: false,
            error: None,
            user_id: None,
        }
    }

    pub fn denied(failure: AuthFailure) -> Self {
        Self {
            role: None,
            is_authorized: false,
            error: Some(failure),
            user_id: None,
        }
    }

    pub fn granted(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            role: Some(role),
            is_authorized: true,
            error: None,
            user_id: Some(user_id.into()),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_authorized(&self) -> bool {
        self.is_authorized
    }

    pub fn error(&self) -> Option<AuthFailure> {
        self.error
    }

    /// Subject of an authorized result.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

/// Validates bearer tokens and maps the owning profile to a [`Role`].
///
/// Holds no per-request state; share it behind `Arc`.
pub struct RoleResolver {
    // None when no signing secret is configured.
    verifier: Option<AccessTokenVerifier>,
    token_version: i64,
    default_locale_code: String,
    profiles: Arc<dyn ProfileRepository>,
}

impl std::fmt::Debug for RoleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleResolver")
            .field("verifier", &self.verifier)
            .field("token_version", &self.token_version)
            .field("default_locale_code", &self.default_locale_code)
            .finish()
    }
}

impl RoleResolver {
    pub fn new(config: &AuthConfig, profiles: Arc<dyn ProfileRepository>) -> Self {
        let verifier = config
            .jwt_secret
            .as_deref()
            .map(|secret| AccessTokenVerifier::new(secret, config.leeway_seconds));

        Self {
            verifier,
            token_version: config.token_version,
            default_locale_code: config.default_locale_code.clone(),
            profiles,
        }
    }

    /// Whether a signing secret was configured at all.
    pub fn is_configured(&self) -> bool {
        self.verifier.is_some()
    }

    /// Resolve straight from request headers.
    pub async fn resolve_headers(&self, headers: &HeaderMap) -> AuthorizationResult {
        let token = token::bearer_from_headers(headers);
        self.resolve(token.as_deref()).await
    }

    /// Resolve an already extracted token (`None` / empty = no credential).
    pub async fn resolve(&self, token: Option<&str>) -> AuthorizationResult {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return AuthorizationResult::anonymous();
        };

        match self.authorize(token).await {
            Ok((user_id, role)) => {
                tracing::debug!(user_id = %user_id, role = %role, "bearer token authorized");
                AuthorizationResult::granted(user_id, role)
            }
            Err(reason) => {
                if let DenyReason::Repository(err) = &reason {
                    tracing::error!(error = ?err, "profile lookup failed");
                } else {
                    tracing::warn!(reason = %reason, "bearer token rejected");
                }
                AuthorizationResult::denied(reason.failure())
            }
        }
    }

    async fn authorize(&self, token: &str) -> Result<(String, Role), DenyReason> {
        let verifier = self.verifier.as_ref().ok_or(DenyReason::SecretMissing)?;

        let claims = verifier.verify(token)?;
        let user_id = claims.subject().ok_or(DenyReason::MissingSubject)?;

        let profile = self
            .profiles
            .find_profile(&user_id, &self.default_locale_code)
            .await?
            .ok_or(DenyReason::ProfileNotFound)?;

        if profile.token_version != self.token_version {
            return Err(DenyReason::TokenVersionMismatch {
                expected: self.token_version,
                stored: profile.token_version,
            });
        }

        tracing::trace!(user_id = %user_id, locale = %profile.locale_code, "profile matched");

        Ok((
            profile.user_id,
            Role::derive(profile.is_super_admin, &profile.admin_for),
        ))
    }
}
