// Shared helpers for unit tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};

use crate::repos::{ProfileRepository, error::RepoError, profile_repo::UserProfile};

pub fn sign(claims: &serde_json::Value, secret: &str) -> String {
    sign_with(Algorithm::HS256, claims, secret)
}

pub fn sign_with(alg: Algorithm, claims: &serde_json::Value, secret: &str) -> String {
    jsonwebtoken::encode(
        &Header::new(alg),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("sign test token")
}

pub fn profile(
    user_id: &str,
    locale_code: &str,
    token_version: i64,
    is_super_admin: bool,
    admin_for: &[&str],
) -> UserProfile {
    UserProfile {
        user_id: user_id.to_string(),
        locale_code: locale_code.to_string(),
        token_version,
        is_super_admin,
        admin_for: admin_for.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
    }
}

/// In-memory profile store that records every `(user_id, locale_code)` it is asked for.
#[derive(Default)]
pub struct MemoryProfileRepo {
    profiles: HashMap<(String, String), UserProfile>,
    lookups: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl MemoryProfileRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every lookup errors as if the database were unreachable.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with(mut self, profile: UserProfile) -> Self {
        self.profiles.insert(
            (profile.user_id.clone(), profile.locale_code.clone()),
            profile,
        );
        self
    }

    pub fn lookups(&self) -> Vec<(String, String)> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepo {
    async fn find_profile(
        &self,
        user_id: &str,
        locale_code: &str,
    ) -> Result<Option<UserProfile>, RepoError> {
        self.lookups
            .lock()
            .unwrap()
            .push((user_id.to_string(), locale_code.to_string()));

        if self.fail {
            return Err(RepoError::Db(sqlx::Error::PoolTimedOut));
        }

        Ok(self
            .profiles
            .get(&(user_id.to_string(), locale_code.to_string()))
            .cloned())
    }
}
