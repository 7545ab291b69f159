/*
 * Responsibility
 * - user_profiles テーブル向け SQLx 操作 (読み取りのみ)
 * - profile は (userId, localeCode) で引き、tokenVersion (revocation counter) を一緒に返す
 * - DB エラーは RepoError に変換して返す (認可の判断は service 側)
 *
 * Table
 *   user_profiles (
 *     "userId" TEXT, "localeCode" TEXT, "tokenVersion" BIGINT,
 *     "isSuperAdmin" BOOLEAN, "adminFor" TEXT[],
 *     PRIMARY KEY ("userId", "localeCode")
 *   )
 * - (userId, localeCode) は一意の想定。重複行があっても tokenVersion が最大の行 (= 現行) を使う
 */
use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
struct UserProfileRow {
    #[sqlx(rename = "userId")]
    user_id: String,
    #[sqlx(rename = "localeCode")]
    locale_code: String,
    #[sqlx(rename = "tokenVersion")]
    token_version: i64,
    #[sqlx(rename = "isSuperAdmin")]
    is_super_admin: bool,
    #[sqlx(rename = "adminFor")]
    admin_for: Vec<String>,
}

/// Identity and privilege attributes of a user, as stored for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: String,
    pub locale_code: String,
    pub token_version: i64,
    pub is_super_admin: bool,
    /// Organization ids the user administers.
    pub admin_for: BTreeSet<String>,
}

impl From<UserProfileRow> for UserProfile {
    fn from(row: UserProfileRow) -> Self {
        Self {
            user_id: row.user_id,
            locale_code: row.locale_code,
            token_version: row.token_version,
            is_super_admin: row.is_super_admin,
            admin_for: row.admin_for.into_iter().collect(),
        }
    }
}

/// Read access to user profiles.
///
/// Implementations must be cheap to share (`Arc<dyn ProfileRepository>`).
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    // Look up a profile by identity and locale, whatever its token version.
    async fn find_profile(
        &self,
        user_id: &str,
        locale_code: &str,
    ) -> Result<Option<UserProfile>, RepoError>;
}

#[derive(Clone, Debug)]
pub struct PgProfileRepo {
    db: PgPool,
}

impl PgProfileRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepo {
    async fn find_profile(
        &self,
        user_id: &str,
        locale_code: &str,
    ) -> Result<Option<UserProfile>, RepoError> {
        let row = sqlx::query_as::<_, UserProfileRow>(
            r#"
            SELECT "userId", "localeCode", "tokenVersion", "isSuperAdmin", "adminFor"
            FROM user_profiles
            WHERE "userId" = $1 AND "localeCode" = $2
            ORDER BY "tokenVersion" DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(locale_code)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(UserProfile::from))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{MemoryProfileRepo, profile};

    use super::*;

    #[tokio::test]
    async fn lookup_is_keyed_by_user_and_locale() {
        let repo = MemoryProfileRepo::new().with(profile("u1", "en", 3, false, &[]));

        let hit = repo.find_profile("u1", "en").await.unwrap();
        assert_eq!(hit.map(|p| p.token_version), Some(3));

        let other_locale = repo.find_profile("u1", "fr").await.unwrap();
        assert!(other_locale.is_none());
    }

    #[test]
    fn row_admin_for_becomes_a_set() {
        let row = UserProfileRow {
            user_id: "u1".into(),
            locale_code: "en".into(),
            token_version: 0,
            is_super_admin: false,
            admin_for: vec!["OrgB".into(), "OrgA".into(), "OrgA".into()],
        };
        let profile = UserProfile::from(row);
        assert_eq!(
            profile.admin_for.into_iter().collect::<Vec<_>>(),
            vec!["OrgA".to_string(), "OrgB".to_string()]
        );
    }
}
