/*
 * Responsibility
 * - 永続化層 (profile store) の公開インターフェース
 */
pub mod error;
pub mod profile_repo;

pub use profile_repo::{PgProfileRepo, ProfileRepository};
