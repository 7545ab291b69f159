/*
 * Responsibility
 * - ドメインサービス (認証 / 認可) の公開インターフェース
 */
pub mod auth;
