/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, CORS 許可、Auth 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - Auth 設定 (JWT_SECRET / TOKEN_VERSION / DEFAULT_LOCALE_CODE) は AuthConfig に閉じ込め、
 *   起動時に一度だけ読んで RoleResolver に渡す (リクエスト毎に env は読まない)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub const DEFAULT_LOCALE_CODE: &str = "en";
pub const DEFAULT_TOKEN_VERSION: i64 = 0;

/// Settings consumed by the role resolver.
///
/// - `jwt_secret` が `None` の場合、全てのトークンは "Invalid token" になる (起動は失敗させない)
/// - `token_version` は profile 側の revocation counter と比較される期待値
/// - `default_locale_code` は profile lookup のキーの一部
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub token_version: i64,
    pub default_locale_code: String,
    pub leeway_seconds: u64,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_version", &self.token_version)
            .field("default_locale_code", &self.default_locale_code)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_version: DEFAULT_TOKEN_VERSION,
            default_locale_code: DEFAULT_LOCALE_CODE.to_string(),
            leeway_seconds: 0,
        }
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (process env in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let jwt_secret = non_empty("JWT_SECRET");

        let token_version = lookup("TOKEN_VERSION")
            .as_deref()
            .map(parse_token_version)
            .unwrap_or(DEFAULT_TOKEN_VERSION);

        let default_locale_code =
            non_empty("DEFAULT_LOCALE_CODE").unwrap_or_else(|| DEFAULT_LOCALE_CODE.to_string());

        let leeway_seconds = lookup("ACCESS_TOKEN_LEEWAY_SECONDS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(0);

        Self {
            jwt_secret,
            token_version,
            default_locale_code,
            leeway_seconds,
        }
    }
}

// Non-numeric values fall back to the default rather than failing startup.
fn parse_token_version(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(DEFAULT_TOKEN_VERSION)
}

/// Transport limits applied by `middleware::http`.
#[derive(Debug, Clone, Copy)]
pub struct HttpConfig {
    pub body_limit_bytes: usize,
    pub request_timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            body_limit_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}

pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,
    pub http: HttpConfig,

    pub auth: AuthConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"))?,
            Err(_) => 10,
        };

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let defaults = HttpConfig::default();
        let http = HttpConfig {
            body_limit_bytes: std::env::var("HTTP_BODY_LIMIT_BYTES")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(defaults.body_limit_bytes),
            request_timeout_seconds: std::env::var("HTTP_REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.request_timeout_seconds),
        };

        let auth = AuthConfig::from_env();

        Ok(Self {
            addr,
            database_url,
            database_max_connections,
            app_env,
            cors_allowed_origins,
            http,
            auth,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn auth_config(pairs: &[(&str, &str)]) -> AuthConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AuthConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = auth_config(&[]);
        assert!(cfg.jwt_secret.is_none());
        assert_eq!(cfg.token_version, 0);
        assert_eq!(cfg.default_locale_code, "en");
        assert_eq!(cfg.leeway_seconds, 0);
    }

    #[test]
    fn token_version_is_parsed_as_integer() {
        assert_eq!(auth_config(&[("TOKEN_VERSION", "5")]).token_version, 5);
        assert_eq!(auth_config(&[("TOKEN_VERSION", " 12 ")]).token_version, 12);
    }

    #[test]
    fn non_numeric_token_version_falls_back_to_zero() {
        assert_eq!(auth_config(&[("TOKEN_VERSION", "abc")]).token_version, 0);
        assert_eq!(auth_config(&[("TOKEN_VERSION", "")]).token_version, 0);
    }

    #[test]
    fn locale_code_is_taken_from_env() {
        let cfg = auth_config(&[("DEFAULT_LOCALE_CODE", "fr")]);
        assert_eq!(cfg.default_locale_code, "fr");

        let cfg = auth_config(&[("DEFAULT_LOCALE_CODE", "")]);
        assert_eq!(cfg.default_locale_code, "en");
    }

    #[test]
    fn empty_secret_counts_as_unset() {
        assert!(auth_config(&[("JWT_SECRET", "")]).jwt_secret.is_none());
        assert_eq!(
            auth_config(&[("JWT_SECRET", "s3cret")]).jwt_secret.as_deref(),
            Some("s3cret")
        );
    }

    #[test]
    fn debug_output_hides_secret() {
        let cfg = auth_config(&[("JWT_SECRET", "s3cret")]);
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("s3cret"));
        assert!(printed.contains("<redacted>"));
    }
}
