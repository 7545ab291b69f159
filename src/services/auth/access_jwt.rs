use std::collections::HashSet;

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

// Errors returned by access-token verification.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// Access token (JWT) claims.
///
/// NOTE:
/// - Only `userId` is read; everything else in the payload is ignored.
/// - `userId` is kept as a raw JSON value so that a wrong type is reported as a
///   missing subject instead of a verification failure.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(rename = "userId", default)]
    pub user_id: serde_json::Value,
}

impl AccessTokenClaims {
    /// The subject id, if the claim carries a usable one.
    pub fn subject(&self) -> Option<String> {
        match &self.user_id {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// HMAC (HS256/384/512) access-token verifier.
///
/// - `exp` / `nbf` are checked only when present in the token.
/// - `aud` is not checked.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AccessTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AccessTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AccessTokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AccessTokenVerifier {
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.required_spec_claims = HashSet::new();
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
        }
    }

    // Verify the signature (and exp/nbf when present), then decode the claims.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::errors::ErrorKind;
    use serde_json::json;

    use crate::test_support::{sign, sign_with};

    use super::*;

    const SECRET: &str = "test-secret";

    fn verifier() -> AccessTokenVerifier {
        AccessTokenVerifier::new(SECRET, 0)
    }

    #[test]
    fn accepts_token_signed_with_the_secret() {
        let token = sign(&json!({ "userId": "admin123" }), SECRET);
        let claims = verifier().verify(&token).unwrap();
        assert_eq!(claims.subject().as_deref(), Some("admin123"));
    }

    #[test]
    fn accepts_other_hmac_algorithms() {
        let token = sign_with(Algorithm::HS512, &json!({ "userId": "u1" }), SECRET);
        assert!(verifier().verify(&token).is_ok());
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = sign(&json!({ "userId": "u1" }), "other-secret");
        let err = verifier().verify(&token).unwrap_err();
        let AccessJwtError::Jwt(inner) = err;
        assert!(matches!(inner.kind(), ErrorKind::InvalidSignature));
    }

    #[test]
    fn rejects_garbage() {
        assert!(verifier().verify("not-a-jwt").is_err());
        assert!(verifier().verify("a.b.c").is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let exp = chrono::Utc::now().timestamp() - 3600;
        let token = sign(&json!({ "userId": "u1", "exp": exp }), SECRET);
        let AccessJwtError::Jwt(inner) = verifier().verify(&token).unwrap_err();
        assert!(matches!(inner.kind(), ErrorKind::ExpiredSignature));
    }

    #[test]
    fn leeway_tolerates_small_clock_skew() {
        let exp = chrono::Utc::now().timestamp() - 5;
        let token = sign(&json!({ "userId": "u1", "exp": exp }), SECRET);
        assert!(AccessTokenVerifier::new(SECRET, 60).verify(&token).is_ok());
    }

    #[test]
    fn audience_claim_is_ignored() {
        let token = sign(&json!({ "userId": "u1", "aud": "someone-else" }), SECRET);
        assert!(verifier().verify(&token).is_ok());
    }

    #[test]
    fn subject_handles_missing_and_odd_types() {
        let claims = |v: serde_json::Value| AccessTokenClaims { user_id: v };

        assert_eq!(claims(serde_json::Value::Null).subject(), None);
        assert_eq!(claims(json!("")).subject(), None);
        assert_eq!(claims(json!(true)).subject(), None);
        assert_eq!(claims(json!({ "id": 1 })).subject(), None);
        assert_eq!(claims(json!(42)).subject().as_deref(), Some("42"));
    }

    #[test]
    fn token_without_user_id_still_verifies() {
        let token = sign(&json!({ "sub": "someone" }), SECRET);
        let claims = verifier().verify(&token).unwrap();
        assert_eq!(claims.subject(), None);
    }
}
