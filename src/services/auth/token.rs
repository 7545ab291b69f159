//! Bearer credential extraction from the `Authorization` header.
//!
//! - `Bearer ` prefix is optional; without it the whole header value is the token.
//! - Absent / empty header, or a bare `Bearer ` prefix, yields `None`.
//! - A header with bytes outside visible ASCII is still a credential: it is decoded lossily
//!   and handed on, so verification rejects it instead of it passing as "no token".
//! - No validation happens here; the resolver decides what an empty result means.

use std::borrow::Cow;

use axum::http::{HeaderMap, header};

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the raw token out of an authorization header value.
pub fn extract_bearer(authorization: Option<&str>) -> Option<&str> {
    let value = authorization?;
    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value);

    if token.is_empty() { None } else { Some(token) }
}

/// Same as [`extract_bearer`], reading the header from a request header map.
pub fn bearer_from_headers(headers: &HeaderMap) -> Option<Cow<'_, str>> {
    let value = headers.get(header::AUTHORIZATION)?;

    match value.to_str() {
        Ok(text) => extract_bearer(Some(text)).map(Cow::Borrowed),
        Err(_) => {
            let text = String::from_utf8_lossy(value.as_bytes());
            extract_bearer(Some(&text)).map(|t| Cow::Owned(t.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn missing_or_empty_header_yields_nothing() {
        assert_eq!(extract_bearer(None), None);
        assert_eq!(extract_bearer(Some("")), None);
    }

    #[test]
    fn bare_prefix_yields_nothing() {
        assert_eq!(extract_bearer(Some("Bearer ")), None);
    }

    #[test]
    fn prefix_is_stripped() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn header_without_prefix_is_used_verbatim() {
        assert_eq!(extract_bearer(Some("abc.def.ghi")), Some("abc.def.ghi"));
        // Only the exact "Bearer " prefix is recognised.
        assert_eq!(extract_bearer(Some("bearer abc")), Some("bearer abc"));
        assert_eq!(extract_bearer(Some("Bearer")), Some("Bearer"));
    }

    #[test]
    fn reads_authorization_from_header_map() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_from_headers(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        assert_eq!(bearer_from_headers(&headers).as_deref(), Some("tok"));
    }

    #[test]
    fn non_ascii_header_is_still_a_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xe9tok").unwrap(),
        );
        assert_eq!(bearer_from_headers(&headers).as_deref(), Some("\u{FFFD}tok"));
    }
}
