/*
 * Responsibility
 * - middlware の公開インターフェース (re-export)
 * - auth (bearer → AuthCtx), cors, http (trace / request-id / limit / timeout), security_headers
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
