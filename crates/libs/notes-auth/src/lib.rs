//! Authentication primitives for the notes service.
//!
//! Provides Argon2 password hashing ([`secret_hash`]) and HS256 JSON Web Token
//! signing ([`jwt`]). Nothing in this crate holds global state: signing keys
//! are built from configuration and passed around explicitly.

pub mod auth_body;
pub mod error;
pub mod jwt;
pub mod prelude;
pub mod secret_hash;

/// Token type reported to clients and expected in the `Authorization` header.
pub const CONNECTION_TOKEN_TYPE: &str = "Bearer";
/// Header carrying the bearer token.
pub const AUTH_HEADER: &str = "Authorization";
/// Exact prefix of the `Authorization` header value.
pub const AUTH_HEADER_PREFIX: &str = "Bearer ";
