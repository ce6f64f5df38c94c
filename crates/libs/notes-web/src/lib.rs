//! Web layer of the notes service.
//!
//! Resolves bearer tokens into an authenticated [`ctx::Ctx`], issues tokens at
//! login, validates registration and note payloads, enforces note ownership
//! and maps every failure onto an HTTP response.

pub mod auth_token;
pub mod ctx;
pub mod error;
pub mod extract;
pub mod mw_auth;
pub mod note;
pub mod prelude;
pub mod user;
pub mod validation;

#[cfg(test)]
mod test_support;
