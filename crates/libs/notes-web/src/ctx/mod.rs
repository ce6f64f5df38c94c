//! Request context for authenticated requests.
//!
//! A [`Ctx`] can only be produced by the [`resolver`] after a token has been
//! verified and its subject found in the store. Handlers that take a `Ctx`
//! argument are therefore statically guaranteed to run for a known user.

use notes_auth::error::Error as AuthError;

pub mod resolver;

/// Why a request carries no identity.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CtxError {
    #[error(transparent)]
    Token(#[from] AuthError),

    #[error("Token subject does not exist")]
    UnknownUser,

    #[error("Identity store unavailable")]
    StoreUnavailable,
}

/// Authenticated identity bound to a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctx {
    user_id: i32,
}

impl Ctx {
    pub(crate) fn new(user_id: i32) -> Self {
        Self { user_id }
    }

    /// The resolved user.
    pub fn user_id(&self) -> i32 {
        self.user_id
    }
}
