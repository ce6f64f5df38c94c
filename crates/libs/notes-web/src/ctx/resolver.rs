//! Context resolver for extracting the caller's identity from HTTP requests.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use notes_auth::{AUTH_HEADER, AUTH_HEADER_PREFIX, error::Error as AuthError, jwt::JwtKeys};
use notes_models::{db::connection::DbConnection, user::User};
use tracing::{debug, error};

use crate::auth_token::decode_token;
use crate::ctx::{Ctx, CtxError};
use crate::prelude::*;

/// Middleware resolving the request identity from the `Authorization` header.
///
/// The outcome, success or the reason for failure, is stored in the request
/// extensions; [`crate::mw_auth::mw_require_auth`] and the [`Ctx`] extractor
/// turn a failure into a rejection.
///
/// ```rust
/// use axum::{Router, extract::FromRef, middleware, routing::get};
/// use notes_auth::jwt::JwtKeys;
/// use notes_models::db::{config::DbConfig, connection::DbConnection};
/// use notes_web::{ctx::Ctx, ctx::resolver::mw_ctx_resolver, mw_auth::mw_require_auth};
///
/// #[derive(Clone, FromRef)]
/// struct AppState {
///     connection: DbConnection,
///     keys: JwtKeys,
/// }
///
/// async fn whoami(ctx: Ctx) -> String {
///     ctx.user_id().to_string()
/// }
///
/// let state = AppState {
///     connection: DbConnection::new(&DbConfig::in_memory()).unwrap(),
///     keys: JwtKeys::new(b"secret").unwrap(),
/// };
/// let app: Router = Router::new()
///     .route("/whoami", get(whoami))
///     .route_layer(middleware::from_fn(mw_require_auth))
///     .route_layer(middleware::from_fn_with_state(state.clone(), mw_ctx_resolver))
///     .with_state(state);
/// ```
pub async fn mw_ctx_resolver(
    State(connection): State<DbConnection>,
    State(keys): State<JwtKeys>,
    headers: HeaderMap,
    mut req: Request,
    next: Next,
) -> Response {
    let ctx = resolve_ctx(&headers, &keys, &connection, Utc::now());
    if let Err(err) = &ctx {
        debug!("Request identity rejected: {err}");
    }
    req.extensions_mut().insert(ctx);

    next.run(req).await
}

/// Resolves the identity asserted by the request headers at `now`.
///
/// Fails closed: a missing or malformed header, a bad signature, an expired
/// token, an unknown subject or an unreachable store all produce an error.
pub fn resolve_ctx(
    headers: &HeaderMap,
    keys: &JwtKeys,
    connection: &DbConnection,
    now: DateTime<Utc>,
) -> core::result::Result<Ctx, CtxError> {
    let token = bearer_token(headers)?;
    let token = decode_token(keys, token, now)?;

    match User::fetch_by_id(token.user_id, connection) {
        Ok(Some(user)) => Ok(Ctx::new(user.id)),
        Ok(None) => Err(CtxError::UnknownUser),
        Err(err) => {
            error!("Failed to resolve token subject {err}");
            Err(CtxError::StoreUnavailable)
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> core::result::Result<&str, AuthError> {
    headers
        .get(AUTH_HEADER)
        .ok_or(AuthError::TokenMissing)?
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix(AUTH_HEADER_PREFIX))
        .ok_or(AuthError::InvalidToken)
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        Ok(parts
            .extensions
            .get::<core::result::Result<Ctx, CtxError>>()
            .ok_or(Error::CtxMissing)?
            .clone()?)
    }
}
