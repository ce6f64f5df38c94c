//! Authentication middleware for protecting routes.

use axum::{extract::Request, middleware::Next, response::Response};

use super::ctx::Ctx;
use crate::prelude::*;

/// Rejects the request unless [`crate::ctx::resolver::mw_ctx_resolver`] bound an identity.
pub async fn mw_require_auth(ctx: Result<Ctx>, req: Request, next: Next) -> Result<Response> {
    ctx?;
    Ok(next.run(req).await)
}
