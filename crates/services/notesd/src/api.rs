//! HTTP routes of the notes service.

use axum::{
    Json, Router,
    extract::{FromRef, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware,
    routing::{get, post},
};
use notes_auth::{auth_body::AuthBody, jwt::JwtKeys};
use notes_models::{db::connection::DbConnection, note::Note};
use notes_web::{
    ctx::{Ctx, resolver::mw_ctx_resolver},
    extract::{ApiJson, ApiPath},
    mw_auth::mw_require_auth,
    note::NotePayload,
    prelude::Result as WebResult,
    user::{LoginRequest, RegisterRequest, RegisterResponse, login_user, register_user},
};
use tower_http::{
    cors::CorsLayer,
    sensitive_headers::SetSensitiveRequestHeadersLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// State shared by every request: the pool and the signing keys.
#[derive(Clone, Debug, FromRef)]
pub struct ApiState {
    pub connection: DbConnection,
    pub keys: JwtKeys,
}

/// Builds the application router.
///
/// `/register` and `/login` are public; every `/notes` route goes through the
/// identity resolver and is rejected without a valid bearer token.
pub fn router(state: ApiState) -> Router {
    let note_routes = Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route_layer(middleware::from_fn(mw_require_auth))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            mw_ctx_resolver,
        ));

    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login));

    Router::new()
        .merge(auth_routes)
        .merge(note_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION]))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn register(
    State(connection): State<DbConnection>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> WebResult<(StatusCode, Json<RegisterResponse>)> {
    Ok((StatusCode::CREATED, Json(register_user(payload, &connection)?)))
}

async fn login(
    State(connection): State<DbConnection>,
    State(keys): State<JwtKeys>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> WebResult<Json<AuthBody>> {
    Ok(Json(login_user(payload, &connection, &keys)?))
}

async fn list_notes(
    State(connection): State<DbConnection>,
    ctx: Ctx,
) -> WebResult<Json<Vec<Note>>> {
    Ok(Json(ctx.notes(&connection)?))
}

async fn get_note(
    State(connection): State<DbConnection>,
    ctx: Ctx,
    ApiPath(id): ApiPath<i32>,
) -> WebResult<Json<Note>> {
    Ok(Json(ctx.note(id, &connection)?))
}

async fn create_note(
    State(connection): State<DbConnection>,
    ctx: Ctx,
    ApiJson(payload): ApiJson<NotePayload>,
) -> WebResult<(StatusCode, Json<Note>)> {
    Ok((StatusCode::CREATED, Json(ctx.create_note(payload, &connection)?)))
}

async fn update_note(
    State(connection): State<DbConnection>,
    ctx: Ctx,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<NotePayload>,
) -> WebResult<Json<Note>> {
    Ok(Json(ctx.update_note(id, payload, &connection)?))
}

async fn delete_note(
    State(connection): State<DbConnection>,
    ctx: Ctx,
    ApiPath(id): ApiPath<i32>,
) -> WebResult<StatusCode> {
    ctx.delete_note(id, &connection)?;
    Ok(StatusCode::NO_CONTENT)
}
