//! Main Crate Error

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::{debug, error};

use crate::ctx::CtxError;
use crate::validation::FieldErrors;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Models(#[from] notes_models::error::Error),

    #[error(transparent)]
    Auth(#[from] notes_auth::error::Error),

    #[error(transparent)]
    Ctx(#[from] CtxError),

    #[error("Validation failed {0:?}")]
    Validation(FieldErrors),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid note id: {0}")]
    InvalidNoteId(String),

    #[error("User already exists")]
    UserAlreadyExists,

    /* Api Errors */
    #[error("API Forbidden")]
    ApiForbidden,

    #[error("Note not found")]
    NoteNotFound,

    #[error("Auth Token Creation")]
    AuthTokenCreation,

    #[error("Wrong Credentials")]
    WrongCredentials,

    #[error("Context Missing")]
    CtxMissing,
}

const INTERNAL: (StatusCode, &str) = (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
const INVALID_TOKEN: (StatusCode, &str) = (StatusCode::UNAUTHORIZED, "Invalid or expired token");
const AUTH_REQUIRED: (StatusCode, &str) = (StatusCode::UNAUTHORIZED, "Authentication required");

fn auth_status(err: &notes_auth::error::Error) -> (StatusCode, &'static str) {
    use notes_auth::error::Error as AuthError;
    match err {
        AuthError::TokenMissing => AUTH_REQUIRED,
        AuthError::InvalidToken | AuthError::TokenExpired => INVALID_TOKEN,
        AuthError::TokenCreation(_) | AuthError::EmptySecret | AuthError::PasswordHash(_) => {
            INTERNAL
        }
    }
}

impl Error {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            Error::Validation(_) => (StatusCode::BAD_REQUEST, "Validation failed"),
            Error::InvalidBody(_) => (StatusCode::BAD_REQUEST, "Invalid request body"),
            Error::InvalidNoteId(_) => (StatusCode::BAD_REQUEST, "Invalid note id"),
            Error::UserAlreadyExists => (StatusCode::BAD_REQUEST, "User already exists"),
            Error::WrongCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            Error::CtxMissing => AUTH_REQUIRED,
            Error::Auth(err) => auth_status(err),
            Error::Ctx(CtxError::Token(err)) => auth_status(err),
            Error::Ctx(CtxError::UnknownUser) => INVALID_TOKEN,
            Error::ApiForbidden => (StatusCode::FORBIDDEN, "Access forbidden"),
            Error::NoteNotFound => (StatusCode::NOT_FOUND, "Note not found"),
            Error::Ctx(CtxError::StoreUnavailable) | Error::AuthTokenCreation | Error::Models(_) => {
                INTERNAL
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = self.status();
        if status.is_server_error() {
            error!("Creating API error response for error: {:?}", self);
        } else {
            debug!("Creating API error response for error: {:?}", self);
        }

        let mut body = json!({
            "message": message,
            "status": status.as_u16()
        });
        if let Error::Validation(fields) = &self {
            body["fields"] = json!(fields);
        }
        (status, Json(json!({ "error": body }))).into_response()
    }
}
