//! Error types for the notes service.
//!
//! These are startup and serving failures; request-level errors are
//! `notes_web::error::Error` and never reach this type.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Model(#[from] notes_models::error::Error),

    #[error(transparent)]
    Auth(#[from] notes_auth::error::Error),

    #[error("JWT_SECRET not found in environment variables")]
    MissingJwtSecret,
}
