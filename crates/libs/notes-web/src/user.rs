//! Registration and login.

use chrono::Utc;
use notes_auth::{auth_body::AuthBody, jwt::JwtKeys, secret_hash::generate_secret_hash};
use notes_models::{db::connection::DbConnection, user::User, user::UserCreate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth_token::{AuthToken, authenticate, encode_token};
use crate::prelude::*;
use crate::validation::{
    PASSWORD_MIN_LEN, USERNAME_MAX_LEN, USERNAME_MIN_LEN, Validator, is_valid_email,
};

/// `POST /register` body. Missing fields deserialize as empty strings.
///
/// Emails are stored and looked up trimmed and lowercased.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// `POST /register` success body.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RegisterResponse {
    pub message: String,
    pub id: i32,
}

/// `POST /login` body. Missing fields deserialize as empty strings.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Trims username and email and checks every field.
    fn validate(self) -> Result<Self> {
        let username = self.username.trim();
        let email = self.email.trim().to_lowercase();

        let mut validator = Validator::new();
        if validator.required("username", username) {
            let len = username.chars().count();
            validator.check(
                "username",
                (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len),
                "must be between 3 and 50 characters",
            );
        }
        if validator.required("email", &email) {
            validator.check("email", is_valid_email(&email), "must be a valid email address");
        }
        if validator.required("password", &self.password) {
            validator.check(
                "password",
                self.password.chars().count() >= PASSWORD_MIN_LEN,
                "must be at least 6 characters",
            );
        }
        validator.finish()?;

        Ok(Self {
            username: username.to_string(),
            email,
            password: self.password,
        })
    }
}

impl LoginRequest {
    fn validate(self) -> Result<Self> {
        let email = self.email.trim().to_lowercase();

        let mut validator = Validator::new();
        if validator.required("email", &email) {
            validator.check("email", is_valid_email(&email), "must be a valid email address");
        }
        validator.required("password", &self.password);
        validator.finish()?;

        Ok(Self {
            email,
            password: self.password,
        })
    }
}

/// Validates and stores a new user.
///
/// # Errors
///
/// * [`Error::Validation`] - a field is missing or malformed
/// * [`Error::UserAlreadyExists`] - the username or email is taken
/// * [`Error::Auth`] - hashing failed
pub fn register_user(
    payload: RegisterRequest,
    connection: &DbConnection,
) -> Result<RegisterResponse> {
    let payload = payload.validate()?;
    if User::is_taken(&payload.username, &payload.email, connection)? {
        return Err(Error::UserAlreadyExists);
    }

    let hash = generate_secret_hash(&payload.password)?;
    let user = UserCreate {
        username: payload.username,
        email: payload.email,
        hash,
    }
    .save(connection)
    .map_err(|err| {
        if err.is_unique_violation() {
            Error::UserAlreadyExists
        } else {
            Error::Models(err)
        }
    })?;

    info!("Registered user {}", user.id);
    Ok(RegisterResponse {
        message: String::from("User registered successfully"),
        id: user.id,
    })
}

/// Checks the credentials and issues a token valid from now.
///
/// # Errors
///
/// * [`Error::Validation`] - a field is missing or the email is malformed
/// * [`Error::WrongCredentials`] - unknown email or wrong password, indistinguishably
pub fn login_user(
    payload: LoginRequest,
    connection: &DbConnection,
    keys: &JwtKeys,
) -> Result<AuthBody> {
    let payload = payload.validate()?;
    let user = authenticate(&payload.email, &payload.password, connection)?;

    let claims = AuthToken::new(user.id, Utc::now())?;
    let body = encode_token(keys, &claims)?;
    info!("User {} logged in", user.id);
    Ok(body)
}
