//! Token issuance and verification.
//!
//! A token asserts `{user_id, iat, exp}` and is valid for [`TOKEN_VALIDITY`]
//! after issue. The clock is always passed in, so expiry can be checked at any
//! instant.

use chrono::{DateTime, TimeDelta, Utc};
use notes_auth::{
    auth_body::AuthBody,
    jwt::JwtKeys,
    secret_hash::is_secret_valid,
};
use notes_models::{db::connection::DbConnection, user::User};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::prelude::*;

/// Lifetime of an issued token.
pub const TOKEN_VALIDITY: TimeDelta = TimeDelta::hours(24);

/// Verified against on unknown emails so both failure paths cost one Argon2 run.
///
/// Uses the same Argon2id parameters as freshly generated hashes.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$C4ZIwZW3k3Lec4ml/LlXhg$o5GwzCUQKicsKHfJvLAyL2GSyx9topN12vgZA4avM+g";

/// JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// Identifier of the authenticated user.
    pub user_id: i32,
    /// Issued at, Unix seconds.
    pub iat: i64,
    /// Expiration, Unix seconds.
    pub exp: i64,
}

impl AuthToken {
    /// Claims for `user_id` issued at `now`.
    ///
    /// ```rust
    /// use chrono::Utc;
    /// use notes_web::auth_token::{AuthToken, TOKEN_VALIDITY};
    ///
    /// let now = Utc::now();
    /// let token = AuthToken::new(7, now).unwrap();
    /// assert_eq!(token.exp - token.iat, TOKEN_VALIDITY.num_seconds());
    /// ```
    pub fn new(user_id: i32, now: DateTime<Utc>) -> Result<Self> {
        let expiration = now
            .checked_add_signed(TOKEN_VALIDITY)
            .ok_or(Error::AuthTokenCreation)?;

        Ok(Self {
            user_id,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

/// Signs the claims and wraps them in the login response body.
pub fn encode_token(keys: &JwtKeys, token: &AuthToken) -> Result<AuthBody> {
    let token = keys.encode(token).map_err(|err| {
        error!("Failed to encode JWT {err}");
        err
    })?;

    Ok(AuthBody::new(token))
}

/// Verifies signature and expiry of `token` at `now`.
pub fn decode_token(
    keys: &JwtKeys,
    token: &str,
    now: DateTime<Utc>,
) -> notes_auth::prelude::Result<AuthToken> {
    let token = keys.decode::<AuthToken>(token)?.claims;
    if token.is_expired_at(now) {
        return Err(notes_auth::error::Error::TokenExpired);
    }
    Ok(token)
}

/// Checks an email/password pair against the store.
///
/// An unknown email and a wrong password both yield [`Error::WrongCredentials`].
pub fn authenticate(email: &str, password: &str, connection: &DbConnection) -> Result<User> {
    let Some(user) = User::fetch_by_email(email, connection)? else {
        let _ = is_secret_valid(password, DUMMY_HASH);
        return Err(Error::WrongCredentials);
    };

    if !is_secret_valid(password, &user.hash)? {
        return Err(Error::WrongCredentials);
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use notes_auth::error::Error as AuthError;

    use super::*;
    use crate::test_support::{connection, register};

    fn keys(secret: &str) -> JwtKeys {
        JwtKeys::new(secret.as_bytes()).unwrap()
    }

    #[test]
    fn accepted_after_a_minute_rejected_after_a_day() -> Result<()> {
        let keys = keys("secret");
        let issued_at = Utc::now();
        let body = encode_token(&keys, &AuthToken::new(1, issued_at)?)?;

        let token = decode_token(&keys, &body.token, issued_at + TimeDelta::minutes(1))?;
        assert_eq!(token.user_id, 1);

        assert!(matches!(
            decode_token(&keys, &body.token, issued_at + TimeDelta::hours(25)),
            Err(AuthError::TokenExpired)
        ));
        Ok(())
    }

    #[test]
    fn expires_exactly_at_validity_end() -> Result<()> {
        let issued_at = Utc::now();
        let token = AuthToken::new(1, issued_at)?;
        assert!(!token.is_expired_at(issued_at + TOKEN_VALIDITY - TimeDelta::seconds(1)));
        assert!(token.is_expired_at(issued_at + TOKEN_VALIDITY));
        Ok(())
    }

    #[test]
    fn foreign_secret_is_rejected() -> Result<()> {
        let now = Utc::now();
        let body = encode_token(&keys("other"), &AuthToken::new(1, now)?)?;
        assert!(matches!(
            decode_token(&keys("secret"), &body.token, now),
            Err(AuthError::InvalidToken)
        ));
        Ok(())
    }

    #[test]
    fn non_integral_user_id_is_rejected() -> Result<()> {
        let keys = keys("secret");
        let exp = (Utc::now() + TimeDelta::hours(1)).timestamp();
        let now = Utc::now();
        for claims in [
            serde_json::json!({ "user_id": 1.5, "iat": 0, "exp": exp }),
            serde_json::json!({ "user_id": "1", "iat": 0, "exp": exp }),
            serde_json::json!({ "iat": 0, "exp": exp }),
        ] {
            let token = keys.encode(&claims)?;
            assert!(matches!(
                decode_token(&keys, &token, now),
                Err(AuthError::InvalidToken)
            ));
        }
        Ok(())
    }

    #[test]
    fn dummy_hash_costs_like_a_real_one() -> Result<()> {
        let fresh = notes_auth::secret_hash::generate_secret_hash("secret1")?;
        let params = |hash: &str| hash.split('$').take(4).collect::<Vec<_>>().join("$");

        assert_eq!(params(DUMMY_HASH), params(&fresh));
        assert!(!is_secret_valid("secret1", DUMMY_HASH)?);
        Ok(())
    }

    #[test]
    fn authenticate_is_uniform() -> Result<()> {
        let conn = connection();
        let ada = register(&conn, "ada", "secret1");

        assert_eq!(authenticate("ada@x.com", "secret1", &conn)?.id, ada);
        assert!(matches!(
            authenticate("ada@x.com", "wrong-password", &conn),
            Err(Error::WrongCredentials)
        ));
        assert!(matches!(
            authenticate("nobody@x.com", "secret1", &conn),
            Err(Error::WrongCredentials)
        ));
        Ok(())
    }
}
