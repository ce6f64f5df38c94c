//! JWT signing and verification.
//!
//! Tokens are always signed and verified with HS256; the algorithm named in a
//! presented token's header is never trusted to pick another one. Keys are
//! built once from the configured secret and shared by reference or clone.
//!
//! ```rust
//! use notes_auth::jwt::JwtKeys;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Claims {
//!     user_id: i32,
//!     exp: i64,
//! }
//!
//! let keys = JwtKeys::new(b"MySuperSecret").unwrap();
//! let claims = Claims { user_id: 7, exp: 4118335200 };
//! let token = keys.encode(&claims).unwrap();
//! assert_eq!(keys.decode::<Claims>(&token).unwrap().claims, claims);
//! ```

use std::fmt;

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode,
};
use serde::{Serialize, de::DeserializeOwned};

use crate::prelude::*;

/// JWT signing algorithm used for every token.
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// Key pair derived from the process signing secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    /// Creates a key pair from the raw secret.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySecret`] when `secret` is empty.
    pub fn new(secret: &[u8]) -> Result<Self> {
        if secret.is_empty() {
            return Err(Error::EmptySecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }

    /// Signs `body` as the claims of a new token.
    pub fn encode<T>(&self, body: &T) -> Result<String>
    where
        T: Serialize,
    {
        Ok(encode(&Header::new(ALGORITHM), body, &self.encoding)?)
    }

    /// Verifies the signature of `token` and deserializes its claims.
    ///
    /// An `exp` claim must be present, but its value is not compared against
    /// the clock here; callers check it against their own notion of now.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToken`] for any signature, algorithm, structure
    /// or claim deserialization failure.
    pub fn decode<T>(&self, token: &str) -> Result<TokenData<T>>
    where
        T: DeserializeOwned,
    {
        decode(token, &self.decoding, &validation()).map_err(|_| Error::InvalidToken)
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);
    validation
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JwtKeys(REDACTED)")
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Claims {
        user_id: i32,
        exp: i64,
    }

    const FAR_FUTURE: i64 = 4118335200;

    #[test]
    fn round_trip_with_same_secret() -> Result<()> {
        let keys = JwtKeys::new(b"first-secret")?;
        let claims = Claims {
            user_id: 42,
            exp: FAR_FUTURE,
        };
        let token = keys.encode(&claims)?;
        assert_eq!(keys.decode::<Claims>(&token)?.claims, claims);
        Ok(())
    }

    #[test]
    fn other_secret_is_rejected() -> Result<()> {
        let signer = JwtKeys::new(b"first-secret")?;
        let verifier = JwtKeys::new(b"second-secret")?;
        let token = signer.encode(&Claims {
            user_id: 42,
            exp: FAR_FUTURE,
        })?;
        assert!(matches!(
            verifier.decode::<Claims>(&token),
            Err(Error::InvalidToken)
        ));
        Ok(())
    }

    #[test]
    fn other_algorithm_is_rejected() {
        let token = encode(
            &Header::new(Algorithm::HS512),
            &json!({ "user_id": 1, "exp": FAR_FUTURE }),
            &EncodingKey::from_secret(b"first-secret"),
        )
        .unwrap();
        let keys = JwtKeys::new(b"first-secret").unwrap();
        assert!(keys.decode::<Claims>(&token).is_err());
    }

    #[test]
    fn missing_exp_is_rejected() -> Result<()> {
        let keys = JwtKeys::new(b"first-secret")?;
        let token = keys.encode(&json!({ "user_id": 1 }))?;
        assert!(keys.decode::<serde_json::Value>(&token).is_err());
        Ok(())
    }

    #[test]
    fn garbage_is_rejected() -> Result<()> {
        let keys = JwtKeys::new(b"first-secret")?;
        assert!(keys.decode::<Claims>("not.a.token").is_err());
        assert!(keys.decode::<Claims>("").is_err());
        Ok(())
    }

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(JwtKeys::new(b""), Err(Error::EmptySecret)));
    }
}
