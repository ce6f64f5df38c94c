//! Password hashing and verification using Argon2.
//!
//! Hashes are produced with Argon2id and a fixed work factor, salted with a
//! fresh random salt, and encoded as PHC strings so the parameters travel with
//! the hash.
//!
//! ```rust
//! use notes_auth::secret_hash::{generate_secret_hash, is_secret_valid};
//!
//! let hash = generate_secret_hash("user_password_123").unwrap();
//! assert!(is_secret_valid("user_password_123", &hash).unwrap());
//! assert!(!is_secret_valid("wrong_password", &hash).unwrap());
//! ```

use argon2::{
    Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version,
    password_hash::{self, PasswordHashString, SaltString},
};
use rand::rngs::OsRng;

use crate::prelude::*;

/// Argon2id, version 0x13, m=19456 KiB, t=2, p=1.
fn hasher() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

/// Generates a salted hash for the provided password.
///
/// The returned PHC string is safe to store and never equals the input.
///
/// # Errors
///
/// Returns [`Error::PasswordHash`] if Argon2 fails; callers must treat this as
/// fatal for the request.
pub fn generate_secret_hash(pw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(hasher().hash_password(pw.as_bytes(), &salt)?.to_string())
}

/// Verifies a password against a stored hash.
///
/// The comparison of the derived output is constant-time.
///
/// * `Ok(true)` - Password matches the hash
/// * `Ok(false)` - Password does not match the hash
/// * `Err(Error)` - The stored hash could not be parsed
pub fn is_secret_valid(pw: &str, hash: &str) -> Result<bool> {
    let hash = PasswordHashString::new(hash)?;

    Ok(hasher()
        .verify_password(pw.as_bytes(), &hash.password_hash())
        .is_ok())
}

impl From<password_hash::Error> for Error {
    fn from(value: password_hash::Error) -> Self {
        Self::PasswordHash(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_never_equals_plaintext_and_verifies() -> Result<()> {
        let hash = generate_secret_hash("secret1")?;
        assert_ne!(hash, "secret1");
        assert!(hash.starts_with("$argon2id$"));
        assert!(is_secret_valid("secret1", &hash)?);
        Ok(())
    }

    #[test]
    fn wrong_password_is_rejected() -> Result<()> {
        let hash = generate_secret_hash("secret1")?;
        assert!(!is_secret_valid("secret2", &hash)?);
        assert!(!is_secret_valid("", &hash)?);
        Ok(())
    }

    #[test]
    fn same_password_gets_distinct_salts() -> Result<()> {
        let first = generate_secret_hash("secret1")?;
        let second = generate_secret_hash("secret1")?;
        assert_ne!(first, second);
        assert!(is_secret_valid("secret1", &second)?);
        Ok(())
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(matches!(
            is_secret_valid("secret1", "not-a-phc-string"),
            Err(Error::PasswordHash(_))
        ));
    }
}
