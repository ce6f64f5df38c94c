//! Field-level validation of request payloads.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::prelude::*;

/// Validation failures keyed by field name; at most one message per field.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 6;
const EMAIL_MAX_LEN: usize = 254;

/// WHATWG "valid e-mail address", with at least one dot in the domain.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern compiles")
});

/// Standard email syntax check.
///
/// ```rust
/// use notes_web::validation::is_valid_email;
///
/// assert!(is_valid_email("ada@x.com"));
/// assert!(!is_valid_email("ada@"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= EMAIL_MAX_LEN && EMAIL_REGEX.is_match(email)
}

/// Collects field errors and turns them into [`Error::Validation`].
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records "is required" when `value` is empty; returns whether it is present.
    pub fn required(&mut self, field: &'static str, value: &str) -> bool {
        if value.is_empty() {
            self.errors.entry(field).or_insert("is required");
            return false;
        }
        true
    }

    /// Records `message` for `field` unless `ok` holds or the field already failed.
    pub fn check(&mut self, field: &'static str, ok: bool, message: &'static str) -> &mut Self {
        if !ok {
            self.errors.entry(field).or_insert(message);
        }
        self
    }

    pub fn finish(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_syntax() {
        for valid in ["ada@x.com", "a.b+tag@sub.example.org", "o'neil@x.co"] {
            assert!(is_valid_email(valid), "{valid}");
        }
        for invalid in [
            "",
            "ada",
            "ada@",
            "@x.com",
            "ada@x",
            "ada@@x.com",
            "ada @x.com",
            "ada@-x.com",
            "ada@x..com",
        ] {
            assert!(!is_valid_email(invalid), "{invalid}");
        }
    }

    #[test]
    fn overlong_email_is_rejected() {
        let email = format!("{}@x.com", "a".repeat(250));
        assert!(!is_valid_email(&email));
    }

    #[test]
    fn first_error_per_field_wins() {
        let mut validator = Validator::new();
        assert!(!validator.required("title", ""));
        validator.check("title", false, "something else");
        validator.check("content", true, "never recorded");

        match validator.finish() {
            Err(Error::Validation(fields)) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields["title"], "is required");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn no_errors_is_ok() {
        let mut validator = Validator::new();
        assert!(validator.required("title", "t"));
        assert!(validator.finish().is_ok());
    }
}
