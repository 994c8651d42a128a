//! Signup input rules.
//!
//! Every rule is checked on every call and all violations are returned
//! together.

use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::SecretString;

use super::error::Violation;

pub const USERNAME_MIN_LEN: usize = 4;
pub const USERNAME_MAX_LEN: usize = 15;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 15;

// Local part of letters, digits and `_'+-.` not ending in a dot; dot-separated
// domain labels that do not start with a hyphen; alphabetic TLD of 2+ letters.
static EMAIL_RE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .ok()
});

/// Signup input that passed every rule.
#[derive(Debug)]
pub struct ValidSignup {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

/// Normalize an email for lookup/uniqueness checks.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic email format check on already-normalized input.
#[must_use]
pub fn valid_email(email_normalized: &str) -> bool {
    // The regex engine has no lookahead, so dot placement is checked here.
    if email_normalized.starts_with('.') || email_normalized.contains("..") {
        return false;
    }

    EMAIL_RE
        .as_ref()
        .is_some_and(|regex| regex.is_match(email_normalized))
}

fn check_length(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
    violations: &mut Vec<Violation>,
) {
    // UTF-16 code units, so astral characters such as emoji count twice.
    let len = value.encode_utf16().count();
    if len < min || len > max {
        violations.push(Violation::new(
            field,
            format!("must be between {min} and {max} characters"),
        ));
    }
}

/// Validate raw signup fields.
///
/// # Errors
///
/// Returns every violated rule when any check fails.
pub fn validate(
    username: &str,
    email: &str,
    password: &str,
) -> Result<ValidSignup, Vec<Violation>> {
    let mut violations = Vec::new();
    let email = normalize_email(email);

    check_length(
        "username",
        username,
        USERNAME_MIN_LEN,
        USERNAME_MAX_LEN,
        &mut violations,
    );

    if !valid_email(&email) {
        violations.push(Violation::new("email", "must be a valid email address"));
    }

    check_length(
        "password",
        password,
        PASSWORD_MIN_LEN,
        PASSWORD_MAX_LEN,
        &mut violations,
    );

    if violations.is_empty() {
        Ok(ValidSignup {
            username: username.to_string(),
            email,
            password: SecretString::from(password.to_string()),
        })
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn fields(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email(" Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@example.com"));
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("a@b"));
        assert!(!valid_email("a b@example.com"));
        assert!(valid_email("first.last+tag@mail.example.co"));
        assert!(valid_email("o'neil_99@example.org"));

        for rejected in [
            "a@b.c",
            "a..b@example.com",
            ".a@example.com",
            "a.@example.com",
            "a@-example.com",
            "a@example..com",
            "a\"b<>@x.yz",
            "a@example.c0m",
            "a@@example.com",
        ] {
            assert!(!valid_email(rejected), "{rejected} should be rejected");
        }
    }

    #[test]
    fn accepts_valid_input_and_normalizes_email() {
        let valid = validate("alice", " Alice@Example.com", "secret1").unwrap_or_else(|v| {
            panic!("unexpected violations: {v:?}");
        });
        assert_eq!(valid.username, "alice");
        assert_eq!(valid.email, "alice@example.com");
        assert_eq!(valid.password.expose_secret(), "secret1");
    }

    #[test]
    fn short_username_is_rejected() {
        let violations = validate("abc", "abc@example.com", "secret1")
            .err()
            .unwrap_or_default();
        assert_eq!(fields(&violations), vec!["username"]);
        assert_eq!(
            violations.first().map(|v| v.message.as_str()),
            Some("must be between 4 and 15 characters")
        );
    }

    #[test]
    fn invalid_email_is_rejected() {
        let violations = validate("alice", "not-an-email", "secret1")
            .err()
            .unwrap_or_default();
        assert_eq!(fields(&violations), vec!["email"]);
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert!(validate("abcd", "a@example.com", "123456").is_ok());
        assert!(validate("abcdefghijklmno", "a@example.com", "123456789012345").is_ok());
        assert!(validate("abcdefghijklmnop", "a@example.com", "123456").is_err());
        assert!(validate("abcd", "a@example.com", "1234567890123456").is_err());
        assert!(validate("abcd", "a@example.com", "12345").is_err());
    }

    #[test]
    fn lengths_count_utf16_code_units() {
        // four code units, eight bytes
        assert!(validate("éééé", "a@example.com", "123456").is_ok());
        // two emoji are four code units
        assert!(validate("😀😀", "a@example.com", "123456").is_ok());
        // eight emoji are sixteen code units
        let violations = validate("alice", "a@example.com", &"😀".repeat(8))
            .err()
            .unwrap_or_default();
        assert_eq!(fields(&violations), vec!["password"]);
    }

    #[test]
    fn all_violations_are_reported() {
        let violations = validate("abc", "nope", "123").err().unwrap_or_default();
        assert_eq!(fields(&violations), vec!["username", "email", "password"]);
    }
}
