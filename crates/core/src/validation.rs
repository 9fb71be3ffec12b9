//! Input validation for registration payloads.
//!
//! Validation failures return human-readable messages that are safe to show
//! to the end user (400-class errors, per the error taxonomy).

use std::sync::OnceLock;

use regex::Regex;

/// Configurable password policy.
///
/// Length, case, and digit rules are always enforced; the special-character
/// rule is opt-in via configuration.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Minimum password length (default: 8).
    pub min_length: usize,
    /// Whether a non-alphanumeric character is required (default: false).
    pub require_special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_special: false,
        }
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Shape check only: something@something.something, no whitespace.
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

/// Validate the shape of an email address.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email_regex().is_match(email) {
        Ok(())
    } else {
        Err("Invalid email format".to_string())
    }
}

/// Validate a password against the policy.
///
/// Returns the first failing rule's message, so the user can fix rules
/// one at a time.
pub fn validate_password_strength(password: &str, policy: &PasswordPolicy) -> Result<(), String> {
    if password.len() < policy.min_length {
        return Err(format!(
            "Password must be at least {} characters",
            policy.min_length
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain an uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain a lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain a number".to_string());
    }
    if policy.require_special && password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Password must contain a special character".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        for email in ["a@b.com", "first.last@example.co.uk", "x+tag@y.io"] {
            assert!(validate_email(email).is_ok(), "{email} should be valid");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["", "plain", "no@dot", "spaces in@x.com", "@x.com", "a@.b"] {
            assert!(validate_email(email).is_err(), "{email} should be invalid");
        }
    }

    #[test]
    fn test_password_rules_in_order() {
        let policy = PasswordPolicy::default();

        let err = validate_password_strength("Ab1", &policy).unwrap_err();
        assert!(err.contains("at least 8 characters"));

        let err = validate_password_strength("abcdefg1", &policy).unwrap_err();
        assert!(err.contains("uppercase"));

        let err = validate_password_strength("ABCDEFG1", &policy).unwrap_err();
        assert!(err.contains("lowercase"));

        let err = validate_password_strength("Abcdefgh", &policy).unwrap_err();
        assert!(err.contains("number"));

        assert!(validate_password_strength("Abcdefg1", &policy).is_ok());
    }

    #[test]
    fn test_special_character_rule_is_optional() {
        let lax = PasswordPolicy::default();
        assert!(validate_password_strength("Abcdefg1", &lax).is_ok());

        let strict = PasswordPolicy {
            require_special: true,
            ..PasswordPolicy::default()
        };
        assert!(validate_password_strength("Abcdefg1", &strict).is_err());
        assert!(validate_password_strength("Abcdefg1!", &strict).is_ok());
    }
}
