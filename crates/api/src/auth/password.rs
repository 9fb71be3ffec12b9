//! Argon2id password hashing and verification.
//!
//! All password hashes use the Argon2id variant with a cryptographically
//! random salt generated via [`OsRng`]. The PHC string format is used for
//! storage so that algorithm parameters and salt are embedded in the hash
//! itself. Plaintext passwords and hashes are never logged.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Sentinel stored in `password_hash` for accounts created through an
/// external identity provider. It is not a valid PHC string, so password
/// verification always fails for these accounts and they can only sign in
/// through the OAuth path.
pub const OAUTH_SENTINEL: &str = "OAUTH_ONLY";

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (algorithm, params, salt, hash).
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not or
/// the stored value is the OAuth sentinel.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    if hash == OAUTH_SENTINEL {
        return Ok(false);
    }
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_hash_and_verify() {
        let password = "Correct-horse-battery-1";
        let hash = hash_password(password).expect("hashing should succeed");

        assert!(
            hash.starts_with("$argon2id$"),
            "expected argon2id PHC prefix"
        );

        let verified = verify_password(password, &hash).expect("verify should succeed");
        assert!(verified, "correct password should verify as true");
    }

    #[test]
    fn test_wrong_password_fails() {
        let hash = hash_password("Real-password-1").expect("hashing should succeed");
        let verified = verify_password("Wrong-password-1", &hash).expect("verify should succeed");
        assert!(!verified, "wrong password should verify as false");
    }

    #[test]
    fn test_oauth_sentinel_never_verifies() {
        // Even the sentinel string itself as the password must fail.
        assert!(!verify_password(OAUTH_SENTINEL, OAUTH_SENTINEL).unwrap());
        assert!(!verify_password("anything", OAUTH_SENTINEL).unwrap());
        assert!(!verify_password("", OAUTH_SENTINEL).unwrap());
    }

    #[test]
    fn test_malformed_stored_hash_is_an_error() {
        // A corrupt hash is a storage problem, not a wrong password.
        assert_matches!(verify_password("anything", "not-a-phc-string"), Err(_));
        assert_matches!(verify_password("anything", ""), Err(_));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("Same-password-1").unwrap();
        let b = hash_password("Same-password-1").unwrap();
        assert_ne!(a, b, "same password must produce distinct salted hashes");
    }
}
