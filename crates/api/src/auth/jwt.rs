//! Token service: HS256-signed, stateless access and refresh tokens.
//!
//! Access tokens carry the full identity claims ([`AccessClaims`]); refresh
//! tokens carry only the subject and a type discriminator ([`RefreshClaims`]).
//! The two claim shapes are mutually non-deserializable, so a refresh token
//! is never accepted where an access token is required and vice versa.
//!
//! No token is persisted server-side. Rotating `JWT_SECRET` invalidates all
//! outstanding tokens; that is the only revocation mechanism.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use motorshare_core::types::UserId;
use serde::{Deserialize, Serialize};

/// Discriminator value carried by every refresh token.
const REFRESH_TOKEN_TYPE: &str = "refresh";

/// Claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    /// Subject -- the user's account id.
    pub sub: UserId,
    pub email: String,
    /// Marketplace role (`renter`, `owner`, or `both`).
    pub role: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Claims embedded in every refresh token. Deliberately minimal: a refresh
/// token authorizes nothing except minting a new access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshClaims {
    pub sub: UserId,
    #[serde(rename = "type")]
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
}

/// Subject-only claims decoded from an external identity provider's token
/// (the secondary verification path for account deletion).
#[derive(Debug, Deserialize)]
struct ProviderClaims {
    sub: UserId,
    #[allow(dead_code)]
    exp: i64,
}

/// Configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify this service's tokens.
    pub secret: String,
    /// Access token lifetime in hours (default: 24).
    pub access_expiry_hours: i64,
    /// Refresh token lifetime in days (default: 30).
    pub refresh_expiry_days: i64,
    /// Secret for verifying external-provider tokens, if configured.
    pub provider_secret: Option<String>,
}

/// Default access token expiry in hours.
const DEFAULT_ACCESS_EXPIRY_HOURS: i64 = 24;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 30;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_HOURS`  | no       | `24`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `30`    |
    /// | `PROVIDER_JWT_SECRET`      | no       | unset   |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_expiry_hours: i64 = std::env::var("JWT_ACCESS_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_HOURS must be a valid i64");

        let refresh_expiry_days: i64 = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_DAYS must be a valid i64");

        let provider_secret = std::env::var("PROVIDER_JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        Self {
            secret,
            access_expiry_hours,
            refresh_expiry_days,
            provider_secret,
        }
    }
}

/// Token verification rules: HS256, expiry checked with zero leeway so a
/// token is rejected at its expiry instant, not a minute later.
fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation
}

/// Generate an access token for the given identity.
pub fn generate_access_token(
    user_id: UserId,
    email: &str,
    role: &str,
    is_admin: bool,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = AccessClaims {
        sub: user_id,
        email: email.to_string(),
        role: role.to_string(),
        is_admin,
        iat: now,
        exp: now + config.access_expiry_hours * 3600,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Generate a refresh token bound to the given subject.
pub fn generate_refresh_token(
    user_id: UserId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = RefreshClaims {
        sub: user_id,
        token_type: REFRESH_TOKEN_TYPE.to_string(),
        iat: now,
        exp: now + config.refresh_expiry_days * 86400,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify an access token, returning its claims.
///
/// Fails closed: any failure -- malformed token, wrong signature, expiry,
/// refresh-token claim shape -- yields `None`, never an error or panic.
pub fn verify_access_token(token: &str, config: &JwtConfig) -> Option<AccessClaims> {
    decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims)
    .ok()
}

/// Verify a refresh token, returning its claims.
///
/// Fails closed like [`verify_access_token`]; additionally rejects any token
/// whose type discriminator is not `"refresh"`.
pub fn verify_refresh_token(token: &str, config: &JwtConfig) -> Option<RefreshClaims> {
    decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims)
    .ok()
    .filter(|claims| claims.token_type == REFRESH_TOKEN_TYPE)
}

/// Verify an external-provider token via the secondary secret, returning the
/// subject id. `None` when no provider secret is configured or verification
/// fails.
pub fn verify_provider_token(token: &str, config: &JwtConfig) -> Option<UserId> {
    let secret = config.provider_secret.as_deref()?;
    decode::<ProviderClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims.sub)
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_expiry_hours: 24,
            refresh_expiry_days: 30,
            provider_secret: Some("provider-secret".to_string()),
        }
    }

    #[test]
    fn test_generate_and_verify_access_token() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = generate_access_token(user_id, "a@b.com", "renter", false, &config)
            .expect("token generation should succeed");

        let claims = verify_access_token(&token, &config).expect("token should verify");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.role, "renter");
        assert!(!claims.is_admin);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_access_token_fails() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();

        // Expired one second ago; zero leeway must reject it.
        let claims = AccessClaims {
            sub: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            role: "renter".to_string(),
            is_admin: false,
            iat: now - 3600,
            exp: now - 1,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_access_token(&token, &config).is_none());
    }

    #[test]
    fn test_token_still_valid_before_expiry() {
        let config = test_config();
        let now = chrono::Utc::now().timestamp();

        let claims = AccessClaims {
            sub: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            role: "renter".to_string(),
            is_admin: false,
            iat: now,
            exp: now + 5,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_access_token(&token, &config).is_some());
    }

    #[test]
    fn test_type_discrimination_both_directions() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let access = generate_access_token(user_id, "a@b.com", "owner", false, &config).unwrap();
        let refresh = generate_refresh_token(user_id, &config).unwrap();

        // A refresh token must never pass access verification.
        assert!(verify_access_token(&refresh, &config).is_none());
        // An access token must never pass refresh verification.
        assert!(verify_refresh_token(&access, &config).is_none());

        // Each passes its own path.
        assert!(verify_access_token(&access, &config).is_some());
        let claims = verify_refresh_token(&refresh, &config).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.token_type, "refresh");
    }

    #[test]
    fn test_tampered_token_fails() {
        let config = test_config();
        let token =
            generate_access_token(Uuid::new_v4(), "a@b.com", "renter", false, &config).unwrap();

        // Flip a character in the payload segment.
        let mut bytes: Vec<char> = token.chars().collect();
        let mid = token.len() / 2;
        bytes[mid] = if bytes[mid] == 'a' { 'b' } else { 'a' };
        let tampered: String = bytes.into_iter().collect();

        assert!(verify_access_token(&tampered, &config).is_none());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: "a-completely-different-secret".to_string(),
            ..test_config()
        };

        let token =
            generate_access_token(Uuid::new_v4(), "a@b.com", "renter", false, &config_a).unwrap();
        assert!(verify_access_token(&token, &config_b).is_none());
    }

    #[test]
    fn test_provider_token_path() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let now = chrono::Utc::now().timestamp();

        let body = serde_json::json!({ "sub": user_id, "exp": now + 60, "aud_extra": "x" });
        let token = encode(
            &Header::default(),
            &body,
            &EncodingKey::from_secret(b"provider-secret"),
        )
        .unwrap();

        assert_eq!(verify_provider_token(&token, &config), Some(user_id));

        // The provider path never accepts this service's own tokens.
        let own = generate_access_token(user_id, "a@b.com", "renter", false, &config).unwrap();
        assert!(verify_provider_token(&own, &config).is_none());

        // No provider secret configured: path is disabled.
        let no_provider = JwtConfig {
            provider_secret: None,
            ..test_config()
        };
        assert!(verify_provider_token(&token, &no_provider).is_none());
    }
}
