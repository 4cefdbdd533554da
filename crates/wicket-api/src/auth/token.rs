// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Token issuance and verification.

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use wicket_core::PrincipalId;

use super::session::AuthError;
use super::Claims;
use crate::config::CookieConfig;
use crate::error::{ApiError, ApiResult};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "jwt";

// =============================================================================
// TokenConfig
// =============================================================================

/// Token configuration.
///
/// The secret and lifetimes are threaded in explicitly; nothing in this
/// module reads the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Secret key for signing tokens.
    #[serde(skip_serializing)]
    pub secret: String,
    /// Token lifetime in seconds.
    pub ttl_secs: i64,
    /// Clock skew tolerance in seconds.
    pub leeway_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(), // Must be set by user
            ttl_secs: 3600 * 24,   // 1 day
            leeway_secs: 60,
        }
    }
}

impl TokenConfig {
    /// Creates a new configuration with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Sets the token lifetime in seconds.
    pub fn with_ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ApiResult<()> {
        if self.secret.is_empty() {
            return Err(ApiError::internal("Token secret is not configured"));
        }
        if self.secret.len() < 32 {
            tracing::warn!("Token secret is shorter than recommended (32 bytes)");
        }
        Ok(())
    }
}

// =============================================================================
// TokenService
// =============================================================================

/// Issues and verifies signed session tokens.
#[derive(Clone)]
pub struct TokenService {
    ttl_secs: i64,
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl TokenService {
    /// Creates a new token service with the given configuration.
    pub fn new(config: TokenConfig) -> ApiResult<Self> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        validation.validate_aud = false;

        Ok(Self {
            ttl_secs: config.ttl_secs,
            encoding_key: Arc::new(encoding_key),
            decoding_key: Arc::new(decoding_key),
            validation: Arc::new(validation),
        })
    }

    /// Issues a token for a principal.
    ///
    /// Pure function of the configuration plus the current time.
    pub fn issue(&self, principal: PrincipalId) -> ApiResult<IssuedToken> {
        let claims = Claims::new(principal, self.ttl_secs);
        let token = self.sign(&claims)?;
        Ok(IssuedToken { token, claims })
    }

    /// Signs arbitrary claims.
    ///
    /// Tests use this to construct tokens with chosen issued-at values.
    pub fn sign(&self, claims: &Claims) -> ApiResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| ApiError::internal(format!("Failed to sign token: {}", e)))
    }

    /// Verifies a token's signature and expiry, returning its claims.
    ///
    /// Malformed input, a bad signature and an expired token all collapse
    /// into [`AuthError::InvalidCredential`]; the precise reason is kept for
    /// logging only.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidCredential {
                reason: e.to_string(),
            })
    }

    /// Returns the token lifetime in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

/// A freshly issued token together with its claims.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The signed compact token.
    pub token: String,
    /// The claims it carries.
    pub claims: Claims,
}

// =============================================================================
// Session Cookie
// =============================================================================

/// Builds the session cookie for a freshly issued token.
///
/// One assignment carries the full option set: `HttpOnly` always, `Secure`
/// only in production-equivalent deployments, lifetime from configuration.
pub fn session_cookie(token: String, config: &CookieConfig, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(config.ttl_days))
        .build()
}

/// Builds the removal cookie used by sign-out.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::ZERO)
        .build()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_config() -> TokenConfig {
        TokenConfig::new("test-secret-key-that-is-long-enough-for-testing")
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(TokenService::new(TokenConfig::default()).is_err());
    }

    #[test]
    fn test_issue_and_verify() {
        let service = TokenService::new(test_config()).unwrap();

        let issued = service.issue(PrincipalId::new("u1")).unwrap();
        assert_eq!(issued.token.split('.').count(), 3);

        let claims = service.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, PrincipalId::new("u1"));
        assert_eq!(claims.iat, issued.claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::new(test_config()).unwrap();

        let claims = Claims {
            sub: PrincipalId::new("u1"),
            iat: Utc::now().timestamp() - 7200,
            exp: Utc::now().timestamp() - 3600,
        };
        let token = service.sign(&claims).unwrap();

        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service1 = TokenService::new(TokenConfig::new("secret-one-for-testing-purposes")).unwrap();
        let service2 = TokenService::new(TokenConfig::new("secret-two-for-testing-purposes")).unwrap();

        let issued = service1.issue(PrincipalId::new("u1")).unwrap();
        assert!(service2.verify(&issued.token).is_err());
    }

    #[test]
    fn test_malformed_token_rejected() {
        let service = TokenService::new(test_config()).unwrap();
        assert!(service.verify("not.a.token").is_err());
        assert!(service.verify("").is_err());
    }

    #[test]
    fn test_session_cookie_options() {
        let cookie = session_cookie("abc".to_string(), &CookieConfig { ttl_days: 3 }, false);
        assert_eq!(cookie.name(), "jwt");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(3)));

        let secure = session_cookie("abc".to_string(), &CookieConfig::default(), true);
        assert_eq!(secure.secure(), Some(true));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie();
        assert_eq!(cookie.name(), "jwt");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
