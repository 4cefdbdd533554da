// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Token claims structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wicket_core::PrincipalId;

/// Claims embedded in a session token.
///
/// The payload carries the principal id plus the standard issued-at and
/// expiry claims (RFC 7519). `iat` is what the stale-credential check
/// compares against the principal's password-change timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal id.
    pub sub: PrincipalId,

    /// Issued at time (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a principal, expiring `ttl_secs` from now.
    pub fn new(principal: PrincipalId, ttl_secs: i64) -> Self {
        let now = Utc::now().timestamp();

        Self {
            sub: principal,
            iat: now,
            exp: now + ttl_secs,
        }
    }

    /// Returns the issued-at time as a `DateTime`.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    /// Returns the expiry time as a `DateTime`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Returns `true` if the claims have expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

// =============================================================================
// Tests
// =============================================================================
