// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Principals (authenticated identities) and their roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// PrincipalId
// =============================================================================

/// Canonical principal identity.
///
/// Every ownership comparison in the system goes through this type, so both
/// sides of the comparison are guaranteed to hold the same string
/// representation. Resource owner references and token subjects use
/// `PrincipalId` rather than raw strings or backend-specific id types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    /// Creates a principal id from its string representation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PrincipalId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PrincipalId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// =============================================================================
// Role
// =============================================================================

/// Principal roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A regular customer; may only reach their own records.
    Customer,
    /// A support agent; may read any ticket.
    Agent,
    /// Full administrative access.
    Admin,
}

impl Role {
    /// Returns the role name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Agent => "agent",
            Role::Admin => "admin",
        }
    }

    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "customer" | "user" => Some(Role::Customer),
            "agent" | "support" => Some(Role::Agent),
            "admin" | "administrator" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Principal
// =============================================================================

/// An authenticated identity.
///
/// Owned by the persistence layer; read-only from the auth core except for
/// the password-change timestamp comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Canonical identity.
    pub id: PrincipalId,
    /// Email address, unique per principal.
    pub email: String,
    /// Assigned role.
    pub role: Role,
    /// Bcrypt hash of the password. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// When the password was last changed, if ever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_changed_at: Option<DateTime<Utc>>,
    /// When the principal was created.
    pub created_at: DateTime<Utc>,
}

impl Principal {
    /// Verifies a candidate password against the stored hash.
    ///
    /// A malformed stored hash counts as a failed match; it is logged rather
    /// than surfaced, so a corrupt record cannot be probed into a 500.
    pub fn verify_password(&self, candidate: &str) -> bool {
        match bcrypt::verify(candidate, &self.password_hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(principal = %self.id, error = %e, "Stored password hash is unusable");
                false
            }
        }
    }

    /// Returns `true` if the password changed at or after the given
    /// issued-at time (Unix seconds).
    ///
    /// Token issued-at claims carry whole seconds, so the stored timestamp is
    /// truncated to seconds before comparing.
    pub fn password_changed_after(&self, issued_at: i64) -> bool {
        self.password_changed_at
            .map(|changed| changed.timestamp() >= issued_at)
            .unwrap_or(false)
    }
}

// =============================================================================
// NewPrincipal
// =============================================================================

/// Input for creating a principal.
///
/// The password arrives in plain text; hashing happens inside the store.
#[derive(Debug, Clone)]
pub struct NewPrincipal {
    /// Email address.
    pub email: String,
    /// Plain-text password to be hashed by the store.
    pub password: String,
    /// Role to assign.
    pub role: Role,
}

impl NewPrincipal {
    /// Creates input for a customer sign-up.
    pub fn customer(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role: Role::Customer,
        }
    }

    /// Sets the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn hashed(password: &str) -> String {
        bcrypt::hash(password, 4).unwrap()
    }

    fn test_principal(changed_at: Option<DateTime<Utc>>) -> Principal {
        Principal {
            id: PrincipalId::new("p1"),
            email: "p1@example.com".to_string(),
            role: Role::Customer,
            password_hash: hashed("Secret1!"),
            password_changed_at: changed_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_principal_id_equality() {
        assert_eq!(PrincipalId::new("u1"), PrincipalId::from("u1"));
        assert_ne!(PrincipalId::new("u1"), PrincipalId::new("u2"));
        assert_eq!(PrincipalId::new("u1").as_str(), "u1");
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("customer"), Some(Role::Customer));
        assert_eq!(Role::parse("USER"), Some(Role::Customer));
        assert_eq!(Role::parse("agent"), Some(Role::Agent));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("unknown"), None);
    }

    #[test]
    fn test_verify_password() {
        let principal = test_principal(None);
        assert!(principal.verify_password("Secret1!"));
        assert!(!principal.verify_password("wrong"));
    }

    #[test]
    fn test_verify_password_malformed_hash() {
        let mut principal = test_principal(None);
        principal.password_hash = "not-a-bcrypt-hash".to_string();
        assert!(!principal.verify_password("Secret1!"));
    }

    #[test]
    fn test_password_changed_after() {
        let now = Utc::now();

        // Never changed: every credential stays valid.
        let principal = test_principal(None);
        assert!(!principal.password_changed_after(now.timestamp()));

        // Changed after issuance: stale.
        let principal = test_principal(Some(now));
        assert!(principal.password_changed_after(now.timestamp() - 60));

        // Changed exactly at issuance: stale.
        assert!(principal.password_changed_after(now.timestamp()));

        // Changed before issuance: fine.
        let principal = test_principal(Some(now - Duration::hours(1)));
        assert!(!principal.password_changed_after(now.timestamp()));
    }

    #[test]
    fn test_principal_serialization_hides_hash() {
        let principal = test_principal(None);
        let json = serde_json::to_string(&principal).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(json.contains("p1@example.com"));
    }
}
