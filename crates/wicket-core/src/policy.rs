// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Credential format policy.
//!
//! Sign-in checks these predicates before touching any store, so malformed
//! input never costs a lookup.

use once_cell::sync::Lazy;
use regex::Regex;

/// Password length bounds.
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 100;

/// The accepted password symbol set.
const PASSWORD_SYMBOLS: &str = "@$!%*?&";

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    // Local part: dot-separated atoms or a quoted string; domain: dotted
    // labels with a 2+ character TLD.
    Regex::new(
        r#"^(([^<>()\[\].,;:\s@"]+(\.[^<>()\[\].,;:\s@"]+)*)|(".+"))@(([^<>()\[\].,;:\s@"]+\.)+[^<>()\[\].,;:\s@"]{2,})$"#,
    )
    .expect("email regex is valid")
});

/// Returns `true` if the email has an acceptable shape.
pub fn email_is_valid(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Returns `true` if the password satisfies the complexity policy.
///
/// Required: 8..=100 characters drawn from letters, digits and `@$!%*?&`,
/// with at least one lowercase letter, one uppercase letter, one digit and
/// one symbol.
pub fn password_is_acceptable(password: &str) -> bool {
    let len = password.chars().count();
    if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&len) {
        return false;
    }

    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c);
    if !password.chars().all(allowed) {
        return false;
    }

    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

// =============================================================================
// Tests
// =============================================================================
