// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Tickets and ticket answers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::principal::PrincipalId;

// =============================================================================
// Ids
// =============================================================================

/// Identity of a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    /// Creates a ticket id from its string representation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TicketId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identity of a ticket answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerId(String);

impl AnswerId {
    /// Creates an answer id from its string representation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AnswerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AnswerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// =============================================================================
// Ticket
// =============================================================================

/// A support ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket identity.
    pub id: TicketId,
    /// The principal that opened the ticket.
    pub owner: PrincipalId,
    /// Short subject line.
    pub subject: String,
    /// When the ticket was opened.
    pub opened_at: DateTime<Utc>,
}

impl Ticket {
    /// Returns `true` if the ticket is owned by the given principal.
    pub fn is_owned_by(&self, principal: &PrincipalId) -> bool {
        &self.owner == principal
    }
}

// =============================================================================
// TicketAnswer
// =============================================================================

/// An answer posted on a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketAnswer {
    /// Answer identity.
    pub id: AnswerId,
    /// The ticket this answer belongs to.
    pub ticket: TicketId,
    /// The principal that wrote the answer.
    pub author: PrincipalId,
    /// Answer body.
    pub body: String,
    /// When the answer was written.
    pub written_at: DateTime<Utc>,
}

/// Input for creating a ticket answer.
///
/// The author is always stamped server-side from the authenticated
/// principal; it is not part of the client payload.
#[derive(Debug, Clone)]
pub struct NewTicketAnswer {
    /// The ticket to answer.
    pub ticket: TicketId,
    /// The authenticated author.
    pub author: PrincipalId,
    /// Answer body.
    pub body: String,
}

// =============================================================================
// Tests
// =============================================================================
