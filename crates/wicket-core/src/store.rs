// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Store traits for the persistence collaborators.
//!
//! The auth core only reads through these traits (plus principal/answer
//! creation); every call is a fresh read against the backing store, with no
//! caching on this side. A lookup that finds nothing returns `Ok(None)`;
//! only infrastructure failure is an error.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::principal::{NewPrincipal, Principal, PrincipalId};
use crate::ticket::{AnswerId, NewTicketAnswer, Ticket, TicketAnswer, TicketId};

// =============================================================================
// PrincipalStore
// =============================================================================

/// Lookup and creation of principals.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Finds a principal by id.
    async fn find_by_id(&self, id: &PrincipalId) -> StoreResult<Option<Principal>>;

    /// Finds a principal by email.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Principal>>;

    /// Creates a principal, hashing the password.
    ///
    /// Fails with [`crate::StoreError::Duplicate`] when the email is taken.
    async fn create(&self, new: NewPrincipal) -> StoreResult<Principal>;
}

// =============================================================================
// TicketStore
// =============================================================================

/// Lookup of tickets.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Finds a ticket by id.
    async fn find_by_id(&self, id: &TicketId) -> StoreResult<Option<Ticket>>;

    /// Lists tickets, restricted to one owner when a scope is given.
    async fn list(&self, owner: Option<&PrincipalId>) -> StoreResult<Vec<Ticket>>;
}

// =============================================================================
// TicketAnswerStore
// =============================================================================

/// Lookup and creation of ticket answers.
#[async_trait]
pub trait TicketAnswerStore: Send + Sync {
    /// Finds an answer by id.
    async fn find_by_id(&self, id: &AnswerId) -> StoreResult<Option<TicketAnswer>>;

    /// Lists the answers on a ticket.
    async fn list_for_ticket(&self, ticket: &TicketId) -> StoreResult<Vec<TicketAnswer>>;

    /// Creates an answer.
    async fn create(&self, new: NewTicketAnswer) -> StoreResult<TicketAnswer>;
}
