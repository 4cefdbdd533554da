// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-memory store used by tests and the demo runtime.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::principal::{NewPrincipal, Principal, PrincipalId, Role};
use crate::store::{PrincipalStore, TicketAnswerStore, TicketStore};
use crate::ticket::{AnswerId, NewTicketAnswer, Ticket, TicketAnswer, TicketId};

/// Bcrypt work factor for the in-memory store.
///
/// Deliberately low: this store backs tests and local demos, not production
/// traffic.
const HASH_COST: u32 = 6;

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory implementation of all three store traits.
#[derive(Default)]
pub struct MemoryStore {
    principals: RwLock<HashMap<PrincipalId, Principal>>,
    tickets: RwLock<HashMap<TicketId, Ticket>>,
    answers: RwLock<HashMap<AnswerId, TicketAnswer>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully-formed principal, bypassing hashing.
    ///
    /// Test seam: fixtures construct principals with arbitrary
    /// `password_changed_at` values.
    pub fn insert_principal(&self, principal: Principal) {
        self.principals
            .write()
            .insert(principal.id.clone(), principal);
    }

    /// Inserts a ticket.
    pub fn insert_ticket(&self, ticket: Ticket) {
        self.tickets.write().insert(ticket.id.clone(), ticket);
    }

    /// Inserts an answer.
    pub fn insert_answer(&self, answer: TicketAnswer) {
        self.answers.write().insert(answer.id.clone(), answer);
    }

    /// Seeds a principal with a hashed password, returning it.
    ///
    /// Convenience for demo bootstrap and fixtures.
    pub fn seed_principal(
        &self,
        id: impl Into<String>,
        email: impl Into<String>,
        password: &str,
        role: Role,
        password_changed_at: Option<DateTime<Utc>>,
    ) -> StoreResult<Principal> {
        let hash = bcrypt::hash(password, HASH_COST)
            .map_err(|e| StoreError::internal(format!("password hashing failed: {}", e)))?;

        let principal = Principal {
            id: PrincipalId::new(id),
            email: email.into(),
            role,
            password_hash: hash,
            password_changed_at,
            created_at: Utc::now(),
        };
        self.insert_principal(principal.clone());
        Ok(principal)
    }
}

// =============================================================================
// PrincipalStore
// =============================================================================

#[async_trait]
impl PrincipalStore for MemoryStore {
    async fn find_by_id(&self, id: &PrincipalId) -> StoreResult<Option<Principal>> {
        Ok(self.principals.read().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Principal>> {
        Ok(self
            .principals
            .read()
            .values()
            .find(|p| p.email == email)
            .cloned())
    }

    async fn create(&self, new: NewPrincipal) -> StoreResult<Principal> {
        let mut principals = self.principals.write();

        if principals.values().any(|p| p.email == new.email) {
            return Err(StoreError::duplicate("email"));
        }

        let hash = bcrypt::hash(&new.password, HASH_COST)
            .map_err(|e| StoreError::internal(format!("password hashing failed: {}", e)))?;

        let principal = Principal {
            id: PrincipalId::new(Uuid::now_v7().to_string()),
            email: new.email,
            role: new.role,
            password_hash: hash,
            password_changed_at: None,
            created_at: Utc::now(),
        };

        principals.insert(principal.id.clone(), principal.clone());
        Ok(principal)
    }
}

// =============================================================================
// TicketStore
// =============================================================================

#[async_trait]
impl TicketStore for MemoryStore {
    async fn find_by_id(&self, id: &TicketId) -> StoreResult<Option<Ticket>> {
        Ok(self.tickets.read().get(id).cloned())
    }

    async fn list(&self, owner: Option<&PrincipalId>) -> StoreResult<Vec<Ticket>> {
        let tickets = self.tickets.read();
        let mut listed: Vec<Ticket> = match owner {
            Some(owner) => tickets
                .values()
                .filter(|t| t.is_owned_by(owner))
                .cloned()
                .collect(),
            None => tickets.values().cloned().collect(),
        };
        listed.sort_by(|a, b| a.opened_at.cmp(&b.opened_at));
        Ok(listed)
    }
}

// =============================================================================
// TicketAnswerStore
// =============================================================================

#[async_trait]
impl TicketAnswerStore for MemoryStore {
    async fn find_by_id(&self, id: &AnswerId) -> StoreResult<Option<TicketAnswer>> {
        Ok(self.answers.read().get(id).cloned())
    }

    async fn list_for_ticket(&self, ticket: &TicketId) -> StoreResult<Vec<TicketAnswer>> {
        let mut listed: Vec<TicketAnswer> = self
            .answers
            .read()
            .values()
            .filter(|a| &a.ticket == ticket)
            .cloned()
            .collect();
        listed.sort_by(|a, b| a.written_at.cmp(&b.written_at));
        Ok(listed)
    }

    async fn create(&self, new: NewTicketAnswer) -> StoreResult<TicketAnswer> {
        let answer = TicketAnswer {
            id: AnswerId::new(Uuid::now_v7().to_string()),
            ticket: new.ticket,
            author: new.author,
            body: new.body,
            written_at: Utc::now(),
        };
        self.answers
            .write()
            .insert(answer.id.clone(), answer.clone());
        Ok(answer)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: &str, owner: &str) -> Ticket {
        Ticket {
            id: TicketId::new(id),
            owner: PrincipalId::new(owner),
            subject: format!("ticket {}", id),
            opened_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_principal_create_and_lookup() {
        let store = MemoryStore::new();

        let created = PrincipalStore::create(&store, NewPrincipal::customer("a@example.com", "Secret1!"))
            .await
            .unwrap();

        let by_id = PrincipalStore::find_by_id(&store, &created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_id.email, "a@example.com");
        assert!(by_id.verify_password("Secret1!"));

        let by_email = store.find_by_email("a@example.com").await.unwrap();
        assert!(by_email.is_some());

        let missing = store.find_by_email("nobody@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryStore::new();

        PrincipalStore::create(&store, NewPrincipal::customer("a@example.com", "Secret1!"))
            .await
            .unwrap();

        let err = PrincipalStore::create(&store, NewPrincipal::customer("a@example.com", "Other2@"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_ticket_list_scoping() {
        let store = MemoryStore::new();
        store.insert_ticket(ticket("t1", "u1"));
        store.insert_ticket(ticket("t2", "u2"));
        store.insert_ticket(ticket("t3", "u1"));

        let all = store.list(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let owner = PrincipalId::new("u1");
        let scoped = store.list(Some(&owner)).await.unwrap();
        assert_eq!(scoped.len(), 2);
        assert!(scoped.iter().all(|t| t.is_owned_by(&owner)));
    }

    #[tokio::test]
    async fn test_answers_by_ticket() {
        let store = MemoryStore::new();
        store.insert_ticket(ticket("t1", "u1"));

        let answer = TicketAnswerStore::create(&store, NewTicketAnswer {
                ticket: TicketId::new("t1"),
                author: PrincipalId::new("agent-1"),
                body: "Have you tried turning it off and on again?".to_string(),
            })
            .await
            .unwrap();

        let listed = store.list_for_ticket(&TicketId::new("t1")).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, answer.id);

        let other = store.list_for_ticket(&TicketId::new("t2")).await.unwrap();
        assert!(other.is_empty());
    }
}
