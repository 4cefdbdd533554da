// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # wicket-core
//!
//! Domain model and collaborator interfaces for the wicket help-desk
//! authentication service.
//!
//! This crate defines:
//!
//! - Principals (users) with roles and password-change tracking
//! - Tickets and ticket answers with owner references
//! - Store traits for principal/ticket/answer lookup
//! - An in-memory store for tests and the demo runtime
//! - Credential format policy (email shape, password complexity)

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod memory;
pub mod policy;
pub mod principal;
pub mod store;
pub mod ticket;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use principal::{NewPrincipal, Principal, PrincipalId, Role};
pub use store::{PrincipalStore, TicketAnswerStore, TicketStore};
pub use ticket::{AnswerId, NewTicketAnswer, Ticket, TicketAnswer, TicketId};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
