// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API handlers for all endpoints.
//!
//! - [`auth`]: sign-in / sign-up / sign-out / current principal
//! - [`users`]: principal lookup
//! - [`tickets`]: guarded ticket reads
//! - [`answers`]: guarded answer reads and creation
//! - [`health`]: health check endpoints

mod answers;
mod auth;
mod health;
mod tickets;
mod users;

pub use answers::*;
pub use auth::*;
pub use health::*;
pub use tickets::*;
pub use users::*;
