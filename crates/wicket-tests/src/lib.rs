// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # wicket-tests
//!
//! Workspace integration tests for the wicket auth service, plus the
//! shared fixtures they are built on.
//!
//! The actual test suites live in `tests/`:
//!
//! - `integration_auth`: session authentication and the sign-in/sign-up
//!   flows
//! - `integration_guard`: route guarding and the owner-scope rewrite

pub mod common;
