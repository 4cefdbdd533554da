// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `version` command.

/// Prints version information for all workspace components.
pub fn version() {
    println!("wicket v{}", crate::VERSION);
    println!("  wicket-core v{}", wicket_core::VERSION);
    println!("  wicket-api  v{}", wicket_api::VERSION);
}
