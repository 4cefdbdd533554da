// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `run` command.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use wicket_core::{MemoryStore, PrincipalId, Role, Ticket, TicketId};

use wicket_api::{ApiConfig, ApiServerBuilder, CookieConfig, DeploymentMode, TokenConfig};

use crate::cli::RunArgs;
use crate::error::BinResult;

/// Executes the `run` command to start the auth service.
pub async fn run(args: RunArgs) -> BinResult<()> {
    info!("Starting wicket auth service...");

    let deployment = if args.production {
        DeploymentMode::Production
    } else {
        DeploymentMode::Development
    };

    let mut config = ApiConfig::default()
        .with_host(args.host)
        .with_port(args.port)
        .with_deployment(deployment)
        .with_token(TokenConfig::new(args.token_secret).with_ttl_secs(args.token_ttl_secs));
    config.cookie = CookieConfig {
        ttl_days: args.cookie_ttl_days,
    };

    let store = Arc::new(MemoryStore::new());
    if args.seed_demo {
        seed_demo_data(&store)?;
    }

    let server = ApiServerBuilder::new()
        .config(config)
        .memory_store(store)
        .build()?;

    server.run_with_shutdown(shutdown_signal()).await?;

    Ok(())
}

/// Seeds demo principals and tickets into the in-memory store.
fn seed_demo_data(store: &MemoryStore) -> BinResult<()> {
    store.seed_principal(
        "admin",
        "admin@example.com",
        "Admin123!",
        Role::Admin,
        None,
    )?;
    store.seed_principal(
        "agent",
        "agent@example.com",
        "Agent123!",
        Role::Agent,
        None,
    )?;
    let customer = store.seed_principal(
        "customer",
        "customer@example.com",
        "Customer1!",
        Role::Customer,
        None,
    )?;

    store.insert_ticket(Ticket {
        id: TicketId::new("demo-ticket"),
        owner: PrincipalId::new(customer.id.as_str()),
        subject: "Cannot sign in from the kiosk".to_string(),
        opened_at: Utc::now(),
    });

    warn!("Demo data seeded; do not use --seed-demo outside local development");
    Ok(())
}

/// Completes when the process receives a shutdown signal.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
