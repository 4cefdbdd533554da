// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! - `run`: start the auth service (default)
//! - `version`: show version information

use std::net::IpAddr;

use clap::{Parser, Subcommand, ValueEnum};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// wicket - authentication service for the help-desk ticketing application.
#[derive(Parser, Debug)]
#[command(
    name = "wicket",
    author = "Sylvex <contact@sylvex.io>",
    version = wicket_core::VERSION,
    about = "Help-desk authentication and route guarding service",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        default_value = "info",
        env = "WICKET_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json, compact)
    #[arg(long, default_value = "text", env = "WICKET_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Log output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for log aggregation.
    Json,
    /// Minimal compact output.
    Compact,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands for the wicket CLI.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the auth service
    ///
    /// This is the default command when no subcommand is specified.
    Run(RunArgs),

    /// Show detailed version information
    Version,
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `run` command.
///
/// Also parsed standalone when the binary is invoked with no subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Host address to bind
    #[arg(long, default_value = "0.0.0.0", env = "WICKET_HOST")]
    pub host: IpAddr,

    /// Port to bind
    #[arg(short, long, default_value_t = 8080, env = "WICKET_PORT")]
    pub port: u16,

    /// Secret used to sign session tokens
    #[arg(long, env = "WICKET_TOKEN_SECRET", hide_env_values = true)]
    pub token_secret: String,

    /// Token lifetime in seconds
    #[arg(long, default_value_t = 86400, env = "WICKET_TOKEN_TTL_SECS")]
    pub token_ttl_secs: i64,

    /// Session cookie lifetime in days
    #[arg(long, default_value_t = 7, env = "WICKET_COOKIE_TTL_DAYS")]
    pub cookie_ttl_days: i64,

    /// Run in production mode (HTTPS-only session cookies)
    #[arg(long, env = "WICKET_PRODUCTION")]
    pub production: bool,

    /// Seed the in-memory store with demo principals and tickets
    #[arg(long)]
    pub seed_demo: bool,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_run_command() {
        let cli = Cli::try_parse_from([
            "wicket",
            "run",
            "--token-secret",
            "test-secret-key-that-is-long-enough",
            "--port",
            "9000",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Run(args)) => {
                assert_eq!(args.port, 9000);
                assert!(!args.production);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["wicket", "version"]).unwrap();
        assert_eq!(cli.log_level, "info");
        assert_eq!(cli.log_format, LogFormat::Text);
    }
}
