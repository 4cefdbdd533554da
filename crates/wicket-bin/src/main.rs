// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! wicket - help-desk authentication service.
//!
//! Main binary entry point.

use clap::Parser;

use wicket_bin::cli::{Cli, Commands, RunArgs};
use wicket_bin::commands;
use wicket_bin::error::report_error_and_exit;
use wicket_bin::logging::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.log_format);

    let result = match cli.command {
        Some(Commands::Run(args)) => commands::run::run(args).await,
        Some(Commands::Version) => {
            commands::version::version();
            Ok(())
        }
        None => commands::run::run(RunArgs::parse_from(["wicket"])).await,
    };

    if let Err(e) = result {
        report_error_and_exit(e);
    }
}
