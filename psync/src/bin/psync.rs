// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use clap::Parser;
use miette::Context;
use r3bl_pane_sync::{LogConfig, try_init_global_logging};
use r3bl_psync::{CLIArg, ISSUES_URL, PaneSyncErrorCouldNot, install_report_handler,
                 try_replay, try_resolve_log_file_path};
use tracing::level_filters::LevelFilter;

#[tokio::main]
async fn main() -> miette::Result<()> {
    install_report_handler(ISSUES_URL);

    // If no args are passed, the following line will fail, and help will be printed
    // thanks to `arg_required_else_help(true)` in the `CLIArg` struct.
    let cli_arg = CLIArg::parse();

    let should_log = cli_arg.global_options.enable_logging;

    if should_log {
        let log_file_path =
            try_resolve_log_file_path(cli_arg.global_options.maybe_state_dir.as_ref())?;
        try_init_global_logging(
            &LogConfig::to_file(Some(log_file_path)).with_max_level(LevelFilter::DEBUG),
        )
        .wrap_err(PaneSyncErrorCouldNot::InitializeLogging)?;
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    }

    let report = try_replay(&cli_arg).await?;
    println!("{report}");

    should_log.then(|| {
        tracing::debug!(message = "Stop logging...");
    });

    Ok(())
}
