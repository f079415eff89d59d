// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use clap::{Args, Parser};
use r3bl_pane_sync::SyncMode;

/// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
#[derive(Debug, Parser)]
#[command(bin_name = "psync")]
#[command(about = "🪞 Replay scroll and selection sync across panes")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(true))]
/// More info: <https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template>
#[command(
    help_template = "{about}\nVersion: {bin} {version} 💻\n\nProvide file paths, separated by spaces, to open side by side, and a script to replay.\nUSAGE 📓:\n  psync [\x1b[32mfile paths\x1b[0m] --script [\x1b[32mscript path\x1b[0m] [\x1b[34moptions\x1b[0m]\n\n[options]\n{options}"
)]
pub struct CLIArg {
    #[arg(name = "file paths", required = true)]
    pub file_paths: Vec<String>,

    #[arg(
        long,
        short = 's',
        help = "JSON lines file with the steps to replay, one per line."
    )]
    pub script: String,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long = "mode",
        short = 'm',
        help = "Start in this sync mode (off, normal, offset), and remember it. Without this the saved mode is used."
    )]
    pub maybe_mode: Option<SyncMode>,

    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file named `log.txt` for debugging."
    )]
    pub enable_logging: bool,

    #[arg(
        global = true,
        long,
        short = 'd',
        default_value_t = 10,
        help = "Milliseconds of quiet after a scroll before the other panes follow."
    )]
    pub debounce_ms: u64,

    #[arg(
        global = true,
        long = "state-dir",
        help = "Folder to keep the saved sync mode in. Defaults to the platform config folder."
    )]
    pub maybe_state_dir: Option<String>,
}
