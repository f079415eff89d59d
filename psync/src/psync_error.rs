// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
pub enum PaneSyncErrorCouldNot {
    #[error("📄 Could not read pane file: '{file_path}'")]
    ReadPaneFile { file_path: String },

    #[error("📜 Could not read script: '{script_path}'")]
    ReadScript { script_path: String },

    #[error("🧩 Could not parse script step on line {line_number}: '{line}'")]
    #[diagnostic(help(
        "Each line is one JSON object, e.g. {{\"step\":\"scroll\",\"pane\":0,\"top\":10}}"
    ))]
    ParseScriptStep { line_number: usize, line: String },

    #[error("🔍 Could not find pane {pane_index}, only {pane_count} files were opened")]
    FindPane { pane_index: usize, pane_count: usize },

    #[error("📁 Could not find or create state folder")]
    CreateStateDir,

    #[error("🪵 Could not initialize logging")]
    InitializeLogging,
}
