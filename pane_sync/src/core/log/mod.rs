// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod log_config;
pub mod log_layers;

// Re-export.
pub use log_config::*;
pub use log_layers::*;
