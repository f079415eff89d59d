// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod position;
pub mod range;

// Re-export.
pub use position::*;
pub use range::*;
