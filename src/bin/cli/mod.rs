//! CLI Module Organization
//!
//! - args: CLI argument structures
//! - commands: one handler per subcommand
//! - config_layer: configuration layer management and merging
//! - console_ui: terminal implementation of the host UI

pub mod args;
pub mod commands;
pub mod config_layer;
pub mod console_ui;

// Re-export commonly used items for convenience
pub use args::*;
pub use commands::*;
