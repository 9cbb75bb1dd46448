// ffargs-cli/src/lib.rs
//
// Library portion of the ffargs CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, PixfmtArgs, RenderArgs};
pub use commands::pixfmt::run_pixfmt;
pub use commands::render::run_render;
