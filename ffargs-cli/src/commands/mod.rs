//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `render` command.
/// This command prints the ffmpeg arguments for one job.
pub mod render;

/// Module containing the implementation of the `pixfmt` command.
pub mod pixfmt;
