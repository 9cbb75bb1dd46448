// ffargs-cli/src/config.rs
//
// Defines default configuration constants for the `ffargs-cli` application.
// Builder defaults (program name, filter mode) live in ffargs-core and are
// read from the environment there.

/// Log level used when neither -v nor RUST_LOG is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Exit code for any failure.
pub const EXIT_FAILURE: i32 = 1;
