// ============================================================================
// ffargs-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger initialization for the CLI
//
// The library logs through the `log` facade; the binary decides where the
// records go. Output goes to stderr so stdout carries only the rendered
// arguments.
//
// USAGE:
// - default: warnings only
// - -v: info, -vv and above: debug
// - RUST_LOG, when set, replaces the level chosen by the flags

use crate::config::DEFAULT_LOG_LEVEL;
use env_logger::{Env, Target};

/// Maps the `-v` count to a level filter string.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => DEFAULT_LOG_LEVEL,
        1 => "info",
        _ => "debug",
    }
}

/// Installs the global logger. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(verbose: u8) {
    let env = Env::default().default_filter_or(level_for_verbosity(verbose));
    let _ = env_logger::Builder::from_env(env)
        .target(Target::Stderr)
        .format_timestamp(None)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(7), "debug");
    }
}
