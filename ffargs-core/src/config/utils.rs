//! Configuration utility functions
//!
//! Helpers for reading configuration values from environment variables.

/// Get a string value from an environment variable or use the default
pub fn get_env_string(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

/// Get a boolean value from an environment variable or use the default
///
/// Accepts `true`/`1` and `false`/`0`, case-insensitively. Anything else
/// falls back to the default.
pub fn get_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(val) => parse_bool(&val).unwrap_or(default),
        Err(_) => default,
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
