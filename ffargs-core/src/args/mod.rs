//! Argument tokens and flag/value pairs
//!
//! Generated arguments come in two shapes: bare tokens (the program name,
//! input markers, the output path) and `(flag, value)` pairs. Only pairs take
//! part in override substitution.

pub mod overrides;
pub mod subset;

pub use overrides::{CustomArgs, OverrideMap, merge_overrides, substitute_overrides};
pub use subset::{ArgSubset, Pairs};

use std::fmt;

/// Returns true if the token is a flag (starts with `-`).
pub fn is_flag(token: &str) -> bool {
    token.starts_with('-')
}

/// Legacy flag spellings and the canonical flag each one maps to.
const FLAG_SYNONYMS: &[(&str, &str)] = &[
    ("-vcodec", "-c:v"),
    ("-codec:v", "-c:v"),
    ("-acodec", "-c:a"),
    ("-codec:a", "-c:a"),
];

/// Maps a legacy codec flag spelling to its canonical form.
///
/// Flags without a known synonym are returned unchanged.
pub fn canonical_flag(flag: &str) -> &str {
    FLAG_SYNONYMS
        .iter()
        .find(|(legacy, _)| *legacy == flag)
        .map_or(flag, |(_, canonical)| canonical)
}

/// A flag with an optional value, e.g. `-c:v libx265` or `-an`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgPair {
    pub flag: String,
    pub value: Option<String>,
}

impl ArgPair {
    pub fn new(flag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            value: Some(value.into()),
        }
    }

    /// A pair that carries no value.
    pub fn flag_only(flag: impl Into<String>) -> Self {
        Self {
            flag: flag.into(),
            value: None,
        }
    }

    /// Returns the same pair with its flag canonicalized.
    pub fn canonicalized(mut self) -> Self {
        let canonical = canonical_flag(&self.flag);
        if canonical != self.flag {
            log::debug!("Canonicalizing flag {} as {}", self.flag, canonical);
            self.flag = canonical.to_string();
        }
        self
    }

    /// Appends the flag and, if present, the value to `out`.
    pub fn push_into(&self, out: &mut Vec<String>) {
        out.push(self.flag.clone());
        if let Some(value) = &self.value {
            out.push(value.clone());
        }
    }
}

impl fmt::Display for ArgPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} {}", self.flag, value),
            None => write!(f, "{}", self.flag),
        }
    }
}

/// A single element of a generated argument sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgToken {
    /// Emitted as-is, never overridden.
    Bare(String),
    /// Subject to override substitution.
    Pair(ArgPair),
}

impl ArgToken {
    pub fn bare(token: impl Into<String>) -> Self {
        ArgToken::Bare(token.into())
    }

    pub fn pair(flag: impl Into<String>, value: impl Into<String>) -> Self {
        ArgToken::Pair(ArgPair::new(flag, value))
    }
}

impl From<ArgPair> for ArgToken {
    fn from(pair: ArgPair) -> Self {
        ArgToken::Pair(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_flag() {
        assert!(is_flag("-i"));
        assert!(is_flag("-c:v"));
        assert!(!is_flag("copy"));
        assert!(!is_flag(""));
    }

    #[test]
    fn test_canonical_flag() {
        assert_eq!(canonical_flag("-vcodec"), "-c:v");
        assert_eq!(canonical_flag("-codec:v"), "-c:v");
        assert_eq!(canonical_flag("-acodec"), "-c:a");
        assert_eq!(canonical_flag("-codec:a"), "-c:a");
        assert_eq!(canonical_flag("-c:v"), "-c:v");
        assert_eq!(canonical_flag("-preset"), "-preset");
    }

    #[test]
    fn test_pair_push_into() {
        let mut out = Vec::new();
        ArgPair::new("-t", "10").push_into(&mut out);
        ArgPair::flag_only("-an").push_into(&mut out);
        assert_eq!(out, vec!["-t", "10", "-an"]);
    }

    #[test]
    fn test_pair_display() {
        assert_eq!(ArgPair::new("-ss", "2").to_string(), "-ss 2");
        assert_eq!(ArgPair::flag_only("-vn").to_string(), "-vn");
    }
}
