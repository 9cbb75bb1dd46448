//! Override buckets and substitution
//!
//! A command generates the arguments it knows about. Callers can replace any
//! of them, or add exotic ones, through four override buckets. Overrides are
//! applied per rendering phase:
//!
//! - before the input: the `before_input` bucket alone
//! - after the input: `after_input`, then `video`, then `audio`
//!
//! When buckets in one phase define the same flag, the later bucket wins.

use std::collections::HashSet;

use log::debug;

use super::{ArgPair, ArgSubset, ArgToken};
use crate::error::CoreResult;

/// The four caller-editable override buckets of a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomArgs {
    /// Placed before the input marker. Affects how the input is read.
    pub before_input: ArgSubset,
    /// General output arguments.
    pub after_input: ArgSubset,
    /// Video output arguments.
    pub video: ArgSubset,
    /// Audio output arguments.
    pub audio: ArgSubset,
}

impl CustomArgs {
    /// Resolved overrides for the pre-input phase.
    pub fn before_input_overrides(&self) -> CoreResult<OverrideMap> {
        merge_overrides(&[&self.before_input])
    }

    /// Resolved overrides for the post-input phase, in precedence order
    /// general < video < audio.
    pub fn after_input_overrides(&self) -> CoreResult<OverrideMap> {
        merge_overrides(&[&self.after_input, &self.video, &self.audio])
    }
}

/// Insertion-ordered map from flag to optional value.
///
/// A key that is set again keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideMap {
    entries: Vec<(String, Option<String>)>,
}

impl OverrideMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value for `flag`, returning the old value.
    pub fn insert(&mut self, flag: String, value: Option<String>) -> Option<Option<String>> {
        match self.entries.iter_mut().find(|(k, _)| *k == flag) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((flag, value));
                None
            }
        }
    }

    pub fn get(&self, flag: &str) -> Option<&Option<String>> {
        self.entries.iter().find(|(k, _)| k == flag).map(|(_, v)| v)
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.get(flag).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

/// Merges override buckets into one map.
///
/// Buckets are applied in the given order, so a flag defined in a later
/// bucket replaces the same flag from an earlier one. Flags are
/// canonicalized, so `-vcodec` and `-c:v` count as the same key.
pub fn merge_overrides(buckets: &[&ArgSubset]) -> CoreResult<OverrideMap> {
    let mut merged = OverrideMap::new();
    for bucket in buckets {
        for pair in bucket.pairs() {
            let ArgPair { flag, value } = pair?.canonicalized();
            if let Some(previous) = merged.insert(flag.clone(), value.clone()) {
                debug!(
                    "Overriding [{} {}] with [{} {}]",
                    flag,
                    previous.as_deref().unwrap_or(""),
                    flag,
                    value.as_deref().unwrap_or("")
                );
            }
        }
    }
    Ok(merged)
}

/// Renders known arguments, replacing overridden pairs.
///
/// Bare tokens pass through unchanged. A pair whose flag is in `overrides`
/// is emitted with the override's value instead (flag only if the override
/// has none). Overrides never matched by a known pair are appended at the
/// end in map order.
pub fn substitute_overrides<I>(known: I, overrides: &OverrideMap) -> Vec<String>
where
    I: IntoIterator<Item = ArgToken>,
{
    let mut out = Vec::new();
    let mut emitted: HashSet<String> = HashSet::new();

    for token in known {
        match token {
            ArgToken::Bare(token) => out.push(token),
            ArgToken::Pair(pair) => {
                let pair = pair.canonicalized();
                match overrides.get(&pair.flag) {
                    Some(value) => {
                        debug!(
                            "Overriding [{}] with [{} {}]",
                            pair,
                            pair.flag,
                            value.as_deref().unwrap_or("")
                        );
                        ArgPair {
                            flag: pair.flag.clone(),
                            value: value.clone(),
                        }
                        .push_into(&mut out);
                    }
                    None => pair.push_into(&mut out),
                }
                emitted.insert(pair.flag);
            }
        }
    }

    for (flag, value) in overrides.iter() {
        if !emitted.contains(flag) {
            out.push(flag.to_string());
            if let Some(value) = value {
                out.push(value.to_string());
            }
        }
    }

    out
}
