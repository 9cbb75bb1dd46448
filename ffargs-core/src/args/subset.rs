//! Free-form argument subsets
//!
//! An `ArgSubset` is a small ordered list of tokens that a caller can edit
//! directly or set from a shell-style string. It is the storage behind the
//! override buckets of a command.

use std::fmt;
use std::str::FromStr;
use std::slice;

use super::{ArgPair, is_flag};
use crate::error::{CoreError, CoreResult};

/// Ordered list of free-form argument tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgSubset {
    tokens: Vec<String>,
}

impl ArgSubset {
    /// Creates an empty subset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Mutable access to the underlying token list.
    pub fn tokens_mut(&mut self) -> &mut Vec<String> {
        &mut self.tokens
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    pub fn extend<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokens.extend(tokens.into_iter().map(Into::into));
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Replaces all tokens with the shell-style split of `s`.
    ///
    /// Quoted substrings become single tokens: `-metadata 'title=A B'` gives
    /// two tokens.
    pub fn set_from_string(&mut self, s: &str) -> CoreResult<()> {
        self.tokens =
            shell_words::split(s).map_err(|e| CoreError::ArgumentStringParse(e.to_string()))?;
        Ok(())
    }

    /// Joins the tokens, quoting any token that needs it for a shell.
    pub fn to_shell_string(&self) -> String {
        shell_words::join(&self.tokens)
    }

    /// Iterates over the tokens as `(flag, value)` pairs.
    ///
    /// A flag followed by another flag (or by the end of the list) yields a
    /// pair without a value. A value without a preceding flag yields
    /// `CoreError::InvalidArgumentFormat` and ends the iteration.
    pub fn pairs(&self) -> Pairs<'_> {
        Pairs {
            tokens: self.tokens.iter(),
            pending: None,
            failed: false,
        }
    }
}

impl fmt::Display for ArgSubset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell_string())
    }
}

impl FromStr for ArgSubset {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        let mut subset = Self::new();
        subset.set_from_string(s)?;
        Ok(subset)
    }
}

impl<S: Into<String>> FromIterator<S> for ArgSubset {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Lazy `(flag, value)` view over an [`ArgSubset`].
#[derive(Debug, Clone)]
pub struct Pairs<'a> {
    tokens: slice::Iter<'a, String>,
    pending: Option<&'a str>,
    failed: bool,
}

impl Iterator for Pairs<'_> {
    type Item = CoreResult<ArgPair>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            match self.tokens.next() {
                Some(token) if is_flag(token) => {
                    if let Some(flag) = self.pending.replace(token) {
                        return Some(Ok(ArgPair::flag_only(flag)));
                    }
                }
                Some(token) => match self.pending.take() {
                    Some(flag) => return Some(Ok(ArgPair::new(flag, token.as_str()))),
                    None => {
                        self.failed = true;
                        return Some(Err(CoreError::InvalidArgumentFormat(token.clone())));
                    }
                },
                None => return self.pending.take().map(|flag| Ok(ArgPair::flag_only(flag))),
            }
        }
    }
}
