//! Video filter chain
//!
//! This module provides the filter descriptors that end up in `-vf` and the
//! chain that orders them. A chain holds at most one filter of each kind;
//! lookups go through the `FilterKind` tag rather than runtime type tests.
//! Filters render in insertion order, joined with commas. Filters that
//! render to an empty string are left out of the join.

pub mod color;
pub mod geometry;
pub mod swscale;
pub mod zscale;

pub use color::{
    ColorFilter, ColorRange, ColorSettings, ColorSpace, Scale, ffmpeg_to_zscale, zscale_to_ffmpeg,
};
pub use geometry::{Crop, Pad, Transpose, TransposeFilter};
pub use swscale::SwscaleFilter;
pub use zscale::ZscaleFilter;

use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Tag identifying a filter variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Crop,
    Pad,
    Transpose,
    Zscale,
    Swscale,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterKind::Crop => "crop",
            FilterKind::Pad => "pad",
            FilterKind::Transpose => "transpose",
            FilterKind::Zscale => "zscale",
            FilterKind::Swscale => "scale",
        };
        f.write_str(name)
    }
}

/// One element of a filter chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Crop(Crop),
    Pad(Pad),
    Transpose(TransposeFilter),
    Zscale(ZscaleFilter),
    Swscale(SwscaleFilter),
}

impl Filter {
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::Crop(_) => FilterKind::Crop,
            Filter::Pad(_) => FilterKind::Pad,
            Filter::Transpose(_) => FilterKind::Transpose,
            Filter::Zscale(_) => FilterKind::Zscale,
            Filter::Swscale(_) => FilterKind::Swscale,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Crop(x) => x.fmt(f),
            Filter::Pad(x) => x.fmt(f),
            Filter::Transpose(x) => x.fmt(f),
            Filter::Zscale(x) => x.fmt(f),
            Filter::Swscale(x) => x.fmt(f),
        }
    }
}

/// A concrete filter type that can live in a [`FilterChain`].
pub trait ChainFilter: Default + Into<Filter> {
    const KIND: FilterKind;

    fn from_filter(filter: &Filter) -> Option<&Self>;
    fn from_filter_mut(filter: &mut Filter) -> Option<&mut Self>;
}

macro_rules! chain_filter {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Filter {
            fn from(filter: $ty) -> Self {
                Filter::$variant(filter)
            }
        }

        impl ChainFilter for $ty {
            const KIND: FilterKind = FilterKind::$variant;

            fn from_filter(filter: &Filter) -> Option<&Self> {
                match filter {
                    Filter::$variant(x) => Some(x),
                    _ => None,
                }
            }

            fn from_filter_mut(filter: &mut Filter) -> Option<&mut Self> {
                match filter {
                    Filter::$variant(x) => Some(x),
                    _ => None,
                }
            }
        }
    };
}

chain_filter!(Crop, Crop);
chain_filter!(Pad, Pad);
chain_filter!(TransposeFilter, Transpose);
chain_filter!(ZscaleFilter, Zscale);
chain_filter!(SwscaleFilter, Swscale);

/// Ordered list of filters with at most one filter per kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterChain {
    filters: Vec<Filter>,
}

impl FilterChain {
    /// Creates a new empty filter chain
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    fn position(&self, kind: FilterKind) -> Option<usize> {
        self.filters.iter().position(|f| f.kind() == kind)
    }

    pub fn contains(&self, kind: FilterKind) -> bool {
        self.position(kind).is_some()
    }

    /// Returns the filter of type `F`, if the chain has one.
    pub fn find<F: ChainFilter>(&self) -> Option<&F> {
        self.filters.iter().find_map(F::from_filter)
    }

    pub fn find_mut<F: ChainFilter>(&mut self) -> Option<&mut F> {
        self.filters.iter_mut().find_map(F::from_filter_mut)
    }

    /// Returns the filter of type `F`, appending a default one if absent.
    pub fn find_or_create<F: ChainFilter>(&mut self) -> &mut F {
        let index = match self.position(F::KIND) {
            Some(index) => index,
            None => {
                self.filters.push(F::default().into());
                self.filters.len() - 1
            }
        };
        match F::from_filter_mut(&mut self.filters[index]) {
            Some(filter) => filter,
            None => unreachable!("filter at {} has kind {}", index, F::KIND),
        }
    }

    /// Replaces the filter of the same kind in place, or appends it.
    pub fn replace(&mut self, filter: impl Into<Filter>) {
        let filter = filter.into();
        match self.position(filter.kind()) {
            Some(index) => self.filters[index] = filter,
            None => self.filters.push(filter),
        }
    }

    /// Places `filter` immediately before the filter of kind `anchor`.
    ///
    /// Any existing filter of the same kind is removed first. Without an
    /// anchor in the chain the filter is appended.
    pub fn insert_before(&mut self, filter: impl Into<Filter>, anchor: FilterKind) -> CoreResult<()> {
        let filter = filter.into();
        self.remove_position(filter.kind())?;
        match self.position(anchor) {
            Some(index) => self.filters.insert(index, filter),
            None => self.filters.push(filter),
        }
        Ok(())
    }

    /// Puts `filter` where the filter of `kind` was, or appends it.
    ///
    /// Unlike [`replace`](Self::replace), the new filter may be of a
    /// different kind than the one it takes the place of.
    pub fn substitute(&mut self, kind: FilterKind, filter: impl Into<Filter>) -> CoreResult<()> {
        let filter = filter.into();
        if filter.kind() != kind && self.contains(filter.kind()) {
            return Err(CoreError::DuplicateFilter(filter.kind()));
        }
        match self.remove_position(kind)? {
            Some(index) => self.filters.insert(index, filter),
            None => self.filters.push(filter),
        }
        Ok(())
    }

    fn remove_position(&mut self, kind: FilterKind) -> CoreResult<Option<usize>> {
        let count = self.filters.iter().filter(|f| f.kind() == kind).count();
        if count > 1 {
            return Err(CoreError::DuplicateFilter(kind));
        }
        let index = self.position(kind);
        if let Some(index) = index {
            self.filters.remove(index);
        }
        Ok(index)
    }

    /// Removes and returns the filter of the given kind.
    ///
    /// Fails with `DuplicateFilter` if the chain somehow holds more than one.
    pub fn remove(&mut self, kind: FilterKind) -> CoreResult<Option<Filter>> {
        let count = self.filters.iter().filter(|f| f.kind() == kind).count();
        if count > 1 {
            return Err(CoreError::DuplicateFilter(kind));
        }
        Ok(self.position(kind).map(|index| self.filters.remove(index)))
    }

    /// Builds the chain into a single filter string
    ///
    /// Returns `None` when every filter renders empty.
    pub fn build(&self) -> Option<String> {
        let rendered: Vec<String> = self
            .filters
            .iter()
            .map(ToString::to_string)
            .filter(|s| !s.is_empty())
            .collect();
        if rendered.is_empty() {
            None
        } else {
            Some(rendered.join(","))
        }
    }
}

/// Helper to build `name=a:b:key=value` filter expressions
#[derive(Debug, Default)]
pub struct FilterParams {
    params: Vec<String>,
}

impl FilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a positional value
    pub fn positional(mut self, value: impl fmt::Display) -> Self {
        self.params.push(value.to_string());
        self
    }

    /// Adds a `key=value` parameter
    pub fn param(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.params.push(format!("{key}={value}"));
        self
    }

    /// Adds a `key=value` parameter when the value is present
    pub fn param_opt<V: fmt::Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Builds the parameters into a colon-separated expression
    pub fn build(self, name: &str) -> String {
        format!("{}={}", name, self.params.join(":"))
    }
}

/// `'min(iw,N)'` style wrapper used by downscale-only scaling.
pub(crate) fn min_expr(input: &str, value: i32) -> String {
    format!("'min({input},{value})'")
}

/// Ordered extra parameters for the color filters.
pub(crate) fn set_or_remove(params: &mut Vec<(String, String)>, key: &str, value: Option<String>) {
    let existing = params.iter().position(|(k, _)| k == key);
    match (existing, value) {
        (Some(index), Some(value)) => params[index].1 = value,
        (None, Some(value)) => params.push((key.to_string(), value)),
        (Some(index), None) => {
            params.remove(index);
        }
        (None, None) => {}
    }
}
