//! Input source tokens
//!
//! A source is one of three things:
//!
//! - a glob pattern (contains `*`), read through ffmpeg's image2 demuxer
//! - a directory of numbered frames, turned into a printf-style pattern
//! - anything else, passed to `-i` unchanged
//!
//! Probing a directory is the only filesystem access in the crate and sits
//! behind [`FramePatternResolver`] so rendering can be tested without disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CoreError, CoreResult};

static FRAME_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<prefix>.*?)(?P<number>\d+)(?P<suffix>\D*)$")
        .expect("frame name regex should compile")
});

/// Turns a frame directory into a sequential file pattern.
pub trait FramePatternResolver {
    /// Returns the pattern for `source` if it is a frame directory, or
    /// `None` if it is not a directory at all.
    fn frame_pattern(&self, source: &Path) -> CoreResult<Option<PathBuf>>;
}

/// Resolver that inspects the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFramePatternResolver;

impl FramePatternResolver for FsFramePatternResolver {
    fn frame_pattern(&self, source: &Path) -> CoreResult<Option<PathBuf>> {
        if !source.is_dir() {
            return Ok(None);
        }
        directory_to_pattern(source).map(Some)
    }
}

/// Resolver that never treats a source as a directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFramePatterns;

impl FramePatternResolver for NoFramePatterns {
    fn frame_pattern(&self, _source: &Path) -> CoreResult<Option<PathBuf>> {
        Ok(None)
    }
}

/// Collects numbered frame files in `dir` into a single `%0Nd` pattern.
///
/// Hidden files are ignored. Every other file must belong to the same
/// `<prefix><number><suffix>` family.
pub fn directory_to_pattern(dir: &Path) -> CoreResult<PathBuf> {
    // (prefix, suffix) -> digit strings
    let mut families: BTreeMap<(String, String), Vec<String>> = BTreeMap::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') {
            continue;
        }
        let caps = FRAME_NAME_RE.captures(&name).ok_or_else(|| {
            CoreError::FrameSequence(format!("'{}' is not a numbered frame file", name))
        })?;
        families
            .entry((caps["prefix"].to_string(), caps["suffix"].to_string()))
            .or_default()
            .push(caps["number"].to_string());
    }

    if families.len() > 1 {
        return Err(CoreError::FrameSequence(format!(
            "{} contains {} different frame file families",
            dir.display(),
            families.len()
        )));
    }
    let Some(((prefix, suffix), numbers)) = families.into_iter().next() else {
        return Err(CoreError::FrameSequence(format!(
            "{} contains no frame files",
            dir.display()
        )));
    };

    let placeholder = number_placeholder(&numbers).ok_or_else(|| {
        CoreError::FrameSequence(format!(
            "inconsistent zero padding of '{}' frames in {}",
            prefix,
            dir.display()
        ))
    })?;

    Ok(dir.join(format!("{prefix}{placeholder}{suffix}")))
}

fn number_placeholder(numbers: &[String]) -> Option<String> {
    let width = numbers.first()?.len();
    if numbers.iter().all(|n| n.len() == width) {
        if width > 1 {
            return Some(format!("%0{width}d"));
        }
        return Some("%d".to_string());
    }
    if numbers.iter().any(|n| n.len() > 1 && n.starts_with('0')) {
        return None;
    }
    Some("%d".to_string())
}

/// Tokens that select the input, starting with the input marker flags.
pub fn input_args(source: &Path, resolver: &dyn FramePatternResolver) -> CoreResult<Vec<String>> {
    let text = source.to_string_lossy();
    if text.contains('*') {
        debug!("Input {} is a glob pattern", text);
        return Ok(vec![
            "-f".to_string(),
            "image2".to_string(),
            "-pattern_type".to_string(),
            "glob".to_string(),
            "-i".to_string(),
            text.into_owned(),
        ]);
    }

    let input = match resolver.frame_pattern(source)? {
        Some(pattern) => {
            debug!("Input {} is a frame directory: {}", text, pattern.display());
            pattern.to_string_lossy().into_owned()
        }
        None => {
            debug!("Input {} is a plain file", text);
            text.into_owned()
        }
    };
    Ok(vec!["-i".to_string(), input])
}
