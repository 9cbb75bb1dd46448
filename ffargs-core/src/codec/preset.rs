//! x264/x265 speed presets
//!
//! Presets form a strict ladder from the fastest (`ultrafast`) to the slowest
//! (`placebo`). See <https://trac.ffmpeg.org/wiki/Encode/H.264>.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Encoder speed preset shared by libx264 and libx265.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VcPreset {
    Ultrafast,
    Superfast,
    Veryfast,
    Faster,
    Fast,
    Medium,
    Slow,
    Slower,
    Veryslow,
    Placebo,
}

impl VcPreset {
    /// All presets, fastest first.
    pub const ALL: [VcPreset; 10] = [
        VcPreset::Ultrafast,
        VcPreset::Superfast,
        VcPreset::Veryfast,
        VcPreset::Faster,
        VcPreset::Fast,
        VcPreset::Medium,
        VcPreset::Slow,
        VcPreset::Slower,
        VcPreset::Veryslow,
        VcPreset::Placebo,
    ];

    pub const FASTEST: VcPreset = VcPreset::Ultrafast;
    pub const SLOWEST: VcPreset = VcPreset::Placebo;

    /// The name ffmpeg expects after `-preset`.
    pub fn as_str(self) -> &'static str {
        match self {
            VcPreset::Ultrafast => "ultrafast",
            VcPreset::Superfast => "superfast",
            VcPreset::Veryfast => "veryfast",
            VcPreset::Faster => "faster",
            VcPreset::Fast => "fast",
            VcPreset::Medium => "medium",
            VcPreset::Slow => "slow",
            VcPreset::Slower => "slower",
            VcPreset::Veryslow => "veryslow",
            VcPreset::Placebo => "placebo",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// The preset one step faster than this one.
    ///
    /// Fails with `PresetOutOfRange` for the fastest preset.
    pub fn faster(self) -> CoreResult<VcPreset> {
        match self.index() {
            0 => Err(CoreError::PresetOutOfRange(self.to_string())),
            i => Ok(Self::ALL[i - 1]),
        }
    }

    /// The preset one step slower, or `None` for the slowest.
    pub fn slower(self) -> Option<VcPreset> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Looks up `name` and returns the preset one step faster.
    ///
    /// Unknown names fail with `InvalidPreset`, the fastest preset with
    /// `PresetOutOfRange`.
    pub fn faster_than(name: &str) -> CoreResult<VcPreset> {
        name.parse::<VcPreset>()?.faster()
    }
}

impl fmt::Display for VcPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VcPreset {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CoreError::InvalidPreset(s.to_string()))
    }
}
