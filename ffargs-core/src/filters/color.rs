//! Scale, color range and color space values shared by both color filters
//!
//! ffmpeg's color metadata flags, the zscale filter and the swscale `scale`
//! filter each name color matrices differently. `ColorSpace` is the single
//! logical value; each filter translates it into its own vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Target frame size.
///
/// A negative dimension means "derive from the other one, keeping the aspect
/// ratio" (`-1`), rounded to a multiple of `n` for `-n`, as ffmpeg does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    pub width: i32,
    pub height: i32,
    /// Never enlarge: each non-negative dimension becomes `min(input, value)`.
    #[serde(default)]
    pub downscale_only: bool,
}

impl Scale {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            downscale_only: false,
        }
    }

    pub fn downscale_only(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            downscale_only: true,
        }
    }
}

/// Full (0-255) or limited (16-235) range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRange {
    Full,
    Limited,
}

impl ColorRange {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorRange::Full => "full",
            ColorRange::Limited => "limited",
        }
    }

    pub fn from_full(full: Option<bool>) -> Option<ColorRange> {
        full.map(|full| if full { ColorRange::Full } else { ColorRange::Limited })
    }

    pub fn is_full(range: Option<ColorRange>) -> Option<bool> {
        range.map(|r| r == ColorRange::Full)
    }
}

impl FromStr for ColorRange {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "full" => Ok(ColorRange::Full),
            "limited" => Ok(ColorRange::Limited),
            other => Err(CoreError::InvalidColorRange(other.to_string())),
        }
    }
}

/// A color matrix known to every filter vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    Bt709,
    /// BT.470BG, i.e. BT.601-6 625
    Bt470bg,
    /// SMPTE-170M, i.e. BT.601-6 525
    Smpte170m,
    /// BT.2020 with non-constant luminance
    Bt2020nc,
}

/// (value, ffmpeg name, zscale name, swscale name)
const COLOR_SPACE_TABLE: [(ColorSpace, &str, &str, &str); 4] = [
    (ColorSpace::Bt709, "bt709", "709", "bt709"),
    (ColorSpace::Bt470bg, "bt470bg", "470bg", "bt470"),
    (ColorSpace::Smpte170m, "smpte170m", "170m", "smpte170m"),
    (ColorSpace::Bt2020nc, "bt2020nc", "2020_ncl", "bt2020"),
];

impl ColorSpace {
    fn row(self) -> (ColorSpace, &'static str, &'static str, &'static str) {
        match COLOR_SPACE_TABLE.iter().find(|row| row.0 == self) {
            Some(row) => *row,
            None => unreachable!("every color space has a table row"),
        }
    }

    /// Name used by `-colorspace`, `-color_primaries` and `-color_trc`.
    pub fn ffmpeg_name(self) -> &'static str {
        self.row().1
    }

    /// Name used by zscale's `matrix`/`matrixin`.
    pub fn zscale_name(self) -> &'static str {
        self.row().2
    }

    /// Name used by scale's `in_color_matrix`/`out_color_matrix`.
    pub fn swscale_name(self) -> &'static str {
        self.row().3
    }

    pub fn from_ffmpeg_name(name: &str) -> CoreResult<Self> {
        COLOR_SPACE_TABLE
            .iter()
            .find(|row| row.1 == name)
            .map(|row| row.0)
            .ok_or_else(|| CoreError::InvalidColorSpace(name.to_string()))
    }

    pub fn from_zscale_name(name: &str) -> CoreResult<Self> {
        COLOR_SPACE_TABLE
            .iter()
            .find(|row| row.2 == name)
            .map(|row| row.0)
            .ok_or_else(|| CoreError::InvalidColorSpace(name.to_string()))
    }

    pub fn from_swscale_name(name: &str) -> CoreResult<Self> {
        COLOR_SPACE_TABLE
            .iter()
            .find(|row| row.3 == name)
            .map(|row| row.0)
            .ok_or_else(|| CoreError::InvalidColorSpace(name.to_string()))
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ffmpeg_name())
    }
}

impl FromStr for ColorSpace {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::from_ffmpeg_name(s)
    }
}

/// Logical color-conversion state shared by both color filter variants.
///
/// Every field is tri-state: `None` means the parameter is not emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorSettings {
    pub scale: Option<Scale>,
    pub src_range: Option<ColorRange>,
    pub dst_range: Option<ColorRange>,
    pub src_matrix: Option<ColorSpace>,
    pub dst_matrix: Option<ColorSpace>,
}

impl ColorSettings {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Common surface of the zscale and swscale filters.
pub trait ColorFilter {
    fn settings(&self) -> &ColorSettings;
    fn settings_mut(&mut self) -> &mut ColorSettings;

    /// Raw parameters set outside the typed fields, in insertion order.
    fn extra_params(&self) -> &[(String, String)];
}

/// Translates an ffmpeg color space name into zscale's name for it.
pub fn ffmpeg_to_zscale(name: &str) -> CoreResult<&'static str> {
    ColorSpace::from_ffmpeg_name(name).map(ColorSpace::zscale_name)
}

/// Translates a zscale matrix name back into ffmpeg's name for it.
pub fn zscale_to_ffmpeg(name: &str) -> CoreResult<&'static str> {
    ColorSpace::from_zscale_name(name).map(ColorSpace::ffmpeg_name)
}
