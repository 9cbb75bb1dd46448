//! Crop, pad and transpose filters

use std::fmt;

use serde::{Deserialize, Serialize};

/// `crop=w:h:x:y`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crop {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Crop {
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "crop={}:{}:{}:{}",
            self.width, self.height, self.left, self.top
        )
    }
}

/// `pad=` filter. Fields are expressions, so `"iw+20"` is as valid as `"1920"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pad {
    pub left: String,
    pub top: String,
    pub width: String,
    pub height: String,
    pub color: String,
}

impl Default for Pad {
    fn default() -> Self {
        Self {
            left: "0".to_string(),
            top: "0".to_string(),
            width: "0".to_string(),
            height: "0".to_string(),
            color: "black".to_string(),
        }
    }
}

impl Pad {
    pub fn new(
        left: impl ToString,
        top: impl ToString,
        width: impl ToString,
        height: impl ToString,
    ) -> Self {
        Self {
            left: left.to_string(),
            top: top.to_string(),
            width: width.to_string(),
            height: height.to_string(),
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

impl fmt::Display for Pad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pad=width={}:height={}:x={}:y={}:color={}",
            self.width, self.height, self.left, self.top, self.color
        )
    }
}

/// Rotation and flip, numbered as the `transpose` filter expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transpose {
    CounterClockwiseVflip = 0,
    #[default]
    Clockwise = 1,
    CounterClockwise = 2,
    ClockwiseVflip = 3,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransposeFilter {
    pub kind: Transpose,
}

impl TransposeFilter {
    pub fn new(kind: Transpose) -> Self {
        Self { kind }
    }
}

impl fmt::Display for TransposeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transpose={}", self.kind as u8)
    }
}
