// ============================================================================
// ffargs-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom Error Types for ffargs-core
//
// This module defines the error taxonomy for argument composition. Errors
// are raised where the problem is detected: while splitting argument strings,
// while translating enumerated names, while rendering codec arguments, and at
// final render time for missing output or codecs.
//
// KEY COMPONENTS:
// - CoreError: Main error enum
// - CoreResult: Type alias for Result with CoreError

use crate::filters::FilterKind;
use thiserror::Error;

/// Custom error type for ffargs-core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    // ---- Argument strings ----
    /// A bare value appeared with no flag in front of it.
    #[error("Invalid argument format: value '{0}' has no preceding flag")]
    InvalidArgumentFormat(String),

    #[error("Failed to split argument string: {0}")]
    ArgumentStringParse(String),

    // ---- Required fields ----
    #[error("Output file not specified")]
    OutputNotSpecified,

    #[error("Input file not specified")]
    InputNotSpecified,

    // ---- Enumerated values ----
    #[error("Invalid color space: {0}")]
    InvalidColorSpace(String),

    #[error("Invalid color range: {0}")]
    InvalidColorRange(String),

    #[error("Invalid encoder preset: {0}")]
    InvalidPreset(String),

    /// There is no preset faster than the given one.
    #[error("Encoder preset out of range: nothing is faster than '{0}'")]
    PresetOutOfRange(String),

    // ---- Encoder options ----
    #[error("HEVC: lossless and near-lossless are mutually exclusive")]
    HevcLosslessAndNearLossless,

    #[error("HEVC: bitrate must not be specified for lossless encoding")]
    HevcBitrateSpecifiedForLossless,

    #[error("HEVC: bitrate must be specified for near-lossless encoding")]
    HevcBitrateNotSpecified,

    // ---- Final assembly ----
    #[error("Video codec not specified")]
    VideoCodecNotSpecified,

    #[error("Audio codec not specified")]
    AudioCodecNotSpecified,

    // ---- Filter chain ----
    #[error("Wrong color filter mode: requested {requested}, but {active} is active")]
    WrongColorMode {
        requested: &'static str,
        active: &'static str,
    },

    #[error("More than one {0} filter in the chain")]
    DuplicateFilter(FilterKind),

    #[error("Cannot switch color filter mode: {0}")]
    ModeSwitch(String),

    // ---- Input and geometry ----
    #[error("Frame sequence error: {0}")]
    FrameSequence(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    // ---- Hand-off ----
    #[error("Cannot build a process handle from an empty argument list")]
    EmptyCommand,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ffargs-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
