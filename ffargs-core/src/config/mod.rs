//! Builder defaults for ffargs-core.
//!
//! A `TranscodeCommand` renders a handful of tokens that are not tied to any
//! particular job: the program name, the swscale quality flags and the
//! `-movflags` value. Those live here, together with the initial color
//! filter mode, so a consumer can adjust them once instead of per command.

mod builder;
pub mod utils;

pub use builder::BuilderConfigBuilder;

use serde::{Deserialize, Serialize};

use self::utils::{get_env_bool, get_env_string};

// Default constants

/// Program token that starts every rendered command.
pub const DEFAULT_PROGRAM: &str = "ffmpeg";

/// Quality flags for swscale, emitted even when zscale does the conversion
/// because ffmpeg may insert implicit scalers for pixel format changes.
pub const DEFAULT_SWS_FLAGS: &str = "spline+accurate_rnd+full_chroma_int+full_chroma_inp";

/// Writes the `colr` atom so players see the color metadata.
pub const DEFAULT_MOVFLAGS: &str = "+write_colr";

/// zscale is preferred; swscale is the fallback for builds without zimg.
pub const DEFAULT_USE_ZSCALE: bool = true;

/// Environment variable overriding the program token.
pub const ENV_PROGRAM: &str = "FFARGS_PROGRAM";

/// Environment variable overriding the initial color filter mode.
pub const ENV_USE_ZSCALE: &str = "FFARGS_USE_ZSCALE";

/// Defaults applied to every command built with this configuration.
///
/// # Examples
///
/// ```rust
/// use ffargs_core::config::BuilderConfig;
///
/// let config = BuilderConfig::builder()
///     .program("/opt/ffmpeg/bin/ffmpeg")
///     .use_zscale(false)
///     .build();
/// assert!(!config.use_zscale);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// First token of every command
    pub program: String,

    /// Initial color filter mode
    pub use_zscale: bool,

    /// Value of `-sws_flags`
    pub sws_flags: String,

    /// Value of `-movflags`
    pub movflags: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            use_zscale: DEFAULT_USE_ZSCALE,
            sws_flags: DEFAULT_SWS_FLAGS.to_string(),
            movflags: DEFAULT_MOVFLAGS.to_string(),
        }
    }
}

impl BuilderConfig {
    pub fn builder() -> BuilderConfigBuilder {
        BuilderConfigBuilder::new()
    }

    /// Defaults with `FFARGS_PROGRAM` and `FFARGS_USE_ZSCALE` applied.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            program: get_env_string(ENV_PROGRAM, defaults.program),
            use_zscale: get_env_bool(ENV_USE_ZSCALE, defaults.use_zscale),
            ..defaults
        }
    }
}
