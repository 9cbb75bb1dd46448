//! Codec descriptors
//!
//! Codecs are stateless value objects. Each renders to an ordered list of
//! `(flag, value)` pairs and never touches command state. Encoder-specific
//! option conflicts are reported when the arguments are requested, not when
//! the codec is constructed.

pub mod preset;
pub mod prores;
pub mod x26x;

pub use preset::VcPreset;
pub use prores::{Prores, ProresProfile};
pub use x26x::{Avc, Hevc};

use serde::{Deserialize, Serialize};

use crate::args::ArgPair;
use crate::error::CoreResult;

/// Anything that contributes codec arguments to a command.
pub trait Codec {
    fn args(&self) -> CoreResult<Vec<ArgPair>>;
}

/// Video stream handling for the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum VideoCodec {
    /// Pass the stream through without re-encoding.
    Copy,
    /// Drop the video stream.
    Disabled,
    Avc(Avc),
    Hevc(Hevc),
    Prores(Prores),
}

impl Codec for VideoCodec {
    fn args(&self) -> CoreResult<Vec<ArgPair>> {
        match self {
            VideoCodec::Copy => Ok(vec![ArgPair::new("-vcodec", "copy")]),
            VideoCodec::Disabled => Ok(vec![ArgPair::flag_only("-vn")]),
            VideoCodec::Avc(codec) => codec.args(),
            VideoCodec::Hevc(codec) => codec.args(),
            VideoCodec::Prores(codec) => codec.args(),
        }
    }
}

/// Audio stream handling for the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    Copy,
    Disabled,
}

impl Codec for AudioCodec {
    fn args(&self) -> CoreResult<Vec<ArgPair>> {
        match self {
            AudioCodec::Copy => Ok(vec![ArgPair::new("-acodec", "copy")]),
            AudioCodec::Disabled => Ok(vec![ArgPair::flag_only("-an")]),
        }
    }
}
