//! Declarative job descriptions
//!
//! A [`JobSpec`] is the serializable form of a [`TranscodeCommand`]: every
//! field a caller can set on the builder, as plain data. The CLI reads it
//! from JSON; library users can build one in code or deserialize it from
//! anywhere serde reaches.
//!
//! # Example
//!
//! ```
//! use ffargs_core::JobSpec;
//!
//! let job: JobSpec = serde_json::from_str(r#"{
//!     "src": "in.mov",
//!     "dst": "out.mov",
//!     "scale": { "width": -2, "height": 720, "downscale_only": false },
//!     "video": { "type": "avc", "preset": "fast" }
//! }"#).unwrap();
//!
//! let line = job.to_command().unwrap().command_line().unwrap();
//! assert!(line.contains("-c:v libx264 -preset fast"));
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::codec::{AudioCodec, VideoCodec};
use crate::command::TranscodeCommand;
use crate::config::BuilderConfig;
use crate::error::CoreResult;
use crate::filters::{Crop, Pad, Scale, Transpose};

/// Override strings, one per bucket, in shell syntax.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobOverrides {
    pub before_input: Option<String>,
    pub after_input: Option<String>,
    pub video: Option<String>,
    pub audio: Option<String>,
}

impl JobOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn default_video() -> Option<VideoCodec> {
    Some(VideoCodec::Copy)
}

fn default_audio() -> Option<AudioCodec> {
    Some(AudioCodec::Copy)
}

/// Serializable description of one transcode command.
///
/// Omitted codecs default to stream copy; an explicit `null` clears the
/// codec so an override has to supply it. When both `duration` and `end`
/// are given, `end` wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobSpec {
    pub src: Option<PathBuf>,
    pub dst: Option<PathBuf>,
    pub fps: Option<f64>,
    pub gamma: Option<f64>,

    /// Color filter mode. `None` keeps the configured default.
    pub use_zscale: Option<bool>,
    pub scale: Option<Scale>,
    pub crop: Option<Crop>,
    pub pad: Option<Pad>,
    pub transpose: Option<Transpose>,

    #[serde(default = "default_video")]
    pub video: Option<VideoCodec>,
    #[serde(default = "default_audio")]
    pub audio: Option<AudioCodec>,
    pub pix_fmt: Option<String>,

    /// ffmpeg color space names, such as `bt709`.
    pub src_color_space: Option<String>,
    pub dst_color_space: Option<String>,
    pub src_range_full: Option<bool>,
    pub dst_range_full: Option<bool>,

    pub begin: f64,
    pub duration: Option<f64>,
    pub end: Option<f64>,

    #[serde(skip_serializing_if = "JobOverrides::is_empty")]
    pub overrides: JobOverrides,
    pub debug: bool,
}

impl Default for JobSpec {
    fn default() -> Self {
        Self {
            src: None,
            dst: None,
            fps: None,
            gamma: None,
            use_zscale: None,
            scale: None,
            crop: None,
            pad: None,
            transpose: None,
            video: default_video(),
            audio: default_audio(),
            pix_fmt: None,
            src_color_space: None,
            dst_color_space: None,
            src_range_full: None,
            dst_range_full: None,
            begin: 0.0,
            duration: None,
            end: None,
            overrides: JobOverrides::default(),
            debug: false,
        }
    }
}

impl JobSpec {
    /// Builds a command with the built-in defaults.
    pub fn to_command(&self) -> CoreResult<TranscodeCommand> {
        self.to_command_with(&BuilderConfig::default())
    }

    /// Builds a command on top of `config`.
    ///
    /// Geometry filters are applied in chain order: crop, pad, transpose,
    /// then the color filter.
    pub fn to_command_with(&self, config: &BuilderConfig) -> CoreResult<TranscodeCommand> {
        let mut cmd = TranscodeCommand::with_config(config);
        if let Some(use_zscale) = self.use_zscale {
            cmd.set_use_zscale(use_zscale)?;
        }

        cmd.src_file = self.src.clone();
        cmd.dst_file = self.dst.clone();
        cmd.src_fps = self.fps;
        cmd.src_gamma = self.gamma;

        if let Some(crop) = self.crop {
            cmd.set_crop(crop);
        }
        if let Some(pad) = &self.pad {
            cmd.set_pad(pad.clone());
        }
        if let Some(transpose) = self.transpose {
            cmd.set_transpose(transpose);
        }
        if self.scale.is_some() {
            cmd.set_scale(self.scale);
        }

        if let Some(name) = &self.src_color_space {
            cmd.set_src_color_space(Some(name))?;
        }
        if let Some(name) = &self.dst_color_space {
            cmd.set_dst_color_space(Some(name))?;
        }
        if self.src_range_full.is_some() {
            cmd.set_src_range_full(self.src_range_full);
        }
        if self.dst_range_full.is_some() {
            cmd.set_dst_range_full(self.dst_range_full);
        }

        cmd.dst_codec_video = self.video.clone();
        cmd.dst_codec_audio = self.audio;
        cmd.dst_pix_fmt = self.pix_fmt.clone();

        cmd.dst_time_range.begin = self.begin;
        cmd.dst_time_range.duration = self.duration;
        if self.end.is_some() {
            cmd.dst_time_range.set_end(self.end);
        }

        let buckets = [
            (&self.overrides.before_input, &mut cmd.custom.before_input),
            (&self.overrides.after_input, &mut cmd.custom.after_input),
            (&self.overrides.video, &mut cmd.custom.video),
            (&self.overrides.audio, &mut cmd.custom.audio),
        ];
        for (source, bucket) in buckets {
            if let Some(text) = source {
                bucket.set_from_string(text)?;
            }
        }

        cmd.debug = self.debug;
        Ok(cmd)
    }
}
