//! Core library for composing ffmpeg command lines.
//!
//! This crate builds the ordered argument list of a transcode job: input
//! handling, the video filter chain, codec selection, color metadata, time
//! range and output. Any generated flag can be replaced through override
//! buckets. ffmpeg itself is never run.
//!
//! ## Usage Example
//!
//! ```rust
//! use ffargs_core::TranscodeCommand;
//! use ffargs_core::codec::{Hevc, VideoCodec};
//! use ffargs_core::filters::Scale;
//!
//! let mut cmd = TranscodeCommand::new(true);
//! cmd.src_file = Some("/path/to/input.mov".into());
//! cmd.dst_file = Some("/path/to/output.mov".into());
//! cmd.set_scale(Some(Scale::downscale_only(-2, 1080)));
//! cmd.set_dst_color_space(Some("bt709")).unwrap();
//! cmd.dst_codec_video = Some(VideoCodec::Hevc(Hevc::near_lossless(20.0)));
//! cmd.custom.video.set_from_string("-tag:v hvc1").unwrap();
//!
//! let tokens = cmd.to_tokens().unwrap();
//! assert_eq!(tokens.first().map(String::as_str), Some("ffmpeg"));
//! assert_eq!(tokens.last().map(String::as_str), Some("/path/to/output.mov"));
//! ```

pub mod args;
pub mod codec;
pub mod command;
pub mod config;
pub mod error;
pub mod external;
pub mod filters;
pub mod job;
pub mod layout;
pub mod pixfmt;

// Re-export key public items for easier use by consumers
pub use args::{ArgPair, ArgSubset, ArgToken, CustomArgs};
pub use codec::{AudioCodec, VideoCodec};
pub use command::{ColorMode, TimeWindow, TranscodeCommand};
pub use config::BuilderConfig;
pub use error::{CoreError, CoreResult};
pub use external::to_sidecar_command;
pub use job::JobSpec;
