// ffargs-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "ffargs: ffmpeg argument builder",
    long_about = "Composes ffmpeg command lines for transcode jobs via ffargs-core. Never runs ffmpeg."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Renders the ffmpeg argument list for one transcode job
    Render(RenderArgs),
    /// Guesses chroma subsampling and bit depth of a pixel format
    Pixfmt(PixfmtArgs),
}

#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    /// JSON job file. Flags given alongside it take precedence.
    #[arg(long, value_name = "FILE")]
    pub job: Option<PathBuf>,

    /// Source file, directory of numbered frames, or glob pattern
    #[arg(short = 'i', long = "input", value_name = "SRC")]
    pub input: Option<PathBuf>,

    /// Destination file
    #[arg(short = 'o', long = "output", value_name = "DST")]
    pub output: Option<PathBuf>,

    /// Print the tokens as a JSON array instead of a command line
    #[arg(long)]
    pub json: bool,

    // --- Input ---
    /// Source frame rate, for frame sequences
    #[arg(long, value_name = "FPS")]
    pub fps: Option<f64>,

    /// Source gamma
    #[arg(long, value_name = "GAMMA")]
    pub gamma: Option<f64>,

    // --- Filters ---
    /// Use the legacy swscale filter instead of zscale
    #[arg(long)]
    pub swscale: bool,

    /// Output size, like 1920x1080 or -2x720
    #[arg(long, value_name = "WxH", value_parser = parse_scale, allow_hyphen_values = true)]
    pub scale: Option<(i32, i32)>,

    /// Only ever shrink when scaling
    #[arg(long, requires = "scale")]
    pub downscale_only: bool,

    /// Crop rectangle as W:H:X:Y
    #[arg(long, value_name = "W:H:X:Y", value_parser = parse_crop)]
    pub crop: Option<(u32, u32, u32, u32)>,

    /// Rotate the picture
    #[arg(long, value_enum)]
    pub transpose: Option<TransposeArg>,

    /// Source frame size, needed by --crop-to and --letterbox
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    pub source_size: Option<(u32, u32)>,

    /// Crop to the aspect of WxH, then scale to its height
    #[arg(long, value_name = "WxH", value_parser = parse_size, requires = "source_size", conflicts_with = "letterbox")]
    pub crop_to: Option<(u32, u32)>,

    /// Pad to the aspect of WxH, then scale to its height
    #[arg(long, value_name = "WxH", value_parser = parse_size, requires = "source_size")]
    pub letterbox: Option<(u32, u32)>,

    // --- Codecs ---
    /// Video codec
    #[arg(long, value_enum)]
    pub video: Option<VideoArg>,

    /// Encoder preset for avc and hevc
    #[arg(long, value_name = "PRESET")]
    pub preset: Option<String>,

    /// Lossless hevc
    #[arg(long, conflicts_with = "near_lossless")]
    pub lossless: bool,

    /// Near-lossless hevc; needs --mbps
    #[arg(long)]
    pub near_lossless: bool,

    /// Target bitrate for hevc, in megabits per second
    #[arg(long, value_name = "MBPS")]
    pub mbps: Option<f64>,

    /// ProRes profile
    #[arg(long, value_enum)]
    pub prores_profile: Option<ProresProfileArg>,

    /// Audio codec
    #[arg(long, value_enum)]
    pub audio: Option<AudioArg>,

    /// Output pixel format
    #[arg(long, value_name = "PIX_FMT")]
    pub pix_fmt: Option<String>,

    // --- Color ---
    /// Source color space (bt709, bt470bg, smpte170m, bt2020nc)
    #[arg(long, value_name = "NAME")]
    pub src_color_space: Option<String>,

    /// Destination color space, also written as output metadata
    #[arg(long, value_name = "NAME")]
    pub dst_color_space: Option<String>,

    /// Source range
    #[arg(long, value_enum)]
    pub src_range: Option<RangeArg>,

    /// Destination range, also written as output metadata
    #[arg(long, value_enum)]
    pub dst_range: Option<RangeArg>,

    // --- Time window ---
    /// Start offset in seconds
    #[arg(long, value_name = "SECONDS")]
    pub begin: Option<f64>,

    /// Output duration in seconds
    #[arg(long, value_name = "SECONDS", conflicts_with = "end")]
    pub duration: Option<f64>,

    /// End offset in seconds
    #[arg(long, value_name = "SECONDS")]
    pub end: Option<f64>,

    // --- Overrides ---
    /// Extra arguments placed before the input, e.g. "-hwaccel auto"
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub before_input: Option<String>,

    /// Extra output arguments
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub after_input: Option<String>,

    /// Extra video arguments; these win over --after-input
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub video_args: Option<String>,

    /// Extra audio arguments; these win over --video-args
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub audio_args: Option<String>,

    /// Add -loglevel debug
    #[arg(long)]
    pub debug: bool,
}

#[derive(Args, Debug)]
pub struct PixfmtArgs {
    /// Pixel format name, like yuv420p10le
    #[arg(value_name = "NAME")]
    pub name: String,

    /// NB_COMPONENTS column of `ffmpeg -pix_fmts`
    #[arg(long, value_name = "N")]
    pub components: Option<u32>,

    /// BITS_PER_PIXEL column of `ffmpeg -pix_fmts`
    #[arg(long, value_name = "BITS", requires = "components")]
    pub bpp: Option<u32>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VideoArg {
    Copy,
    None,
    Avc,
    Hevc,
    Prores,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioArg {
    Copy,
    None,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeArg {
    Full,
    Limited,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransposeArg {
    Clockwise,
    CounterClockwise,
    ClockwiseVflip,
    CounterClockwiseVflip,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProresProfileArg {
    Proxy,
    Lt,
    Normal,
    Hq,
    Four,
    Xq,
}

// --- Value Parsers ---

fn split_pair<'a>(s: &'a str, sep: char, what: &str) -> Result<(&'a str, &'a str), String> {
    s.split_once(sep)
        .ok_or_else(|| format!("expected {}, got '{}'", what, s))
}

/// Parses `WxH` where either side may be negative.
pub fn parse_scale(s: &str) -> Result<(i32, i32), String> {
    let (w, h) = split_pair(s, 'x', "WxH")?;
    let w = w.parse().map_err(|_| format!("invalid width '{}'", w))?;
    let h = h.parse().map_err(|_| format!("invalid height '{}'", h))?;
    Ok((w, h))
}

/// Parses a positive `WxH` frame size.
pub fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = split_pair(s, 'x', "WxH")?;
    let w: u32 = w.parse().map_err(|_| format!("invalid width '{}'", w))?;
    let h: u32 = h.parse().map_err(|_| format!("invalid height '{}'", h))?;
    if w == 0 || h == 0 {
        return Err(format!("size '{}' has a zero dimension", s));
    }
    Ok((w, h))
}

/// Parses `W:H:X:Y`.
pub fn parse_crop(s: &str) -> Result<(u32, u32, u32, u32), String> {
    let parts: Vec<u32> = s
        .split(':')
        .map(|p| p.parse().map_err(|_| format!("invalid crop value '{}'", p)))
        .collect::<Result<_, _>>()?;
    match parts[..] {
        [w, h, x, y] => Ok((w, h, x, y)),
        _ => Err(format!("expected W:H:X:Y, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_basic_args() {
        let cli = Cli::parse_from(["ffargs", "render", "-i", "in.mov", "-o", "out.mov"]);
        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.input, Some(PathBuf::from("in.mov")));
                assert_eq!(args.output, Some(PathBuf::from("out.mov")));
                assert!(!args.swscale);
                assert!(args.job.is_none());
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_parse_render_with_filters_and_codecs() {
        let cli = Cli::parse_from([
            "ffargs", "render", "-vv", "-i", "in.mov", "-o", "out.mov",
            "--scale", "-2x720", "--downscale-only",
            "--crop", "1920:800:0:140",
            "--video", "hevc", "--preset", "slow", "--mbps", "20",
            "--audio", "none",
            "--video-args", "-tag:v hvc1",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.scale, Some((-2, 720)));
                assert!(args.downscale_only);
                assert_eq!(args.crop, Some((1920, 800, 0, 140)));
                assert_eq!(args.video, Some(VideoArg::Hevc));
                assert_eq!(args.preset.as_deref(), Some("slow"));
                assert_eq!(args.mbps, Some(20.0));
                assert_eq!(args.audio, Some(AudioArg::None));
                assert_eq!(args.video_args.as_deref(), Some("-tag:v hvc1"));
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_crop_to_requires_source_size() {
        let result = Cli::try_parse_from(["ffargs", "render", "--crop-to", "1920x1080"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_value_parsers() {
        assert_eq!(parse_scale("1280x-2"), Ok((1280, -2)));
        assert!(parse_scale("1280").is_err());
        assert_eq!(parse_size("4096x2160"), Ok((4096, 2160)));
        assert!(parse_size("0x2160").is_err());
        assert!(parse_size("-2x2160").is_err());
        assert_eq!(parse_crop("10:20:30:40"), Ok((10, 20, 30, 40)));
        assert!(parse_crop("10:20:30").is_err());
    }

    #[test]
    fn test_parse_pixfmt() {
        let cli = Cli::parse_from(["ffargs", "pixfmt", "yuv420p10le", "--components", "3", "--bpp", "15"]);
        match cli.command {
            Commands::Pixfmt(args) => {
                assert_eq!(args.name, "yuv420p10le");
                assert_eq!(args.components, Some(3));
                assert_eq!(args.bpp, Some(15));
            }
            _ => panic!("Expected Pixfmt command"),
        }
    }
}
