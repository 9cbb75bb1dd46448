// ============================================================================
// ffargs-core/src/command/mod.rs
// ============================================================================
//
// COMMAND BUILDER: Transcode Job to ffmpeg Argument List
//
// TranscodeCommand is the aggregate that owns everything a transcode job needs
// (input, filter chain, codecs, color metadata, time range, output) and
// renders it into the ordered token list ffmpeg expects.
//
// Rendering runs in three phases:
// 1. before the input: program token, gamma, frame rate
// 2. the input itself (plain path, glob or frame directory)
// 3. after the input: time range, filters, codecs, color metadata, quality
//    flags, verbosity
//
// Phases 1 and 3 go through override substitution; the output path is always
// appended last.

mod color_mode;
pub mod input;
pub mod time_window;


pub use color_mode::ColorMode;
pub use input::{
    FramePatternResolver, FsFramePatternResolver, NoFramePatterns, directory_to_pattern,
    input_args,
};
pub use time_window::TimeWindow;

use std::path::PathBuf;

use crate::args::{ArgToken, CustomArgs, substitute_overrides};
use crate::codec::{AudioCodec, Codec, VideoCodec};
use crate::config::BuilderConfig;
use crate::error::{CoreError, CoreResult};
use crate::filters::{
    ColorFilter, ColorRange, ColorSettings, ColorSpace, Crop, Filter, FilterChain, FilterKind,
    Pad, Scale, SwscaleFilter, Transpose, TransposeFilter, ZscaleFilter,
};

/// Flags that satisfy the mandatory video codec check.
const VIDEO_CODEC_FLAGS: &[&str] = &["-c:v", "-vn"];

/// Flags that satisfy the mandatory audio codec check.
const AUDIO_CODEC_FLAGS: &[&str] = &["-c:a", "-an"];

/// A transcode job that renders to ffmpeg arguments.
///
/// # Examples
///
/// ```rust
/// use ffargs_core::TranscodeCommand;
/// use ffargs_core::filters::Scale;
///
/// let mut cmd = TranscodeCommand::new(true);
/// cmd.src_file = Some("/tmp/src.mov".into());
/// cmd.dst_file = Some("/tmp/dst.mov".into());
/// cmd.set_scale(Some(Scale::new(-2, 720)));
///
/// let tokens = cmd.to_tokens().unwrap();
/// assert_eq!(tokens.first().map(String::as_str), Some("ffmpeg"));
/// assert_eq!(tokens.last().map(String::as_str), Some("/tmp/dst.mov"));
/// ```
#[derive(Debug, Clone)]
pub struct TranscodeCommand {
    config: BuilderConfig,
    mode: ColorMode,

    /// Input file, glob pattern or frame directory
    pub src_file: Option<PathBuf>,
    /// Input gamma, needed for formats like EXR
    pub src_gamma: Option<f64>,
    /// Input frame rate, applied before the input is read
    pub src_fps: Option<f64>,

    pub dst_file: Option<PathBuf>,
    pub dst_codec_video: Option<VideoCodec>,
    pub dst_codec_audio: Option<AudioCodec>,
    pub dst_pix_fmt: Option<String>,
    pub dst_time_range: TimeWindow,

    /// Adds `-loglevel debug`
    pub debug: bool,

    /// Caller overrides, see [`CustomArgs`]
    pub custom: CustomArgs,

    filters: FilterChain,

    // Metadata mirrors of the destination color state. They only label the
    // output and are rewritten by the setters that change the filter state.
    dst_color_space_meta: Option<ColorSpace>,
    dst_range_full_meta: Option<bool>,
}

impl Default for TranscodeCommand {
    fn default() -> Self {
        Self::with_config(&BuilderConfig::default())
    }
}

impl TranscodeCommand {
    /// Creates a command with default settings and the given color filter mode.
    pub fn new(use_zscale: bool) -> Self {
        let config = BuilderConfig {
            use_zscale,
            ..BuilderConfig::default()
        };
        Self::with_config(&config)
    }

    pub fn with_config(config: &BuilderConfig) -> Self {
        Self {
            config: config.clone(),
            mode: ColorMode::from_use_zscale(config.use_zscale),
            src_file: None,
            src_gamma: None,
            src_fps: None,
            dst_file: None,
            dst_codec_video: Some(VideoCodec::Copy),
            dst_codec_audio: Some(AudioCodec::Copy),
            dst_pix_fmt: None,
            dst_time_range: TimeWindow::default(),
            debug: false,
            custom: CustomArgs::default(),
            filters: FilterChain::new(),
            dst_color_space_meta: None,
            dst_range_full_meta: None,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    // ---- Color filter mode ----

    pub fn color_mode(&self) -> ColorMode {
        self.mode
    }

    pub fn use_zscale(&self) -> bool {
        self.mode == ColorMode::Zscale
    }

    /// Switches between zscale and swscale, carrying scale, ranges and
    /// matrices over to the other filter.
    pub fn set_use_zscale(&mut self, use_zscale: bool) -> CoreResult<()> {
        let target = ColorMode::from_use_zscale(use_zscale);
        color_mode::switch_color_mode(&mut self.filters, self.mode, target)?;
        self.mode = target;
        Ok(())
    }

    /// The zscale filter, created if absent.
    ///
    /// Fails with `WrongColorMode` when swscale is active.
    pub fn zscale_filter(&mut self) -> CoreResult<&mut ZscaleFilter> {
        self.require_mode(ColorMode::Zscale)?;
        Ok(self.filters.find_or_create::<ZscaleFilter>())
    }

    /// The swscale filter, created if absent.
    ///
    /// Fails with `WrongColorMode` when zscale is active.
    pub fn swscale_filter(&mut self) -> CoreResult<&mut SwscaleFilter> {
        self.require_mode(ColorMode::Swscale)?;
        Ok(self.filters.find_or_create::<SwscaleFilter>())
    }

    fn require_mode(&self, requested: ColorMode) -> CoreResult<()> {
        if self.mode == requested {
            Ok(())
        } else {
            Err(CoreError::WrongColorMode {
                requested: requested.name(),
                active: self.mode.name(),
            })
        }
    }

    fn color_settings(&self) -> Option<&ColorSettings> {
        match self.mode {
            ColorMode::Zscale => self.filters.find::<ZscaleFilter>().map(|f| f.settings()),
            ColorMode::Swscale => self.filters.find::<SwscaleFilter>().map(|f| f.settings()),
        }
    }

    fn color_settings_mut(&mut self) -> &mut ColorSettings {
        match self.mode {
            ColorMode::Zscale => self.filters.find_or_create::<ZscaleFilter>().settings_mut(),
            ColorMode::Swscale => self.filters.find_or_create::<SwscaleFilter>().settings_mut(),
        }
    }

    // ---- Filters ----

    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    pub(crate) fn filters_mut(&mut self) -> &mut FilterChain {
        &mut self.filters
    }

    /// Removes a filter from the chain.
    pub fn remove_filter(&mut self, kind: FilterKind) -> CoreResult<Option<Filter>> {
        self.filters.remove(kind)
    }

    pub fn scale(&self) -> Option<Scale> {
        self.color_settings().and_then(|s| s.scale)
    }

    pub fn set_scale(&mut self, scale: Option<Scale>) {
        self.color_settings_mut().scale = scale;
    }

    pub fn crop(&self) -> Option<&Crop> {
        self.filters.find::<Crop>()
    }

    pub fn set_crop(&mut self, crop: Crop) {
        self.filters.replace(crop);
    }

    pub fn pad(&self) -> Option<&Pad> {
        self.filters.find::<Pad>()
    }

    pub fn set_pad(&mut self, pad: Pad) {
        self.filters.replace(pad);
    }

    pub fn transpose(&self) -> Option<Transpose> {
        self.filters.find::<TransposeFilter>().map(|f| f.kind)
    }

    pub fn set_transpose(&mut self, kind: Transpose) {
        self.filters.find_or_create::<TransposeFilter>().kind = kind;
    }

    // ---- Color ----

    /// Source color space, by its ffmpeg name.
    pub fn src_color_space(&self) -> Option<&'static str> {
        self.color_settings()
            .and_then(|s| s.src_matrix)
            .map(ColorSpace::ffmpeg_name)
    }

    /// Sets the source color space by its ffmpeg name.
    pub fn set_src_color_space(&mut self, name: Option<&str>) -> CoreResult<()> {
        let space = name.map(ColorSpace::from_ffmpeg_name).transpose()?;
        self.color_settings_mut().src_matrix = space;
        Ok(())
    }

    pub fn dst_color_space(&self) -> Option<&'static str> {
        self.color_settings()
            .and_then(|s| s.dst_matrix)
            .map(ColorSpace::ffmpeg_name)
    }

    /// Sets the destination color space by its ffmpeg name.
    ///
    /// Besides converting the pixels, this labels the output with
    /// `-colorspace`, `-color_primaries` and `-color_trc`.
    pub fn set_dst_color_space(&mut self, name: Option<&str>) -> CoreResult<()> {
        let space = name.map(ColorSpace::from_ffmpeg_name).transpose()?;
        self.color_settings_mut().dst_matrix = space;
        self.dst_color_space_meta = space;
        Ok(())
    }

    pub fn src_range_full(&self) -> Option<bool> {
        self.color_settings()
            .and_then(|s| ColorRange::is_full(s.src_range))
    }

    pub fn set_src_range_full(&mut self, full: Option<bool>) {
        self.color_settings_mut().src_range = ColorRange::from_full(full);
    }

    pub fn dst_range_full(&self) -> Option<bool> {
        self.color_settings()
            .and_then(|s| ColorRange::is_full(s.dst_range))
    }

    /// Sets the destination range and the matching `-color_range` label.
    pub fn set_dst_range_full(&mut self, full: Option<bool>) {
        self.color_settings_mut().dst_range = ColorRange::from_full(full);
        self.dst_range_full_meta = full;
    }

    // ---- Rendering ----

    fn before_input_known(&self) -> Vec<ArgToken> {
        let mut known = vec![ArgToken::bare(self.config.program.clone())];

        // Gamma and frame rate describe how to read the input, so they must
        // precede -i. As output options they would retime decoded frames.
        if let Some(gamma) = self.src_gamma.filter(|g| *g != 0.0) {
            known.push(ArgToken::pair("-gamma", number(gamma)));
        }
        if let Some(fps) = self.src_fps.filter(|f| *f != 0.0) {
            known.push(ArgToken::pair("-framerate", number(fps)));
            known.push(ArgToken::pair("-r", number(fps)));
        }
        known
    }

    fn after_input_known(&self) -> CoreResult<Vec<ArgToken>> {
        let mut known = Vec::new();

        if self.dst_time_range.begin != 0.0 {
            known.push(ArgToken::pair("-ss", number(self.dst_time_range.begin)));
        }
        if let Some(duration) = self.dst_time_range.duration {
            known.push(ArgToken::pair("-t", number(duration)));
        }
        if let Some(vf) = self.filters.build() {
            known.push(ArgToken::pair("-vf", vf));
        }

        if let Some(codec) = &self.dst_codec_video {
            known.extend(codec.args()?.into_iter().map(ArgToken::from));
        }

        if let Some(pix_fmt) = &self.dst_pix_fmt {
            known.push(ArgToken::pair("-pix_fmt", pix_fmt.clone()));
        }

        if let Some(space) = self.dst_color_space_meta {
            for flag in ["-colorspace", "-color_primaries", "-color_trc"] {
                known.push(ArgToken::pair(flag, space.ffmpeg_name()));
            }
        }
        if let Some(full) = self.dst_range_full_meta {
            // 1 is limited (tv), 2 is full (pc)
            known.push(ArgToken::pair("-color_range", if full { "2" } else { "1" }));
        }

        known.push(ArgToken::pair("-movflags", self.config.movflags.clone()));
        known.push(ArgToken::pair("-sws_flags", self.config.sws_flags.clone()));

        if let Some(codec) = &self.dst_codec_audio {
            known.extend(codec.args()?.into_iter().map(ArgToken::from));
        }

        if self.debug {
            known.push(ArgToken::pair("-loglevel", "debug"));
        }
        Ok(known)
    }

    /// Renders the full argument list, probing frame directories on disk.
    pub fn to_tokens(&self) -> CoreResult<Vec<String>> {
        self.to_tokens_with(&FsFramePatternResolver)
    }

    /// Renders the full argument list.
    ///
    /// The first token is the program, the last one the output path.
    pub fn to_tokens_with(&self, resolver: &dyn FramePatternResolver) -> CoreResult<Vec<String>> {
        let src_file = self.src_file.as_ref().ok_or(CoreError::InputNotSpecified)?;
        let dst_file = self.dst_file.as_ref().ok_or(CoreError::OutputNotSpecified)?;

        let mut tokens = substitute_overrides(
            self.before_input_known(),
            &self.custom.before_input_overrides()?,
        );
        tokens.extend(input_args(src_file, resolver)?);
        tokens.extend(substitute_overrides(
            self.after_input_known()?,
            &self.custom.after_input_overrides()?,
        ));

        check_codecs(&tokens)?;

        tokens.push(dst_file.to_string_lossy().into_owned());
        Ok(tokens)
    }

    /// The argument list joined with single spaces, for display only.
    ///
    /// Tokens are not quoted, so the result is not safe to pass to a shell.
    pub fn command_line(&self) -> CoreResult<String> {
        Ok(self.to_tokens()?.join(" "))
    }
}

fn check_codecs(tokens: &[String]) -> CoreResult<()> {
    let has_any = |flags: &[&str]| tokens.iter().any(|t| flags.contains(&t.as_str()));
    if !has_any(VIDEO_CODEC_FLAGS) {
        return Err(CoreError::VideoCodecNotSpecified);
    }
    if !has_any(AUDIO_CODEC_FLAGS) {
        return Err(CoreError::AudioCodecNotSpecified);
    }
    Ok(())
}

/// Formats a number the way ffmpeg reads it: `30`, not `30.0`.
fn number(value: f64) -> String {
    value.to_string()
}
