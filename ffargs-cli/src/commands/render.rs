// ============================================================================
// ffargs-cli/src/commands/render.rs
// ============================================================================
//
// RENDER COMMAND: Print the ffmpeg argument list for one job
//
// The job is assembled from an optional JSON job file, then the flags are
// laid over it. Crop-to and letterbox geometry need the finished command and
// are applied last. Nothing is executed.

use anyhow::{Context, Result, bail};
use ffargs_core::codec::{Avc, Hevc, Prores, ProresProfile, VcPreset};
use ffargs_core::config::BuilderConfig;
use ffargs_core::filters::{Crop, Scale, Transpose};
use ffargs_core::layout::{HorizontalAlign, VerticalAlign, crop_and_scale, letterbox};
use ffargs_core::{AudioCodec, JobSpec, TranscodeCommand, VideoCodec};
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::str::FromStr;

use crate::cli::{AudioArg, ProresProfileArg, RangeArg, RenderArgs, TransposeArg, VideoArg};

/// Renders the job described by `args` and writes it to `out`.
pub fn run_render(args: &RenderArgs, out: &mut impl Write) -> Result<()> {
    let job = build_job(args)?;
    let config = BuilderConfig::from_env();
    debug!("Builder config: {:?}", config);

    let mut cmd = job
        .to_command_with(&config)
        .context("Failed to configure the command")?;
    apply_layout(args, &mut cmd)?;

    let tokens = cmd.to_tokens().context("Failed to render ffmpeg arguments")?;
    info!("Rendered {} arguments in {} mode", tokens.len(), cmd.color_mode());

    if args.json {
        serde_json::to_writer(&mut *out, &tokens)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", tokens.join(" "))?;
    }
    Ok(())
}

/// Loads the job file, if any, and applies the flags on top of it.
pub fn build_job(args: &RenderArgs) -> Result<JobSpec> {
    let mut job = match &args.job {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read job file '{}'", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Invalid job file '{}'", path.display()))?
        }
        None => JobSpec::default(),
    };

    if args.input.is_some() {
        job.src = args.input.clone();
    }
    if args.output.is_some() {
        job.dst = args.output.clone();
    }
    job.fps = args.fps.or(job.fps);
    job.gamma = args.gamma.or(job.gamma);

    if args.swscale {
        job.use_zscale = Some(false);
    }
    if let Some((width, height)) = args.scale {
        job.scale = Some(if args.downscale_only {
            Scale::downscale_only(width, height)
        } else {
            Scale::new(width, height)
        });
    }
    if let Some((width, height, left, top)) = args.crop {
        job.crop = Some(Crop::new(left, top, width, height));
    }
    if let Some(transpose) = args.transpose {
        job.transpose = Some(match transpose {
            TransposeArg::Clockwise => Transpose::Clockwise,
            TransposeArg::CounterClockwise => Transpose::CounterClockwise,
            TransposeArg::ClockwiseVflip => Transpose::ClockwiseVflip,
            TransposeArg::CounterClockwiseVflip => Transpose::CounterClockwiseVflip,
        });
    }

    if let Some(video) = video_codec(args)? {
        job.video = video;
    }
    if let Some(audio) = args.audio {
        job.audio = match audio {
            AudioArg::Copy => Some(AudioCodec::Copy),
            AudioArg::None => Some(AudioCodec::Disabled),
        };
    }
    if args.pix_fmt.is_some() {
        job.pix_fmt = args.pix_fmt.clone();
    }

    if args.src_color_space.is_some() {
        job.src_color_space = args.src_color_space.clone();
    }
    if args.dst_color_space.is_some() {
        job.dst_color_space = args.dst_color_space.clone();
    }
    if let Some(range) = args.src_range {
        job.src_range_full = Some(range == RangeArg::Full);
    }
    if let Some(range) = args.dst_range {
        job.dst_range_full = Some(range == RangeArg::Full);
    }

    if let Some(begin) = args.begin {
        job.begin = begin;
    }
    if args.duration.is_some() {
        job.duration = args.duration;
        job.end = None;
    }
    if args.end.is_some() {
        job.end = args.end;
    }

    let overrides = [
        (&args.before_input, &mut job.overrides.before_input),
        (&args.after_input, &mut job.overrides.after_input),
        (&args.video_args, &mut job.overrides.video),
        (&args.audio_args, &mut job.overrides.audio),
    ];
    for (flag, slot) in overrides {
        if flag.is_some() {
            *slot = flag.clone();
        }
    }

    job.debug |= args.debug;
    Ok(job)
}

/// Video codec selected by the flags. `None` leaves the job's codec alone.
fn video_codec(args: &RenderArgs) -> Result<Option<Option<VideoCodec>>> {
    let preset = args
        .preset
        .as_deref()
        .map(VcPreset::from_str)
        .transpose()
        .context("Invalid --preset")?;

    let encoder_flags = args.lossless || args.near_lossless || args.mbps.is_some();
    let Some(kind) = args.video else {
        if preset.is_some() || encoder_flags || args.prores_profile.is_some() {
            bail!("Encoder options need --video");
        }
        return Ok(None);
    };

    if kind != VideoArg::Hevc && encoder_flags {
        bail!("--lossless, --near-lossless and --mbps apply to --video hevc only");
    }
    if kind != VideoArg::Prores && args.prores_profile.is_some() {
        bail!("--prores-profile applies to --video prores only");
    }

    let codec = match kind {
        VideoArg::Copy => VideoCodec::Copy,
        VideoArg::None => VideoCodec::Disabled,
        VideoArg::Avc => VideoCodec::Avc(Avc::new(preset)),
        VideoArg::Hevc => VideoCodec::Hevc(Hevc {
            preset,
            lossless: args.lossless,
            near_lossless: args.near_lossless,
            mbps: args.mbps,
        }),
        VideoArg::Prores => {
            let profile = match args.prores_profile {
                Some(ProresProfileArg::Proxy) => ProresProfile::Proxy,
                Some(ProresProfileArg::Lt) => ProresProfile::Lt,
                Some(ProresProfileArg::Normal) | None => ProresProfile::Normal,
                Some(ProresProfileArg::Hq) => ProresProfile::Hq,
                Some(ProresProfileArg::Four) => ProresProfile::Four,
                Some(ProresProfileArg::Xq) => ProresProfile::Xq,
            };
            VideoCodec::Prores(Prores::new(profile))
        }
    };
    Ok(Some(Some(codec)))
}

fn apply_layout(args: &RenderArgs, cmd: &mut TranscodeCommand) -> Result<()> {
    let Some((src_width, src_height)) = args.source_size else {
        return Ok(());
    };
    if let Some((width, height)) = args.crop_to {
        crop_and_scale(
            cmd,
            src_width,
            src_height,
            width,
            height,
            HorizontalAlign::Middle,
            VerticalAlign::Middle,
        )
        .context("Failed to crop to the target aspect")?;
    }
    if let Some((width, height)) = args.letterbox {
        letterbox(cmd, src_width, src_height, width, height)
            .context("Failed to letterbox to the target aspect")?;
    }
    Ok(())
}
