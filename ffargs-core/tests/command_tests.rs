use ffargs_core::codec::{Hevc, Prores, ProresProfile, VcPreset};
use ffargs_core::filters::{Crop, FilterKind, Scale, Transpose};
use ffargs_core::layout::{HorizontalAlign, VerticalAlign, crop_and_scale, letterbox};
use ffargs_core::*;
use std::fs::File;
use tempfile::tempdir;

// --- Test Helper Functions ---

fn command(use_zscale: bool) -> TranscodeCommand {
    let mut cmd = TranscodeCommand::new(use_zscale);
    cmd.src_file = Some("/media/in.mov".into());
    cmd.dst_file = Some("/media/out.mov".into());
    cmd
}

fn position(tokens: &[String], token: &str) -> usize {
    tokens
        .iter()
        .position(|t| t == token)
        .unwrap_or_else(|| panic!("{} not in {:?}", token, tokens))
}

#[test]
fn test_program_first_output_last() {
    let mut cmd = command(true);
    cmd.custom.after_input.set_from_string("-metadata 'title=A B'").unwrap();
    let tokens = cmd.to_tokens().unwrap();

    assert_eq!(tokens[0], "ffmpeg");
    assert_eq!(tokens.last().unwrap(), "/media/out.mov");
    let i = position(&tokens, "-metadata");
    assert_eq!(tokens[i + 1], "title=A B");
}

#[test]
fn test_input_phase_ordering() {
    let mut cmd = command(true);
    cmd.src_fps = Some(23.976);
    cmd.custom.before_input.set_from_string("-hwaccel auto").unwrap();
    cmd.custom.after_input.set_from_string("-map 0:v").unwrap();
    let tokens = cmd.to_tokens().unwrap();

    let input = position(&tokens, "-i");
    assert!(position(&tokens, "-framerate") < input);
    assert!(position(&tokens, "-hwaccel") < input);
    assert!(position(&tokens, "-map") > input);
}

#[test]
fn test_hdr_downconvert_job() {
    let mut cmd = command(true);
    cmd.set_src_color_space(Some("bt2020nc")).unwrap();
    cmd.set_dst_color_space(Some("bt709")).unwrap();
    cmd.set_dst_range_full(Some(false));
    cmd.set_scale(Some(Scale::downscale_only(-2, 1080)));
    cmd.dst_codec_video = Some(VideoCodec::Hevc(
        Hevc::near_lossless(25.0).with_preset(VcPreset::Slow),
    ));
    cmd.dst_pix_fmt = Some("yuv420p10le".to_string());

    let line = cmd.command_line().unwrap();
    assert!(line.contains(
        "-vf zscale=filter=spline36:w=-2:h='min(ih,1080)':range=limited:matrixin=2020_ncl:matrix=709:dither=error_diffusion"
    ));
    assert!(line.contains("-c:v libx265 -preset slow -x265-params bitrate=25000"));
    assert!(line.contains("-pix_fmt yuv420p10le -colorspace bt709 -color_primaries bt709 -color_trc bt709 -color_range 1"));
}

#[test]
fn test_prores_with_swscale() {
    let mut cmd = command(false);
    cmd.set_scale(Some(Scale::new(1280, 720)));
    cmd.dst_codec_video = Some(VideoCodec::Prores(Prores::new(ProresProfile::Hq)));
    cmd.dst_codec_audio = Some(AudioCodec::Disabled);

    let tokens = cmd.to_tokens().unwrap();
    let vf = position(&tokens, "-vf");
    assert_eq!(tokens[vf + 1], "scale=1280:720");
    assert_eq!(tokens[position(&tokens, "-c:v") + 1], "prores_ks");
    assert!(tokens.contains(&"-an".to_string()));
}

#[test]
fn test_mode_switch_round_trip() {
    let mut cmd = command(true);
    cmd.set_crop(Crop::new(0, 0, 1920, 800));
    cmd.set_scale(Some(Scale::new(-2, 720)));
    cmd.set_dst_color_space(Some("bt709")).unwrap();
    let before = cmd.to_tokens().unwrap();

    cmd.set_use_zscale(false).unwrap();
    assert_eq!(cmd.color_mode(), ColorMode::Swscale);
    assert_eq!(cmd.scale(), Some(Scale::new(-2, 720)));
    assert_eq!(cmd.dst_color_space(), Some("bt709"));

    cmd.set_use_zscale(true).unwrap();
    assert_eq!(cmd.to_tokens().unwrap(), before);
}

#[test]
fn test_mode_switch_refused_with_raw_params() {
    let mut cmd = command(true);
    cmd.zscale_filter().unwrap().set_param("primaries", Some("709"));

    assert!(matches!(
        cmd.set_use_zscale(false),
        Err(CoreError::ModeSwitch(_))
    ));
    assert!(cmd.use_zscale());
}

#[test]
fn test_wrong_mode_accessor() {
    let mut cmd = command(false);
    assert!(matches!(
        cmd.zscale_filter(),
        Err(CoreError::WrongColorMode { .. })
    ));
}

#[test]
fn test_remove_filter() {
    let mut cmd = command(true);
    cmd.set_transpose(Transpose::CounterClockwise);
    assert!(cmd.remove_filter(FilterKind::Transpose).unwrap().is_some());
    assert!(cmd.transpose().is_none());
    assert!(!cmd.to_tokens().unwrap().contains(&"-vf".to_string()));
}

#[test]
fn test_crop_and_scale_public_api() {
    let mut cmd = command(false);
    crop_and_scale(&mut cmd, 4096, 2160, 1920, 1080, HorizontalAlign::Middle, VerticalAlign::Middle)
        .unwrap();
    let tokens = cmd.to_tokens().unwrap();
    assert_eq!(
        tokens[position(&tokens, "-vf") + 1],
        "crop=3840:2160:128:0,scale=-2:1080"
    );
}

#[test]
fn test_letterbox_public_api() {
    let mut cmd = command(true);
    let sizes = letterbox(&mut cmd, 1440, 1080, 1920, 1080).unwrap();
    assert_eq!((sizes.pad_left, sizes.pad_right), (240, 240));

    let tokens = cmd.to_tokens().unwrap();
    assert_eq!(
        tokens[position(&tokens, "-vf") + 1],
        "pad=width=iw+480:height=ih:x=240:y=0:color=black,zscale=filter=spline36:w=-2:h=1080:dither=error_diffusion"
    );
}

#[test]
fn test_frame_directory_input() {
    let dir = tempdir().unwrap();
    for n in 1..=3 {
        File::create(dir.path().join(format!("frame{:05}.exr", n))).unwrap();
    }
    File::create(dir.path().join(".DS_Store")).unwrap();

    let mut cmd = command(true);
    cmd.src_file = Some(dir.path().to_path_buf());
    let tokens = cmd.to_tokens().unwrap();

    let expected = dir.path().join("frame%05d.exr");
    assert_eq!(
        tokens[position(&tokens, "-i") + 1],
        expected.to_string_lossy()
    );
}

#[test]
fn test_frame_directory_with_two_families_fails() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("a001.png")).unwrap();
    File::create(dir.path().join("b001.png")).unwrap();

    let mut cmd = command(true);
    cmd.src_file = Some(dir.path().to_path_buf());
    assert!(matches!(cmd.to_tokens(), Err(CoreError::FrameSequence(_))));
}

#[test]
fn test_glob_input() {
    let mut cmd = command(true);
    cmd.src_file = Some("/frames/*.png".into());
    let line = cmd.command_line().unwrap();
    assert!(line.contains("-f image2 -pattern_type glob -i /frames/*.png"));
}

#[test]
fn test_job_and_builder_agree() {
    let job: JobSpec = serde_json::from_str(
        r#"{
            "src": "/media/in.mov",
            "dst": "/media/out.mov",
            "transpose": "clockwise",
            "scale": {"width": 1280, "height": -2, "downscale_only": true},
            "begin": 1.5,
            "duration": 3
        }"#,
    )
    .unwrap();

    let mut cmd = command(true);
    cmd.set_transpose(Transpose::Clockwise);
    cmd.set_scale(Some(Scale::downscale_only(1280, -2)));
    cmd.dst_time_range = TimeWindow::new(1.5, Some(3.0));

    assert_eq!(
        job.to_command().unwrap().to_tokens().unwrap(),
        cmd.to_tokens().unwrap()
    );
}
