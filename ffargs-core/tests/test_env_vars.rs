use ffargs_core::config::{BuilderConfig, ENV_PROGRAM, ENV_USE_ZSCALE};
use ffargs_core::TranscodeCommand;
use std::env;

#[test]
fn test_env_var_overrides() {
    // Both variables are only touched by this test binary
    unsafe {
        env::set_var(ENV_PROGRAM, "/opt/ffmpeg/bin/ffmpeg");
        env::set_var(ENV_USE_ZSCALE, "false");
    }

    let config = BuilderConfig::from_env();
    assert_eq!(config.program, "/opt/ffmpeg/bin/ffmpeg");
    assert!(!config.use_zscale);

    let mut cmd = TranscodeCommand::with_config(&config);
    cmd.src_file = Some("in.mov".into());
    cmd.dst_file = Some("out.mov".into());
    assert!(!cmd.use_zscale());
    assert_eq!(cmd.to_tokens().unwrap()[0], "/opt/ffmpeg/bin/ffmpeg");

    unsafe {
        env::set_var(ENV_USE_ZSCALE, "not-a-bool");
        env::remove_var(ENV_PROGRAM);
    }
    let config = BuilderConfig::from_env();
    assert_eq!(config.program, "ffmpeg");
    assert!(config.use_zscale);

    unsafe {
        env::remove_var(ENV_USE_ZSCALE);
    }
}
