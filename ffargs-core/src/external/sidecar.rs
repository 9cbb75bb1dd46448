//! Conversion of rendered arguments into an `ffmpeg-sidecar` command
//!
//! The returned [`FfmpegCommand`] is configured but not spawned. Callers that
//! want to run it call `spawn()` themselves and own the process from there.

use ffmpeg_sidecar::command::FfmpegCommand;
use log::debug;

use crate::command::TranscodeCommand;
use crate::error::{CoreError, CoreResult};

/// Builds a sidecar command from a token list.
///
/// The first token is the program path; the rest are passed as arguments in
/// order.
pub fn to_sidecar_command(tokens: &[String]) -> CoreResult<FfmpegCommand> {
    let (program, args) = tokens.split_first().ok_or(CoreError::EmptyCommand)?;

    let mut cmd = FfmpegCommand::new_with_path(program);
    cmd.args(args);
    debug!("Prepared sidecar command for {} with {} arguments", program, args.len());
    Ok(cmd)
}

/// Renders `command` and hands the tokens to [`to_sidecar_command`].
pub fn sidecar_command(command: &TranscodeCommand) -> CoreResult<FfmpegCommand> {
    to_sidecar_command(&command.to_tokens()?)
}
