// ============================================================================
// ffargs-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Hand-off to Process Runners
//
// The crate never runs ffmpeg. This module is the boundary where a finished
// argument list leaves the crate in a form a process runner understands.
//
// KEY COMPONENTS:
// - to_sidecar_command: token list to an ffmpeg-sidecar command handle

pub mod sidecar;

pub use sidecar::{sidecar_command, to_sidecar_command};
