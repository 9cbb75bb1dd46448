//! `pixfmt` command: subsampling and bit depth guesses for one format

use anyhow::Result;
use ffargs_core::pixfmt::{guess_bpc, pixfmt_subsampling};
use std::io::Write;

use crate::cli::PixfmtArgs;

pub fn run_pixfmt(args: &PixfmtArgs, out: &mut impl Write) -> Result<()> {
    let subsampling = pixfmt_subsampling(&args.name);
    writeln!(
        out,
        "subsampling: {}",
        subsampling.as_deref().unwrap_or("unknown")
    )?;

    if let (Some(components), Some(bpp)) = (args.components, args.bpp) {
        match guess_bpc(&args.name, components, bpp) {
            Some(bpc) => writeln!(out, "bits per channel: {}", bpc)?,
            None => writeln!(out, "bits per channel: unknown")?,
        }
    }
    Ok(())
}
