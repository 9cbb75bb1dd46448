//! Frame geometry helpers
//!
//! Fitting a source frame into a destination size takes one of two routes:
//! cut the excess away ([`crop_and_scale`]) or add bars ([`letterbox`]).
//! Both configure the geometry filter ahead of the color filter and then
//! scale to the destination height.

pub mod cropping;
pub mod padding;

pub use cropping::{HorizontalAlign, VerticalAlign, crop_and_scale, crop_rect, crop_size};
pub use padding::{LetterboxSizes, letterbox, pad_lrtb_to_lrwh};

use crate::error::{CoreError, CoreResult};

fn check_size(what: &str, width: u32, height: u32) -> CoreResult<()> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidGeometry(format!(
            "{} size {}x{} has a zero dimension",
            what, width, height
        )));
    }
    Ok(())
}
