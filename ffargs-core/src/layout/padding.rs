//! Letterboxing: fit the whole source frame and pad the rest

use super::check_size;
use crate::command::TranscodeCommand;
use crate::error::{CoreError, CoreResult};
use crate::filters::{Pad, Scale};

/// Bars needed around a source frame, in source pixels, so that the padded
/// frame has the destination aspect ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LetterboxSizes {
    pub pad_left: u32,
    pub pad_right: u32,
    pub pad_top: u32,
    pub pad_bottom: u32,
}

impl LetterboxSizes {
    pub fn new(src_width: u32, src_height: u32, dst_width: u32, dst_height: u32) -> CoreResult<Self> {
        check_size("Source", src_width, src_height)?;
        check_size("Destination", dst_width, dst_height)?;

        let src_aspect = src_width as f64 / src_height as f64;
        let dst_aspect = dst_width as f64 / dst_height as f64;
        let mut sizes = Self::default();

        // Source width that would give the destination aspect at the same
        // height. Equal after rounding means no bars.
        let need_width = (dst_aspect * src_height as f64).round_ties_even();
        if need_width == src_width as f64 {
            return Ok(sizes);
        }

        if src_aspect > dst_aspect {
            // Wider than the target: bars top and bottom
            let total = src_width as f64 / dst_aspect - src_height as f64;
            (sizes.pad_top, sizes.pad_bottom) = halves(total);
        } else {
            let total = need_width - src_width as f64;
            (sizes.pad_left, sizes.pad_right) = halves(total);
        }
        Ok(sizes)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Splits a bar total between the two sides. The first side gets the half
/// rounded to even, the second side the rest.
fn halves(total: f64) -> (u32, u32) {
    let first = (total / 2.0).round_ties_even();
    let second = (total - first).round_ties_even();
    (first.max(0.0) as u32, second.max(0.0) as u32)
}

/// Converts per-side padding to the `pad` filter's
/// `(x, y, width, height)` form.
///
/// Zero padding on every side yields `iw`/`ih` so the filter is a no-op.
pub fn pad_lrtb_to_lrwh(
    left: i64,
    right: i64,
    top: i64,
    bottom: i64,
) -> CoreResult<(i64, i64, String, String)> {
    if [left, right, top, bottom].iter().any(|v| *v < 0) {
        return Err(CoreError::InvalidGeometry(format!(
            "negative padding: left={} right={} top={} bottom={}",
            left, right, top, bottom
        )));
    }

    let overflow = || {
        CoreError::InvalidGeometry(format!(
            "padding too large: left={} right={} top={} bottom={}",
            left, right, top, bottom
        ))
    };
    let width = match left.checked_add(right).ok_or_else(overflow)? {
        0 => "iw".to_string(),
        total => format!("iw+{}", total),
    };
    let height = match top.checked_add(bottom).ok_or_else(overflow)? {
        0 => "ih".to_string(),
        total => format!("ih+{}", total),
    };
    Ok((left, top, width, height))
}

/// Letterboxes `cmd` to the destination aspect ratio and scales to its
/// height.
///
/// Padding happens on source pixels, ahead of the color filter.
pub fn letterbox(
    cmd: &mut TranscodeCommand,
    src_width: u32,
    src_height: u32,
    dst_width: u32,
    dst_height: u32,
) -> CoreResult<LetterboxSizes> {
    let sizes = LetterboxSizes::new(src_width, src_height, dst_width, dst_height)?;
    let height = i32::try_from(dst_height)
        .map_err(|_| CoreError::InvalidGeometry(format!("height {} is too large", dst_height)))?;

    if !sizes.is_empty() {
        let (x, y, width, pad_height) = pad_lrtb_to_lrwh(
            sizes.pad_left.into(),
            sizes.pad_right.into(),
            sizes.pad_top.into(),
            sizes.pad_bottom.into(),
        )?;
        let anchor = cmd.color_mode().filter_kind();
        cmd.filters_mut()
            .insert_before(Pad::new(x, y, width, pad_height), anchor)?;
    }
    cmd.set_scale(Some(Scale::new(-2, height)));
    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::NoFramePatterns;

    #[test]
    fn test_wide_source_gets_top_and_bottom_bars() {
        let sizes = LetterboxSizes::new(1920, 1080, 1440, 1080).unwrap();
        assert_eq!(
            sizes,
            LetterboxSizes {
                pad_left: 0,
                pad_right: 0,
                pad_top: 180,
                pad_bottom: 180,
            }
        );
    }

    #[test]
    fn test_tall_source_gets_side_bars() {
        let sizes = LetterboxSizes::new(1440, 1080, 1920, 1080).unwrap();
        assert_eq!(sizes.pad_left, 240);
        assert_eq!(sizes.pad_right, 240);
        assert_eq!(sizes.pad_top + sizes.pad_bottom, 0);
    }

    #[test]
    fn test_odd_padding_split() {
        let sizes = LetterboxSizes::new(100, 99, 1, 1).unwrap();
        assert_eq!((sizes.pad_left, sizes.pad_right), (0, 0));
        assert_eq!((sizes.pad_top, sizes.pad_bottom), (0, 1));
    }

    #[test]
    fn test_odd_bar_total_puts_extra_pixel_on_top() {
        let sizes = LetterboxSizes::new(1920, 1073, 1920, 1080).unwrap();
        assert_eq!((sizes.pad_top, sizes.pad_bottom), (4, 3));
        assert_eq!((sizes.pad_left, sizes.pad_right), (0, 0));
    }

    #[test]
    fn test_odd_side_bar_total() {
        // 16:9 of 1075 is 1911.1, rounded to 1911: 31 pixels of bars
        let sizes = LetterboxSizes::new(1880, 1075, 1920, 1080).unwrap();
        assert_eq!((sizes.pad_left, sizes.pad_right), (16, 15));
    }

    #[test]
    fn test_matching_aspect_needs_no_bars() {
        assert!(LetterboxSizes::new(1280, 720, 1920, 1080).unwrap().is_empty());
    }

    #[test]
    fn test_zero_size_fails() {
        assert!(LetterboxSizes::new(1920, 0, 1920, 1080).is_err());
    }

    #[test]
    fn test_pad_lrtb_to_lrwh() {
        assert_eq!(
            pad_lrtb_to_lrwh(0, 0, 0, 0).unwrap(),
            (0, 0, "iw".to_string(), "ih".to_string())
        );
        assert_eq!(
            pad_lrtb_to_lrwh(10, 20, 30, 40).unwrap(),
            (10, 30, "iw+30".to_string(), "ih+70".to_string())
        );
        assert!(matches!(
            pad_lrtb_to_lrwh(-1, 0, 0, 0),
            Err(CoreError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_pad_lrtb_to_lrwh_overflow() {
        assert!(matches!(
            pad_lrtb_to_lrwh(i64::MAX, 1, 0, 0),
            Err(CoreError::InvalidGeometry(_))
        ));
        assert!(matches!(
            pad_lrtb_to_lrwh(0, 0, 1, i64::MAX),
            Err(CoreError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_letterbox_command() {
        let mut cmd = TranscodeCommand::new(false);
        cmd.src_file = Some("/tmp/src.mov".into());
        cmd.dst_file = Some("/tmp/dst.mov".into());

        letterbox(&mut cmd, 1920, 1080, 1440, 1080).unwrap();

        let args = cmd.to_tokens_with(&NoFramePatterns).unwrap();
        let i = args.iter().position(|a| a == "-vf").unwrap();
        assert_eq!(
            args[i + 1],
            "pad=width=iw:height=ih+360:x=0:y=180:color=black,scale=-2:1080"
        );
    }

    #[test]
    fn test_letterbox_without_bars_only_scales() {
        let mut cmd = TranscodeCommand::new(false);
        letterbox(&mut cmd, 1280, 720, 1920, 1080).unwrap();
        assert!(cmd.pad().is_none());
        assert_eq!(cmd.scale(), Some(Scale::new(-2, 1080)));
    }
}
