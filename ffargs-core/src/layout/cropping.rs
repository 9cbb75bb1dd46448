//! Crop to the destination aspect ratio, then scale

use serde::{Deserialize, Serialize};

use super::check_size;
use crate::command::TranscodeCommand;
use crate::error::{CoreError, CoreResult};
use crate::filters::{Crop, Scale};

/// Which side keeps its pixels when cropping horizontally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    #[default]
    Middle,
    Right,
}

/// Which side keeps its pixels when cropping vertically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Largest `w` not above `width` with an integer `h` so that `w:h` matches
/// `aspect` (width, height) both ways under rounding.
///
/// Exact matches are not always possible: 4096:2160 at width 5472 needs a
/// height of 2885.625, and neither 2885 nor 2886 maps back to 5472. So the
/// width shrinks until a consistent pair turns up. The largest multiple of
/// the reduced ratio always qualifies, so the search stops there.
fn fit_height(width: u32, aspect: (u32, u32)) -> Option<(u32, u32)> {
    let ratio = aspect.0 as f64 / aspect.1 as f64;
    let divisor = gcd(aspect.0, aspect.1);
    let (step_w, step_h) = (aspect.0 / divisor, aspect.1 / divisor);
    let multiples = width / step_w;
    let floor = (multiples * step_w).max(1);

    let rounded = (floor..=width).rev().find_map(|w| {
        let h = (w as f64 / ratio).round_ties_even();
        ((h * ratio).round_ties_even() == w as f64 && h >= 1.0).then_some((w, h as u32))
    });
    rounded.or_else(|| {
        let h = u64::from(multiples) * u64::from(step_h);
        (multiples > 0)
            .then(|| u32::try_from(h).ok())
            .flatten()
            .map(|h| (multiples * step_w, h))
    })
}

/// The largest crop of `src` (width, height) with the aspect ratio of
/// `aspect` (width, height).
pub fn crop_size(src: (u32, u32), aspect: (u32, u32)) -> CoreResult<(u32, u32)> {
    check_size("Source", src.0, src.1)?;
    check_size("Aspect", aspect.0, aspect.1)?;

    let src_aspect = src.0 as f64 / src.1 as f64;
    let dst_aspect = aspect.0 as f64 / aspect.1 as f64;

    let size = if src_aspect > dst_aspect {
        // Too wide: keep the height, trim left and right
        fit_height(src.1, (aspect.1, aspect.0)).map(|(h, w)| (w, h))
    } else if src_aspect < dst_aspect {
        // Too tall: keep the width, trim top and bottom
        fit_height(src.0, aspect)
    } else {
        Some(src)
    };

    size.filter(|(w, h)| *w <= src.0 && *h <= src.1)
        .ok_or_else(|| {
            CoreError::InvalidGeometry(format!(
                "no {}:{} crop fits in {}x{}",
                aspect.0, aspect.1, src.0, src.1
            ))
        })
}

fn split(delta: u32, keep_start: bool, keep_end: bool) -> u32 {
    match (keep_start, keep_end) {
        (true, _) => 0,
        (_, true) => delta,
        _ => (delta as f64 / 2.0).round_ties_even() as u32,
    }
}

/// Crop rectangle that gives a `src` frame the aspect ratio of `dst`.
pub fn crop_rect(
    src_width: u32,
    src_height: u32,
    dst_width: u32,
    dst_height: u32,
    align_x: HorizontalAlign,
    align_y: VerticalAlign,
) -> CoreResult<Crop> {
    let (width, height) = crop_size((src_width, src_height), (dst_width, dst_height))?;

    let left = split(
        src_width - width,
        align_x == HorizontalAlign::Left,
        align_x == HorizontalAlign::Right,
    );
    let top = split(
        src_height - height,
        align_y == VerticalAlign::Top,
        align_y == VerticalAlign::Bottom,
    );

    Ok(Crop::new(left, top, width, height))
}

/// Crops `cmd` to the destination aspect ratio and scales to its height.
///
/// The crop is placed ahead of the color filter so it runs on the source
/// pixels. The width is left to ffmpeg as `-2`, keeping it even.
pub fn crop_and_scale(
    cmd: &mut TranscodeCommand,
    src_width: u32,
    src_height: u32,
    dst_width: u32,
    dst_height: u32,
    align_x: HorizontalAlign,
    align_y: VerticalAlign,
) -> CoreResult<()> {
    let crop = crop_rect(src_width, src_height, dst_width, dst_height, align_x, align_y)?;
    let height = i32::try_from(dst_height)
        .map_err(|_| CoreError::InvalidGeometry(format!("height {} is too large", dst_height)))?;

    let anchor = cmd.color_mode().filter_kind();
    cmd.filters_mut().insert_before(crop, anchor)?;
    cmd.set_scale(Some(Scale::new(-2, height)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::NoFramePatterns;

    #[test]
    fn test_crop_size_wide_source() {
        assert_eq!(crop_size((4096, 2160), (1920, 1080)).unwrap(), (3840, 2160));
    }

    #[test]
    fn test_crop_size_tall_source() {
        assert_eq!(crop_size((1920, 1440), (16, 9)).unwrap(), (1920, 1080));
    }

    #[test]
    fn test_crop_size_same_aspect() {
        assert_eq!(crop_size((1280, 720), (1920, 1080)).unwrap(), (1280, 720));
    }

    #[test]
    fn test_crop_size_inexact_aspect() {
        let (w, h) = crop_size((5472, 3076), (4096, 2160)).unwrap();
        assert!(w <= 5472 && h <= 3076);
        assert_eq!((h as f64 * 4096.0 / 2160.0).round() as u32, w);
    }

    #[test]
    fn test_crop_size_zero_fails() {
        assert!(matches!(
            crop_size((0, 1080), (16, 9)),
            Err(CoreError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_crop_rect_alignment() {
        let middle = crop_rect(4096, 2160, 1920, 1080, HorizontalAlign::Middle, VerticalAlign::Middle)
            .unwrap();
        assert_eq!(middle, Crop::new(128, 0, 3840, 2160));

        let left = crop_rect(4096, 2160, 1920, 1080, HorizontalAlign::Left, VerticalAlign::Middle)
            .unwrap();
        assert_eq!(left.left, 0);

        let right = crop_rect(4096, 2160, 1920, 1080, HorizontalAlign::Right, VerticalAlign::Middle)
            .unwrap();
        assert_eq!(right.left, 256);

        let bottom = crop_rect(1920, 1440, 16, 9, HorizontalAlign::Middle, VerticalAlign::Bottom)
            .unwrap();
        assert_eq!(bottom, Crop::new(0, 360, 1920, 1080));
    }

    #[test]
    fn test_crop_rect_odd_delta_rounds_half_to_even() {
        let one = crop_rect(1921, 1080, 1920, 1080, HorizontalAlign::Middle, VerticalAlign::Middle)
            .unwrap();
        assert_eq!(one, Crop::new(0, 0, 1920, 1080));

        let three = crop_rect(1920, 1083, 1920, 1080, HorizontalAlign::Middle, VerticalAlign::Middle)
            .unwrap();
        assert_eq!(three, Crop::new(0, 2, 1920, 1080));
    }

    #[test]
    fn test_crop_rect_inexact_aspect() {
        let rect = crop_rect(5472, 3076, 4096, 2160, HorizontalAlign::Middle, VerticalAlign::Middle)
            .unwrap();
        assert_eq!(rect, Crop::new(0, 96, 5471, 2885));
    }

    #[test]
    fn test_fit_height_stops_at_exact_multiple() {
        assert_eq!(fit_height(1920, (16, 9)), Some((1920, 1080)));
        assert_eq!(fit_height(1_000_000_000, (16, 9)), Some((1_000_000_000, 562_500_000)));
        assert_eq!(fit_height(10, (16, 9)), Some((9, 5)));
    }

    fn vf_of(cmd: &TranscodeCommand) -> String {
        let args = cmd.to_tokens_with(&NoFramePatterns).unwrap();
        let i = args.iter().position(|a| a == "-vf").unwrap();
        args[i + 1].clone()
    }

    fn test_cmd() -> TranscodeCommand {
        let mut cmd = TranscodeCommand::new(true);
        cmd.src_file = Some("/tmp/src.mov".into());
        cmd.dst_file = Some("/tmp/dst.mov".into());
        cmd
    }

    #[test]
    fn test_crop_and_scale() {
        let mut cmd = test_cmd();
        crop_and_scale(&mut cmd, 4096, 2160, 1920, 1080, HorizontalAlign::Middle, VerticalAlign::Middle)
            .unwrap();

        let vf = vf_of(&cmd);
        assert!(vf.contains("crop=3840:2160:128:0"));
        assert!(vf.contains(":w=-2:h=1080"));
        assert!(vf.find("crop=").unwrap() < vf.find("zscale=").unwrap());
    }

    #[test]
    fn test_crop_precedes_existing_color_filter() {
        let mut cmd = test_cmd();
        cmd.set_dst_color_space(Some("bt709")).unwrap();
        crop_and_scale(&mut cmd, 4096, 2160, 1920, 1080, HorizontalAlign::Middle, VerticalAlign::Middle)
            .unwrap();

        let vf = vf_of(&cmd);
        assert!(vf.starts_with("crop=3840:2160:128:0,zscale="));
    }
}
