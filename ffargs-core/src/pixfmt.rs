//! Pixel format name heuristics
//!
//! ffmpeg reports each pixel format with a component count and a total
//! bits-per-pixel figure. Bits per channel are not reported, so they are
//! guessed from the name: a numeric suffix (`yuv420p10le`), the chroma
//! subsampling code (`422`), or both. Formats the guess gets wrong go into
//! a small table of known depths.

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

static DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("digit regex should compile"));

static ENDING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)(?:le|be|$)").expect("ending regex should compile"));

const KNOWN_DEPTHS: &[(&str, u32)] = &[("yuv410p", 8)];

const RGB_FAMILIES: [&str; 3] = ["rgb", "bgr", "gbr"];

/// First standalone run of exactly three digits in 0..=4, like `420` in
/// `yuv420p10le`.
fn three_digits(name: &str) -> Option<&str> {
    DIGITS_RE
        .find_iter(name)
        .map(|m| m.as_str())
        .find(|run| run.len() == 3 && run.bytes().all(|b| (b'0'..=b'4').contains(&b)))
}

/// Chroma subsampling code of a pixel format: `"444"`, `"422"`, `"420"`...
///
/// RGB-family formats have no subsampling and report `"444"`.
///
/// ```
/// use ffargs_core::pixfmt::pixfmt_subsampling;
///
/// assert_eq!(pixfmt_subsampling("yuv422p10le").as_deref(), Some("422"));
/// assert_eq!(pixfmt_subsampling("gbrp12le").as_deref(), Some("444"));
/// assert_eq!(pixfmt_subsampling("gray"), None);
/// ```
pub fn pixfmt_subsampling(name: &str) -> Option<String> {
    if let Some(digits) = three_digits(name) {
        return Some(digits.to_string());
    }
    if RGB_FAMILIES.iter().any(|family| name.contains(family)) {
        return Some("444".to_string());
    }
    None
}

fn ending(name: &str) -> Option<u32> {
    ENDING_RE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn int_if_round(value: f64) -> Option<u32> {
    let truncated = value.trunc();
    ((value - truncated).abs() < 1e-7 && truncated >= 0.0).then_some(truncated as u32)
}

/// Share of samples kept by the subsampling, relative to 4:4:4.
///
/// An alpha plane is assumed to always be at full resolution.
fn subsampling_factor(name: &str, components: u32) -> Option<f64> {
    if !(3..=4).contains(&components) {
        return None;
    }
    let code = pixfmt_subsampling(name)?;
    let mut kept: u32 = code.bytes().map(|b| u32::from(b - b'0')).sum();
    let mut total = 12;
    if components == 4 {
        kept += 4;
        total += 4;
    }
    Some(f64::from(kept) / f64::from(total))
}

fn guess_from_suffix(name: &str, components: u32, bits_per_pixel: u32) -> Option<u32> {
    let suffix = ending(name)?;
    if suffix == bits_per_pixel {
        // rgb24: 24 is the pixel total, 8+8+8
        return int_if_round(f64::from(bits_per_pixel) / f64::from(components));
    }
    let factor = subsampling_factor(name, components).unwrap_or(1.0);
    let expected = f64::from(suffix) * f64::from(components) * factor;
    ((expected - f64::from(bits_per_pixel)).abs() < 1e-7).then_some(suffix)
}

fn guess_from_subsampling(name: &str, components: u32, bits_per_pixel: u32) -> Option<u32> {
    let factor = subsampling_factor(name, components)?;
    int_if_round(f64::from(bits_per_pixel) / f64::from(components) / factor)
}

/// Estimated bits per color channel of a decoded pixel format.
///
/// `components` and `bits_per_pixel` are the `NB_COMPONENTS` and
/// `BITS_PER_PIXEL` columns of `ffmpeg -pix_fmts`. Returns `None`, with a
/// warning, when no heuristic applies.
pub fn guess_bpc(name: &str, components: u32, bits_per_pixel: u32) -> Option<u32> {
    let known = KNOWN_DEPTHS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, depth)| *depth);

    let guess = known
        .filter(|depth| *depth != 0)
        .or_else(|| guess_from_suffix(name, components, bits_per_pixel).filter(|d| *d != 0))
        .or_else(|| guess_from_subsampling(name, components, bits_per_pixel).filter(|d| *d != 0));

    if guess.is_none() {
        warn!("Color depth of {} format is unknown", name);
    }
    guess
}
