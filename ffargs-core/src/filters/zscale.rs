//! High-quality color conversion through the zimg-backed `zscale` filter

use std::fmt;

use super::color::{ColorFilter, ColorRange, ColorSettings};
use super::{FilterParams, min_expr, set_or_remove};

const RESAMPLE_FILTER: &str = "spline36";
const DITHER: &str = "error_diffusion";

/// `zscale=` filter.
///
/// Renders to an empty string when neither a scale nor any parameter is set.
/// Otherwise the parameters come out in a fixed order and end with the
/// dither setting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZscaleFilter {
    pub settings: ColorSettings,
    extra: Vec<(String, String)>,
}

impl ZscaleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ColorSettings) -> Self {
        Self {
            settings,
            extra: Vec::new(),
        }
    }

    /// Sets a raw zscale parameter, or removes it when `value` is `None`.
    pub fn set_param(&mut self, key: &str, value: Option<&str>) {
        set_or_remove(&mut self.extra, key, value.map(str::to_string));
    }

    pub fn src_range_full(&self) -> Option<bool> {
        ColorRange::is_full(self.settings.src_range)
    }

    pub fn set_src_range_full(&mut self, full: Option<bool>) {
        self.settings.src_range = ColorRange::from_full(full);
    }

    pub fn dst_range_full(&self) -> Option<bool> {
        ColorRange::is_full(self.settings.dst_range)
    }

    pub fn set_dst_range_full(&mut self, full: Option<bool>) {
        self.settings.dst_range = ColorRange::from_full(full);
    }

    /// zscale's name for the destination matrix.
    pub fn dst_matrix_name(&self) -> Option<&'static str> {
        self.settings.dst_matrix.map(|m| m.zscale_name())
    }

    pub fn src_matrix_name(&self) -> Option<&'static str> {
        self.settings.src_matrix.map(|m| m.zscale_name())
    }
}

impl ColorFilter for ZscaleFilter {
    fn settings(&self) -> &ColorSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut ColorSettings {
        &mut self.settings
    }

    fn extra_params(&self) -> &[(String, String)] {
        &self.extra
    }
}

fn dimension(input: &str, value: i32, downscale_only: bool) -> String {
    if downscale_only && value >= 0 {
        min_expr(input, value)
    } else {
        value.to_string()
    }
}

impl fmt::Display for ZscaleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.settings.is_empty() && self.extra.is_empty() {
            return Ok(());
        }

        let mut params = FilterParams::new();
        if let Some(scale) = self.settings.scale {
            params = params
                .param("filter", RESAMPLE_FILTER)
                .param("w", dimension("iw", scale.width, scale.downscale_only))
                .param("h", dimension("ih", scale.height, scale.downscale_only));
        }
        params = params
            .param_opt("rangein", self.settings.src_range.map(ColorRange::as_str))
            .param_opt("range", self.settings.dst_range.map(ColorRange::as_str))
            .param_opt("matrixin", self.src_matrix_name())
            .param_opt("matrix", self.dst_matrix_name());
        for (key, value) in &self.extra {
            params = params.param(key, value);
        }
        let expr = params.param("dither", DITHER).build("zscale");
        f.write_str(&expr)
    }
}
