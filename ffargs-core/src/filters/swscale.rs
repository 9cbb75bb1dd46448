//! Legacy color conversion through swscale's `scale` filter
//!
//! Used when zscale is unavailable. Range and matrix keys carry `in_`/`out_`
//! prefixes and the dimensions are positional.

use std::fmt;

use super::color::{ColorFilter, ColorRange, ColorSettings};
use super::{FilterParams, min_expr, set_or_remove};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwscaleFilter {
    pub settings: ColorSettings,
    extra: Vec<(String, String)>,
}

impl SwscaleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ColorSettings) -> Self {
        Self {
            settings,
            extra: Vec::new(),
        }
    }

    /// Sets a raw scale parameter, or removes it when `value` is `None`.
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
}

impl ColorFilter for SwscaleFilter {
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

// swscale treats 0 as "keep input size", so only positive values get wrapped.
fn dimension(input: &str, value: i32, downscale_only: bool) -> String {
    if downscale_only && value > 0 {
        min_expr(input, value)
    } else {
        value.to_string()
    }
}

impl fmt::Display for SwscaleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.settings.is_empty() && self.extra.is_empty() {
            return Ok(());
        }

        let mut params = FilterParams::new();
        if let Some(scale) = self.settings.scale {
            params = params
                .positional(dimension("iw", scale.width, scale.downscale_only))
                .positional(dimension("ih", scale.height, scale.downscale_only));
        }
        params = params
            .param_opt("in_range", self.settings.src_range.map(ColorRange::as_str))
            .param_opt("out_range", self.settings.dst_range.map(ColorRange::as_str))
            .param_opt(
                "in_color_matrix",
                self.settings.src_matrix.map(|m| m.swscale_name()),
            )
            .param_opt(
                "out_color_matrix",
                self.settings.dst_matrix.map(|m| m.swscale_name()),
            );
        for (key, value) in &self.extra {
            params = params.param(key, value);
        }
        f.write_str(&params.build("scale"))
    }
}
