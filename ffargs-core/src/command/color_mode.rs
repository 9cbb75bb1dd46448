//! Color filter mode and switching between modes

use std::fmt;

use log::info;

use crate::error::{CoreError, CoreResult};
use crate::filters::{
    ColorFilter, Filter, FilterChain, FilterKind, SwscaleFilter, ZscaleFilter,
};

/// Which filter performs scaling and color conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Zscale,
    Swscale,
}

impl ColorMode {
    pub fn from_use_zscale(use_zscale: bool) -> Self {
        if use_zscale {
            ColorMode::Zscale
        } else {
            ColorMode::Swscale
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorMode::Zscale => "zscale",
            ColorMode::Swscale => "swscale",
        }
    }

    pub(crate) fn filter_kind(self) -> FilterKind {
        match self {
            ColorMode::Zscale => FilterKind::Zscale,
            ColorMode::Swscale => FilterKind::Swscale,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Moves the color state in `chain` from the `from` filter to a new `to` filter.
///
/// The logical settings are read into a snapshot, the old filter is removed,
/// and the snapshot is applied to a new filter of the other kind placed
/// at the same position in the chain. If no color filter exists, none is
/// created. Raw extra parameters have no translation, so their presence
/// aborts the switch before anything is changed.
pub(crate) fn switch_color_mode(
    chain: &mut FilterChain,
    from: ColorMode,
    to: ColorMode,
) -> CoreResult<()> {
    if from == to {
        return Ok(());
    }

    let current: Option<&dyn ColorFilter> = match from {
        ColorMode::Zscale => chain.find::<ZscaleFilter>().map(|f| f as &dyn ColorFilter),
        ColorMode::Swscale => chain.find::<SwscaleFilter>().map(|f| f as &dyn ColorFilter),
    };
    if let Some(filter) = current {
        if !filter.extra_params().is_empty() {
            let keys: Vec<&str> = filter.extra_params().iter().map(|(k, _)| k.as_str()).collect();
            return Err(CoreError::ModeSwitch(format!(
                "{} parameters [{}] have no {} equivalent",
                from,
                keys.join(", "),
                to
            )));
        }
    }
    let Some(settings) = current.map(|f| *f.settings()) else {
        info!("Switched color filter mode from {} to {}", from, to);
        return Ok(());
    };

    let replacement: Filter = match to {
        ColorMode::Zscale => ZscaleFilter::with_settings(settings).into(),
        ColorMode::Swscale => SwscaleFilter::with_settings(settings).into(),
    };
    chain.substitute(from.filter_kind(), replacement)?;

    info!("Switched color filter mode from {} to {}", from, to);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{ColorRange, ColorSpace, Crop, Scale};

    #[test]
    fn test_switch_preserves_settings() {
        let mut chain = FilterChain::new();
        {
            let zscale = chain.find_or_create::<ZscaleFilter>();
            zscale.settings.scale = Some(Scale::downscale_only(-2, 1080));
            zscale.settings.dst_range = Some(ColorRange::Limited);
            zscale.settings.dst_matrix = Some(ColorSpace::Bt709);
        }
        let before = *chain.find::<ZscaleFilter>().unwrap().settings();

        switch_color_mode(&mut chain, ColorMode::Zscale, ColorMode::Swscale).unwrap();
        assert!(chain.find::<ZscaleFilter>().is_none());
        assert_eq!(chain.find::<SwscaleFilter>().unwrap().settings, before);

        switch_color_mode(&mut chain, ColorMode::Swscale, ColorMode::Zscale).unwrap();
        assert_eq!(chain.find::<ZscaleFilter>().unwrap().settings, before);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_switch_keeps_chain_position() {
        let mut chain = FilterChain::new();
        chain.find_or_create::<ZscaleFilter>().settings.scale = Some(Scale::new(1280, 720));
        chain.replace(Crop::new(0, 0, 100, 100));

        switch_color_mode(&mut chain, ColorMode::Zscale, ColorMode::Swscale).unwrap();
        assert_eq!(
            chain.build(),
            Some("scale=1280:720,crop=100:100:0:0".to_string())
        );
    }

    #[test]
    fn test_switch_without_filter_creates_nothing() {
        let mut chain = FilterChain::new();
        chain.replace(Crop::new(0, 0, 10, 10));
        switch_color_mode(&mut chain, ColorMode::Zscale, ColorMode::Swscale).unwrap();
        assert_eq!(chain.len(), 1);
        assert!(chain.find::<SwscaleFilter>().is_none());
    }

    #[test]
    fn test_switch_with_extra_params_fails_untouched() {
        let mut chain = FilterChain::new();
        chain.find_or_create::<ZscaleFilter>().set_param("primaries", Some("709"));
        let before = chain.clone();

        let result = switch_color_mode(&mut chain, ColorMode::Zscale, ColorMode::Swscale);
        assert!(matches!(result, Err(CoreError::ModeSwitch(_))));
        assert_eq!(chain, before);
    }

    #[test]
    fn test_same_mode_is_noop() {
        let mut chain = FilterChain::new();
        chain.find_or_create::<SwscaleFilter>();
        let before = chain.clone();
        switch_color_mode(&mut chain, ColorMode::Swscale, ColorMode::Swscale).unwrap();
        assert_eq!(chain, before);
    }
}
