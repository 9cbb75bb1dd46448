//! libx264 and libx265 encoder profiles

use serde::{Deserialize, Serialize};

use super::Codec;
use super::preset::VcPreset;
use crate::args::ArgPair;
use crate::error::{CoreError, CoreResult};

/// x265 tuning added on top of the bitrate in near-lossless mode.
pub const NEAR_LOSSLESS_X265_PARAMS: &[&str] = &[
    "cu-lossless=1",
    "psy-rd=1.0",
    "psy-rdoq=0",
    "rdoq-level=0",
    "aq-mode=0",
];

/// H.264 through libx264.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Avc {
    #[serde(default)]
    pub preset: Option<VcPreset>,
}

impl Avc {
    pub fn new(preset: Option<VcPreset>) -> Self {
        Self { preset }
    }
}

impl Codec for Avc {
    fn args(&self) -> CoreResult<Vec<ArgPair>> {
        let mut args = vec![ArgPair::new("-vcodec", "libx264")];
        if let Some(preset) = self.preset {
            args.push(ArgPair::new("-preset", preset.as_str()));
        }
        Ok(args)
    }
}

/// H.265 through libx265.
///
/// Three quality modes: lossless, near-lossless (bitrate plus tuning that
/// lets x265 code blocks losslessly), and plain bitrate-targeted. Options are
/// only checked when the arguments are requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hevc {
    pub preset: Option<VcPreset>,
    pub lossless: bool,
    pub near_lossless: bool,
    /// Target bitrate in megabits per second.
    pub mbps: Option<f64>,
}

impl Hevc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lossless() -> Self {
        Self {
            lossless: true,
            ..Self::default()
        }
    }

    pub fn near_lossless(mbps: f64) -> Self {
        Self {
            near_lossless: true,
            mbps: Some(mbps),
            ..Self::default()
        }
    }

    pub fn with_preset(mut self, preset: VcPreset) -> Self {
        self.preset = Some(preset);
        self
    }

    /// The preset that will be emitted, if any.
    ///
    /// Without an explicit choice, lossless encodes as fast as possible
    /// and near-lossless as slow as possible.
    pub fn effective_preset(&self) -> Option<VcPreset> {
        self.preset.or(if self.lossless {
            Some(VcPreset::FASTEST)
        } else if self.near_lossless {
            Some(VcPreset::SLOWEST)
        } else {
            None
        })
    }

    fn validate(&self) -> CoreResult<()> {
        if self.lossless && self.near_lossless {
            return Err(CoreError::HevcLosslessAndNearLossless);
        }
        if self.lossless && self.mbps.is_some() {
            return Err(CoreError::HevcBitrateSpecifiedForLossless);
        }
        if self.near_lossless && self.mbps.is_none() {
            return Err(CoreError::HevcBitrateNotSpecified);
        }
        Ok(())
    }

    fn x265_params(&self) -> Vec<String> {
        let mut params = Vec::new();
        if self.lossless {
            params.push("lossless=1".to_string());
        }
        if let Some(mbps) = self.mbps {
            params.push(format!("bitrate={}", mbps_to_kbps(mbps)));
        }
        if self.near_lossless {
            params.extend(NEAR_LOSSLESS_X265_PARAMS.iter().map(|p| p.to_string()));
        }
        params
    }
}

impl Codec for Hevc {
    fn args(&self) -> CoreResult<Vec<ArgPair>> {
        self.validate()?;

        let mut args = vec![ArgPair::new("-vcodec", "libx265")];
        if let Some(preset) = self.effective_preset() {
            args.push(ArgPair::new("-preset", preset.as_str()));
        }
        let params = self.x265_params();
        if !params.is_empty() {
            args.push(ArgPair::new("-x265-params", params.join(":")));
        }
        Ok(args)
    }
}

/// Megabits per second to the integer kilobits x265 expects.
fn mbps_to_kbps(mbps: f64) -> i64 {
    (mbps * 1000.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(codec: &impl Codec) -> Vec<String> {
        let mut out = Vec::new();
        for pair in codec.args().unwrap() {
            pair.push_into(&mut out);
        }
        out
    }

    #[test]
    fn test_avc() {
        assert_eq!(rendered(&Avc::default()), vec!["-vcodec", "libx264"]);
        assert_eq!(
            rendered(&Avc::new(Some(VcPreset::Slow))),
            vec!["-vcodec", "libx264", "-preset", "slow"]
        );
    }

    #[test]
    fn test_hevc_plain() {
        assert_eq!(rendered(&Hevc::new()), vec!["-vcodec", "libx265"]);
    }

    #[test]
    fn test_hevc_lossless_defaults_to_fastest() {
        assert_eq!(
            rendered(&Hevc::lossless()),
            vec!["-vcodec", "libx265", "-preset", "ultrafast", "-x265-params", "lossless=1"]
        );
    }

    #[test]
    fn test_hevc_lossless_keeps_explicit_preset() {
        let codec = Hevc::lossless().with_preset(VcPreset::Medium);
        assert!(rendered(&codec).contains(&"medium".to_string()));
    }

    #[test]
    fn test_hevc_near_lossless() {
        let args = rendered(&Hevc::near_lossless(100.0));
        assert_eq!(&args[..4], ["-vcodec", "libx265", "-preset", "placebo"]);
        assert_eq!(args[4], "-x265-params");
        assert_eq!(
            args[5],
            "bitrate=100000:cu-lossless=1:psy-rd=1.0:psy-rdoq=0:rdoq-level=0:aq-mode=0"
        );
    }

    #[test]
    fn test_hevc_bitrate_targeted() {
        let codec = Hevc {
            mbps: Some(12.3456),
            ..Hevc::default()
        };
        assert_eq!(
            rendered(&codec),
            vec!["-vcodec", "libx265", "-x265-params", "bitrate=12346"]
        );
    }

    #[test]
    fn test_hevc_lossless_with_bitrate_fails() {
        let codec = Hevc {
            lossless: true,
            mbps: Some(10.0),
            ..Hevc::default()
        };
        assert!(matches!(
            codec.args(),
            Err(CoreError::HevcBitrateSpecifiedForLossless)
        ));
    }

    #[test]
    fn test_hevc_lossless_and_near_lossless_fails() {
        let codec = Hevc {
            lossless: true,
            near_lossless: true,
            ..Hevc::default()
        };
        assert!(matches!(
            codec.args(),
            Err(CoreError::HevcLosslessAndNearLossless)
        ));
    }

    #[test]
    fn test_hevc_near_lossless_without_bitrate_fails() {
        let codec = Hevc {
            near_lossless: true,
            ..Hevc::default()
        };
        assert!(matches!(codec.args(), Err(CoreError::HevcBitrateNotSpecified)));
    }

    #[test]
    fn test_mbps_rounding() {
        assert_eq!(mbps_to_kbps(0.0004), 0);
        assert_eq!(mbps_to_kbps(1.5), 1500);
        assert_eq!(mbps_to_kbps(2.0006), 2001);
    }
}
