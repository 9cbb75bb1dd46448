//! Apple ProRes through the prores_ks encoder

use serde::{Deserialize, Serialize};

use super::Codec;
use crate::args::ArgPair;
use crate::error::CoreResult;

/// ProRes profile, numbered as `-profile:v` expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProresProfile {
    /// ProRes 422 Proxy
    Proxy = 0,
    /// ProRes 422 LT
    Lt = 1,
    /// ProRes 422
    #[default]
    Normal = 2,
    /// ProRes 422 HQ
    Hq = 3,
    /// ProRes 4444
    Four = 4,
    /// ProRes 4444 XQ
    Xq = 5,
}

impl ProresProfile {
    pub fn number(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prores {
    pub profile: ProresProfile,
    pub qscale: Option<u8>,
    /// Tag the stream with Apple's vendor id so players treat it as native.
    pub spoof_vendor: bool,
}

impl Prores {
    pub fn new(profile: ProresProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }
}

impl Codec for Prores {
    fn args(&self) -> CoreResult<Vec<ArgPair>> {
        let mut args = vec![ArgPair::new("-vcodec", "prores_ks")];
        if self.spoof_vendor {
            args.push(ArgPair::new("-vendor", "apl0"));
        }
        if let Some(qscale) = self.qscale {
            args.push(ArgPair::new("-q:v", qscale.to_string()));
        }
        args.push(ArgPair::new("-profile:v", self.profile.number().to_string()));
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let args = Prores::default().args().unwrap();
        assert_eq!(
            args,
            vec![
                ArgPair::new("-vcodec", "prores_ks"),
                ArgPair::new("-profile:v", "2"),
            ]
        );
    }

    #[test]
    fn test_all_options() {
        let codec = Prores {
            profile: ProresProfile::Xq,
            qscale: Some(9),
            spoof_vendor: true,
        };
        let flags: Vec<String> = codec.args().unwrap().iter().map(|p| p.to_string()).collect();
        assert_eq!(
            flags,
            vec!["-vcodec prores_ks", "-vendor apl0", "-q:v 9", "-profile:v 5"]
        );
    }
}
