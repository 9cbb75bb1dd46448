// ============================================================================
// ffargs-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for BuilderConfig
//
// Fluent construction of BuilderConfig. Every field starts at its default,
// so callers only name what they change.

use super::BuilderConfig;

/// Builder for creating BuilderConfig instances.
#[derive(Debug, Clone, Default)]
pub struct BuilderConfigBuilder {
    config: BuilderConfig,
}

impl BuilderConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the program token.
    #[must_use]
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.config.program = program.into();
        self
    }

    /// Sets the initial color filter mode.
    #[must_use]
    pub fn use_zscale(mut self, use_zscale: bool) -> Self {
        self.config.use_zscale = use_zscale;
        self
    }

    #[must_use]
    pub fn sws_flags(mut self, flags: impl Into<String>) -> Self {
        self.config.sws_flags = flags.into();
        self
    }

    #[must_use]
    pub fn movflags(mut self, flags: impl Into<String>) -> Self {
        self.config.movflags = flags.into();
        self
    }

    /// Builds the BuilderConfig instance.
    pub fn build(self) -> BuilderConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_MOVFLAGS, DEFAULT_PROGRAM};

    #[test]
    fn test_builder_defaults() {
        let config = BuilderConfigBuilder::new().build();
        assert_eq!(config, BuilderConfig::default());
        assert_eq!(config.program, DEFAULT_PROGRAM);
        assert_eq!(config.movflags, DEFAULT_MOVFLAGS);
        assert!(config.use_zscale);
    }

    #[test]
    fn test_builder_overrides() {
        let config = BuilderConfigBuilder::new()
            .program("ffmpeg-7")
            .use_zscale(false)
            .sws_flags("bicubic")
            .movflags("+faststart")
            .build();
        assert_eq!(config.program, "ffmpeg-7");
        assert!(!config.use_zscale);
        assert_eq!(config.sws_flags, "bicubic");
        assert_eq!(config.movflags, "+faststart");
    }
}
