//! # Lighting Configuration
//!
//! Tunables for the exposure animation plus the render profiles written on
//! lit-mode transitions. Everything has a default matching the host
//! scripting environment, so an empty file is a valid configuration.

use serde::{Serialize, Deserialize};
use std::time::Duration;

use crate::render::RenderProfile;

pub use crate::config::{Config, ConfigError};

/// Longest accepted tick interval in milliseconds
pub const MAX_FRAME_INTERVAL_MS: f32 = 60_000.0;

/// # Exposure Animation Configuration
///
/// Fixed-step convergence parameters. The loop moves exposure by
/// `exposure_step` every `frame_interval_ms` and snaps once within
/// `snap_tolerance_steps * exposure_step` of the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Milliseconds between ticks
    pub frame_interval_ms: f32,
    /// Exposure change per tick
    pub exposure_step: f32,
    /// Snap distance, in steps
    pub snap_tolerance_steps: f32,
}

impl AnimationConfig {
    /// Tick interval as a `Duration`
    ///
    /// Out-of-range values are clamped to [`MAX_FRAME_INTERVAL_MS`].
    pub fn frame_interval(&self) -> Duration {
        let ms = self.frame_interval_ms.clamp(0.0, MAX_FRAME_INTERVAL_MS);
        Duration::try_from_secs_f32(ms / 1000.0)
            .unwrap_or_else(|_| Duration::from_secs_f32(MAX_FRAME_INTERVAL_MS / 1000.0))
    }

    /// Absolute snap distance
    pub fn tolerance(&self) -> f32 {
        self.exposure_step * self.snap_tolerance_steps
    }

    /// Validate the animation parameters
    pub fn validate(&self) -> Result<(), String> {
        if !self.frame_interval_ms.is_finite() || self.frame_interval_ms <= 0.0 {
            return Err(format!("Frame interval must be positive, got {}", self.frame_interval_ms));
        }
        if self.frame_interval_ms > MAX_FRAME_INTERVAL_MS {
            return Err(format!(
                "Frame interval must not exceed {} ms, got {}",
                MAX_FRAME_INTERVAL_MS, self.frame_interval_ms
            ));
        }
        if !self.exposure_step.is_finite() || self.exposure_step <= 0.0 {
            return Err(format!("Exposure step must be positive, got {}", self.exposure_step));
        }
        if !self.snap_tolerance_steps.is_finite() || self.snap_tolerance_steps <= 0.0 {
            return Err(format!(
                "Snap tolerance must be positive, got {}",
                self.snap_tolerance_steps
            ));
        }
        Ok(())
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 1000.0 / 60.0,
            exposure_step: 0.02,
            snap_tolerance_steps: 2.0,
        }
    }
}

/// # Lighting Configuration
///
/// Top-level configuration for the lighting manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Log level used by binaries that initialise logging from this config
    pub log_level: String,
    /// Zone property holding the exposure override
    pub exposure_key: String,
    /// Exposure used when no occupied zone overrides it
    pub default_exposure: f32,
    /// Exposure animation tunables
    pub animation: AnimationConfig,
    /// Profile applied when the first zone is entered
    pub lit_profile: RenderProfile,
    /// Profile applied when the last zone is left
    pub unlit_profile: RenderProfile,
}

impl LightingConfig {
    /// Create a configuration with host defaults
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            exposure_key: "exposure".to_string(),
            default_exposure: 0.0,
            animation: AnimationConfig::default(),
            lit_profile: RenderProfile::lit(),
            unlit_profile: RenderProfile::unlit(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set animation parameters
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Set the exposure used outside any override
    pub fn with_default_exposure(mut self, exposure: f32) -> Self {
        self.default_exposure = exposure;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.animation.validate()?;

        if self.exposure_key.is_empty() {
            return Err("Exposure key cannot be empty".to_string());
        }
        if !self.default_exposure.is_finite() {
            return Err(format!("Default exposure must be finite, got {}", self.default_exposure));
        }

        Ok(())
    }

    /// Load and validate a configuration file
    pub fn load_validated(path: &str) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for LightingConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_host_cadence() {
        let config = LightingConfig::default();

        assert!(config.validate().is_ok());
        assert!((config.animation.exposure_step - 0.02).abs() < f32::EPSILON);
        assert!((config.animation.tolerance() - 0.04).abs() < f32::EPSILON);
        assert_eq!(config.animation.frame_interval().as_micros(), 16_666);
        assert_eq!(config.exposure_key, "exposure");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let text = r#"
            log_level = "debug"

            [animation]
            exposure_step = 0.05
        "#;
        let config = LightingConfig::parse_str("lighting.toml", text).unwrap();

        assert_eq!(config.log_level, "debug");
        assert!((config.animation.exposure_step - 0.05).abs() < f32::EPSILON);
        assert!((config.animation.snap_tolerance_steps - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.lit_profile, RenderProfile::lit());
    }

    #[test]
    fn test_ron_round_trip() {
        let original = LightingConfig::new().with_default_exposure(0.25);
        let text = ron::ser::to_string(&original).unwrap();
        let parsed = LightingConfig::parse_str("lighting.ron", &text).unwrap();

        assert_eq!(parsed, original);
    }

    #[test]
    fn test_unsupported_format() {
        let result = LightingConfig::parse_str("lighting.json", "{}");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_huge_frame_interval_rejected_and_clamped() {
        let config = LightingConfig::parse_str("lighting.toml", "[animation]\nframe_interval_ms = 1e30").unwrap();

        assert!(config.validate().is_err());
        assert_eq!(config.animation.frame_interval(), Duration::from_secs(60));

        // Construction must not panic even when validation was skipped
        let manager: crate::LightingManager<crate::render::InMemoryRenderConfig, _> =
            crate::LightingManager::new(config, crate::timer::FrameScheduler::new());
        assert!(!manager.is_converging());
    }

    #[test]
    fn test_partial_profile_block_uses_defaults() {
        let text = r#"
            [lit_profile.bloom]
            intensity = 0.5

            [unlit_profile.tone_mapping]
            curve = 2
        "#;
        let config = LightingConfig::parse_str("lighting.toml", text).unwrap();

        assert!((config.lit_profile.bloom.intensity - 0.5).abs() < f32::EPSILON);
        assert!(!config.lit_profile.bloom.enabled);
        assert_eq!(config.lit_profile.bloom_threshold, crate::render::BloomThresholdSettings::default());
        assert_eq!(config.unlit_profile.tone_mapping.curve, 2);
        assert!(config.unlit_profile.tone_mapping.enabled);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir();
        let original = LightingConfig::new()
            .with_log_level("warn")
            .with_default_exposure(-0.5);

        for name in ["zone_lighting_round_trip.toml", "zone_lighting_round_trip.ron"] {
            let path = dir.join(format!("{}-{}", std::process::id(), name));
            let path = path.to_str().unwrap();

            original.save_to_file(path).unwrap();
            let loaded = LightingConfig::load_validated(path).unwrap();
            std::fs::remove_file(path).unwrap();

            assert_eq!(loaded, original);
            assert_eq!(loaded.log_level, "warn");
        }
    }

    #[test]
    fn test_save_unsupported_format() {
        let result = LightingConfig::new().save_to_file("lighting.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validate_rejects_zero_step() {
        let config = LightingConfig::new().with_animation(AnimationConfig {
            exposure_step: 0.0,
            ..AnimationConfig::default()
        });
        assert!(config.validate().is_err());
    }
}
