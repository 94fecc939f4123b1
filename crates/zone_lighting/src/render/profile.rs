//! Render profiles applied on lit-mode transitions

use serde::{Deserialize, Serialize};

/// Bloom block settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomSettings {
    /// Whether bloom is enabled
    pub enabled: bool,
    /// Bloom intensity
    pub intensity: f32,
    /// Bloom kernel size
    pub size: f32,
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 0.0,
            size: 0.25,
        }
    }
}

/// Bloom threshold block settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomThresholdSettings {
    /// Brightness above which pixels bloom
    pub threshold: f32,
}

impl Default for BloomThresholdSettings {
    fn default() -> Self {
        Self { threshold: 1.0 }
    }
}

/// Tone mapping block settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneMappingSettings {
    /// Whether tone mapping is enabled
    pub enabled: bool,
    /// Tone curve index
    pub curve: u32,
    /// Exposure to write, `None` leaves the current exposure alone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure: Option<f32>,
}

impl Default for ToneMappingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            curve: 1,
            exposure: None,
        }
    }
}

/// A full set of block values written in one go
///
/// When deserialized, omitted blocks and fields take the block defaults
/// (the host's unlit values), not the preset being overridden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderProfile {
    /// Bloom block
    pub bloom: BloomSettings,
    /// Bloom threshold block
    pub bloom_threshold: BloomThresholdSettings,
    /// Tone mapping block
    pub tone_mapping: ToneMappingSettings,
}

impl RenderProfile {
    /// Profile used while the user is inside at least one lighting zone
    ///
    /// Exposure is left to the animator.
    pub fn lit() -> Self {
        Self {
            bloom: BloomSettings {
                enabled: true,
                intensity: 1.0,
                size: 0.7,
            },
            bloom_threshold: BloomThresholdSettings { threshold: 0.0 },
            tone_mapping: ToneMappingSettings {
                enabled: true,
                curve: 1,
                exposure: None,
            },
        }
    }

    /// Host defaults restored once the user leaves the last zone
    pub fn unlit() -> Self {
        Self {
            bloom: BloomSettings::default(),
            bloom_threshold: BloomThresholdSettings::default(),
            tone_mapping: ToneMappingSettings {
                exposure: Some(0.0),
                ..ToneMappingSettings::default()
            },
        }
    }
}
