//! Renderer configuration surface
//!
//! The host renderer exposes its post-processing settings as named
//! configuration blocks under the main view. Lighting only touches bloom
//! and tone mapping, and only through [`RenderConfigSurface`], so the
//! manager can run against a real renderer or an in-memory stand-in.

pub mod profile;

pub use profile::{BloomSettings, BloomThresholdSettings, RenderProfile, ToneMappingSettings};

/// Name of the view whose blocks are edited
pub const MAIN_VIEW: &str = "RenderMainView";

/// Named configuration blocks of the main view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderBlock {
    /// Bloom enable, intensity and size
    Bloom,
    /// Bloom brightness threshold
    BloomThreshold,
    /// Tone mapping enable, curve and exposure
    ToneMapping,
}

impl RenderBlock {
    /// Host name of the block
    pub fn name(self) -> &'static str {
        match self {
            Self::Bloom => "Bloom",
            Self::BloomThreshold => "BloomThreshold",
            Self::ToneMapping => "ToneMapping",
        }
    }
}

/// Read/write access to the renderer's lighting-related blocks
///
/// Implementations only need the per-block accessors; profile application
/// is provided on top of them.
pub trait RenderConfigSurface {
    /// Current bloom block
    fn bloom(&self) -> BloomSettings;

    /// Replace the bloom block
    fn set_bloom(&mut self, bloom: BloomSettings);

    /// Current bloom threshold block
    fn bloom_threshold(&self) -> BloomThresholdSettings;

    /// Replace the bloom threshold block
    fn set_bloom_threshold(&mut self, threshold: BloomThresholdSettings);

    /// Tone mapping enable flag and curve
    fn tone_mapping(&self) -> ToneMappingSettings;

    /// Replace tone mapping enable flag and curve
    ///
    /// Exposure in `settings` is applied only when it is `Some`.
    fn set_tone_mapping(&mut self, settings: ToneMappingSettings);

    /// Current tone mapping exposure
    fn exposure(&self) -> f32;

    /// Write tone mapping exposure
    fn set_exposure(&mut self, exposure: f32);

    /// Write every block of a profile
    fn apply_profile(&mut self, profile: &RenderProfile) {
        self.set_bloom(profile.bloom);
        self.set_bloom_threshold(profile.bloom_threshold);
        self.set_tone_mapping(profile.tone_mapping);
    }
}

/// Renderer stand-in holding the blocks in memory
///
/// Counts exposure writes so callers can observe animation activity.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRenderConfig {
    bloom: BloomSettings,
    bloom_threshold: BloomThresholdSettings,
    tone_mapping: ToneMappingSettings,
    exposure: f32,
    exposure_writes: usize,
}

impl InMemoryRenderConfig {
    /// Create a surface with host defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface starting at a given exposure
    pub fn with_exposure(exposure: f32) -> Self {
        Self {
            exposure,
            ..Self::default()
        }
    }

    /// Number of exposure writes since creation
    pub fn exposure_writes(&self) -> usize {
        self.exposure_writes
    }
}

impl RenderConfigSurface for InMemoryRenderConfig {
    fn bloom(&self) -> BloomSettings {
        self.bloom
    }

    fn set_bloom(&mut self, bloom: BloomSettings) {
        self.bloom = bloom;
    }

    fn bloom_threshold(&self) -> BloomThresholdSettings {
        self.bloom_threshold
    }

    fn set_bloom_threshold(&mut self, threshold: BloomThresholdSettings) {
        self.bloom_threshold = threshold;
    }

    fn tone_mapping(&self) -> ToneMappingSettings {
        ToneMappingSettings {
            exposure: Some(self.exposure),
            ..self.tone_mapping
        }
    }

    fn set_tone_mapping(&mut self, settings: ToneMappingSettings) {
        self.tone_mapping.enabled = settings.enabled;
        self.tone_mapping.curve = settings.curve;
        if let Some(exposure) = settings.exposure {
            self.set_exposure(exposure);
        }
    }

    fn exposure(&self) -> f32 {
        self.exposure
    }

    fn set_exposure(&mut self, exposure: f32) {
        log::trace!("{}/{} exposure = {}", MAIN_VIEW, RenderBlock::ToneMapping.name(), exposure);
        self.exposure = exposure;
        self.exposure_writes += 1;
    }
}
