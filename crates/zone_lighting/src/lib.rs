//! # Zone Lighting
//!
//! Ambient lighting transitions for a user moving between nested spatial
//! zones.
//!
//! ## Features
//!
//! - **Zone Priority**: The smallest occupied zone defining an attribute wins
//! - **Smooth Exposure**: Fixed-step exposure animation driven by a host timer
//! - **Lit Mode**: Bloom and tone mapping profiles applied on the first enter and last exit
//! - **Injected Collaborators**: Renderer, timer and entity access are traits
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use zone_lighting::prelude::*;
//!
//! let mut manager = LightingManager::with_renderer(
//!     LightingConfig::default(),
//!     InMemoryRenderConfig::new(),
//!     FrameScheduler::new(),
//! );
//!
//! let overrides = parse_lighting_metadata(r#"{"lighting": {"exposure": 0.8}}"#).ok();
//! manager.entered_zone("courtyard", 42.0, overrides);
//!
//! // Once per frame
//! manager.update(Duration::from_millis(16));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core configuration
pub mod core;

pub mod foundation;
pub mod config;
pub mod render;
pub mod timer;
pub mod zone;
pub mod exposure;
pub mod adapter;

mod manager;

#[cfg(test)]
mod tests;

pub use manager::LightingManager;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        LightingManager,
        adapter::{
            DynamicLightingZone, EntityId, EntityProperties, MetadataError,
            lighting_properties_or_default, parse_lighting_metadata,
        },
        config::{Config, ConfigError},
        core::config::{AnimationConfig, LightingConfig},
        exposure::{ExposureAnimator, TickOutcome},
        foundation::math::{Vec3, ZoneBounds},
        render::{InMemoryRenderConfig, RenderConfigSurface, RenderProfile},
        timer::{FrameScheduler, TimerFacility, TimerHandle},
        zone::{Zone, ZoneProperties, ZoneRegistry},
    };
}
