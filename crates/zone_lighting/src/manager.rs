//! Lighting manager
//!
//! Owns the zone registry, the exposure animator and the injected host
//! collaborators. Zone enter/exit events are the only mutation entry
//! points; renderer configuration is the only output.
//!
//! The embedding application constructs one manager and keeps it for as
//! long as zone scripts can fire. All calls happen on the host's single
//! event thread.

use std::time::Duration;

use crate::core::config::LightingConfig;
use crate::exposure::{ExposureAnimator, TickOutcome};
use crate::render::RenderConfigSurface;
use crate::timer::{TimerFacility, TimerHandle};
use crate::zone::{ExitOutcome, Zone, ZoneProperties, ZoneRegistry};

/// Aggregates occupied zones and drives renderer lighting from them
pub struct LightingManager<R: RenderConfigSurface, T: TimerFacility> {
    config: LightingConfig,
    registry: ZoneRegistry,
    animator: ExposureAnimator,
    renderer: Option<R>,
    timer: T,
}

impl<R: RenderConfigSurface, T: TimerFacility> LightingManager<R, T> {
    /// Create a manager with no renderer attached yet
    pub fn new(config: LightingConfig, timer: T) -> Self {
        let animator = ExposureAnimator::new(&config.animation);
        Self {
            config,
            registry: ZoneRegistry::new(),
            animator,
            renderer: None,
            timer,
        }
    }

    /// Create a manager with a renderer attached
    pub fn with_renderer(config: LightingConfig, renderer: R, timer: T) -> Self {
        let mut manager = Self::new(config, timer);
        manager.renderer = Some(renderer);
        manager
    }

    /// Attach the renderer once the host has initialised it
    ///
    /// Zones already occupied are applied immediately.
    pub fn attach_renderer(&mut self, renderer: R) {
        self.renderer = Some(renderer);
        log::info!("Renderer attached to lighting manager");

        if !self.registry.is_empty() {
            if let Some(renderer) = self.renderer.as_mut() {
                renderer.apply_profile(&self.config.lit_profile);
            }
            self.recompute();
        }
    }

    /// Detach the renderer, stopping any animation
    pub fn detach_renderer(&mut self) -> Option<R> {
        self.animator.stop(&mut self.timer);
        let renderer = self.renderer.take();
        if renderer.is_some() {
            log::info!("Renderer detached from lighting manager");
        }
        renderer
    }

    /// The user entered a zone
    ///
    /// Re-entering a zone replaces its previous registration. Missing
    /// properties count as a zone with no overrides.
    pub fn entered_zone(&mut self, id: impl Into<String>, size: f32, properties: Option<ZoneProperties>) {
        if self.registry.is_empty() {
            log::info!("Entering lit mode");
            if let Some(renderer) = self.renderer.as_mut() {
                renderer.apply_profile(&self.config.lit_profile);
            }
        }

        let zone = Zone::new(id, size, properties.unwrap_or_default());
        let outcome = self.registry.enter(zone);
        if outcome.replaced {
            log::debug!("Replaced existing zone registration");
        }

        self.recompute();
    }

    /// The user left a zone
    ///
    /// Leaving an unknown zone does nothing.
    pub fn exited_zone(&mut self, id: &str) {
        match self.registry.exit(id) {
            ExitOutcome::NotPresent => {
                log::trace!("Exit for unknown zone {} ignored", id);
            }
            ExitOutcome::Removed => self.recompute(),
            ExitOutcome::BecameEmpty => {
                log::info!("Leaving lit mode");
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.apply_profile(&self.config.unlit_profile);
                }
                self.animator.stop(&mut self.timer);
            }
        }
    }

    /// Look up a lighting attribute from the occupied zones
    pub fn resolve<'a>(&'a self, key: &str, default: &'a serde_json::Value) -> &'a serde_json::Value {
        self.registry.resolve(key, default)
    }

    /// Recompute the exposure target and hand it to the animator
    pub fn recompute(&mut self) {
        let target = self
            .registry
            .resolve_number(&self.config.exposure_key, self.config.default_exposure);
        self.animator.set_target(target, self.renderer.as_ref(), &mut self.timer);
    }

    /// Advance the timer facility and deliver due ticks
    pub fn update(&mut self, elapsed: Duration) {
        for handle in self.timer.advance(elapsed) {
            self.on_timer(handle);
        }
    }

    /// Deliver a single fired timer
    pub fn on_timer(&mut self, handle: TimerHandle) -> TickOutcome {
        self.animator.tick(handle, self.renderer.as_mut(), &mut self.timer)
    }

    /// Occupied zones in priority order
    pub fn zones(&self) -> &ZoneRegistry {
        &self.registry
    }

    /// Whether an exposure animation is running
    pub fn is_converging(&self) -> bool {
        self.animator.is_active()
    }

    /// Target of the running exposure animation
    pub fn target_exposure(&self) -> Option<f32> {
        self.animator.target()
    }

    /// The attached renderer
    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    /// The timer facility
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Active configuration
    pub fn config(&self) -> &LightingConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::InMemoryRenderConfig;
    use crate::timer::FrameScheduler;
    use serde_json::json;

    type Manager = LightingManager<InMemoryRenderConfig, FrameScheduler>;

    fn manager() -> Manager {
        LightingManager::with_renderer(LightingConfig::default(), InMemoryRenderConfig::new(), FrameScheduler::new())
    }

    fn props(value: serde_json::Value) -> Option<ZoneProperties> {
        value.as_object().cloned()
    }

    #[test]
    fn test_first_enter_applies_lit_profile() {
        let mut manager = manager();
        manager.entered_zone("a", 10.0, props(json!({ "exposure": 0.5 })));

        let renderer = manager.renderer().unwrap();
        assert!(renderer.bloom().enabled);
        assert_eq!(manager.target_exposure(), Some(0.5));
        assert!(manager.is_converging());
    }

    #[test]
    fn test_exit_unknown_on_empty_fires_nothing() {
        let mut manager = manager();
        manager.exited_zone("x");

        let renderer = manager.renderer().unwrap();
        assert_eq!(renderer.exposure_writes(), 0);
        assert_eq!(renderer.bloom(), crate::render::BloomSettings::default());
        assert!(!manager.is_converging());
    }

    #[test]
    fn test_last_exit_restores_defaults_and_stops() {
        let mut manager = manager();
        manager.entered_zone("a", 10.0, props(json!({ "exposure": 2.0 })));
        manager.update(Duration::from_millis(100));
        assert!(manager.is_converging());

        manager.exited_zone("a");

        let renderer = manager.renderer().unwrap();
        assert!(!renderer.bloom().enabled);
        assert_eq!(renderer.exposure(), 0.0);
        assert!(!manager.is_converging());
        assert_eq!(manager.timer().active_count(), 0);
    }

    #[test]
    fn test_exit_inner_retargets_outer() {
        let mut manager = manager();
        manager.entered_zone("outer", 30.0, props(json!({ "exposure": 0.4 })));
        manager.entered_zone("inner", 6.0, props(json!({ "exposure": 1.2 })));
        assert_eq!(manager.target_exposure(), Some(1.2));

        manager.exited_zone("inner");
        assert_eq!(manager.target_exposure(), Some(0.4));
        assert_eq!(manager.timer().active_count(), 1);
    }

    #[test]
    fn test_no_renderer_is_silent() {
        let mut manager: Manager = LightingManager::new(LightingConfig::default(), FrameScheduler::new());
        manager.entered_zone("z", 6.0, None);

        assert!(!manager.is_converging());
        assert_eq!(manager.timer().active_count(), 0);
        manager.update(Duration::from_secs(1));
        manager.exited_zone("z");
        assert!(manager.zones().is_empty());
    }

    #[test]
    fn test_attach_renderer_applies_occupied_zones() {
        let mut manager: Manager = LightingManager::new(LightingConfig::default(), FrameScheduler::new());
        manager.entered_zone("z", 6.0, props(json!({ "exposure": 0.3 })));
        manager.attach_renderer(InMemoryRenderConfig::new());

        assert!(manager.renderer().unwrap().bloom().enabled);
        assert_eq!(manager.target_exposure(), Some(0.3));
    }

    #[test]
    fn test_detach_stops_animation() {
        let mut manager = manager();
        manager.entered_zone("z", 6.0, props(json!({ "exposure": 0.3 })));
        let renderer = manager.detach_renderer();

        assert!(renderer.is_some());
        assert!(!manager.is_converging());
        assert_eq!(manager.timer().active_count(), 0);
    }
}
