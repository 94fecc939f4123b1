//! Zone entity adapter
//!
//! Thin per-entity glue between host entity callbacks and the
//! [`LightingManager`]. Each lighting zone entity gets one
//! [`DynamicLightingZone`]; the host calls its lifecycle methods and the
//! adapter turns them into `entered_zone` / `exited_zone`.

pub mod metadata;

pub use metadata::{lighting_properties_or_default, parse_lighting_metadata, MetadataError};

use std::fmt;

use crate::foundation::math::{Vec3, ZoneBounds};
use crate::manager::LightingManager;
use crate::render::RenderConfigSurface;
use crate::timer::TimerFacility;

/// Host entity identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(pub String);

impl EntityId {
    /// Identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entity property access provided by the host
pub trait EntityProperties {
    /// World-space center of the entity
    fn position(&self, id: &EntityId) -> Option<Vec3>;

    /// Full dimensions of the entity
    fn dimensions(&self, id: &EntityId) -> Option<Vec3>;

    /// Raw user data string
    fn user_data(&self, id: &EntityId) -> Option<String>;
}

/// Lighting behaviour attached to one zone entity
#[derive(Debug, Clone)]
pub struct DynamicLightingZone {
    id: EntityId,
}

impl DynamicLightingZone {
    /// Create the adapter for an entity
    pub fn new(id: EntityId) -> Self {
        Self { id }
    }

    /// Entity this adapter belongs to
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Entity finished loading
    ///
    /// Fires a synthetic enter when the avatar already stands inside the
    /// zone. Returns whether it did.
    pub fn preload<E, R, T>(
        &self,
        avatar_position: Vec3,
        entities: &E,
        manager: &mut LightingManager<R, T>,
    ) -> bool
    where
        E: EntityProperties + ?Sized,
        R: RenderConfigSurface,
        T: TimerFacility,
    {
        log::info!("[DynamicLightingZone] Loaded {}", self.id);

        let Some(bounds) = self.bounds(entities) else {
            log::warn!("Zone {} has no position or dimensions", self.id);
            return false;
        };

        if bounds.contains_point(avatar_position) {
            self.enter_entity(&self.id, entities, manager);
            true
        } else {
            false
        }
    }

    /// Entity is being unloaded
    pub fn unload<R, T>(&self, id: &EntityId, manager: &mut LightingManager<R, T>)
    where
        R: RenderConfigSurface,
        T: TimerFacility,
    {
        if *id == self.id {
            manager.exited_zone(self.id.as_str());
        }
    }

    /// Avatar entered the entity
    pub fn enter_entity<E, R, T>(&self, id: &EntityId, entities: &E, manager: &mut LightingManager<R, T>)
    where
        E: EntityProperties + ?Sized,
        R: RenderConfigSurface,
        T: TimerFacility,
    {
        if *id != self.id {
            return;
        }

        let size = entities
            .dimensions(&self.id)
            .map_or(0.0, |dimensions| ZoneBounds::new(Vec3::zeros(), dimensions).size_metric());
        let properties = entities
            .user_data(&self.id)
            .map(|raw| lighting_properties_or_default(&raw))
            .unwrap_or_default();

        manager.entered_zone(self.id.as_str(), size, Some(properties));
    }

    /// Avatar left the entity
    pub fn leave_entity<R, T>(&self, id: &EntityId, manager: &mut LightingManager<R, T>)
    where
        R: RenderConfigSurface,
        T: TimerFacility,
    {
        if *id == self.id {
            manager.exited_zone(self.id.as_str());
        }
    }

    fn bounds<E: EntityProperties + ?Sized>(&self, entities: &E) -> Option<ZoneBounds> {
        Some(ZoneBounds::new(entities.position(&self.id)?, entities.dimensions(&self.id)?))
    }
}
