//! Static scene for the demo

use std::collections::HashMap;

use serde_json::json;
use zone_lighting::prelude::*;

struct DemoEntity {
    position: Vec3,
    dimensions: Vec3,
    user_data: String,
}

/// Courtyard with a cellar and an unlit shed
pub struct DemoWorld {
    entities: HashMap<EntityId, DemoEntity>,
}

impl DemoWorld {
    pub fn new() -> Self {
        let mut entities = HashMap::new();
        entities.insert(
            EntityId::from("courtyard"),
            DemoEntity {
                position: Vec3::new(0.0, 5.0, 0.0),
                dimensions: Vec3::new(60.0, 10.0, 60.0),
                user_data: json!({ "lighting": { "exposure": 0.6 } }).to_string(),
            },
        );
        entities.insert(
            EntityId::from("cellar"),
            DemoEntity {
                position: Vec3::new(10.0, 2.0, 0.0),
                dimensions: Vec3::new(8.0, 4.0, 8.0),
                user_data: json!({ "lighting": { "exposure": -0.8 } }).to_string(),
            },
        );
        // Malformed metadata still registers, it just overrides nothing
        entities.insert(
            EntityId::from("shed"),
            DemoEntity {
                position: Vec3::new(-10.0, 2.0, 0.0),
                dimensions: Vec3::new(4.0, 4.0, 4.0),
                user_data: "{ lighting: dim".to_string(),
            },
        );
        Self { entities }
    }

    pub fn zone_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.entities.keys().cloned().collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids
    }

    pub fn bounds(&self, id: &EntityId) -> Option<ZoneBounds> {
        self.entities
            .get(id)
            .map(|entity| ZoneBounds::new(entity.position, entity.dimensions))
    }

    /// Spawn, walk into the cellar, out, through the shed and off the courtyard
    pub fn avatar_path(&self) -> Vec<Vec3> {
        let waypoints = [
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(10.0, 1.0, 0.0),
            Vec3::new(10.0, 1.0, 0.0),
            Vec3::new(-10.0, 1.0, 0.0),
            Vec3::new(-40.0, 1.0, 0.0),
            Vec3::new(-40.0, 1.0, 0.0),
        ];

        let mut path = Vec::new();
        for pair in waypoints.windows(2) {
            for step in 0..60 {
                let t = step as f32 / 60.0;
                path.push(pair[0].lerp(&pair[1], t));
            }
        }
        path
    }
}

impl EntityProperties for DemoWorld {
    fn position(&self, id: &EntityId) -> Option<Vec3> {
        self.entities.get(id).map(|entity| entity.position)
    }

    fn dimensions(&self, id: &EntityId) -> Option<Vec3> {
        self.entities.get(id).map(|entity| entity.dimensions)
    }

    fn user_data(&self, id: &EntityId) -> Option<String> {
        self.entities.get(id).map(|entity| entity.user_data.clone())
    }
}
