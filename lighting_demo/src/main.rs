//! Zone lighting demo
//!
//! Walks an avatar through a courtyard containing a dim cellar and logs
//! how bloom and exposure follow. Pass a `.toml` or `.ron` lighting config
//! as the first argument to override the defaults.

mod world;

use std::time::Duration;

use zone_lighting::foundation::logging;
use zone_lighting::prelude::*;

use world::DemoWorld;

const FRAME: Duration = Duration::from_millis(16);

fn load_config() -> LightingConfig {
    match std::env::args().nth(1) {
        Some(path) => match LightingConfig::load_validated(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load {}: {}, using defaults", path, err);
                LightingConfig::default()
            }
        },
        None => LightingConfig::default(),
    }
}

fn main() {
    let config = load_config();
    logging::init_with_level(&config.log_level);
    log::info!("Starting zone lighting demo...");

    let world = DemoWorld::new();
    let mut manager = LightingManager::new(config, FrameScheduler::new());

    // Entities load before the renderer is up; the avatar spawns in the courtyard
    let spawn = Vec3::new(0.0, 1.0, 0.0);
    let zones: Vec<DynamicLightingZone> = world
        .zone_ids()
        .into_iter()
        .map(DynamicLightingZone::new)
        .collect();
    for zone in &zones {
        zone.preload(spawn, &world, &mut manager);
    }
    manager.attach_renderer(InMemoryRenderConfig::new());

    let mut inside: Vec<bool> = zones
        .iter()
        .map(|zone| manager.zones().contains(zone.id().as_str()))
        .collect();

    for (frame, position) in world.avatar_path().into_iter().enumerate() {
        for (zone, was_inside) in zones.iter().zip(inside.iter_mut()) {
            let now_inside = world.bounds(zone.id()).is_some_and(|b| b.contains_point(position));
            if now_inside && !*was_inside {
                zone.enter_entity(zone.id(), &world, &mut manager);
            } else if !now_inside && *was_inside {
                zone.leave_entity(zone.id(), &mut manager);
            }
            *was_inside = now_inside;
        }

        manager.update(FRAME);

        if frame % 20 == 0 {
            if let Some(renderer) = manager.renderer() {
                log::info!(
                    "frame {:4} zones {:?} exposure {:+.3} bloom {}",
                    frame,
                    manager.zones().ids(),
                    renderer.exposure(),
                    renderer.bloom().enabled,
                );
            }
        }
    }

    for zone in &zones {
        zone.unload(zone.id(), &mut manager);
    }
    if let Some(renderer) = manager.renderer() {
        log::info!("Final exposure {:+.3}, {} exposure writes", renderer.exposure(), renderer.exposure_writes());
    }
}
