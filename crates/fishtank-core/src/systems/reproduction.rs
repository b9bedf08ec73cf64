//! Reproduction system - mature fish lay eggs on a timer

use fishtank_logic::config::SimConfig;
use fishtank_logic::geometry::Vec3;
use hecs::{Entity, World};
use std::f32::consts::PI;

use crate::components::{Fish, Position, Swim};

/// An egg a fish has just laid; the engine spawns it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EggLaid {
    pub parent: Entity,
    pub position: Vec3,
    pub value: f64,
}

/// Advance egg timers of breeding fish and collect the eggs that are due.
/// Eggs appear just behind the fish, opposite its heading.
pub fn egg_production_system(world: &mut World, config: &SimConfig, delta: f32) -> Vec<EggLaid> {
    let mut laid = Vec::new();

    for (entity, (fish, swim, pos)) in world.query_mut::<(&mut Fish, &Swim, &Position)>() {
        if !fish.tick_egg_timer(&config.stages, config.egg.spawn_interval, delta) {
            continue;
        }
        let spec = config.fish_types.get(fish.kind);
        let value = fish.egg_value(&config.stages, &config.egg, spec);
        let behind = Vec3::from_heading(swim.heading + PI) * config.egg.spawn_offset;
        let position = config.tank.clamp(pos.0 + behind);
        log::debug!("Fish {:?} laid an egg worth {}", entity, value);
        laid.push(EggLaid {
            parent: entity,
            position,
            value,
        });
    }

    laid
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishtank_logic::config::FishType;

    fn spawn_breeder(world: &mut World, size: f32, egg_timer: f32) -> Entity {
        let mut fish = Fish::new(FishType::Clownfish, size);
        fish.egg_timer = egg_timer;
        world.spawn((fish, Swim::new(0.0, Vec3::ZERO, 2.5), Position::new(1.0, 1.0, 0.0)))
    }

    #[test]
    fn test_adult_lays_egg_behind_itself() {
        let config = SimConfig::default();
        let mut world = World::new();
        let parent = spawn_breeder(&mut world, 1.0, config.egg.spawn_interval);

        let laid = egg_production_system(&mut world, &config, 0.016);
        assert_eq!(laid.len(), 1);
        assert_eq!(laid[0].parent, parent);
        assert_eq!(laid[0].value, 20.0);
        assert!((laid[0].position.x - 0.4).abs() < 1e-5);
        assert!((laid[0].position.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_one_egg_per_interval() {
        let config = SimConfig::default();
        let mut world = World::new();
        spawn_breeder(&mut world, 1.0, 0.0);

        let mut eggs = 0;
        // 24 s at 0.5 s steps: three full intervals.
        for _ in 0..48 {
            eggs += egg_production_system(&mut world, &config, 0.5).len();
        }
        assert_eq!(eggs, 3);
    }

    #[test]
    fn test_juveniles_do_not_lay() {
        let config = SimConfig::default();
        let mut world = World::new();
        spawn_breeder(&mut world, 0.6, config.egg.spawn_interval);
        assert!(egg_production_system(&mut world, &config, 1.0).is_empty());
    }
}
