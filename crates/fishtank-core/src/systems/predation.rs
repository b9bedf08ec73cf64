//! Prey queries used by the shark

use fishtank_logic::geometry::Vec3;
use hecs::{Entity, World};

use crate::components::{Fish, Position};

/// Closest living, non-dying fish to `from`.
pub fn nearest_prey(world: &World, from: Vec3) -> Option<(Entity, Vec3)> {
    world
        .query::<(&Fish, &Position)>()
        .iter()
        .filter(|(_, (fish, _))| fish.is_alive())
        .map(|(entity, (_, pos))| (entity, pos.0, from.distance_squared(&pos.0)))
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(entity, pos, _)| (entity, pos))
}

/// Whether any fish is worth sending a shark for.
pub fn has_prey(world: &World) -> bool {
    world.query::<&Fish>().iter().any(|(_, fish)| fish.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishtank_logic::config::FishType;

    #[test]
    fn test_nearest_prey_skips_dying_fish() {
        let mut world = World::new();
        let mut dying = Fish::new(FishType::Clownfish, 0.3);
        dying.die();
        world.spawn((dying, Position::new(0.5, 0.0, 0.0)));
        let alive = world.spawn((Fish::new(FishType::Clownfish, 0.3), Position::new(3.0, 0.0, 0.0)));
        world.spawn((Fish::new(FishType::Clownfish, 0.3), Position::new(-6.0, 0.0, 0.0)));

        assert_eq!(
            nearest_prey(&world, Vec3::ZERO),
            Some((alive, Vec3::new(3.0, 0.0, 0.0)))
        );
        assert!(has_prey(&world));
    }

    #[test]
    fn test_no_prey_when_only_dying() {
        let mut world = World::new();
        let mut dying = Fish::new(FishType::Clownfish, 0.3);
        dying.die();
        world.spawn((dying, Position::new(0.0, 0.0, 0.0)));
        assert_eq!(nearest_prey(&world, Vec3::ZERO), None);
        assert!(!has_prey(&world));
    }
}
