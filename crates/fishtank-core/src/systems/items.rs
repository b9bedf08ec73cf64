//! Food and egg systems - sinking, floating, expiry and auto-collection

use fishtank_logic::config::SimConfig;
use fishtank_logic::geometry::Vec3;
use hecs::{Entity, World};

use crate::components::{Egg, Food, Position};

/// A pellet that is no longer available and should be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpentFood {
    pub entity: Entity,
    /// Ran out of lifetime on this tick
    pub expired: bool,
}

/// Advance all pellets and report the unavailable ones.
pub fn food_system(world: &mut World, config: &SimConfig, delta: f32) -> Vec<SpentFood> {
    let mut spent = Vec::new();

    for (entity, (food, pos)) in world.query_mut::<(&mut Food, &mut Position)>() {
        let expired = food.update(&mut pos.0, &config.food, &config.tank, delta);
        if !food.is_available() {
            spent.push(SpentFood { entity, expired });
        }
    }

    spent
}

/// Positions of all pellets fish may still go after.
pub fn available_food_positions(world: &World) -> Vec<Vec3> {
    world
        .query::<(&Food, &Position)>()
        .iter()
        .filter(|(_, (food, _))| food.is_available())
        .map(|(_, (_, pos))| pos.0)
        .collect()
}

/// An egg that is done and should be removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpentEgg {
    pub entity: Entity,
    /// Payout when the egg auto-collected on this tick
    pub auto_collected: Option<f64>,
}

/// Advance all eggs, auto-collecting those past their deadline.
pub fn egg_system(world: &mut World, config: &SimConfig, delta: f32) -> Vec<SpentEgg> {
    let mut spent = Vec::new();

    for (entity, (egg, pos)) in world.query_mut::<(&mut Egg, &mut Position)>() {
        let auto_collected = egg.update(&mut pos.0, &config.egg, &config.tank, delta);
        if !egg.is_available() {
            spent.push(SpentEgg {
                entity,
                auto_collected,
            });
        }
    }

    spent
}
