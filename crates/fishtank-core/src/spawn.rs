//! Entity spawning - fish, food pellets and eggs

use fishtank_logic::config::{FishType, SimConfig};
use fishtank_logic::geometry::Vec3;
use fishtank_logic::steering::normalize_angle;
use hecs::{Entity, World};
use rand::Rng;
use std::f32::consts::TAU;

use crate::components::*;
use crate::systems::{pick_wander_target, wander_interval};

/// Spawn a newborn fish of `kind` at `position` with a fresh personality.
pub fn spawn_fish(
    world: &mut World,
    kind: FishType,
    position: Vec3,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Entity {
    let personality = Personality::random(rng);
    let heading = normalize_angle(rng.gen_range(0.0..TAU));
    let target = pick_wander_target(position, heading, &personality, &config.tank, rng);
    let interval = wander_interval(config.fish.wander_interval, &personality, rng);

    let mut swim = Swim::new(heading, target, interval);
    swim.swim_phase = rng.gen_range(0.0..TAU);
    swim.wander_timer = rng.gen::<f32>() * config.fish.wander_interval;

    let mut fish = Fish::new(kind, config.stages.min_size());
    fish.egg_timer = rng.gen::<f32>() * config.egg.spawn_interval;

    let entity = world.spawn((fish, personality, swim, Position(position)));
    log::debug!("Spawned {} {:?} at ({:.1}, {:.1}, {:.1})", kind.name(), entity, position.x, position.y, position.z);
    entity
}

/// A random spot in the central 60% of the tank on every axis.
pub fn purchase_spawn_point(config: &SimConfig, rng: &mut impl Rng) -> Vec3 {
    config
        .tank
        .lerp(rng.gen_range(0.2..0.8), rng.gen_range(0.2..0.8), rng.gen_range(0.2..0.8))
}

/// Spawn one food pellet jittered around `point` and kept inside the tank.
pub fn spawn_food(world: &mut World, point: Vec3, config: &SimConfig, rng: &mut impl Rng) -> Entity {
    let bounds = &config.tank;
    let position = Vec3::new(
        (point.x + rng.gen_range(-1.0..1.0)).clamp(bounds.min.x, bounds.max.x),
        (point.y + rng.gen_range(-0.25..0.25)).min(bounds.max.y),
        (point.z + rng.gen_range(-1.0..1.0)).clamp(bounds.min.z, bounds.max.z),
    );
    let food = Food::new(&config.food, rng);
    world.spawn((food, Position(position)))
}

pub fn spawn_egg(world: &mut World, position: Vec3, value: f64) -> Entity {
    world.spawn((Egg::new(value), Position(position)))
}
