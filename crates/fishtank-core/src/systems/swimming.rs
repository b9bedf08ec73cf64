//! Swimming system - food seeking, wandering and heading/speed control

use fishtank_logic::config::SimConfig;
use fishtank_logic::geometry::{TankBounds, Vec3};
use fishtank_logic::steering::{angle_difference, ease_speed, facing_right, turn_toward};
use hecs::World;
use rand::Rng;
use std::f32::consts::PI;

use crate::components::{Fish, Personality, Position, Swim};

/// Beyond this heading error the fish slows down to turn.
const TURN_THRESHOLD: f32 = PI * 0.4;
/// Targets closer than this are considered reached.
const ARRIVE_RADIUS: f32 = 0.3;

/// Move every living fish one tick. `food` holds the positions of all
/// available food.
pub fn swimming_system(
    world: &mut World,
    food: &[Vec3],
    config: &SimConfig,
    rng: &mut impl Rng,
    delta: f32,
) {
    for (_, (fish, personality, swim, pos)) in
        world.query_mut::<(&Fish, &Personality, &mut Swim, &mut Position)>()
    {
        if !fish.is_alive() {
            continue;
        }
        let max_speed = config.fish.speed
            * personality.speed_multiplier
            * config.fish_types.get(fish.kind).speed_multiplier;
        steer_fish(&mut pos.0, swim, fish, personality, food, max_speed, config, rng, delta);
    }
}

/// Nearest food within the fish's detection range.
pub fn nearest_food(position: Vec3, range: f32, food: &[Vec3]) -> Option<Vec3> {
    food.iter()
        .map(|f| (*f, position.distance(f)))
        .filter(|(_, d)| *d < range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(f, _)| f)
}

/// A new wander target ahead of the fish, offset sideways and vertically
/// according to its personality.
pub fn pick_wander_target(
    position: Vec3,
    heading: f32,
    personality: &Personality,
    bounds: &TankBounds,
    rng: &mut impl Rng,
) -> Vec3 {
    let forward_bias = rng.gen_range(2.0..6.0) * personality.restlessness;
    let lateral_offset = (rng.gen::<f32>() - 0.5) * 8.0 * personality.restlessness;
    let vertical_offset = (rng.gen::<f32>() - 0.5) * 5.0 + personality.vertical_bias * 3.0;

    let forward = Vec3::from_heading(heading);
    let mut target = position + forward * forward_bias + forward.perpendicular_xy() * lateral_offset;
    target.y += vertical_offset;
    target.z = rng.gen_range(bounds.min.z..=bounds.max.z);
    bounds.clamp_padded(target, 0.5)
}

/// Seconds until the next wander target, shorter for fidgety fish.
pub fn wander_interval(base: f32, personality: &Personality, rng: &mut impl Rng) -> f32 {
    let interval = base / personality.wander_frequency;
    interval + rng.gen::<f32>() * interval * 0.5
}

/// One tick of movement for a single fish.
#[allow(clippy::too_many_arguments)]
pub fn steer_fish(
    pos: &mut Vec3,
    swim: &mut Swim,
    fish: &Fish,
    personality: &Personality,
    food: &[Vec3],
    max_speed: f32,
    config: &SimConfig,
    rng: &mut impl Rng,
    delta: f32,
) {
    let bounds = &config.tank;
    swim.time += delta;
    swim.swim_phase += delta * (2.5 + personality.speed_multiplier);

    let food_target = nearest_food(*pos, personality.detection_range(fish.size), food);
    swim.chasing_food = food_target.is_some();
    match food_target {
        Some(target) => swim.target = target,
        None => {
            swim.wander_timer += delta;
            if swim.wander_timer >= swim.wander_interval {
                swim.target = pick_wander_target(*pos, swim.heading, personality, bounds, rng);
                swim.wander_interval = wander_interval(config.fish.wander_interval, personality, rng);
                swim.wander_timer = 0.0;
            }
        }
    }

    let to_target = swim.target - *pos;
    let distance = to_target.length();
    if distance > ARRIVE_RADIUS {
        swim.target_heading = to_target.y.atan2(to_target.x);
    }

    let diff = angle_difference(swim.heading, swim.target_heading);
    swim.turning = diff.abs() > TURN_THRESHOLD;
    let turn_rate = config.fish.turn_speed * personality.turn_multiplier;
    swim.heading = turn_toward(swim.heading, swim.target_heading, turn_rate * delta);
    swim.facing_right = facing_right(swim.heading);

    let target_speed = if distance <= ARRIVE_RADIUS {
        0.0
    } else if swim.turning {
        max_speed * 0.25
    } else if swim.chasing_food {
        max_speed * 1.3
    } else {
        max_speed * (0.5 + personality.restlessness * 0.3)
    };
    swim.speed = ease_speed(swim.speed, target_speed, config.fish.acceleration, delta);

    let direction = Vec3::from_heading(swim.heading);
    let wave = if max_speed > 0.0 {
        swim.swim_phase.sin() * personality.wave_amplitude * (swim.speed / max_speed)
    } else {
        0.0
    };
    *pos += direction * (swim.speed * delta) + direction.perpendicular_xy() * (wave * delta);
    pos.z += (swim.time * 0.4 + swim.swim_phase).sin() * 0.25 * delta;

    let clamped = bounds.clamp(*pos);
    let hit_wall = clamped.x != pos.x || clamped.y != pos.y;
    *pos = clamped;
    if hit_wall {
        swim.target = pick_wander_target(*pos, swim.heading, personality, bounds, rng);
        swim.wander_timer = 0.0;
    }
}
