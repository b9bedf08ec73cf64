//! The shark and its visit schedule
//!
//! At most one shark exists at a time. It is not an ECS entity: the engine
//! owns it directly, assigns it the nearest prey each tick and resolves
//! predation itself, so the shark only keeps its own movement and visit
//! bookkeeping.

use fishtank_logic::config::SharkConfig;
use fishtank_logic::geometry::{TankBounds, Vec3};
use fishtank_logic::steering::{facing_right, lerp_toward, turn_toward};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// How far outside the glass a shark appears.
const SPAWN_OFFSET: f32 = 5.0;
/// Entry waypoint distance inside the glass.
const ENTRY_DEPTH: f32 = 2.0;
/// Exit waypoint distance beyond the glass.
const EXIT_OFFSET: f32 = 10.0;
/// Horizontal and vertical clearance kept from the glass while inside.
const WALL_CLEARANCE_X: f32 = 1.0;
const WALL_CLEARANCE_Y: f32 = 0.5;
/// Share of the speed gap closed per reference frame.
const SPEED_EASE: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharkState {
    Entering,
    Hunting,
    Wandering,
    Leaving,
    Inactive,
}

#[derive(Debug, Clone)]
pub struct Shark {
    config: SharkConfig,
    position: Vec3,
    heading: f32,
    target_heading: f32,
    speed: f32,
    waypoint: Vec3,
    target_fish: Option<Vec3>,
    eat_cooldown: f32,
    eats_this_visit: u32,
    time_alive: f32,
    swim_phase: f32,
    entering: bool,
    leaving: bool,
    active: bool,
}

impl Shark {
    /// Place a new shark just outside a random side of the tank, aimed at
    /// a waypoint just inside that side.
    pub fn spawn(config: &SharkConfig, bounds: &TankBounds, rng: &mut impl Rng) -> Self {
        let from_right = rng.gen_bool(0.5);
        let y = rng.gen_range(bounds.min.y..=bounds.max.y);
        let z = bounds.center().z;
        let (x, entry_x, heading) = if from_right {
            (bounds.max.x + SPAWN_OFFSET, bounds.max.x - ENTRY_DEPTH, PI)
        } else {
            (bounds.min.x - SPAWN_OFFSET, bounds.min.x + ENTRY_DEPTH, 0.0)
        };

        Self {
            config: config.clone(),
            position: Vec3::new(x, y, z),
            heading,
            target_heading: heading,
            speed: 0.0,
            waypoint: Vec3::new(entry_x, y, z),
            target_fish: None,
            eat_cooldown: 0.0,
            eats_this_visit: 0,
            time_alive: 0.0,
            swim_phase: rng.gen_range(0.0..std::f32::consts::TAU),
            entering: true,
            leaving: false,
            active: true,
        }
    }

    pub fn state(&self) -> SharkState {
        if !self.active {
            SharkState::Inactive
        } else if self.leaving {
            SharkState::Leaving
        } else if self.entering {
            SharkState::Entering
        } else if self.target_fish.is_some() {
            SharkState::Hunting
        } else {
            SharkState::Wandering
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn facing_right(&self) -> bool {
        facing_right(self.heading)
    }

    pub fn swim_phase(&self) -> f32 {
        self.swim_phase
    }

    pub fn eats_this_visit(&self) -> u32 {
        self.eats_this_visit
    }

    pub fn is_leaving(&self) -> bool {
        self.leaving
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Assign or clear the prey position. Ignored once leaving.
    pub fn set_target_fish(&mut self, position: Option<Vec3>) {
        if !self.leaving {
            self.target_fish = position;
        }
    }

    pub fn can_eat_fish(&self, fish_position: Vec3) -> bool {
        if self.leaving
            || self.eat_cooldown > 0.0
            || self.eats_this_visit >= self.config.max_eats_per_visit
        {
            return false;
        }
        self.position.distance(&fish_position) < self.config.eat_distance
    }

    /// Record a successful bite.
    pub fn eat_fish(&mut self) {
        self.eat_cooldown = self.config.eat_cooldown;
        self.eats_this_visit += 1;
        self.target_fish = None;
    }

    pub fn update(&mut self, delta: f32, bounds: &TankBounds, rng: &mut impl Rng) {
        if !self.active {
            return;
        }
        self.time_alive += delta;
        self.swim_phase += delta * 3.0;
        if self.eat_cooldown > 0.0 {
            self.eat_cooldown = (self.eat_cooldown - delta).max(0.0);
        }

        if !self.leaving
            && (self.time_alive >= self.config.stay_duration
                || self.eats_this_visit >= self.config.max_eats_per_visit)
        {
            self.start_leaving(bounds);
        }

        self.steer(delta, bounds, rng);

        let inner = bounds.inset(WALL_CLEARANCE_X, WALL_CLEARANCE_Y);
        if self.entering && self.position.x >= inner.min.x && self.position.x <= inner.max.x {
            self.entering = false;
        }

        if self.leaving {
            let from_center = (self.position.x - bounds.center().x).abs();
            if from_center > bounds.width() / 2.0 + self.config.exit_margin {
                self.active = false;
            }
        }
    }

    fn steer(&mut self, delta: f32, bounds: &TankBounds, rng: &mut impl Rng) {
        let hunting = !self.leaving && !self.entering;
        let target = match self.target_fish {
            Some(fish) if hunting => fish,
            _ => self.waypoint,
        };

        let to_target = target - self.position;
        let distance = to_target.length();
        if distance > 0.5 {
            self.target_heading = to_target.y.atan2(to_target.x);
        }
        self.heading = turn_toward(self.heading, self.target_heading, self.config.turn_speed * delta);
        self.speed = lerp_toward(self.speed, self.config.speed, SPEED_EASE, delta);

        self.position += Vec3::from_heading(self.heading) * (self.speed * delta);

        let inner = bounds.inset(WALL_CLEARANCE_X, WALL_CLEARANCE_Y);
        if !self.leaving && !self.entering {
            self.position.x = self.position.x.clamp(inner.min.x, inner.max.x);
        }
        self.position.y = self.position.y.clamp(inner.min.y, inner.max.y);
        self.position.z = self.position.z.clamp(bounds.min.z, bounds.max.z);

        if self.target_fish.is_none() && !self.leaving && !self.entering && distance < 1.0 {
            self.waypoint = Vec3::new(
                rng.gen_range(bounds.min.x..=bounds.max.x),
                rng.gen_range(bounds.min.y..=bounds.max.y),
                bounds.center().z,
            );
        }
    }

    /// Head out through the side of the tank the shark is currently on.
    fn start_leaving(&mut self, bounds: &TankBounds) {
        self.leaving = true;
        self.entering = false;
        self.target_fish = None;
        let exit_x = if self.position.x > bounds.center().x {
            bounds.max.x + EXIT_OFFSET
        } else {
            bounds.min.x - EXIT_OFFSET
        };
        self.waypoint = Vec3::new(exit_x, self.position.y, bounds.center().z);
        log::debug!("Shark leaving toward x={:.1}", exit_x);
    }
}

/// Result of advancing the visit schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleStep {
    Idle,
    WarningStarted,
    SpawnShark,
}

/// Decides when the next shark shows up. The timer only runs while no shark
/// is around; once it elapses and there is prey, a warning runs for a fixed
/// time before the shark is spawned.
#[derive(Debug, Clone)]
pub struct SharkScheduler {
    elapsed: f32,
    next_visit: f32,
    warning: Option<f32>,
}

impl SharkScheduler {
    pub fn new(config: &SharkConfig, rng: &mut impl Rng) -> Self {
        let mut scheduler = Self {
            elapsed: 0.0,
            next_visit: 0.0,
            warning: None,
        };
        scheduler.reschedule(config, rng);
        scheduler
    }

    /// Draw a fresh interval, e.g. at game start or after a departure.
    pub fn reschedule(&mut self, config: &SharkConfig, rng: &mut impl Rng) {
        self.elapsed = 0.0;
        self.warning = None;
        self.next_visit = rng.gen_range(config.min_spawn_interval..=config.max_spawn_interval);
    }

    pub fn is_warning(&self) -> bool {
        self.warning.is_some()
    }

    /// Seconds left before the warning can start.
    pub fn time_until_visit(&self) -> f32 {
        (self.next_visit - self.elapsed).max(0.0)
    }

    pub fn advance(&mut self, delta: f32, has_prey: bool, shark_present: bool, config: &SharkConfig) -> ScheduleStep {
        if shark_present {
            return ScheduleStep::Idle;
        }
        if let Some(warned) = self.warning.as_mut() {
            *warned += delta;
            if *warned >= config.warning_duration {
                self.warning = None;
                return ScheduleStep::SpawnShark;
            }
            return ScheduleStep::Idle;
        }

        self.elapsed += delta;
        if self.elapsed >= self.next_visit && has_prey {
            self.warning = Some(0.0);
            return ScheduleStep::WarningStarted;
        }
        ScheduleStep::Idle
    }
}
