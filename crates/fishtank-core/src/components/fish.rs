//! Fish components - body, personality and swim state

use fishtank_logic::config::{EggConfig, FishConfig, FishType, FishTypeSpec};
use fishtank_logic::geometry::Vec3;
use fishtank_logic::stages::{FishStage, StageTable};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Where a fish is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LifeState {
    Alive,
    /// Starved; floating up until removed.
    Dying { elapsed: f32 },
}

/// Result of one hunger tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HungerOutcome {
    Content,
    Shrinking,
    Starved,
}

/// Body state of a fish. Size is the only stored growth quantity; the stage
/// is looked up from it on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fish {
    pub kind: FishType,
    pub size: f32,
    /// Seconds since the last meal
    pub time_since_fed: f32,
    pub hungry: bool,
    pub egg_timer: f32,
    pub life: LifeState,
}

impl Fish {
    pub fn new(kind: FishType, size: f32) -> Self {
        Self {
            kind,
            size,
            time_since_fed: 0.0,
            hungry: false,
            egg_timer: 0.0,
            life: LifeState::Alive,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.life, LifeState::Dying { .. })
    }

    pub fn stage<'a>(&self, stages: &'a StageTable) -> &'a FishStage {
        stages.stage_for_size(self.size)
    }

    /// Advance the hunger clock. Past the threshold the fish shrinks every
    /// tick; reaching the death size starts the dying phase.
    pub fn tick_hunger(&mut self, config: &FishConfig, delta: f32) -> HungerOutcome {
        if !self.is_alive() {
            return HungerOutcome::Content;
        }
        self.time_since_fed += delta;
        if self.time_since_fed <= config.hunger_threshold {
            return HungerOutcome::Content;
        }

        self.hungry = true;
        self.size -= config.shrink_rate * delta;
        if self.size <= config.min_size_before_death {
            self.size = config.min_size_before_death;
            if self.die() {
                return HungerOutcome::Starved;
            }
        }
        HungerOutcome::Shrinking
    }

    /// Enter the dying phase. Returns true only on the first call.
    pub fn die(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.life = LifeState::Dying { elapsed: 0.0 };
        true
    }

    /// Advance the dying phase; true once it has run its course.
    pub fn tick_dying(&mut self, duration: f32, delta: f32) -> bool {
        match &mut self.life {
            LifeState::Dying { elapsed } => {
                *elapsed += delta;
                *elapsed >= duration
            }
            LifeState::Alive => false,
        }
    }

    /// Meal: reset hunger and grow, capped at the largest stage size.
    pub fn eat(&mut self, growth: f32, max_size: f32) {
        self.time_since_fed = 0.0;
        self.hungry = false;
        self.size = (self.size + growth).min(max_size);
    }

    /// Eating reach grows slightly with body size.
    pub fn eat_distance(&self) -> f32 {
        0.6 + self.size * 0.4
    }

    pub fn can_eat(&self, fish_pos: Vec3, food_pos: Vec3) -> bool {
        self.is_alive() && fish_pos.distance(&food_pos) < self.eat_distance()
    }

    /// Points an egg laid right now would be worth:
    /// `(base + floor(size * 10)) * stage multiplier * fish-type multiplier`.
    pub fn egg_value(&self, stages: &StageTable, egg: &EggConfig, spec: &FishTypeSpec) -> f64 {
        let stage = self.stage(stages);
        let base = egg.base_value + (self.size * 10.0).floor() as f64;
        base * stage.egg_multiplier as f64 * spec.egg_value_multiplier
    }

    /// Advance the egg timer for stages that reproduce. True when an egg is due.
    pub fn tick_egg_timer(&mut self, stages: &StageTable, interval: f32, delta: f32) -> bool {
        if !self.is_alive() || !self.stage(stages).can_produce_eggs {
            return false;
        }
        self.egg_timer += delta;
        if self.egg_timer >= interval {
            self.egg_timer = 0.0;
            return true;
        }
        false
    }
}

/// Per-fish behavior multipliers, sampled once at spawn and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub speed_multiplier: f32,
    pub turn_multiplier: f32,
    pub wander_frequency: f32,
    pub wave_amplitude: f32,
    pub vertical_bias: f32,
    pub restlessness: f32,
}

impl Personality {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            speed_multiplier: rng.gen_range(0.7..1.3),
            turn_multiplier: rng.gen_range(0.6..1.4),
            wander_frequency: rng.gen_range(0.5..1.5),
            wave_amplitude: rng.gen_range(0.1..0.25),
            vertical_bias: rng.gen_range(-0.3..0.3),
            restlessness: rng.gen_range(0.5..1.5),
        }
    }

    /// Radius within which food is noticed.
    pub fn detection_range(&self, size: f32) -> f32 {
        (5.0 + size * 3.0) * (0.8 + self.restlessness * 0.4)
    }
}

impl Default for Personality {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
            turn_multiplier: 1.0,
            wander_frequency: 1.0,
            wave_amplitude: 0.15,
            vertical_bias: 0.0,
            restlessness: 1.0,
        }
    }
}

/// Transient movement state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swim {
    pub heading: f32,
    pub target_heading: f32,
    pub target: Vec3,
    pub speed: f32,
    pub wander_timer: f32,
    pub wander_interval: f32,
    pub turning: bool,
    pub chasing_food: bool,
    pub facing_right: bool,
    pub swim_phase: f32,
    /// Seconds this fish has been swimming; drives depth drift
    pub time: f32,
}

impl Swim {
    pub fn new(heading: f32, target: Vec3, wander_interval: f32) -> Self {
        Self {
            heading,
            target_heading: heading,
            target,
            speed: 0.0,
            wander_timer: 0.0,
            wander_interval,
            turning: false,
            chasing_food: false,
            facing_right: fishtank_logic::steering::facing_right(heading),
            swim_phase: 0.0,
            time: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishtank_logic::config::SimConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_hunger_shrinks_after_threshold() {
        let config = FishConfig::default();
        let mut fish = Fish::new(FishType::Clownfish, 0.5);

        assert_eq!(fish.tick_hunger(&config, 10.0), HungerOutcome::Content);
        assert!(!fish.hungry);

        let mut last = fish.size;
        for _ in 0..10 {
            assert_eq!(fish.tick_hunger(&config, 0.5), HungerOutcome::Shrinking);
            assert!(fish.size < last);
            last = fish.size;
        }
        assert!(fish.hungry);
    }

    #[test]
    fn test_starvation_fires_once() {
        let config = FishConfig::default();
        let mut fish = Fish::new(FishType::Clownfish, 0.21);
        fish.time_since_fed = 20.0;

        assert_eq!(fish.tick_hunger(&config, 1.0), HungerOutcome::Starved);
        assert!(fish.is_dying());
        assert_eq!(fish.size, config.min_size_before_death);
        assert_eq!(fish.tick_hunger(&config, 1.0), HungerOutcome::Content);
        assert!(!fish.die());
    }

    #[test]
    fn test_die_is_idempotent() {
        let mut fish = Fish::new(FishType::Glowfish, 1.0);
        assert!(fish.die());
        assert!(!fish.die());
        assert!(!fish.can_eat(Vec3::ZERO, Vec3::ZERO));
    }

    #[test]
    fn test_dying_phase_completes() {
        let mut fish = Fish::new(FishType::Clownfish, 0.3);
        assert!(!fish.tick_dying(3.5, 1.0));
        fish.die();
        assert!(!fish.tick_dying(3.5, 2.0));
        assert!(fish.tick_dying(3.5, 2.0));
    }

    #[test]
    fn test_eat_resets_hunger_and_caps_growth() {
        let mut fish = Fish::new(FishType::Clownfish, 1.495);
        fish.time_since_fed = 12.0;
        fish.hungry = true;
        fish.eat(0.012, 1.5);
        assert_eq!(fish.size, 1.5);
        assert_eq!(fish.time_since_fed, 0.0);
        assert!(!fish.hungry);
    }

    #[test]
    fn test_eat_distance_scales_with_size() {
        let fish = Fish::new(FishType::Clownfish, 0.5);
        assert!((fish.eat_distance() - 0.8).abs() < 1e-6);
        assert!(fish.can_eat(Vec3::ZERO, Vec3::new(0.79, 0.0, 0.0)));
        assert!(!fish.can_eat(Vec3::ZERO, Vec3::new(0.81, 0.0, 0.0)));
    }

    #[test]
    fn test_egg_value_formula() {
        let config = SimConfig::default();
        let adult = Fish::new(FishType::Clownfish, 1.0);
        let spec = config.fish_types.get(FishType::Clownfish);
        assert_eq!(adult.egg_value(&config.stages, &config.egg, spec), 20.0);

        let elder = Fish::new(FishType::Glowfish, 1.25);
        let spec = config.fish_types.get(FishType::Glowfish);
        // (10 + 12) × 2 × 2
        assert_eq!(elder.egg_value(&config.stages, &config.egg, spec), 88.0);
    }

    #[test]
    fn test_egg_timer_only_for_breeding_stages() {
        let stages = StageTable::default();
        let mut juvenile = Fish::new(FishType::Clownfish, 0.6);
        assert!(!juvenile.tick_egg_timer(&stages, 8.0, 100.0));
        assert_eq!(juvenile.egg_timer, 0.0);

        let mut adult = Fish::new(FishType::Clownfish, 1.0);
        assert!(!adult.tick_egg_timer(&stages, 8.0, 7.0));
        assert!(adult.tick_egg_timer(&stages, 8.0, 1.0));
        assert_eq!(adult.egg_timer, 0.0);
    }

    #[test]
    fn test_personality_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let p = Personality::random(&mut rng);
            assert!((0.7..1.3).contains(&p.speed_multiplier));
            assert!((0.6..1.4).contains(&p.turn_multiplier));
            assert!((0.5..1.5).contains(&p.wander_frequency));
            assert!((0.1..0.25).contains(&p.wave_amplitude));
            assert!((-0.3..0.3).contains(&p.vertical_bias));
            assert!((0.5..1.5).contains(&p.restlessness));
        }
    }
}
