//! Food and egg components

use fishtank_logic::config::{EggConfig, FoodConfig};
use fishtank_logic::geometry::{TankBounds, Vec3};
use fishtank_logic::steering::REFERENCE_FRAME;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A sinking food pellet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub age: f32,
    pub sink_speed: f32,
    pub consumed: bool,
}

impl Food {
    /// New pellet with its sink speed jittered ±20% around the configured value.
    pub fn new(config: &FoodConfig, rng: &mut impl Rng) -> Self {
        Self {
            age: 0.0,
            sink_speed: config.sink_speed * rng.gen_range(0.8..1.2),
            consumed: false,
        }
    }

    pub fn is_available(&self) -> bool {
        !self.consumed
    }

    pub fn consume(&mut self) {
        self.consumed = true;
    }

    /// Sink, wobble and age. Returns true on the tick the pellet expires.
    pub fn update(&mut self, position: &mut Vec3, config: &FoodConfig, bounds: &TankBounds, delta: f32) -> bool {
        if self.consumed {
            return false;
        }
        self.age += delta;
        if self.age >= config.lifetime {
            self.consumed = true;
            return true;
        }

        let frames = delta / REFERENCE_FRAME;
        position.y -= self.sink_speed * delta;
        position.x += (self.age * 3.0).sin() * 0.005 * frames;
        position.z += (self.age * 2.0).cos() * 0.003 * frames;

        let floor = bounds.min.y + config.floor_offset;
        if position.y < floor {
            position.y = floor;
        }
        position.x = position.x.clamp(bounds.min.x, bounds.max.x);
        position.z = position.z.clamp(bounds.min.z, bounds.max.z);
        false
    }

    /// Render opacity; fades to zero over the last seconds of its life.
    pub fn opacity(&self, config: &FoodConfig) -> f32 {
        let fade_start = config.lifetime - config.fade_window;
        if self.age <= fade_start || config.fade_window <= 0.0 {
            return 1.0;
        }
        (1.0 - (self.age - fade_start) / config.fade_window).clamp(0.0, 1.0)
    }
}

/// A floating egg worth `value` points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Egg {
    pub value: f64,
    pub age: f32,
    /// Spawn-in scale, 0 to 1
    pub scale: f32,
    pub collected: bool,
}

impl Egg {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            age: 0.0,
            scale: 0.0,
            collected: false,
        }
    }

    pub fn is_available(&self) -> bool {
        !self.collected
    }

    /// Collect the egg. Only the first call pays out.
    pub fn collect(&mut self) -> Option<f64> {
        if self.collected {
            return None;
        }
        self.collected = true;
        Some(self.value)
    }

    /// Float, wobble and age. Returns the payout if the egg auto-collected
    /// on this tick.
    pub fn update(&mut self, position: &mut Vec3, config: &EggConfig, bounds: &TankBounds, delta: f32) -> Option<f64> {
        if self.collected {
            return None;
        }
        self.age += delta;
        self.scale = (self.scale + delta * 5.0).min(1.0);

        let frames = delta / REFERENCE_FRAME;
        position.y += config.float_speed * delta;
        position.x += (self.age * 2.0).sin() * 0.002 * frames;
        position.z += (self.age * 1.5).cos() * 0.002 * frames;

        let ceiling = bounds.max.y - config.ceiling_offset;
        if position.y > ceiling {
            position.y = ceiling;
        }

        if self.age >= config.auto_collect_time {
            return self.collect();
        }
        None
    }

    /// True in the window before auto-collection.
    pub fn is_pulsing(&self, config: &EggConfig) -> bool {
        self.age > config.auto_collect_time - config.pulse_window
    }

    /// Render scale including the pre-collection pulse.
    pub fn display_scale(&self, config: &EggConfig) -> f32 {
        if self.is_pulsing(config) {
            1.0 + (self.age * 10.0).sin() * 0.1
        } else {
            self.scale
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_food_sinks_to_floor_and_expires() {
        let config = FoodConfig::default();
        let bounds = TankBounds::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut food = Food::new(&config, &mut rng);
        assert!(food.sink_speed >= 1.6 && food.sink_speed <= 2.4);

        let mut pos = Vec3::new(0.0, 4.0, 0.0);
        food.update(&mut pos, &config, &bounds, 0.5);
        assert!(pos.y < 4.0);

        for _ in 0..20 {
            assert!(!food.update(&mut pos, &config, &bounds, 0.5));
        }
        assert!((pos.y - (bounds.min.y + config.floor_offset)).abs() < 1e-5);

        let mut expired = 0;
        for _ in 0..20 {
            if food.update(&mut pos, &config, &bounds, 0.5) {
                expired += 1;
            }
        }
        assert_eq!(expired, 1);
        assert!(!food.is_available());
    }

    #[test]
    fn test_food_fades_at_end_of_life() {
        let config = FoodConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut food = Food::new(&config, &mut rng);
        food.age = 10.0;
        assert_eq!(food.opacity(&config), 1.0);
        food.age = 13.5;
        assert!((food.opacity(&config) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_egg_rises_to_ceiling() {
        let config = EggConfig::default();
        let bounds = TankBounds::default();
        let mut egg = Egg::new(20.0);
        let mut pos = Vec3::new(0.0, 4.0, 0.0);
        for _ in 0..4 {
            assert_eq!(egg.update(&mut pos, &config, &bounds, 0.5), None);
        }
        assert!((pos.y - (bounds.max.y - config.ceiling_offset)).abs() < 1e-5);
        assert_eq!(egg.scale, 1.0);
    }

    #[test]
    fn test_egg_auto_collects_once() {
        let config = EggConfig::default();
        let bounds = TankBounds::default();
        let mut egg = Egg::new(20.0);
        let mut pos = Vec3::ZERO;
        let payouts: Vec<f64> = (0..20)
            .filter_map(|_| egg.update(&mut pos, &config, &bounds, 0.5))
            .collect();
        assert_eq!(payouts, vec![20.0]);
        assert_eq!(egg.collect(), None);
    }

    #[test]
    fn test_manual_collect_beats_auto_collect() {
        let config = EggConfig::default();
        let bounds = TankBounds::default();
        let mut egg = Egg::new(15.0);
        egg.age = 4.99;
        let mut pos = Vec3::ZERO;

        assert_eq!(egg.collect(), Some(15.0));
        assert_eq!(egg.update(&mut pos, &config, &bounds, 0.1), None);
        assert!(!egg.is_available());
    }

    #[test]
    fn test_egg_pulses_before_deadline() {
        let config = EggConfig::default();
        let mut egg = Egg::new(10.0);
        egg.age = 2.0;
        assert!(!egg.is_pulsing(&config));
        egg.age = 3.5;
        assert!(egg.is_pulsing(&config));
    }
}
