//! Simulation configuration: every tunable constant the simulation reads.
//!
//! All durations are in seconds, speeds in tank units per second and turn
//! rates in radians per second. `SimConfig::default()` is the shipped game
//! balance; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::TankBounds;
use crate::stages::StageTable;

/// The shark keeps one unit from each side wall and has to get between
/// them to finish entering.
pub const MIN_TANK_WIDTH: f32 = 2.0;
/// Wander targets and the shark keep half a unit from floor and ceiling.
pub const MIN_TANK_HEIGHT: f32 = 1.0;

/// Purchasable fish varieties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FishType {
    Clownfish,
    Glowfish,
}

impl FishType {
    pub const ALL: [FishType; 2] = [FishType::Clownfish, FishType::Glowfish];

    pub fn name(&self) -> &'static str {
        match self {
            FishType::Clownfish => "Clownfish",
            FishType::Glowfish => "Glowfish",
        }
    }
}

/// Price and multipliers for one fish variety.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FishTypeSpec {
    pub cost: f64,
    /// Applied on top of the stage egg multiplier.
    pub egg_value_multiplier: f64,
    pub speed_multiplier: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishTypeTable {
    pub clownfish: FishTypeSpec,
    pub glowfish: FishTypeSpec,
}

impl FishTypeTable {
    pub fn get(&self, kind: FishType) -> &FishTypeSpec {
        match kind {
            FishType::Clownfish => &self.clownfish,
            FishType::Glowfish => &self.glowfish,
        }
    }
}

impl Default for FishTypeTable {
    fn default() -> Self {
        Self {
            clownfish: FishTypeSpec {
                cost: 50.0,
                egg_value_multiplier: 1.0,
                speed_multiplier: 1.0,
            },
            glowfish: FishTypeSpec {
                cost: 100.0,
                egg_value_multiplier: 2.0,
                speed_multiplier: 1.2,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_points: f64,
    pub feed_cost: f64,
    /// Food pellets dropped per feeding purchase.
    pub food_per_click: u32,
    pub max_fish: u32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_points: 100.0,
            feed_cost: 1.0,
            food_per_click: 1,
            max_fish: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishConfig {
    pub speed: f32,
    pub turn_speed: f32,
    /// Fraction of the target speed gained per 1/60 s when speeding up.
    pub acceleration: f32,
    pub growth_per_food: f32,
    /// Seconds without food before a fish starts shrinking.
    pub hunger_threshold: f32,
    /// Size lost per second while starving.
    pub shrink_rate: f32,
    pub min_size_before_death: f32,
    /// Base seconds between wander target changes, before personality.
    pub wander_interval: f32,
    pub dying_duration: f32,
    pub dying_float_speed: f32,
}

impl Default for FishConfig {
    fn default() -> Self {
        Self {
            speed: 2.5,
            turn_speed: 3.0,
            acceleration: 0.03,
            growth_per_food: 0.012,
            hunger_threshold: 10.0,
            shrink_rate: 0.015,
            min_size_before_death: 0.2,
            wander_interval: 2.5,
            dying_duration: 3.5,
            dying_float_speed: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodConfig {
    pub sink_speed: f32,
    pub lifetime: f32,
    /// Seconds before expiry during which pellets fade out.
    pub fade_window: f32,
    /// Height above the tank floor where pellets come to rest.
    pub floor_offset: f32,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            sink_speed: 2.0,
            lifetime: 15.0,
            fade_window: 3.0,
            floor_offset: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EggConfig {
    pub base_value: f64,
    pub spawn_interval: f32,
    pub auto_collect_time: f32,
    pub float_speed: f32,
    /// Seconds before auto-collection during which the egg pulses.
    pub pulse_window: f32,
    /// Distance below the tank ceiling where eggs stop rising.
    pub ceiling_offset: f32,
    /// Distance behind the parent fish where eggs appear.
    pub spawn_offset: f32,
}

impl Default for EggConfig {
    fn default() -> Self {
        Self {
            base_value: 10.0,
            spawn_interval: 8.0,
            auto_collect_time: 5.0,
            float_speed: 0.5,
            pulse_window: 2.0,
            ceiling_offset: 0.5,
            spawn_offset: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharkConfig {
    pub min_spawn_interval: f32,
    pub max_spawn_interval: f32,
    pub stay_duration: f32,
    pub speed: f32,
    pub turn_speed: f32,
    pub eat_distance: f32,
    pub eat_cooldown: f32,
    pub max_eats_per_visit: u32,
    pub warning_duration: f32,
    /// How far past the tank wall the shark must swim before it is gone.
    pub exit_margin: f32,
}

impl Default for SharkConfig {
    fn default() -> Self {
        Self {
            min_spawn_interval: 60.0,
            max_spawn_interval: 180.0,
            stay_duration: 15.0,
            speed: 4.0,
            turn_speed: 2.5,
            eat_distance: 1.5,
            eat_cooldown: 3.0,
            max_eats_per_visit: 2,
            warning_duration: 2.0,
            exit_margin: 8.0,
        }
    }
}

/// Complete configuration surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub economy: EconomyConfig,
    pub fish: FishConfig,
    pub stages: StageTable,
    pub fish_types: FishTypeTable,
    pub food: FoodConfig,
    pub egg: EggConfig,
    pub shark: SharkConfig,
    pub tank: TankBounds,
}

impl SimConfig {
    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let econ = &self.economy;
        if econ.starting_points < 0.0 {
            return Err(ConfigError::invalid("economy.starting_points", "must be >= 0"));
        }
        if econ.feed_cost < 0.0 {
            return Err(ConfigError::invalid("economy.feed_cost", "must be >= 0"));
        }
        if econ.max_fish == 0 {
            return Err(ConfigError::invalid("economy.max_fish", "must be at least 1"));
        }

        for kind in FishType::ALL {
            let spec = self.fish_types.get(kind);
            if spec.cost < 0.0 || spec.egg_value_multiplier < 0.0 || spec.speed_multiplier <= 0.0 {
                return Err(ConfigError::invalid(
                    "fish_types",
                    format!("{} has a negative cost/multiplier", kind.name()),
                ));
            }
        }

        let fish = &self.fish;
        positive("fish.speed", fish.speed)?;
        positive("fish.turn_speed", fish.turn_speed)?;
        positive("fish.acceleration", fish.acceleration)?;
        positive("fish.hunger_threshold", fish.hunger_threshold)?;
        positive("fish.wander_interval", fish.wander_interval)?;
        if fish.shrink_rate < 0.0 || fish.growth_per_food < 0.0 || fish.dying_duration < 0.0 {
            return Err(ConfigError::invalid(
                "fish",
                "shrink_rate, growth_per_food and dying_duration must be >= 0",
            ));
        }

        self.validate_stages()?;
        if fish.min_size_before_death >= self.stages.max_size() {
            return Err(ConfigError::invalid(
                "fish.min_size_before_death",
                "must be below the largest stage size",
            ));
        }

        positive("food.lifetime", self.food.lifetime)?;
        positive("egg.spawn_interval", self.egg.spawn_interval)?;
        positive("egg.auto_collect_time", self.egg.auto_collect_time)?;

        let shark = &self.shark;
        positive("shark.min_spawn_interval", shark.min_spawn_interval)?;
        if shark.max_spawn_interval < shark.min_spawn_interval {
            return Err(ConfigError::invalid(
                "shark.max_spawn_interval",
                "must be >= shark.min_spawn_interval",
            ));
        }
        positive("shark.stay_duration", shark.stay_duration)?;
        positive("shark.speed", shark.speed)?;
        positive("shark.turn_speed", shark.turn_speed)?;
        if shark.max_eats_per_visit == 0 {
            return Err(ConfigError::invalid("shark.max_eats_per_visit", "must be at least 1"));
        }

        let t = &self.tank;
        if t.min.x >= t.max.x || t.min.y >= t.max.y || t.min.z > t.max.z {
            return Err(ConfigError::invalid("tank", "min must be below max on every axis"));
        }
        if t.width() <= MIN_TANK_WIDTH || t.height() <= MIN_TANK_HEIGHT {
            return Err(ConfigError::invalid(
                "tank",
                format!(
                    "must be wider than {} and taller than {}",
                    MIN_TANK_WIDTH, MIN_TANK_HEIGHT
                ),
            ));
        }
        Ok(())
    }

    fn validate_stages(&self) -> Result<(), ConfigError> {
        let stages = self.stages.stages();
        if stages.is_empty() {
            return Err(ConfigError::invalid("stages", "at least one stage is required"));
        }
        for (i, stage) in stages.iter().enumerate() {
            if stage.min_size >= stage.max_size {
                return Err(ConfigError::invalid(
                    "stages",
                    format!("{} has min_size >= max_size", stage.kind.name()),
                ));
            }
            if let Some(prev) = i.checked_sub(1).map(|p| &stages[p]) {
                if (prev.max_size - stage.min_size).abs() > f32::EPSILON {
                    return Err(ConfigError::invalid(
                        "stages",
                        format!(
                            "{} does not start where {} ends",
                            stage.kind.name(),
                            prev.kind.name()
                        ),
                    ));
                }
            }
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be > 0 (got {})", value)))
    }
}
