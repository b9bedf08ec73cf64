//! Pure economy logic: points, fish slots, purchases and game-over.
//!
//! The economy knows nothing about entities or UI. Every state change it makes
//! is queued as an [`EconomyNotice`] that the owner drains once per call site.

use serde::{Deserialize, Serialize};

use crate::config::{EconomyConfig, FishType, FishTypeTable};

/// Cumulative per-game statistics, snapshotted on game over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub total_fish_raised: u32,
    pub total_eggs_collected: u32,
    pub max_points_reached: f64,
    pub fish_died: u32,
    pub fish_eaten_by_shark: u32,
}

impl GameStats {
    fn fresh(starting_points: f64) -> Self {
        Self {
            // The starting fish counts as raised.
            total_fish_raised: 1,
            total_eggs_collected: 0,
            max_points_reached: starting_points,
            fish_died: 0,
            fish_eaten_by_shark: 0,
        }
    }
}

/// Change notifications emitted by the economy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EconomyNotice {
    PointsChanged { points: f64 },
    FishCountChanged { count: u32, max: u32 },
    InsufficientFunds { required: f64, current: f64 },
    GameOver { stats: GameStats },
}

/// Why a purchase did not go through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PurchaseError {
    InsufficientFunds { required: f64, current: f64 },
    TankFull,
}

#[derive(Debug, Clone)]
pub struct Economy {
    config: EconomyConfig,
    fish_types: FishTypeTable,
    points: f64,
    fish_count: u32,
    stats: GameStats,
    game_over: bool,
    notices: Vec<EconomyNotice>,
}

impl Economy {
    pub fn new(config: EconomyConfig, fish_types: FishTypeTable) -> Self {
        let points = config.starting_points;
        Self {
            config,
            fish_types,
            points,
            fish_count: 0,
            stats: GameStats::fresh(points),
            game_over: false,
            notices: Vec::new(),
        }
    }

    pub fn points(&self) -> f64 {
        self.points
    }

    pub fn fish_count(&self) -> u32 {
        self.fish_count
    }

    pub fn max_fish(&self) -> u32 {
        self.config.max_fish
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn stats(&self) -> GameStats {
        self.stats.clone()
    }

    pub fn feed_cost(&self) -> f64 {
        self.config.feed_cost
    }

    pub fn fish_cost(&self, kind: FishType) -> f64 {
        self.fish_types.get(kind).cost
    }

    pub fn can_afford(&self, amount: f64) -> bool {
        self.points >= amount
    }

    /// Take all pending notifications.
    pub fn drain_notices(&mut self) -> Vec<EconomyNotice> {
        std::mem::take(&mut self.notices)
    }

    fn add_points(&mut self, amount: f64) {
        self.points += amount;
        self.stats.max_points_reached = self.stats.max_points_reached.max(self.points);
        self.notify_points();
    }

    fn spend_points(&mut self, amount: f64) -> bool {
        if !self.can_afford(amount) {
            return false;
        }
        self.points -= amount;
        self.notify_points();
        true
    }

    /// Buy one feeding. Emits `InsufficientFunds` on failure.
    pub fn purchase_food(&mut self) -> Result<(), PurchaseError> {
        let cost = self.config.feed_cost;
        if self.spend_points(cost) {
            return Ok(());
        }
        let err = PurchaseError::InsufficientFunds {
            required: cost,
            current: self.points,
        };
        self.notices.push(EconomyNotice::InsufficientFunds {
            required: cost,
            current: self.points,
        });
        Err(err)
    }

    /// Buy a fish of `kind`. A full tank fails silently; otherwise a shortfall
    /// emits `InsufficientFunds`.
    pub fn purchase_fish(&mut self, kind: FishType) -> Result<(), PurchaseError> {
        if self.fish_count >= self.config.max_fish {
            return Err(PurchaseError::TankFull);
        }
        let cost = self.fish_cost(kind);
        if !self.spend_points(cost) {
            self.notices.push(EconomyNotice::InsufficientFunds {
                required: cost,
                current: self.points,
            });
            return Err(PurchaseError::InsufficientFunds {
                required: cost,
                current: self.points,
            });
        }
        self.fish_count += 1;
        self.stats.total_fish_raised += 1;
        self.notify_fish_count();
        Ok(())
    }

    /// Overwrite the population, e.g. after the starting fish is placed.
    pub fn set_fish_count(&mut self, count: u32) {
        self.fish_count = count;
        self.notify_fish_count();
    }

    pub fn collect_egg(&mut self, value: f64) {
        self.add_points(value);
        self.stats.total_eggs_collected += 1;
    }

    /// Record a fish leaving the tank. Reaching zero fish ends the game; calls
    /// with an empty tank are ignored.
    pub fn remove_fish(&mut self, eaten_by_shark: bool) {
        if self.fish_count == 0 {
            return;
        }
        self.fish_count -= 1;
        self.stats.fish_died += 1;
        if eaten_by_shark {
            self.stats.fish_eaten_by_shark += 1;
        }
        self.notify_fish_count();

        if self.fish_count == 0 && !self.game_over {
            self.game_over = true;
            log::info!(
                "Game over: raised {}, died {} ({} to the shark), best {:.0} points",
                self.stats.total_fish_raised,
                self.stats.fish_died,
                self.stats.fish_eaten_by_shark,
                self.stats.max_points_reached
            );
            self.notices.push(EconomyNotice::GameOver {
                stats: self.stats.clone(),
            });
        }
    }

    /// Back to a fresh game with an empty tank.
    pub fn reset(&mut self) {
        self.points = self.config.starting_points;
        self.fish_count = 0;
        self.stats = GameStats::fresh(self.points);
        self.game_over = false;
        self.notices.clear();
        self.notify_points();
        self.notify_fish_count();
    }

    fn notify_points(&mut self) {
        self.notices.push(EconomyNotice::PointsChanged { points: self.points });
    }

    fn notify_fish_count(&mut self) {
        self.notices.push(EconomyNotice::FishCountChanged {
            count: self.fish_count,
            max: self.config.max_fish,
        });
    }
}
