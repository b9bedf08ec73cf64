//! Simulation events and UI notifications
//!
//! `SimEvent`s are what happened during one `update` call and are returned
//! from it. `Notification`s are the queued messages the UI and renderer
//! consume between frames.

use fishtank_logic::economy::{EconomyNotice, GameStats};
use fishtank_logic::geometry::Vec3;
use fishtank_logic::stages::StageKind;
use hecs::Entity;

use crate::components::EntityKind;

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    FoodEaten { fish: Entity, food: Entity },
    StageChanged { fish: Entity, from: StageKind, to: StageKind },
    EggProduced { fish: Entity, egg: Entity, value: f64 },
    /// Starvation; the fish starts its dying phase.
    FishDied { fish: Entity },
    /// A dead fish finished floating up and left the tank.
    FishRemoved { fish: Entity },
    FishEatenByShark { fish: Entity },
    EggCollected { egg: Entity, value: f64, automatic: bool },
    FoodExpired { food: Entity },
    SharkWarning,
    SharkArrived,
    SharkDeparted,
}

/// Messages for the UI and renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    PointsChanged { points: f64 },
    FishCountChanged { count: u32, max: u32 },
    InsufficientFunds { required: f64, current: f64 },
    GameOver(GameStats),
    SharkWarning { visible: bool },
    PointsPopup { position: Vec3, value: f64 },
    StageChanged { entity: Entity, stage: StageKind },
    /// The renderer should drop whatever it holds for this entity.
    Despawned { entity: Entity, kind: EntityKind },
}

impl From<EconomyNotice> for Notification {
    fn from(notice: EconomyNotice) -> Self {
        match notice {
            EconomyNotice::PointsChanged { points } => Notification::PointsChanged { points },
            EconomyNotice::FishCountChanged { count, max } => {
                Notification::FishCountChanged { count, max }
            }
            EconomyNotice::InsufficientFunds { required, current } => {
                Notification::InsufficientFunds { required, current }
            }
            EconomyNotice::GameOver { stats } => Notification::GameOver(stats),
        }
    }
}
