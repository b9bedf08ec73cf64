//! FishTank Core - Aquarium Simulation Engine
//!
//! An ECS-based simulation of a small aquarium: fish with their own
//! personalities swim, eat, grow through life stages, lay eggs and starve,
//! while a shark drops by now and then to hunt them.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Fish, food pellets, eggs
//! - **Components**: Pure data attached to entities (Position, Fish, Swim, etc.)
//! - **Systems**: Logic that queries and updates components
//!
//! The shark lives outside the world in [`predator`], and the
//! [`engine::SimulationEngine`] ties everything to the economy from
//! `fishtank_logic`.
//!
//! # Example
//!
//! ```rust,no_run
//! use fishtank_core::prelude::*;
//!
//! let mut engine = SimulationEngine::with_seed(SimConfig::default(), 7);
//! engine.start_game();
//!
//! loop {
//!     for event in engine.update(1.0 / 60.0) {
//!         println!("{:?}", event);
//!     }
//!     for note in engine.drain_notifications() {
//!         println!("{:?}", note);
//!     }
//! }
//! ```

pub mod components;
pub mod engine;
pub mod events;
pub mod predator;
pub mod spawn;
pub mod systems;
pub mod views;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{GamePhase, SimulationEngine};
    pub use crate::events::{Notification, SimEvent};
    pub use crate::predator::{Shark, SharkState};
    pub use crate::views::{EggView, FishView, FoodView, SharkView};
    pub use fishtank_logic::config::{FishType, SimConfig};
    pub use fishtank_logic::geometry::Vec3;
}
