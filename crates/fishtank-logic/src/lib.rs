//! Pure simulation logic for FishTank.
//!
//! This crate contains the aquarium rules that are independent of the ECS
//! world or any renderer. Functions take plain data and return results, making
//! them unit-testable and reusable by the engine and the headless harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Every tunable constant, JSON loading and validation |
//! | [`economy`] | Points, fish slots, purchases, stats and game-over |
//! | [`error`] | Configuration errors |
//! | [`geometry`] | `Vec3` and the tank's swimmable bounds |
//! | [`stages`] | Lifecycle stage table and size lookup |
//! | [`steering`] | Heading/speed easing shared by fish and shark |

pub mod config;
pub mod economy;
pub mod error;
pub mod geometry;
pub mod stages;
pub mod steering;

pub use config::{FishType, SimConfig};
pub use economy::{Economy, EconomyNotice, GameStats, PurchaseError};
pub use error::ConfigError;
pub use geometry::{TankBounds, Vec3};
pub use stages::{FishStage, StageKind, StageTable};
