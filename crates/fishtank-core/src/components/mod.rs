//! Component definitions for the ECS simulation.
//!
//! Components are data structs attached to entities. Per-entity rules that
//! touch a single component (hunger, growth, decay) live next to the data;
//! anything that reads several entities lives in systems.

mod common;
mod fish;
mod items;

pub use common::*;
pub use fish::*;
pub use items::*;
