//! Systems - logic that operates on components

mod feeding;
mod hunger;
mod items;
mod predation;
mod reproduction;
mod swimming;

pub use feeding::*;
pub use hunger::*;
pub use items::*;
pub use predation::*;
pub use reproduction::*;
pub use swimming::*;
