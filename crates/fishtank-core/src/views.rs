//! Read-only snapshots of entity state for renderers and tools

use fishtank_logic::config::{FishType, SimConfig};
use fishtank_logic::geometry::Vec3;
use fishtank_logic::stages::StageKind;
use hecs::{Entity, World};
use serde::Serialize;

use crate::components::*;
use crate::predator::{Shark, SharkState};

#[derive(Debug, Clone, Serialize)]
pub struct FishView {
    #[serde(skip)]
    pub entity: Entity,
    pub position: Vec3,
    pub kind: FishType,
    pub size: f32,
    pub stage: StageKind,
    pub heading: f32,
    pub facing_right: bool,
    pub hungry: bool,
    pub dying: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FoodView {
    #[serde(skip)]
    pub entity: Entity,
    pub position: Vec3,
    pub opacity: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EggView {
    #[serde(skip)]
    pub entity: Entity,
    pub position: Vec3,
    pub value: f64,
    pub scale: f32,
    pub pulsing: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SharkView {
    pub position: Vec3,
    pub heading: f32,
    pub facing_right: bool,
    pub state: SharkState,
}

pub fn fish_views(world: &World, config: &SimConfig) -> Vec<FishView> {
    let mut views: Vec<FishView> = world
        .query::<(&Fish, &Swim, &Position)>()
        .iter()
        .map(|(entity, (fish, swim, pos))| FishView {
            entity,
            position: pos.0,
            kind: fish.kind,
            size: fish.size,
            stage: config.stages.kind_for_size(fish.size),
            heading: swim.heading,
            facing_right: swim.facing_right,
            hungry: fish.hungry,
            dying: fish.is_dying(),
        })
        .collect();
    views.sort_by_key(|v| v.entity.id());
    views
}

/// Available pellets only; eaten ones are about to be swept.
pub fn food_views(world: &World, config: &SimConfig) -> Vec<FoodView> {
    let mut views: Vec<FoodView> = world
        .query::<(&Food, &Position)>()
        .iter()
        .filter(|(_, (food, _))| food.is_available())
        .map(|(entity, (food, pos))| FoodView {
            entity,
            position: pos.0,
            opacity: food.opacity(&config.food),
        })
        .collect();
    views.sort_by_key(|v| v.entity.id());
    views
}

pub fn egg_views(world: &World, config: &SimConfig) -> Vec<EggView> {
    let mut views: Vec<EggView> = world
        .query::<(&Egg, &Position)>()
        .iter()
        .filter(|(_, (egg, _))| egg.is_available())
        .map(|(entity, (egg, pos))| EggView {
            entity,
            position: pos.0,
            value: egg.value,
            scale: egg.display_scale(&config.egg),
            pulsing: egg.is_pulsing(&config.egg),
        })
        .collect();
    views.sort_by_key(|v| v.entity.id());
    views
}

pub fn shark_view(shark: &Shark) -> SharkView {
    SharkView {
        position: shark.position(),
        heading: shark.heading(),
        facing_right: shark.facing_right(),
        state: shark.state(),
    }
}
