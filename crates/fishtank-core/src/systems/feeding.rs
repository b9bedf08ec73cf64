//! Feeding system - fish eat food within reach

use fishtank_logic::config::SimConfig;
use fishtank_logic::geometry::Vec3;
use hecs::{Entity, World};

use crate::components::{Fish, Food, Position};
use crate::events::SimEvent;

/// Every living fish eats every available pellet within its reach. A pellet
/// is eaten at most once; a fish may eat several pellets in one tick.
/// Eaten pellets are only marked consumed here and swept by the caller.
pub fn feeding_system(world: &mut World, config: &SimConfig) -> Vec<SimEvent> {
    let mut events = Vec::new();
    let food: Vec<(Entity, Vec3)> = world
        .query::<(&Food, &Position)>()
        .iter()
        .filter(|(_, (food, _))| food.is_available())
        .map(|(entity, (_, pos))| (entity, pos.0))
        .collect();
    if food.is_empty() {
        return events;
    }

    let mut eaten = vec![false; food.len()];
    let max_size = config.stages.max_size();

    for (fish_entity, (fish, pos)) in world.query_mut::<(&mut Fish, &Position)>() {
        if !fish.is_alive() {
            continue;
        }
        for (i, (food_entity, food_pos)) in food.iter().enumerate() {
            if eaten[i] || !fish.can_eat(pos.0, *food_pos) {
                continue;
            }
            eaten[i] = true;
            let before = config.stages.kind_for_size(fish.size);
            fish.eat(config.fish.growth_per_food, max_size);
            let after = config.stages.kind_for_size(fish.size);
            events.push(SimEvent::FoodEaten {
                fish: fish_entity,
                food: *food_entity,
            });
            if before != after {
                log::info!("Fish {:?} grew into {}", fish_entity, after.name());
                events.push(SimEvent::StageChanged {
                    fish: fish_entity,
                    from: before,
                    to: after,
                });
            }
        }
    }

    for ((entity, _), _) in food.iter().zip(&eaten).filter(|(_, eaten)| **eaten) {
        if let Ok(mut pellet) = world.get::<&mut Food>(*entity) {
            pellet.consume();
        }
    }

    events
}
