//! Hunger system - shrinks unfed fish and runs the dying phase

use fishtank_logic::config::SimConfig;
use hecs::{Entity, World};

use crate::components::{Fish, HungerOutcome, Position};
use crate::events::SimEvent;

/// Advance every living fish's hunger clock. Fish that starve this tick
/// start dying and are reported once.
pub fn hunger_system(world: &mut World, config: &SimConfig, delta: f32) -> Vec<SimEvent> {
    let mut events = Vec::new();

    for (entity, fish) in world.query_mut::<&mut Fish>() {
        if !fish.is_alive() {
            continue;
        }
        let before = config.stages.kind_for_size(fish.size);
        let outcome = fish.tick_hunger(&config.fish, delta);
        let after = config.stages.kind_for_size(fish.size);

        if before != after {
            log::debug!("Fish {:?} shrank from {} to {}", entity, before.name(), after.name());
            events.push(SimEvent::StageChanged {
                fish: entity,
                from: before,
                to: after,
            });
        }
        if outcome == HungerOutcome::Starved {
            log::info!("Fish {:?} starved", entity);
            events.push(SimEvent::FishDied { fish: entity });
        }
    }

    events
}

/// Float dying fish toward the ceiling. Returns the fish whose dying phase
/// is over and which should be removed.
pub fn dying_system(world: &mut World, config: &SimConfig, delta: f32) -> Vec<Entity> {
    let mut finished = Vec::new();
    let ceiling = config.tank.max.y;

    for (entity, (fish, pos)) in world.query_mut::<(&mut Fish, &mut Position)>() {
        if !fish.is_dying() {
            continue;
        }
        pos.0.y = (pos.0.y + config.fish.dying_float_speed * delta).min(ceiling);
        if fish.tick_dying(config.fish.dying_duration, delta) {
            finished.push(entity);
        }
    }

    finished
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishtank_logic::config::FishType;
    use fishtank_logic::stages::StageKind;

    #[test]
    fn test_starving_fish_reports_death_once() {
        let config = SimConfig::default();
        let mut world = World::new();
        let mut fish = Fish::new(FishType::Clownfish, 0.205);
        fish.time_since_fed = 30.0;
        let entity = world.spawn((fish, Position::new(0.0, 0.0, 0.0)));

        let events = hunger_system(&mut world, &config, 1.0);
        assert_eq!(events, vec![SimEvent::FishDied { fish: entity }]);
        assert!(hunger_system(&mut world, &config, 1.0).is_empty());
    }

    #[test]
    fn test_shrinking_across_stage_boundary_is_reported() {
        let config = SimConfig::default();
        let mut world = World::new();
        let mut fish = Fish::new(FishType::Clownfish, 0.505);
        fish.time_since_fed = 30.0;
        let entity = world.spawn((fish, Position::new(0.0, 0.0, 0.0)));

        let events = hunger_system(&mut world, &config, 1.0);
        assert_eq!(
            events,
            vec![SimEvent::StageChanged {
                fish: entity,
                from: StageKind::Juvenile,
                to: StageKind::Baby,
            }]
        );
    }

    #[test]
    fn test_dying_fish_floats_then_finishes() {
        let config = SimConfig::default();
        let mut world = World::new();
        let mut fish = Fish::new(FishType::Clownfish, 0.2);
        fish.die();
        let entity = world.spawn((fish, Position::new(0.0, 4.5, 0.0)));

        assert!(dying_system(&mut world, &config, 2.0).is_empty());
        let y = world.get::<&Position>(entity).map(|p| p.0.y).unwrap_or(0.0);
        assert_eq!(y, config.tank.max.y);
        assert_eq!(dying_system(&mut world, &config, 2.0), vec![entity]);
    }
}
