//! End-to-end scenarios driving the full engine.
//!
//! Every test uses a fixed seed and fixed frame deltas, so runs are
//! reproducible.

use fishtank_core::prelude::*;
use fishtank_logic::stages::StageKind;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ── Helpers ────────────────────────────────────────────────────────────

const FRAME: f32 = 1.0 / 60.0;

fn start(config: SimConfig, seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::with_seed(config, seed);
    engine.start_game();
    engine.drain_notifications();
    engine
}

/// Config where fish never get hungry, so long runs stay populated.
fn well_fed_config() -> SimConfig {
    let mut config = SimConfig::default();
    config.fish.hunger_threshold = 10_000.0;
    config
}

fn only_fish(engine: &SimulationEngine) -> hecs::Entity {
    let views = engine.fish_views();
    assert_eq!(views.len(), 1);
    views[0].entity
}

fn game_overs(notes: &[Notification]) -> Vec<fishtank_logic::GameStats> {
    notes
        .iter()
        .filter_map(|n| match n {
            Notification::GameOver(stats) => Some(stats.clone()),
            _ => None,
        })
        .collect()
}

// ── Scenario A: feeding purchase ───────────────────────────────────────

#[test]
fn test_feeding_spawns_one_jittered_pellet() {
    let mut engine = start(SimConfig::default(), 11);
    assert_eq!(engine.economy().points(), 100.0);
    assert_eq!(engine.economy().fish_count(), 1);
    assert_eq!(engine.economy().max_fish(), 10);

    let click = Vec3::new(8.8, 2.0, 3.4);
    assert!(engine.feed_at(click));

    let food = engine.food_views();
    assert_eq!(food.len(), 1);
    let pos = food[0].position;
    assert!(engine.config().tank.contains(&pos));
    assert!((pos.x - click.x).abs() <= 1.0);
    assert!((pos.y - click.y).abs() <= 0.25);
    assert!((pos.z - click.z).abs() <= 1.0);

    assert_eq!(engine.economy().points(), 99.0);
    assert!(engine
        .drain_notifications()
        .contains(&Notification::PointsChanged { points: 99.0 }));
}

#[test]
fn test_feeding_without_points_fails() {
    let mut config = SimConfig::default();
    config.economy.starting_points = 0.0;
    let mut engine = start(config, 12);

    assert!(!engine.feed_at(Vec3::ZERO));
    assert_eq!(engine.food_count(), 0);
    assert_eq!(
        engine.drain_notifications(),
        vec![Notification::InsufficientFunds {
            required: 1.0,
            current: 0.0
        }]
    );
}

#[test]
fn test_fish_eats_pellet_and_grows() {
    let mut engine = start(SimConfig::default(), 13);
    let fish = only_fish(&engine);
    let fish_pos = engine.fish_views()[0].position;

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let pellet = engine
        .world
        .spawn((Food::new(&engine.config().food, &mut rng), Position(fish_pos)));

    let events = engine.update(FRAME);
    assert!(events.contains(&SimEvent::FoodEaten { fish, food: pellet }));
    assert_eq!(engine.food_count(), 0);
    assert!((engine.fish_views()[0].size - 0.312).abs() < 1e-5);
    assert!(engine.drain_notifications().contains(&Notification::Despawned {
        entity: pellet,
        kind: EntityKind::Food
    }));
}

// ── Scenario B: egg production ─────────────────────────────────────────

#[test]
fn test_adult_lays_one_egg_per_interval() {
    let mut engine = start(well_fed_config(), 21);
    let fish = only_fish(&engine);
    {
        let mut body = engine.world.get::<&mut Fish>(fish).unwrap();
        body.size = 1.0;
        body.egg_timer = engine.config().egg.spawn_interval;
    }

    // Exact binary step so timers hit the interval on the nose.
    let step = 0.125;
    let mut values = Vec::new();
    for _ in 0..129 {
        for event in engine.update(step) {
            if let SimEvent::EggProduced { fish: parent, value, .. } = event {
                assert_eq!(parent, fish);
                values.push(value);
            }
        }
    }
    assert_eq!(values.len(), 3);
    assert_eq!(values[0], 20.0);
}

#[test]
fn test_manual_and_auto_collection_pay_once() {
    let mut engine = start(well_fed_config(), 22);
    let fish = only_fish(&engine);
    {
        let mut body = engine.world.get::<&mut Fish>(fish).unwrap();
        body.size = 1.0;
        body.egg_timer = engine.config().egg.spawn_interval;
    }

    engine.update(FRAME);
    let eggs = engine.egg_views();
    assert_eq!(eggs.len(), 1);
    let egg = eggs[0].entity;
    assert!(engine.is_clickable(egg));

    // Run almost to the auto-collect deadline, then click.
    let mut auto_collected = 0;
    while engine.egg_views().first().map(|e| !e.pulsing).unwrap_or(false) {
        engine.update(FRAME);
    }
    assert!(engine.click_egg(egg));
    assert!(!engine.is_clickable(egg));

    for _ in 0..180 {
        for event in engine.update(FRAME) {
            if matches!(event, SimEvent::EggCollected { egg: e, .. } if e == egg) {
                auto_collected += 1;
            }
        }
    }
    assert_eq!(auto_collected, 0);
    assert_eq!(engine.economy().stats().total_eggs_collected, 1);
    assert_eq!(engine.economy().points(), 120.0);
}

#[test]
fn test_click_on_deadline_tick_pays_once() {
    let mut engine = start(well_fed_config(), 24);
    let fish = only_fish(&engine);
    {
        let mut body = engine.world.get::<&mut Fish>(fish).unwrap();
        body.size = 1.0;
        body.egg_timer = engine.config().egg.spawn_interval;
    }
    engine.update(FRAME);
    let egg = engine.egg_views()[0].entity;
    engine.drain_notifications();

    // The next tick would cross the auto-collect deadline.
    let deadline = engine.config().egg.auto_collect_time;
    engine.world.get::<&mut Egg>(egg).unwrap().age = deadline - FRAME / 2.0;
    assert!(engine.click_egg(egg));

    let events = engine.update(FRAME);
    let collected = events
        .iter()
        .filter(|e| matches!(e, SimEvent::EggCollected { .. }))
        .count();
    assert_eq!(collected, 0);
    assert_eq!(engine.egg_count(), 0);

    let popups = engine
        .drain_notifications()
        .into_iter()
        .filter(|n| matches!(n, Notification::PointsPopup { .. }))
        .count();
    assert_eq!(popups, 1);
    assert_eq!(engine.economy().stats().total_eggs_collected, 1);
    assert_eq!(engine.economy().points(), 120.0);
}

#[test]
fn test_uncollected_egg_auto_collects() {
    let mut engine = start(well_fed_config(), 23);
    let fish = only_fish(&engine);
    {
        let mut body = engine.world.get::<&mut Fish>(fish).unwrap();
        body.size = 1.0;
        body.egg_timer = engine.config().egg.spawn_interval;
    }

    let mut collected = Vec::new();
    // 6 s: the first egg auto-collects, the second is not due yet.
    for _ in 0..360 {
        for event in engine.update(FRAME) {
            if let SimEvent::EggCollected { value, automatic, .. } = event {
                collected.push((value, automatic));
            }
        }
    }
    assert_eq!(collected, vec![(20.0, true)]);
    assert_eq!(engine.economy().points(), 120.0);
    assert_eq!(engine.egg_count(), 0);
}

// ── Scenario C: last fish eaten ────────────────────────────────────────

#[test]
fn test_last_fish_eaten_ends_game() {
    let mut engine = start(SimConfig::default(), 31);
    let first = engine.buy_fish(FishType::Clownfish).unwrap();
    let second = engine.buy_fish(FishType::Clownfish).unwrap();
    assert_eq!(engine.economy().points(), 0.0);
    assert!(engine.remove_fish(first, false));
    assert!(engine.remove_fish(second, false));
    assert_eq!(engine.economy().fish_count(), 1);
    engine.drain_notifications();

    let last = engine
        .fish_views()
        .into_iter()
        .map(|v| v.entity)
        .next()
        .unwrap();
    assert!(engine.remove_fish(last, true));

    let notes = engine.drain_notifications();
    let stats = game_overs(&notes);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].total_fish_raised, 3);
    assert_eq!(stats[0].fish_died, 3);
    assert_eq!(stats[0].fish_eaten_by_shark, 1);
    assert!(notes.contains(&Notification::FishCountChanged { count: 0, max: 10 }));
    assert_eq!(engine.phase(), GamePhase::GameOver);

    // Gameplay is frozen until the next game.
    assert!(engine.update(FRAME).is_empty());
    assert!(!engine.feed_at(Vec3::ZERO));

    engine.start_game();
    assert_eq!(engine.phase(), GamePhase::Playing);
    assert_eq!(engine.economy().stats().fish_died, 0);
    assert_eq!(engine.fish_count(), 1);
}

// ── Hunger and the dying phase ─────────────────────────────────────────

#[test]
fn test_unfed_fish_starves_and_game_ends() {
    let mut engine = start(SimConfig::default(), 41);
    let fish = only_fish(&engine);
    let (global_min, global_max) = (0.2, engine.config().stages.max_size());

    let mut died = 0;
    let mut removed = 0;
    let mut last_size = f32::MAX;
    for _ in 0..(40 * 30) {
        for event in engine.update(1.0 / 30.0) {
            match event {
                SimEvent::FishDied { fish: f } if f == fish => died += 1,
                SimEvent::FishRemoved { fish: f } if f == fish => removed += 1,
                _ => {}
            }
        }
        if let Some(view) = engine.fish_views().first() {
            assert!(view.size >= global_min && view.size <= global_max);
            assert_eq!(view.stage, StageKind::Baby);
            if view.hungry && !view.dying {
                assert!(view.size < last_size);
            }
            last_size = view.size;
        }
        if engine.phase() == GamePhase::GameOver {
            break;
        }
    }

    assert_eq!(died, 1);
    assert_eq!(removed, 1);
    assert_eq!(engine.phase(), GamePhase::GameOver);
    let stats = engine.economy().stats();
    assert_eq!(stats.fish_died, 1);
    assert_eq!(stats.fish_eaten_by_shark, 0);
    // Hunger starts at 10 s, shrinking 0.1 takes ~6.7 s, dying takes 3.5 s.
    assert!(engine.sim_time() > 19.0 && engine.sim_time() < 22.0);
}

// ── Shark visits ───────────────────────────────────────────────────────

#[test]
fn test_shark_visit_cycle() {
    let mut config = well_fed_config();
    config.economy.starting_points = 1_000.0;
    config.shark.min_spawn_interval = 1.0;
    config.shark.max_spawn_interval = 1.0;
    config.shark.warning_duration = 0.5;
    let mut engine = start(config, 51);
    for _ in 0..5 {
        assert!(engine.buy_fish(FishType::Clownfish).is_some());
    }
    engine.drain_notifications();

    let mut warned = false;
    let mut arrived = false;
    let mut departed = false;
    let mut eaten = 0;
    for _ in 0..(60 * 60) {
        for event in engine.update(FRAME) {
            match event {
                SimEvent::SharkWarning => {
                    assert!(!arrived);
                    warned = true;
                }
                SimEvent::SharkArrived => {
                    assert!(warned);
                    arrived = true;
                }
                SimEvent::FishEatenByShark { .. } => eaten += 1,
                SimEvent::SharkDeparted => departed = true,
                _ => {}
            }
        }
        if departed {
            break;
        }
    }

    assert!(arrived && departed);
    assert!(eaten <= 2);
    assert!(engine.shark().is_none());
    assert_eq!(engine.fish_count(), 6 - eaten);
    assert_eq!(engine.economy().stats().fish_eaten_by_shark as usize, eaten);

    let warnings: Vec<bool> = engine
        .drain_notifications()
        .into_iter()
        .filter_map(|n| match n {
            Notification::SharkWarning { visible } => Some(visible),
            _ => None,
        })
        .collect();
    assert_eq!(warnings, vec![true, false]);
}

#[test]
fn test_no_shark_without_prey() {
    let mut config = SimConfig::default();
    config.shark.min_spawn_interval = 1.0;
    config.shark.max_spawn_interval = 1.0;
    let mut engine = start(config, 52);
    let fish = only_fish(&engine);
    engine.world.get::<&mut Fish>(fish).unwrap().die();

    for _ in 0..120 {
        let events = engine.update(FRAME);
        assert!(!events.contains(&SimEvent::SharkWarning));
    }
    assert!(!engine.shark_warning_active());
}

#[test]
fn test_reset_mid_warning_hides_it() {
    let mut config = well_fed_config();
    config.shark.min_spawn_interval = 0.5;
    config.shark.max_spawn_interval = 0.5;
    config.shark.warning_duration = 10.0;
    let mut engine = start(config, 53);

    for _ in 0..60 {
        engine.update(FRAME);
    }
    assert!(engine.shark_warning_active());
    engine.drain_notifications();

    engine.start_game();
    assert!(!engine.shark_warning_active());
    assert!(engine
        .drain_notifications()
        .contains(&Notification::SharkWarning { visible: false }));
}
