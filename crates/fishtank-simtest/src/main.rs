//! FishTank Headless Simulation Harness
//!
//! Drives the engine through scripted scenarios and a long soak run with a
//! fixed seed and frame delta. Runs entirely in-process, no rendering.
//!
//! Usage:
//!   cargo run -p fishtank-simtest
//!   cargo run -p fishtank-simtest -- --verbose --seed 7
//!   cargo run -p fishtank-simtest -- --config tank.json --snapshot
//!
//! Exits 1 when a check fails and 2 on a bad command line or config.

use std::path::{Path, PathBuf};

use clap::Parser;
use fishtank_core::prelude::*;
use fishtank_logic::config::FishType;
use fishtank_logic::economy::{Economy, EconomyNotice, PurchaseError};
use fishtank_logic::stages::StageKind;
use fishtank_logic::ConfigError;

const FRAME: f32 = 1.0 / 60.0;
const DEFAULT_SEED: u64 = 0xF15A;
/// Simulated length of the soak run, in seconds.
const SOAK_SECONDS: u32 = 600;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless FishTank simulation harness", long_about = None)]
struct Args {
    /// Print every check, not just failures
    #[arg(short, long)]
    verbose: bool,

    /// Dump the final soak-run state as JSON
    #[arg(long)]
    snapshot: bool,

    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// JSON config file; the built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<SimConfig, ConfigError> {
    match path {
        Some(path) => SimConfig::load(path),
        None => Ok(SimConfig::default()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };
    let verbose = args.verbose;

    println!("=== FishTank Simulation Harness (seed {}) ===\n", args.seed);

    let mut results = Vec::new();

    // 1. Configuration
    results.extend(validate_config(&config, verbose));

    // 2. Economy rules
    results.extend(validate_economy(&config, verbose));

    // 3. Feeding purchase
    results.extend(scenario_feeding(&config, args.seed, verbose));

    // 4. Egg production
    results.extend(scenario_eggs(&config, args.seed, verbose));

    // 5. Losing the last fish
    results.extend(scenario_last_fish(&config, args.seed, verbose));

    // 6. Long scripted run
    let engine = soak_run(&config, args.seed, verbose, &mut results);

    if args.snapshot {
        print_snapshot(&engine);
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn started(config: &SimConfig, seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::with_seed(config.clone(), seed);
    engine.start_game();
    engine.drain_notifications();
    engine
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_config(config: &SimConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let mut results = Vec::new();

    let valid = config.validate();
    results.push(TestResult {
        name: "config_valid".into(),
        passed: valid.is_ok(),
        detail: match &valid {
            Ok(()) => "all constraints hold".into(),
            Err(e) => e.to_string(),
        },
    });

    let roundtrip = config
        .to_json_pretty()
        .and_then(|json| SimConfig::from_json_str(&json));
    results.push(TestResult {
        name: "config_json_roundtrip".into(),
        passed: roundtrip.as_ref().map(|c| c == config).unwrap_or(false),
        detail: match &roundtrip {
            Ok(_) => "serialized config parses back identically".into(),
            Err(e) => e.to_string(),
        },
    });

    let stages = config.stages.stages();
    let contiguous = stages.windows(2).all(|w| w[0].max_size == w[1].min_size);
    results.push(TestResult {
        name: "stage_table_contiguous".into(),
        passed: contiguous && !stages.is_empty(),
        detail: format!(
            "{} stages covering [{}, {}]",
            stages.len(),
            config.stages.min_size(),
            config.stages.max_size()
        ),
    });

    if verbose {
        for stage in stages {
            println!(
                "  {:9} [{:.2}, {:.2}) eggs={} x{}",
                stage.kind.name(),
                stage.min_size,
                stage.max_size,
                stage.can_produce_eggs,
                stage.egg_multiplier
            );
        }
    }

    results
}

// ── 2. Economy ──────────────────────────────────────────────────────────

fn validate_economy(config: &SimConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Economy ---");
    let mut results = Vec::new();
    let cheapest = FishType::ALL
        .iter()
        .map(|k| config.fish_types.get(*k).cost)
        .fold(f64::INFINITY, f64::min);

    // Full tank never reports missing funds
    let mut econ = Economy::new(config.economy.clone(), config.fish_types.clone());
    econ.set_fish_count(config.economy.max_fish);
    econ.collect_egg(cheapest * 10.0);
    econ.drain_notices();
    let full = econ.purchase_fish(FishType::Clownfish);
    let complained = econ
        .drain_notices()
        .iter()
        .any(|n| matches!(n, EconomyNotice::InsufficientFunds { .. }));
    results.push(TestResult {
        name: "economy_full_tank_silent".into(),
        passed: full == Err(PurchaseError::TankFull) && !complained,
        detail: format!("purchase at cap -> {:?}, notified={}", full, complained),
    });

    // Short on funds reports the exact pair
    let mut econ = Economy::new(config.economy.clone(), config.fish_types.clone());
    econ.set_fish_count(1);
    let cost = config.fish_types.get(FishType::Glowfish).cost;
    let spend = (econ.points() - cost + 1.0).max(0.0) as u32;
    for _ in 0..spend {
        let _ = econ.purchase_food();
    }
    let current = econ.points();
    econ.drain_notices();
    let short = econ.purchase_fish(FishType::Glowfish);
    let reported: Vec<(f64, f64)> = econ
        .drain_notices()
        .into_iter()
        .filter_map(|n| match n {
            EconomyNotice::InsufficientFunds { required, current } => Some((required, current)),
            _ => None,
        })
        .collect();
    results.push(TestResult {
        name: "economy_insufficient_pair".into(),
        passed: short.is_err() && current < cost && reported == vec![(cost, current)],
        detail: format!("reported {:?}", reported),
    });

    // Game over fires once with running totals
    let mut econ = Economy::new(config.economy.clone(), config.fish_types.clone());
    econ.set_fish_count(1);
    econ.collect_egg(cheapest * 2.0);
    let bought = (0..2)
        .filter(|_| econ.purchase_fish(FishType::Clownfish).is_ok())
        .count();
    econ.remove_fish(false);
    econ.remove_fish(false);
    econ.drain_notices();
    econ.remove_fish(true);
    econ.remove_fish(true);
    let overs: Vec<_> = econ
        .drain_notices()
        .into_iter()
        .filter_map(|n| match n {
            EconomyNotice::GameOver { stats } => Some(stats),
            _ => None,
        })
        .collect();
    let ok = bought == 2
        && overs.len() == 1
        && overs[0].total_fish_raised == 3
        && overs[0].fish_died == 3
        && overs[0].fish_eaten_by_shark == 1;
    results.push(TestResult {
        name: "economy_game_over_once".into(),
        passed: ok,
        detail: format!("{} game-over notices, stats {:?}", overs.len(), overs.first()),
    });

    results
}

// ── 3. Feeding purchase ─────────────────────────────────────────────────

fn scenario_feeding(config: &SimConfig, seed: u64, _verbose: bool) -> Vec<TestResult> {
    println!("--- Scenario: feeding ---");
    let mut results = Vec::new();
    let mut engine = started(config, seed);
    let before = engine.economy().points();

    let click = config.tank.center();
    let fed = engine.feed_at(click);
    let food = engine.food_views();
    let in_bounds = food.iter().all(|f| config.tank.contains(&f.position));

    results.push(TestResult {
        name: "feed_spawns_food".into(),
        passed: fed && food.len() == config.economy.food_per_click as usize && in_bounds,
        detail: format!("{} pellets, all in bounds: {}", food.len(), in_bounds),
    });
    results.push(TestResult {
        name: "feed_charges_cost".into(),
        passed: engine.economy().points() == before - config.economy.feed_cost,
        detail: format!("{} -> {}", before, engine.economy().points()),
    });

    results
}

// ── 4. Egg production ───────────────────────────────────────────────────

fn scenario_eggs(config: &SimConfig, seed: u64, _verbose: bool) -> Vec<TestResult> {
    println!("--- Scenario: eggs ---");
    let mut results = Vec::new();
    let mut config = config.clone();
    config.fish.hunger_threshold = f32::MAX;
    config.shark.min_spawn_interval = f32::MAX / 2.0;
    config.shark.max_spawn_interval = f32::MAX / 2.0;
    let mut engine = started(&config, seed);

    let adult = config.stages.get(StageKind::Adult).map(|s| s.min_size).unwrap_or(0.8);
    let size = adult.max(1.0).min(config.stages.max_size());
    let Some(fish) = engine.fish_views().first().map(|v| v.entity) else {
        results.push(TestResult {
            name: "eggs_fish_present".into(),
            passed: false,
            detail: "no starting fish".into(),
        });
        return results;
    };
    if let Ok(mut body) = engine.world.get::<&mut Fish>(fish) {
        body.size = size;
        body.egg_timer = config.egg.spawn_interval;
    }

    let stage = config.stages.stage_for_size(size);
    let spec = config.fish_types.get(FishType::Clownfish);
    let expected = (config.egg.base_value + (size * 10.0).floor() as f64)
        * stage.egg_multiplier as f64
        * spec.egg_value_multiplier;

    let mut values = Vec::new();
    let intervals = 3;
    let frames = ((config.egg.spawn_interval * intervals as f32) / FRAME) as usize;
    for _ in 0..frames {
        for event in engine.update(FRAME) {
            if let SimEvent::EggProduced { value, .. } = event {
                values.push(value);
            }
        }
    }

    results.push(TestResult {
        name: "eggs_one_per_interval".into(),
        passed: values.len() == intervals,
        detail: format!("{} eggs over {} intervals", values.len(), intervals),
    });
    results.push(TestResult {
        name: "eggs_value_formula".into(),
        passed: values.first() == Some(&expected),
        detail: format!("first egg {:?}, expected {}", values.first(), expected),
    });

    results
}

// ── 5. Losing the last fish ─────────────────────────────────────────────

fn scenario_last_fish(config: &SimConfig, seed: u64, _verbose: bool) -> Vec<TestResult> {
    println!("--- Scenario: last fish ---");
    let mut results = Vec::new();
    let mut engine = started(config, seed);

    let Some(fish) = engine.fish_views().first().map(|v| v.entity) else {
        return results;
    };
    let removed = engine.remove_fish(fish, true);
    let again = engine.remove_fish(fish, true);
    let notes = engine.drain_notifications();
    let overs: Vec<_> = notes
        .iter()
        .filter_map(|n| match n {
            Notification::GameOver(stats) => Some(stats.clone()),
            _ => None,
        })
        .collect();

    results.push(TestResult {
        name: "last_fish_game_over".into(),
        passed: removed
            && !again
            && overs.len() == 1
            && overs[0].fish_eaten_by_shark == 1
            && overs[0].fish_died == 1
            && engine.economy().fish_count() == 0
            && engine.phase() == GamePhase::GameOver,
        detail: format!("stats {:?}", overs.first()),
    });
    results.push(TestResult {
        name: "game_over_freezes".into(),
        passed: engine.update(FRAME).is_empty(),
        detail: "no events after game over".into(),
    });

    results
}

// ── 6. Soak run ─────────────────────────────────────────────────────────

#[derive(Default)]
struct SoakTally {
    eggs_laid: u32,
    eggs_clicked: u32,
    eggs_auto: u32,
    food_eaten: u32,
    stage_ups: u32,
    starved: u32,
    shark_visits: u32,
    shark_bites: u32,
    violations: Vec<String>,
}

/// A simple scripted player: keeps a little food in the tank near the
/// fish, clicks pulsing eggs and buys clownfish when it can spare points.
fn play_frame(engine: &mut SimulationEngine, frame: usize, tally: &mut SoakTally) {
    if frame % 90 == 0 && engine.food_count() < 3 {
        let fish = engine.fish_views();
        if !fish.is_empty() {
            let target = fish[frame / 90 % fish.len()].position;
            let drop = Vec3::new(target.x, target.y + 2.0, target.z);
            engine.feed_at(drop);
        }
    }

    for egg in engine.egg_views() {
        if egg.pulsing && engine.click_egg(egg.entity) {
            tally.eggs_clicked += 1;
        }
    }

    let cost = engine.economy().fish_cost(FishType::Clownfish);
    if frame % 600 == 0
        && engine.economy().points() > cost * 2.0
        && engine.economy().fish_count() < engine.economy().max_fish()
    {
        engine.buy_fish(FishType::Clownfish);
    }
}

fn check_invariants(engine: &SimulationEngine, frame: usize, tally: &mut SoakTally) {
    if tally.violations.len() > 10 {
        return;
    }
    let config = engine.config();
    let death = config.fish.min_size_before_death.min(config.stages.min_size());
    for fish in engine.fish_views() {
        if !config.tank.contains(&fish.position) && !fish.dying {
            tally
                .violations
                .push(format!("frame {}: fish out of bounds at {:?}", frame, fish.position));
        }
        if fish.size < death || fish.size > config.stages.max_size() {
            tally
                .violations
                .push(format!("frame {}: fish size {} out of range", frame, fish.size));
        }
        if fish.stage != config.stages.kind_for_size(fish.size) {
            tally
                .violations
                .push(format!("frame {}: stage {:?} for size {}", frame, fish.stage, fish.size));
        }
    }
    if engine.phase() == GamePhase::Playing && engine.fish_count() as u32 != engine.economy().fish_count() {
        tally.violations.push(format!(
            "frame {}: {} fish entities but economy counts {}",
            frame,
            engine.fish_count(),
            engine.economy().fish_count()
        ));
    }
    if engine.economy().points() < 0.0 {
        tally
            .violations
            .push(format!("frame {}: negative points {}", frame, engine.economy().points()));
    }
}

fn soak_run(config: &SimConfig, seed: u64, verbose: bool, results: &mut Vec<TestResult>) -> SimulationEngine {
    println!("--- Soak run ({} s) ---", SOAK_SECONDS);
    let mut engine = started(config, seed);
    let mut tally = SoakTally::default();
    let frames = (SOAK_SECONDS as f32 / FRAME) as usize;
    let mut frames_run = 0;

    for frame in 0..frames {
        play_frame(&mut engine, frame, &mut tally);
        for event in engine.update(FRAME) {
            match event {
                SimEvent::EggProduced { .. } => tally.eggs_laid += 1,
                SimEvent::EggCollected { automatic: true, .. } => tally.eggs_auto += 1,
                SimEvent::FoodEaten { .. } => tally.food_eaten += 1,
                SimEvent::StageChanged { from, to, .. } if to > from => tally.stage_ups += 1,
                SimEvent::FishDied { .. } => tally.starved += 1,
                SimEvent::SharkArrived => tally.shark_visits += 1,
                SimEvent::FishEatenByShark { .. } => tally.shark_bites += 1,
                _ => {}
            }
        }
        check_invariants(&engine, frame, &mut tally);
        frames_run = frame + 1;
        if engine.phase() != GamePhase::Playing {
            break;
        }
    }
    engine.drain_notifications();

    let stats = engine.economy().stats();
    results.push(TestResult {
        name: "soak_invariants".into(),
        passed: tally.violations.is_empty(),
        detail: if tally.violations.is_empty() {
            format!("{} frames without violations", frames_run)
        } else {
            tally.violations.join("; ")
        },
    });
    results.push(TestResult {
        name: "soak_stats_consistent".into(),
        passed: stats.fish_eaten_by_shark == tally.shark_bites
            && stats.total_eggs_collected == tally.eggs_clicked + tally.eggs_auto
            && stats.fish_died >= stats.fish_eaten_by_shark,
        detail: format!(
            "eggs {} collected / {} laid, {} bites, {} died",
            stats.total_eggs_collected, tally.eggs_laid, stats.fish_eaten_by_shark, stats.fish_died
        ),
    });
    results.push(TestResult {
        name: "soak_fish_grew".into(),
        passed: tally.food_eaten > 0 && tally.stage_ups > 0,
        detail: format!("{} pellets eaten, {} stage-ups", tally.food_eaten, tally.stage_ups),
    });

    if verbose {
        println!(
            "  phase={:?} t={:.0}s points={:.0} fish={} starved={} shark visits={}",
            engine.phase(),
            engine.sim_time(),
            engine.economy().points(),
            engine.economy().fish_count(),
            tally.starved,
            tally.shark_visits
        );
    }

    engine
}

fn print_snapshot(engine: &SimulationEngine) {
    let snapshot = serde_json::json!({
        "seed": engine.seed(),
        "phase": engine.phase(),
        "sim_time": engine.sim_time(),
        "points": engine.economy().points(),
        "stats": engine.economy().stats(),
        "fish": engine.fish_views(),
        "food": engine.food_views(),
        "eggs": engine.egg_views(),
        "shark": engine.shark_view(),
    });
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("could not serialize snapshot: {}", e),
    }
}
