//! Simulation engine - main entry point for running the aquarium

use std::collections::HashSet;

use fishtank_logic::config::{FishType, SimConfig};
use fishtank_logic::economy::{Economy, EconomyNotice};
use fishtank_logic::geometry::Vec3;
use hecs::{Component, Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::events::{Notification, SimEvent};
use crate::predator::{ScheduleStep, Shark, SharkScheduler};
use crate::spawn::{purchase_spawn_point, spawn_egg, spawn_fish, spawn_food};
use crate::systems::*;
use crate::views::{self, EggView, FishView, FoodView, SharkView};

/// Which screen the game is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Menu,
    Playing,
    GameOver,
}

/// Main simulation engine
pub struct SimulationEngine {
    /// ECS world containing fish, food and eggs
    pub world: World,
    /// Simulated seconds since the current game started
    pub sim_time: f64,
    config: SimConfig,
    economy: Economy,
    rng: ChaCha8Rng,
    seed: u64,
    phase: GamePhase,
    shark: Option<Shark>,
    shark_schedule: SharkScheduler,
    /// Eggs the player can click
    clickable: HashSet<Entity>,
    notifications: Vec<Notification>,
    time_scale: f32,
}

impl SimulationEngine {
    /// Create an engine with a random seed, sitting at the menu.
    pub fn new(config: SimConfig) -> Self {
        let seed = rand::thread_rng().gen();
        Self::with_seed(config, seed)
    }

    /// Create an engine whose every random draw follows from `seed`.
    pub fn with_seed(config: SimConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let economy = Economy::new(config.economy.clone(), config.fish_types.clone());
        let shark_schedule = SharkScheduler::new(&config.shark, &mut rng);
        Self {
            world: World::new(),
            sim_time: 0.0,
            config,
            economy,
            rng,
            seed,
            phase: GamePhase::Menu,
            shark: None,
            shark_schedule,
            clickable: HashSet::new(),
            notifications: Vec::new(),
            time_scale: 1.0,
        }
    }

    /// Start (or retry) a game: empty tank, fresh economy, one clownfish in
    /// the middle.
    pub fn start_game(&mut self) {
        self.clear_scene();
        self.economy.reset();
        self.sim_time = 0.0;

        let center = self.config.tank.center();
        spawn_fish(&mut self.world, FishType::Clownfish, center, &self.config, &mut self.rng);
        self.economy.set_fish_count(1);
        self.phase = GamePhase::Playing;
        self.flush_economy();
        log::info!(
            "New game started (seed {}, {:.0} points)",
            self.seed,
            self.economy.points()
        );
    }

    /// Leave the game for the menu, clearing the tank.
    pub fn show_menu(&mut self) {
        self.clear_scene();
        self.phase = GamePhase::Menu;
        log::info!("Returned to menu");
    }

    /// Advance the simulation by `delta_seconds` of wall time and return
    /// what happened. Does nothing outside the playing phase.
    pub fn update(&mut self, delta_seconds: f32) -> Vec<SimEvent> {
        let mut events = Vec::new();
        if self.phase != GamePhase::Playing {
            return events;
        }
        let delta = delta_seconds * self.time_scale;
        if delta <= 0.0 {
            return events;
        }
        self.sim_time += delta as f64;

        self.step(delta, &mut events);

        for event in &events {
            if let SimEvent::StageChanged { fish, to, .. } = event {
                self.notifications.push(Notification::StageChanged {
                    entity: *fish,
                    stage: *to,
                });
            }
        }
        events
    }

    fn step(&mut self, delta: f32, events: &mut Vec<SimEvent>) {
        // 1. Fish
        self.update_fish(delta, events);
        if self.phase != GamePhase::Playing {
            return;
        }

        // 2. Food
        for spent in food_system(&mut self.world, &self.config, delta) {
            if self.remove_food(spent.entity) && spent.expired {
                events.push(SimEvent::FoodExpired { food: spent.entity });
            }
        }

        // 3. Eggs
        for spent in egg_system(&mut self.world, &self.config, delta) {
            if let Some(value) = spent.auto_collected {
                self.pay_out_egg(spent.entity, value);
                events.push(SimEvent::EggCollected {
                    egg: spent.entity,
                    value,
                    automatic: true,
                });
            }
            self.remove_egg(spent.entity);
        }

        // 4. Feeding, then sweep what was eaten
        events.extend(feeding_system(&mut self.world, &self.config));
        for entity in self.spent_food() {
            self.remove_food(entity);
        }

        // 5. Shark schedule
        self.update_shark_schedule(delta, events);

        // 6. Shark
        self.update_shark(delta, events);
    }

    fn update_fish(&mut self, delta: f32, events: &mut Vec<SimEvent>) {
        let food = available_food_positions(&self.world);

        for fish in dying_system(&mut self.world, &self.config, delta) {
            if self.remove_fish(fish, false) {
                events.push(SimEvent::FishRemoved { fish });
            }
        }
        if self.phase != GamePhase::Playing {
            return;
        }

        events.extend(hunger_system(&mut self.world, &self.config, delta));
        swimming_system(&mut self.world, &food, &self.config, &mut self.rng, delta);

        for laid in egg_production_system(&mut self.world, &self.config, delta) {
            let egg = spawn_egg(&mut self.world, laid.position, laid.value);
            self.clickable.insert(egg);
            events.push(SimEvent::EggProduced {
                fish: laid.parent,
                egg,
                value: laid.value,
            });
        }
    }

    fn update_shark_schedule(&mut self, delta: f32, events: &mut Vec<SimEvent>) {
        let has_prey = has_prey(&self.world);
        let step = self
            .shark_schedule
            .advance(delta, has_prey, self.shark.is_some(), &self.config.shark);

        match step {
            ScheduleStep::Idle => {}
            ScheduleStep::WarningStarted => {
                log::info!("Shark approaching");
                self.notifications.push(Notification::SharkWarning { visible: true });
                events.push(SimEvent::SharkWarning);
            }
            ScheduleStep::SpawnShark => {
                self.notifications.push(Notification::SharkWarning { visible: false });
                let shark = Shark::spawn(&self.config.shark, &self.config.tank, &mut self.rng);
                log::info!(
                    "Shark entering at ({:.1}, {:.1})",
                    shark.position().x,
                    shark.position().y
                );
                self.shark = Some(shark);
                events.push(SimEvent::SharkArrived);
            }
        }
    }

    fn update_shark(&mut self, delta: f32, events: &mut Vec<SimEvent>) {
        let Some(shark) = self.shark.as_mut() else {
            return;
        };

        let prey = nearest_prey(&self.world, shark.position());
        shark.set_target_fish(prey.map(|(_, pos)| pos));
        let mut eaten = None;
        if let Some((fish, pos)) = prey {
            if shark.can_eat_fish(pos) {
                shark.eat_fish();
                eaten = Some(fish);
            }
        }

        if let Some(fish) = eaten {
            log::info!("Shark ate fish {:?}", fish);
            if self.remove_fish(fish, true) {
                events.push(SimEvent::FishEatenByShark { fish });
            }
            if self.phase != GamePhase::Playing {
                return;
            }
        }

        let Some(shark) = self.shark.as_mut() else {
            return;
        };
        shark.update(delta, &self.config.tank, &mut self.rng);
        if !shark.is_active() {
            log::info!("Shark left after {} bites", shark.eats_this_visit());
            self.shark = None;
            self.shark_schedule.reschedule(&self.config.shark, &mut self.rng);
            events.push(SimEvent::SharkDeparted);
        }
    }

    /// Buy food and drop it around `point`. Returns false when the player
    /// cannot pay.
    pub fn feed_at(&mut self, point: Vec3) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let bought = self.economy.purchase_food();
        self.flush_economy();
        if bought.is_err() {
            return false;
        }
        for _ in 0..self.config.economy.food_per_click {
            spawn_food(&mut self.world, point, &self.config, &mut self.rng);
        }
        true
    }

    /// Buy a fish of `kind`. `None` when the tank is full or funds are short.
    pub fn buy_fish(&mut self, kind: FishType) -> Option<Entity> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        let bought = self.economy.purchase_fish(kind);
        self.flush_economy();
        if let Err(err) = bought {
            log::debug!("Could not buy {}: {:?}", kind.name(), err);
            return None;
        }
        let position = purchase_spawn_point(&self.config, &mut self.rng);
        let fish = spawn_fish(&mut self.world, kind, position, &self.config, &mut self.rng);
        log::info!("Bought a {} ({} fish)", kind.name(), self.economy.fish_count());
        Some(fish)
    }

    /// Player clicked an egg. Unknown or already collected eggs are ignored.
    pub fn click_egg(&mut self, egg: Entity) -> bool {
        if self.phase != GamePhase::Playing || !self.clickable.contains(&egg) {
            return false;
        }
        let payout = match self.world.get::<&mut Egg>(egg) {
            Ok(mut egg) => egg.collect(),
            Err(_) => None,
        };
        let Some(value) = payout else {
            return false;
        };
        self.clickable.remove(&egg);
        self.pay_out_egg(egg, value);
        true
    }

    fn pay_out_egg(&mut self, egg: Entity, value: f64) {
        let position = self
            .world
            .get::<&Position>(egg)
            .map(|p| p.0)
            .unwrap_or_default();
        self.economy.collect_egg(value);
        self.notifications.push(Notification::PointsPopup { position, value });
        self.flush_economy();
    }

    /// Remove a fish and account for it in the economy. Returns false if the
    /// entity is not a live fish.
    pub fn remove_fish(&mut self, fish: Entity, eaten_by_shark: bool) -> bool {
        if !self.has::<Fish>(fish) || !self.dispose(fish, EntityKind::Fish) {
            return false;
        }
        self.economy.remove_fish(eaten_by_shark);
        self.flush_economy();
        true
    }

    pub fn remove_food(&mut self, food: Entity) -> bool {
        self.has::<Food>(food) && self.dispose(food, EntityKind::Food)
    }

    pub fn remove_egg(&mut self, egg: Entity) -> bool {
        self.has::<Egg>(egg) && self.dispose(egg, EntityKind::Egg)
    }

    fn has<T: Component>(&self, entity: Entity) -> bool {
        self.world.get::<&T>(entity).is_ok()
    }

    fn dispose(&mut self, entity: Entity, kind: EntityKind) -> bool {
        if self.world.despawn(entity).is_err() {
            return false;
        }
        self.clickable.remove(&entity);
        self.notifications.push(Notification::Despawned { entity, kind });
        true
    }

    fn entities_with<T: Component>(&self) -> Vec<Entity> {
        self.world.query::<&T>().iter().map(|(entity, _)| entity).collect()
    }

    fn spent_food(&self) -> Vec<Entity> {
        self.world
            .query::<&Food>()
            .iter()
            .filter(|(_, food)| !food.is_available())
            .map(|(entity, _)| entity)
            .collect()
    }

    /// Dispose every entity, the shark and all timers without touching the
    /// economy.
    fn clear_scene(&mut self) {
        for fish in self.entities_with::<Fish>() {
            self.dispose(fish, EntityKind::Fish);
        }
        for food in self.entities_with::<Food>() {
            self.dispose(food, EntityKind::Food);
        }
        for egg in self.entities_with::<Egg>() {
            self.dispose(egg, EntityKind::Egg);
        }
        self.world.clear();
        self.clickable.clear();
        self.shark = None;
        if self.shark_schedule.is_warning() {
            self.notifications.push(Notification::SharkWarning { visible: false });
        }
        self.shark_schedule.reschedule(&self.config.shark, &mut self.rng);
    }

    fn flush_economy(&mut self) {
        for notice in self.economy.drain_notices() {
            if matches!(notice, EconomyNotice::GameOver { .. }) {
                self.phase = GamePhase::GameOver;
            }
            self.notifications.push(notice.into());
        }
    }

    /// Take every queued UI notification.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn fish_views(&self) -> Vec<FishView> {
        views::fish_views(&self.world, &self.config)
    }

    pub fn food_views(&self) -> Vec<FoodView> {
        views::food_views(&self.world, &self.config)
    }

    pub fn egg_views(&self) -> Vec<EggView> {
        views::egg_views(&self.world, &self.config)
    }

    pub fn shark_view(&self) -> Option<SharkView> {
        self.shark.as_ref().map(views::shark_view)
    }

    /// Set time scale (1.0 = real-time, 0.0 = paused)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn shark(&self) -> Option<&Shark> {
        self.shark.as_ref()
    }

    pub fn shark_warning_active(&self) -> bool {
        self.shark_schedule.is_warning()
    }

    /// Seconds until the next shark warning may start.
    pub fn time_until_shark(&self) -> f32 {
        self.shark_schedule.time_until_visit()
    }

    pub fn is_clickable(&self, entity: Entity) -> bool {
        self.clickable.contains(&entity)
    }

    /// Fish in the tank, dying ones included
    pub fn fish_count(&self) -> usize {
        self.world.query::<&Fish>().iter().count()
    }

    pub fn food_count(&self) -> usize {
        self.world.query::<&Food>().iter().count()
    }

    pub fn egg_count(&self) -> usize {
        self.world.query::<&Egg>().iter().count()
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
