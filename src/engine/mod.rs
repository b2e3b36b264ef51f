//! The simulation engine.
//!
//! [`Engine`] owns every live entity plus the [`RunState`] and is the only
//! thing that mutates them. One [`Engine::update`] call advances exactly one
//! tick; the engine never sleeps or reads the wall clock on its own, so all
//! pacing goes through the injected [`Clock`] and all chance through the
//! injected random source.

mod collision;
mod events;
mod wave;

use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::entities::{Enemy, Entity, Formation, FormationStep, Pickup, Player, Projectile};
use crate::factory;
use crate::movement::{FormationDirection, MoveContext};
use crate::run_state::RunState;

pub use events::{EventLog, GameEvent};
pub use wave::Countdown;

/// Discrete player command, one per call to [`Engine::handle_input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Shoot,
}

impl Command {
    /// Parses a command name; anything unrecognised yields `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "left" => Some(Command::Left),
            "right" => Some(Command::Right),
            "shoot" => Some(Command::Shoot),
            _ => None,
        }
    }
}

pub struct Engine<R: Rng = StdRng, C: Clock = SystemClock> {
    config: EngineConfig,
    player: Player,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    pickups: Vec<Pickup>,
    formation: Formation,
    run_state: RunState,
    /// Set between a cleared wave and the next formation
    wave_transition: Option<Countdown>,
    /// Set while the destroyed player waits to come back
    respawn: Option<Countdown>,
    /// Bounded; the adapter drains it once per frame
    events: EventLog,
    rng: R,
    clock: C,
}

impl Engine<StdRng, SystemClock> {
    /// Wall-clock engine whose randomness is fully determined by `seed`.
    pub fn seeded(config: EngineConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed), SystemClock::new())
    }
}

impl<R: Rng, C: Clock> Engine<R, C> {
    /// A fresh run at level 1 with the standard formation.
    pub fn new(config: EngineConfig, rng: R, clock: C) -> Self {
        let engine = Self::with_enemies(config, rng, clock, Formation::spawn(1));
        info!(
            "Level 1 started with {} enemies on a {}x{} arena",
            engine.enemies.len(),
            config.arena_width,
            config.arena_height
        );
        engine
    }

    /// A fresh run at level 1 opening with a custom set of enemies.
    pub fn with_enemies(config: EngineConfig, rng: R, clock: C, enemies: Vec<Enemy>) -> Self {
        let (x, y) = config.player_spawn();
        Self {
            config,
            player: factory::create_player(x, y),
            enemies,
            projectiles: Vec::new(),
            pickups: Vec::new(),
            formation: Formation::new(),
            run_state: RunState::new(),
            wave_transition: None,
            respawn: None,
            events: EventLog::new(),
            rng,
            clock,
        }
    }

    /// Advances the simulation by one tick. Does nothing once the run has
    /// stopped; during a wave transition it only brings back a destroyed
    /// player whose delay has passed and, once the pause is over, brings in
    /// the next formation.
    pub fn update(&mut self) {
        if !self.run_state.running {
            return;
        }
        let now = self.clock.now();

        if let Some(transition) = self.wave_transition {
            self.tick_respawn(now);
            if transition.is_due(now) {
                self.start_wave();
            }
            return;
        }

        self.tick_respawn(now);
        self.update_player();
        self.update_enemies();
        self.fire_enemies();
        self.update_projectiles();
        self.update_pickups();
        self.resolve_collisions(now);
        self.check_wave_cleared(now);
        self.cleanup();
    }

    /// Applies one player command. Ignored while the run is stopped, during
    /// a wave transition, or while the player is destroyed.
    pub fn handle_input(&mut self, command: Command) {
        if !self.run_state.running || self.wave_transition.is_some() || !self.player.is_active()
        {
            return;
        }
        match command {
            Command::Left => self.player.move_left(),
            Command::Right => self.player.move_right(self.config.arena_width),
            Command::Shoot => {
                if let Some(projectile) = self.player.try_fire(self.clock.now()) {
                    self.projectiles.push(projectile);
                    self.events.push(GameEvent::PlayerFired);
                }
            }
        }
    }

    /// Adds a projectile built outside the engine, e.g. for a scripted scenario.
    pub fn spawn_projectile(&mut self, projectile: Projectile) {
        if self.run_state.running {
            self.projectiles.push(projectile);
        }
    }

    pub fn spawn_pickup(&mut self, pickup: Pickup) {
        if self.run_state.running {
            self.pickups.push(pickup);
        }
    }

    /// Takes every event recorded since the last call. Callers should drain
    /// regularly: only the most recent [`EVENT_LOG_CAPACITY`](crate::config::EVENT_LOG_CAPACITY) events are kept.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    fn context(&self) -> MoveContext {
        MoveContext {
            formation_direction: self.formation.direction,
        }
    }

    fn update_player(&mut self) {
        if self.player.is_active() {
            let ctx = self.context();
            self.player.advance(&ctx);
        }
    }

    fn update_enemies(&mut self) {
        let step = self
            .formation
            .update(&mut self.enemies, self.config.arena_width);
        if step == FormationStep::Drop {
            debug!("Formation reached an edge, now heading {:?}", self.formation.direction);
        }

        for enemy in self.enemies.iter_mut() {
            if enemy.is_active() && enemy.body.y > self.config.arena_height {
                enemy.deactivate();
                self.events.push(GameEvent::EnemyEscaped { kind: enemy.kind });
            }
        }
    }

    fn fire_enemies(&mut self) {
        for enemy in self.enemies.iter().filter(|e| e.is_active()) {
            if let Some(projectile) = enemy.try_shoot(&mut self.rng) {
                self.projectiles.push(projectile);
                self.events.push(GameEvent::EnemyFired);
            }
        }
    }

    fn update_projectiles(&mut self) {
        let ctx = self.context();
        let arena_height = self.config.arena_height;
        for projectile in self.projectiles.iter_mut().filter(|p| p.is_active()) {
            projectile.advance(&ctx);
            if projectile.is_out_of_bounds(arena_height) {
                projectile.deactivate();
            }
        }
    }

    fn update_pickups(&mut self) {
        let ctx = self.context();
        let arena_height = self.config.arena_height;
        for pickup in self.pickups.iter_mut().filter(|p| p.is_active()) {
            pickup.advance(&ctx);
            if pickup.is_out_of_bounds(arena_height) {
                pickup.deactivate();
            }
        }
    }

    /// Drops every inactive entity. The player stays, only deactivated.
    fn cleanup(&mut self) {
        self.enemies.retain(|e| e.is_active());
        self.projectiles.retain(|p| p.is_active());
        self.pickups.retain(|p| p.is_active());
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn run_state(&self) -> &RunState {
        &self.run_state
    }

    pub fn formation_direction(&self) -> FormationDirection {
        self.formation.direction
    }

    pub fn is_transitioning(&self) -> bool {
        self.wave_transition.is_some()
    }

    /// Time left before the next formation appears, if a wave was just cleared.
    pub fn transition_remaining(&self) -> Option<Duration> {
        self.wave_transition
            .map(|transition| transition.remaining(self.clock.now()))
    }

    /// Time left before a destroyed player comes back.
    pub fn respawn_remaining(&self) -> Option<Duration> {
        self.respawn
            .map(|countdown| countdown.remaining(self.clock.now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::EVENT_LOG_CAPACITY;
    use crate::entities::{EnemyKind, PickupKind, ProjectileOwner};
    use rand::RngCore;

    /// Loses every roll: enemies never fire and kills never drop pickups.
    struct QuietRng;

    impl RngCore for QuietRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(u8::MAX);
        }
    }

    fn engine_with(enemies: Vec<Enemy>) -> (Engine<QuietRng, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let engine =
            Engine::with_enemies(EngineConfig::default(), QuietRng, clock.clone(), enemies);
        (engine, clock)
    }

    fn far_enemy() -> Enemy {
        factory::create_enemy(300, 50, EnemyKind::Basic)
    }

    #[test]
    fn test_command_from_name() {
        assert_eq!(Command::from_name("left"), Some(Command::Left));
        assert_eq!(Command::from_name("RIGHT"), Some(Command::Right));
        assert_eq!(Command::from_name(" shoot "), Some(Command::Shoot));
        assert_eq!(Command::from_name("jump"), None);
    }

    #[test]
    fn test_new_engine_starts_full_formation() {
        let engine = Engine::new(
            EngineConfig::default(),
            StdRng::seed_from_u64(3),
            ManualClock::new(),
        );
        assert_eq!(engine.enemies().len(), 50);
        assert_eq!(engine.player().body.x, 400);
        assert_eq!(engine.player().body.y, 550);
        assert_eq!(engine.run_state(), &RunState::new());
        assert_eq!(engine.formation_direction(), FormationDirection::Right);
        assert!(!engine.is_transitioning());
    }

    #[test]
    fn test_player_commands_move_player() {
        let (mut engine, _clock) = engine_with(vec![far_enemy()]);
        engine.handle_input(Command::Left);
        assert_eq!(engine.player().body.x, 395);
        engine.handle_input(Command::Right);
        engine.handle_input(Command::Right);
        assert_eq!(engine.player().body.x, 405);
    }

    #[test]
    fn test_player_shot_travels_up() {
        let (mut engine, _clock) = engine_with(vec![far_enemy()]);
        engine.handle_input(Command::Shoot);
        assert_eq!(engine.drain_events(), vec![GameEvent::PlayerFired]);

        engine.update();
        let shot = engine
            .projectiles()
            .iter()
            .find(|p| p.owner == ProjectileOwner::Player)
            .expect("player shot");
        assert_eq!(shot.body.y, 542);
        assert_eq!(shot.body.x, 420);
    }

    #[test]
    fn test_projectiles_leaving_arena_are_removed() {
        let (mut engine, _clock) = engine_with(vec![far_enemy()]);
        engine.spawn_projectile(factory::create_player_projectile(700, 3));
        engine.spawn_projectile(factory::create_enemy_projectile(700, 598));
        engine.update();
        assert!(engine.projectiles().iter().all(|p| p.body.x != 700));
    }

    #[test]
    fn test_pickup_collected_on_contact() {
        let (mut engine, _clock) = engine_with(vec![far_enemy()]);
        engine.spawn_pickup(factory::create_pickup(410, 545, PickupKind::FireRateBoost));
        engine.update();
        assert!(engine.pickups().is_empty());
        assert_eq!(engine.player().fire_interval, Duration::from_millis(250));
        assert!(
            engine
                .drain_events()
                .contains(&GameEvent::PickupCollected {
                    kind: PickupKind::FireRateBoost
                })
        );
    }

    #[test]
    fn test_pickup_falls_out_of_arena() {
        let (mut engine, _clock) = engine_with(vec![far_enemy()]);
        engine.spawn_pickup(factory::create_pickup(50, 599, PickupKind::Health));
        engine.update();
        assert!(engine.pickups().is_empty());
    }

    #[test]
    fn test_enemy_ram_hurts_player() {
        let (mut engine, _clock) = engine_with(vec![
            far_enemy(),
            factory::create_enemy(405, 545, EnemyKind::Fast),
        ]);
        engine.update();
        assert_eq!(engine.enemies().len(), 1);
        assert_eq!(engine.player().health, 80);
        assert_eq!(engine.run_state().score, 0);
    }

    #[test]
    fn test_escaped_enemy_is_removed_without_score() {
        let (mut engine, _clock) = engine_with(vec![
            far_enemy(),
            factory::create_enemy(100, 620, EnemyKind::Basic),
        ]);
        engine.update();
        assert_eq!(engine.enemies().len(), 1);
        assert_eq!(engine.run_state().score, 0);
    }

    #[test]
    fn test_respawn_after_delay() {
        let (mut engine, clock) = engine_with(vec![far_enemy()]);
        engine.handle_input(Command::Left);
        for _ in 0..10 {
            engine.spawn_projectile(factory::create_enemy_projectile(400, 550));
        }
        engine.update();
        assert!(!engine.player().is_active());
        assert_eq!(engine.run_state().lives, 2);
        assert_eq!(engine.respawn_remaining(), Some(Duration::from_secs(1)));

        // Commands are ignored while the ship is down
        engine.handle_input(Command::Right);
        assert_eq!(engine.player().body.x, 395);

        clock.advance(Duration::from_millis(999));
        engine.update();
        assert!(!engine.player().is_active());

        clock.advance(Duration::from_millis(1));
        engine.update();
        assert!(engine.player().is_active());
        assert_eq!(engine.player().health, 100);
        assert_eq!(engine.player().body.x, 400);
        assert!(engine.respawn_remaining().is_none());
    }

    #[test]
    fn test_drain_events_empties_log() {
        let (mut engine, _clock) = engine_with(vec![far_enemy()]);
        engine.handle_input(Command::Shoot);
        assert_eq!(engine.drain_events().len(), 1);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_undrained_events_stay_bounded() {
        let (mut engine, clock) = engine_with(vec![far_enemy()]);
        for _ in 0..EVENT_LOG_CAPACITY + 100 {
            engine.handle_input(Command::Shoot);
            clock.advance(Duration::from_millis(300));
        }
        assert_eq!(engine.projectiles().len(), EVENT_LOG_CAPACITY + 100);

        let events = engine.drain_events();
        assert_eq!(events.len(), EVENT_LOG_CAPACITY);
        assert!(events.iter().all(|e| *e == GameEvent::PlayerFired));
    }
}
