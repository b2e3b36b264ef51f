//! Arena configuration and gameplay tuning values.

use std::time::Duration;

pub const DEFAULT_ARENA_WIDTH: i32 = 800;
pub const DEFAULT_ARENA_HEIGHT: i32 = 600;

// Player
pub const PLAYER_WIDTH: i32 = 40;
pub const PLAYER_HEIGHT: i32 = 30;
pub const PLAYER_STEP: i32 = 5;
pub const PLAYER_MAX_HEALTH: u8 = 100;
/// Distance of the player's top edge from the arena bottom at spawn.
pub const PLAYER_SPAWN_OFFSET_Y: i32 = 50;
pub const BASE_FIRE_INTERVAL: Duration = Duration::from_millis(300);
pub const FIRE_INTERVAL_STEP: Duration = Duration::from_millis(50);
pub const MIN_FIRE_INTERVAL: Duration = Duration::from_millis(100);
pub const HEAL_AMOUNT: u8 = 25;

// Enemies
pub const ENEMY_WIDTH: i32 = 30;
pub const ENEMY_HEIGHT: i32 = 20;
pub const MAX_ENEMY_SPEED: i32 = 5;
pub const ENEMY_RAM_DAMAGE: u8 = 20;

// Formation
pub const FORMATION_ROWS: usize = 5;
pub const FORMATION_COLUMNS: usize = 10;
pub const FORMATION_ORIGIN_X: i32 = 50;
pub const FORMATION_ORIGIN_Y: i32 = 50;
pub const FORMATION_SPACING_X: i32 = 60;
pub const FORMATION_SPACING_Y: i32 = 40;
pub const FORMATION_EDGE_MARGIN: i32 = 10;
pub const FORMATION_DROP: i32 = 20;

// Projectiles
pub const PROJECTILE_WIDTH: i32 = 4;
pub const PROJECTILE_HEIGHT: i32 = 10;
pub const PLAYER_SHOT_SPEED: i32 = 8;
pub const ENEMY_SHOT_SPEED: i32 = 4;
pub const PLAYER_SHOT_DAMAGE: u8 = 25;
pub const ENEMY_SHOT_DAMAGE: u8 = 10;

// Pickups
pub const PICKUP_SIZE: i32 = 20;
pub const PICKUP_FALL_SPEED: i32 = 2;
pub const PICKUP_DROP_CHANCE: f64 = 0.10;

// Pacing
pub const WAVE_TRANSITION_DELAY: Duration = Duration::from_millis(1500);
pub const RESPAWN_DELAY: Duration = Duration::from_millis(1000);

pub const STARTING_LIVES: u32 = 3;

/// Undrained gameplay events kept by an engine before the oldest are dropped.
pub const EVENT_LOG_CAPACITY: usize = 1024;

/// Fixed arena dimensions an engine is constructed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub arena_width: i32,
    pub arena_height: i32,
}

impl EngineConfig {
    /// Panics if either dimension is not positive.
    pub fn new(arena_width: i32, arena_height: i32) -> Self {
        assert!(
            arena_width > 0 && arena_height > 0,
            "arena dimensions must be positive, got {arena_width}x{arena_height}"
        );
        Self {
            arena_width,
            arena_height,
        }
    }

    /// Where the player appears at the start of a run and after a respawn.
    pub fn player_spawn(&self) -> (i32, i32) {
        (
            self.arena_width / 2,
            self.arena_height - PLAYER_SPAWN_OFFSET_Y,
        )
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT)
    }
}
