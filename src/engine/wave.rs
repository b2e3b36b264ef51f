//! Wave progression and the timed pauses around it.

use std::time::Duration;

use log::info;
use rand::Rng;

use super::{Engine, GameEvent};
use crate::clock::Clock;
use crate::config::{RESPAWN_DELAY, WAVE_TRANSITION_DELAY};
use crate::entities::{Entity, Formation};

/// A pause that ends at a fixed clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub ends_at: Duration,
}

impl Countdown {
    pub fn starting(now: Duration, length: Duration) -> Self {
        Self {
            ends_at: now + length,
        }
    }

    pub fn remaining(&self, now: Duration) -> Duration {
        self.ends_at.saturating_sub(now)
    }

    pub fn is_due(&self, now: Duration) -> bool {
        now >= self.ends_at
    }
}

impl<R: Rng, C: Clock> Engine<R, C> {
    /// Starts the pause before the next wave once no enemy is left standing.
    pub(super) fn check_wave_cleared(&mut self, now: Duration) {
        if !self.run_state.running || self.enemies.iter().any(|e| e.is_active()) {
            return;
        }
        let level = self.run_state.next_level();
        info!("Wave cleared, preparing level {level}");
        self.events.push(GameEvent::WaveCleared { level });
        self.wave_transition = Some(Countdown::starting(now, WAVE_TRANSITION_DELAY));
    }

    /// Ends the transition with a fresh formation tuned to the current level.
    pub(super) fn start_wave(&mut self) {
        let level = self.run_state.level;
        self.formation.reset();
        self.enemies = Formation::spawn(level);
        self.wave_transition = None;
        info!(
            "Level {level} started with {} enemies at speed {}",
            self.enemies.len(),
            Formation::speed_for_level(level)
        );
        self.events.push(GameEvent::WaveStarted {
            level,
            enemies: self.enemies.len(),
        });
    }

    pub(super) fn schedule_respawn(&mut self, now: Duration) {
        self.respawn = Some(Countdown::starting(now, RESPAWN_DELAY));
    }

    /// Brings the player back once the respawn delay has passed.
    pub(super) fn tick_respawn(&mut self, now: Duration) {
        let Some(countdown) = self.respawn else {
            return;
        };
        if !countdown.is_due(now) {
            return;
        }
        let (x, y) = self.config.player_spawn();
        self.player.respawn(x, y);
        self.respawn = None;
        info!("Player respawned with {} lives left", self.run_state.lives);
        self.events.push(GameEvent::PlayerRespawned);
    }
}
