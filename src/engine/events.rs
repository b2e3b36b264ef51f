use std::collections::VecDeque;

use crate::config::EVENT_LOG_CAPACITY;
use crate::entities::{EnemyKind, PickupKind};

/// Something that happened during a tick or an input command. The engine
/// records these for the presentation layer (sound cues, logs); nothing in
/// the simulation reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PlayerFired,
    EnemyFired,
    EnemyDestroyed { kind: EnemyKind, points: u32 },
    /// An enemy collided with the player ship.
    EnemyRammed { kind: EnemyKind },
    /// An enemy dropped past the bottom of the arena.
    EnemyEscaped { kind: EnemyKind },
    PickupSpawned { kind: PickupKind, x: i32, y: i32 },
    PickupCollected { kind: PickupKind },
    PlayerHit { damage: u8, health: u8 },
    LifeLost { lives: u32 },
    PlayerRespawned,
    WaveCleared { level: u32 },
    WaveStarted { level: u32, enemies: usize },
    GameOver { score: u32 },
}

/// Pending events, oldest first. Holds at most [`EVENT_LOG_CAPACITY`]
/// entries; once full, the oldest event is dropped for each new one, so an
/// owner that never drains still runs in bounded memory.
#[derive(Debug, Default)]
pub struct EventLog {
    events: VecDeque<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        if self.events.len() >= EVENT_LOG_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Takes every pending event, leaving the log empty.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_keeps_order() {
        let mut log = EventLog::new();
        log.push(GameEvent::PlayerFired);
        log.push(GameEvent::LifeLost { lives: 2 });
        assert_eq!(
            log.drain(),
            vec![GameEvent::PlayerFired, GameEvent::LifeLost { lives: 2 }]
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_full_log_drops_oldest() {
        let mut log = EventLog::new();
        log.push(GameEvent::PlayerRespawned);
        for _ in 0..EVENT_LOG_CAPACITY {
            log.push(GameEvent::EnemyFired);
        }
        assert_eq!(log.len(), EVENT_LOG_CAPACITY);

        let events = log.drain();
        assert!(events.iter().all(|e| *e == GameEvent::EnemyFired));
    }
}
