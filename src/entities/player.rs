use std::time::Duration;

use super::body::{Body, Entity};
use super::projectile::Projectile;
use crate::config::{
    BASE_FIRE_INTERVAL, FIRE_INTERVAL_STEP, MIN_FIRE_INTERVAL, PLAYER_MAX_HEALTH,
};
use crate::factory;
use crate::movement::{Movement, PlayerMovement};

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub movement: PlayerMovement,
    pub health: u8,
    /// Minimum time between two shots
    pub fire_interval: Duration,
    /// Clock reading of the last successful shot
    pub last_shot: Option<Duration>,
}

impl Player {
    pub fn new(body: Body, movement: PlayerMovement) -> Self {
        Self {
            body,
            movement,
            health: PLAYER_MAX_HEALTH,
            fire_interval: BASE_FIRE_INTERVAL,
            last_shot: None,
        }
    }

    pub fn move_left(&mut self) {
        self.body.x = self.movement.move_left(&self.body);
    }

    pub fn move_right(&mut self, arena_width: i32) {
        self.body.x = self.movement.move_right(&self.body, arena_width);
    }

    pub fn can_fire(&self, now: Duration) -> bool {
        match self.last_shot {
            Some(last) => now.saturating_sub(last) >= self.fire_interval,
            None => true,
        }
    }

    /// Fires from the top-center of the ship if the fire interval has elapsed
    /// since the last successful shot.
    pub fn try_fire(&mut self, now: Duration) -> Option<Projectile> {
        if !self.can_fire(now) {
            return None;
        }
        self.last_shot = Some(now);
        Some(factory::create_player_projectile(
            self.body.center_x(),
            self.body.y,
        ))
    }

    /// Returns true only for the hit that destroys the player.
    pub fn take_damage(&mut self, damage: u8) -> bool {
        if !self.body.active {
            return false;
        }
        self.health = self.health.saturating_sub(damage);
        if self.health == 0 {
            self.body.active = false;
            return true;
        }
        false
    }

    pub fn heal(&mut self, amount: u8) {
        self.health = self.health.saturating_add(amount).min(PLAYER_MAX_HEALTH);
    }

    pub fn upgrade_fire_rate(&mut self) {
        self.fire_interval = self
            .fire_interval
            .saturating_sub(FIRE_INTERVAL_STEP)
            .max(MIN_FIRE_INTERVAL);
    }

    /// Back to full health at the given spot. Fire-rate upgrades are kept.
    pub fn respawn(&mut self, x: i32, y: i32) {
        self.body.x = x;
        self.body.y = y;
        self.body.active = true;
        self.health = PLAYER_MAX_HEALTH;
        self.last_shot = None;
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn movement(&self) -> &dyn Movement {
        &self.movement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ProjectileOwner;

    fn player() -> Player {
        factory::create_player(400, 550)
    }

    #[test]
    fn test_player_new() {
        let player = player();
        assert_eq!(player.body.x, 400);
        assert_eq!(player.body.y, 550);
        assert_eq!(player.health, 100);
        assert_eq!(player.fire_interval, Duration::from_millis(300));
        assert!(player.last_shot.is_none());
        assert!(player.is_active());
    }

    #[test]
    fn test_player_movement_clamped() {
        let mut player = player();
        player.move_left();
        assert_eq!(player.body.x, 395);

        player.body.x = 2;
        player.move_left();
        assert_eq!(player.body.x, 0);

        player.body.x = 758;
        player.move_right(800);
        assert_eq!(player.body.x, 760);
    }

    #[test]
    fn test_player_fire_cooldown() {
        let mut player = player();
        let shot = player.try_fire(Duration::from_millis(1000));
        let shot = shot.expect("first shot should fire");
        assert_eq!(shot.owner, ProjectileOwner::Player);
        assert_eq!(shot.body.x, 420);
        assert_eq!(shot.body.y, 550);

        assert!(player.try_fire(Duration::from_millis(1299)).is_none());
        assert!(player.try_fire(Duration::from_millis(1300)).is_some());
    }

    #[test]
    fn test_rejected_shot_does_not_reset_cooldown() {
        let mut player = player();
        assert!(player.try_fire(Duration::ZERO).is_some());
        assert!(player.try_fire(Duration::from_millis(200)).is_none());
        assert!(player.try_fire(Duration::from_millis(300)).is_some());
    }

    #[test]
    fn test_player_take_damage() {
        let mut player = player();
        assert!(!player.take_damage(30));
        assert_eq!(player.health, 70);
        assert!(player.is_active());

        assert!(player.take_damage(80));
        assert_eq!(player.health, 0);
        assert!(!player.is_active());

        // Already destroyed: further hits are not a second death
        assert!(!player.take_damage(10));
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut player = player();
        player.health = 60;
        player.heal(25);
        assert_eq!(player.health, 85);
        player.heal(25);
        assert_eq!(player.health, 100);
    }

    #[test]
    fn test_fire_rate_upgrade_floor() {
        let mut player = player();
        player.upgrade_fire_rate();
        assert_eq!(player.fire_interval, Duration::from_millis(250));
        for _ in 0..10 {
            player.upgrade_fire_rate();
        }
        assert_eq!(player.fire_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_respawn_keeps_upgrades() {
        let mut player = player();
        player.upgrade_fire_rate();
        player.take_damage(100);
        player.body.x = 10;

        player.respawn(400, 550);
        assert!(player.is_active());
        assert_eq!(player.health, 100);
        assert_eq!(player.body.x, 400);
        assert_eq!(player.fire_interval, Duration::from_millis(250));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_player_dies_exactly_once(
                damage_amounts in prop::collection::vec(0u8..50, 0..30)
            ) {
                let mut player = player();
                let mut deaths = 0;
                for damage in damage_amounts {
                    if player.take_damage(damage) {
                        deaths += 1;
                    }
                    prop_assert!(player.health <= 100);
                }
                prop_assert!(deaths <= 1);
                prop_assert_eq!(deaths == 1, !player.is_active());
            }
        }
    }
}
