//! Overlap checks and what each kind of contact does.

use std::time::Duration;

use log::{debug, info};
use rand::Rng;

use super::{Engine, GameEvent};
use crate::clock::Clock;
use crate::config::{ENEMY_RAM_DAMAGE, PICKUP_DROP_CHANCE};
use crate::entities::{Entity, ProjectileOwner};
use crate::factory;

impl<R: Rng, C: Clock> Engine<R, C> {
    pub(super) fn resolve_collisions(&mut self, now: Duration) {
        self.resolve_projectiles(now);
        self.resolve_rams(now);
        self.resolve_pickups();
    }

    /// Projectiles in list order. A player shot takes out at most one enemy,
    /// the first overlapping one in enemy order.
    fn resolve_projectiles(&mut self, now: Duration) {
        for p_idx in 0..self.projectiles.len() {
            if !self.run_state.running {
                return;
            }
            let projectile = &self.projectiles[p_idx];
            if !projectile.is_active() {
                continue;
            }

            match projectile.owner {
                ProjectileOwner::Player => {
                    let hit = self
                        .enemies
                        .iter()
                        .position(|enemy| enemy.is_active() && enemy.overlaps(projectile));
                    if let Some(e_idx) = hit {
                        self.projectiles[p_idx].deactivate();
                        self.destroy_enemy(e_idx);
                    }
                }
                ProjectileOwner::Enemy => {
                    if self.player.is_active() && projectile.overlaps(&self.player) {
                        let damage = projectile.damage;
                        self.projectiles[p_idx].deactivate();
                        self.hit_player(damage, now);
                    }
                }
            }
        }
    }

    /// Enemies flying into the ship are destroyed without reward and hurt it.
    fn resolve_rams(&mut self, now: Duration) {
        for e_idx in 0..self.enemies.len() {
            if !self.player.is_active() {
                return;
            }
            let enemy = &mut self.enemies[e_idx];
            if enemy.is_active() && enemy.overlaps(&self.player) {
                enemy.deactivate();
                let kind = enemy.kind;
                self.events.push(GameEvent::EnemyRammed { kind });
                self.hit_player(ENEMY_RAM_DAMAGE, now);
            }
        }
    }

    fn resolve_pickups(&mut self) {
        for pickup in self.pickups.iter_mut() {
            if !self.player.is_active() {
                return;
            }
            if pickup.is_active() && pickup.overlaps(&self.player) {
                pickup.apply(&mut self.player, &mut self.run_state);
                debug!("{} pickup collected", pickup.kind.get_name());
                self.events.push(GameEvent::PickupCollected { kind: pickup.kind });
            }
        }
    }

    /// Awards the enemy's points and rolls for a drop at its last position.
    fn destroy_enemy(&mut self, e_idx: usize) {
        let enemy = &mut self.enemies[e_idx];
        enemy.deactivate();
        let (kind, points) = (enemy.kind, enemy.points());
        let (x, y) = (enemy.body.x, enemy.body.y);

        self.run_state.add_score(points);
        self.events.push(GameEvent::EnemyDestroyed { kind, points });

        if self.rng.random_bool(PICKUP_DROP_CHANCE) {
            let pickup = factory::create_random_pickup(x, y, &mut self.rng);
            debug!("{:?} pickup dropped at ({x}, {y})", pickup.kind);
            self.events.push(GameEvent::PickupSpawned {
                kind: pickup.kind,
                x,
                y,
            });
            self.pickups.push(pickup);
        }
    }

    /// Applies damage; the hit that empties the health bar costs one life.
    pub(super) fn hit_player(&mut self, damage: u8, now: Duration) {
        let destroyed = self.player.take_damage(damage);
        self.events.push(GameEvent::PlayerHit {
            damage,
            health: self.player.health,
        });
        if !destroyed {
            return;
        }

        let lives = self.run_state.lose_life();
        info!("Player destroyed, {lives} lives left");
        self.events.push(GameEvent::LifeLost { lives });
        if self.run_state.running {
            self.schedule_respawn(now);
        } else {
            info!("Game over with score {}", self.run_state.score);
            self.events.push(GameEvent::GameOver {
                score: self.run_state.score,
            });
        }
    }
}
