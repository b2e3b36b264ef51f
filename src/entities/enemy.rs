use rand::Rng;

use super::body::{Body, Entity};
use super::projectile::Projectile;
use crate::factory;
use crate::movement::{EnemyMovement, Movement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Basic,
    Medium,
    Fast,
}

impl EnemyKind {
    pub fn points(self) -> u32 {
        match self {
            EnemyKind::Basic => 10,
            EnemyKind::Medium => 20,
            EnemyKind::Fast => 30,
        }
    }

    /// Chance of opening fire on any single tick.
    pub fn shoot_chance(self) -> f64 {
        match self {
            EnemyKind::Basic => 0.001,
            EnemyKind::Medium => 0.002,
            EnemyKind::Fast => 0.003,
        }
    }

    /// Kind assigned to a formation row: the top two rows are Fast, the next
    /// two Medium, everything below Basic.
    pub fn for_row(row: usize) -> Self {
        match row {
            0 | 1 => EnemyKind::Fast,
            2 | 3 => EnemyKind::Medium,
            _ => EnemyKind::Basic,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Body,
    pub movement: EnemyMovement,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn new(body: Body, movement: EnemyMovement, kind: EnemyKind) -> Self {
        Self {
            body,
            movement,
            kind,
        }
    }

    pub fn points(&self) -> u32 {
        self.kind.points()
    }

    pub fn speed(&self) -> i32 {
        self.movement.speed
    }

    pub fn set_speed(&mut self, speed: i32) {
        self.movement.speed = speed;
    }

    /// One independent roll per call; fires from the bottom-center.
    pub fn try_shoot<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Projectile> {
        if rng.random_bool(self.kind.shoot_chance()) {
            Some(factory::create_enemy_projectile(
                self.body.center_x(),
                self.body.bottom(),
            ))
        } else {
            None
        }
    }
}

impl Entity for Enemy {
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
    use crate::movement::{FormationDirection, MoveContext};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_enemy_points_by_kind() {
        assert_eq!(factory::create_enemy(0, 0, EnemyKind::Basic).points(), 10);
        assert_eq!(factory::create_enemy(0, 0, EnemyKind::Medium).points(), 20);
        assert_eq!(factory::create_enemy(0, 0, EnemyKind::Fast).points(), 30);
    }

    #[test]
    fn test_enemy_kind_by_row() {
        assert_eq!(EnemyKind::for_row(0), EnemyKind::Fast);
        assert_eq!(EnemyKind::for_row(1), EnemyKind::Fast);
        assert_eq!(EnemyKind::for_row(2), EnemyKind::Medium);
        assert_eq!(EnemyKind::for_row(3), EnemyKind::Medium);
        assert_eq!(EnemyKind::for_row(4), EnemyKind::Basic);
    }

    #[test]
    fn test_enemy_moves_with_formation() {
        let mut enemy = factory::create_enemy(100, 50, EnemyKind::Basic);
        enemy.set_speed(3);
        enemy.advance(&MoveContext {
            formation_direction: FormationDirection::Left,
        });
        assert_eq!(enemy.body.x, 97);
        assert_eq!(enemy.body.y, 50);
    }

    #[test]
    fn test_enemy_shot_spawns_at_bottom_center() {
        let enemy = factory::create_enemy(100, 50, EnemyKind::Fast);
        let mut rng = StdRng::seed_from_u64(7);
        let shot = (0..100_000)
            .find_map(|_| enemy.try_shoot(&mut rng))
            .expect("a 0.3% roll should land within 100k tries");
        assert_eq!(shot.owner, ProjectileOwner::Enemy);
        assert_eq!(shot.body.x, 115);
        assert_eq!(shot.body.y, 70);
    }

    #[test]
    fn test_enemy_shoot_rate_is_rare() {
        let enemy = factory::create_enemy(100, 50, EnemyKind::Basic);
        let mut rng = StdRng::seed_from_u64(42);
        let shots = (0..10_000)
            .filter(|_| enemy.try_shoot(&mut rng).is_some())
            .count();
        // expected ~10
        assert!(shots < 60, "got {shots} shots");
    }
}
