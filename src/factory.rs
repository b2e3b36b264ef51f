//! Builds fully configured entities: geometry, movement policy and
//! kind-specific stats.

use rand::Rng;

use crate::config::{
    ENEMY_HEIGHT, ENEMY_SHOT_DAMAGE, ENEMY_SHOT_SPEED, ENEMY_WIDTH, PICKUP_FALL_SPEED,
    PICKUP_SIZE, PLAYER_HEIGHT, PLAYER_SHOT_DAMAGE, PLAYER_SHOT_SPEED, PLAYER_STEP,
    PLAYER_WIDTH, PROJECTILE_HEIGHT, PROJECTILE_WIDTH,
};
use crate::entities::{
    Body, Enemy, EnemyKind, Pickup, PickupKind, Player, Projectile, ProjectileOwner,
};
use crate::movement::{EnemyMovement, Heading, PlayerMovement, VerticalMovement};

pub fn create_player(x: i32, y: i32) -> Player {
    Player::new(
        Body::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
        PlayerMovement::new(PLAYER_STEP),
    )
}

/// Starts at speed 1; the engine rescales speed per wave.
pub fn create_enemy(x: i32, y: i32, kind: EnemyKind) -> Enemy {
    Enemy::new(
        Body::new(x, y, ENEMY_WIDTH, ENEMY_HEIGHT),
        EnemyMovement::new(1),
        kind,
    )
}

pub fn create_projectile(x: i32, y: i32, owner: ProjectileOwner) -> Projectile {
    let (speed, heading, damage) = match owner {
        ProjectileOwner::Player => (PLAYER_SHOT_SPEED, Heading::Up, PLAYER_SHOT_DAMAGE),
        ProjectileOwner::Enemy => (ENEMY_SHOT_SPEED, Heading::Down, ENEMY_SHOT_DAMAGE),
    };
    Projectile::new(
        Body::new(x, y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        VerticalMovement::new(speed, heading),
        owner,
        damage,
    )
}

pub fn create_player_projectile(x: i32, y: i32) -> Projectile {
    create_projectile(x, y, ProjectileOwner::Player)
}

pub fn create_enemy_projectile(x: i32, y: i32) -> Projectile {
    create_projectile(x, y, ProjectileOwner::Enemy)
}

pub fn create_pickup(x: i32, y: i32, kind: PickupKind) -> Pickup {
    Pickup::new(
        Body::new(x, y, PICKUP_SIZE, PICKUP_SIZE),
        VerticalMovement::new(PICKUP_FALL_SPEED, Heading::Down),
        kind,
    )
}

/// Pickup of a kind drawn uniformly from `rng`.
pub fn create_random_pickup<R: Rng + ?Sized>(x: i32, y: i32, rng: &mut R) -> Pickup {
    create_pickup(x, y, PickupKind::random(rng))
}
