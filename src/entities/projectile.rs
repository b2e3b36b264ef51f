use super::body::{Body, Entity};
use crate::movement::{Movement, VerticalMovement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub body: Body,
    pub movement: VerticalMovement,
    pub owner: ProjectileOwner,
    pub damage: u8,
}

impl Projectile {
    pub fn new(body: Body, movement: VerticalMovement, owner: ProjectileOwner, damage: u8) -> Self {
        Self {
            body,
            movement,
            owner,
            damage,
        }
    }

    /// Above the top edge or below the bottom edge of the arena.
    pub fn is_out_of_bounds(&self, arena_height: i32) -> bool {
        self.body.y < 0 || self.body.y > arena_height
    }
}

impl Entity for Projectile {
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
