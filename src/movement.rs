//! Movement policies.
//!
//! A policy only computes a new position; applying it is the caller's job.
//! Each entity kind carries its own concrete policy type, so player-only
//! commands are plain methods on [`PlayerMovement`] rather than something
//! reached through a runtime type check.

use crate::entities::Body;

/// Shared horizontal heading of the whole enemy formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormationDirection {
    #[default]
    Right,
    Left,
}

impl FormationDirection {
    pub fn sign(self) -> i32 {
        match self {
            FormationDirection::Right => 1,
            FormationDirection::Left => -1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            FormationDirection::Right => FormationDirection::Left,
            FormationDirection::Left => FormationDirection::Right,
        }
    }
}

/// Vertical heading for projectiles and pickups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
}

impl Heading {
    pub fn sign(self) -> i32 {
        match self {
            Heading::Up => -1,
            Heading::Down => 1,
        }
    }
}

/// Per-tick state every policy may read.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext {
    pub formation_direction: FormationDirection,
}

pub trait Movement {
    /// Position the body should occupy after one tick.
    fn advance(&self, body: &Body, ctx: &MoveContext) -> (i32, i32);
}

/// Input-driven; stands still on its own tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerMovement {
    pub step: i32,
}

impl PlayerMovement {
    pub fn new(step: i32) -> Self {
        Self { step }
    }

    pub fn move_left(&self, body: &Body) -> i32 {
        (body.x - self.step).max(0)
    }

    pub fn move_right(&self, body: &Body, arena_width: i32) -> i32 {
        (body.x + self.step).min(arena_width - body.width)
    }
}

impl Movement for PlayerMovement {
    fn advance(&self, body: &Body, _ctx: &MoveContext) -> (i32, i32) {
        (body.x, body.y)
    }
}

/// Horizontal step along the shared formation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyMovement {
    pub speed: i32,
}

impl EnemyMovement {
    pub fn new(speed: i32) -> Self {
        Self { speed }
    }

    /// Horizontal position after one step, without applying it.
    pub fn next_x(&self, body: &Body, direction: FormationDirection) -> i32 {
        body.x + self.speed * direction.sign()
    }
}

impl Movement for EnemyMovement {
    fn advance(&self, body: &Body, ctx: &MoveContext) -> (i32, i32) {
        (self.next_x(body, ctx.formation_direction), body.y)
    }
}

/// Fixed vertical velocity, used by projectiles and pickups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalMovement {
    pub speed: i32,
    pub heading: Heading,
}

impl VerticalMovement {
    pub fn new(speed: i32, heading: Heading) -> Self {
        Self { speed, heading }
    }
}

impl Movement for VerticalMovement {
    fn advance(&self, body: &Body, _ctx: &MoveContext) -> (i32, i32) {
        (body.x, body.y + self.speed * self.heading.sign())
    }
}
