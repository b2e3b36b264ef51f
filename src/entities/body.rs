use crate::movement::{MoveContext, Movement};

/// Axis-aligned box plus the activity flag every entity carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Body {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Inactive bodies take no further part in the simulation and are
    /// swept out by the engine at the end of the tick.
    pub active: bool,
}

impl Body {
    /// Panics on a non-positive size.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "entity size must be positive, got {width}x{height}"
        );
        Self {
            x,
            y,
            width,
            height,
            active: true,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Strict rectangle intersection; touching edges do not count.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Shared geometric and activity contract of players, enemies, projectiles
/// and pickups.
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
    fn movement(&self) -> &dyn Movement;

    fn is_active(&self) -> bool {
        self.body().active
    }

    fn deactivate(&mut self) {
        self.body_mut().active = false;
    }

    fn overlaps<E: Entity + ?Sized>(&self, other: &E) -> bool {
        self.body().overlaps(other.body())
    }

    /// Apply one tick of the attached movement policy.
    fn advance(&mut self, ctx: &MoveContext) {
        let (x, y) = self.movement().advance(self.body(), ctx);
        let body = self.body_mut();
        body.x = x;
        body.y = y;
    }
}
