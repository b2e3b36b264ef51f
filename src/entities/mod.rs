mod body;
mod enemy;
mod formation;
mod pickup;
mod player;
mod projectile;

// Re-export all public types
pub use body::{Body, Entity};
pub use enemy::{Enemy, EnemyKind};
pub use formation::{Formation, FormationStep};
pub use pickup::{Pickup, PickupKind};
pub use player::Player;
pub use projectile::{Projectile, ProjectileOwner};
