// Library exports for testing
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use engine::{Command, Engine, GameEvent};
pub use entities::{
    Body, Enemy, EnemyKind, Entity, Formation, FormationStep, Pickup, PickupKind, Player,
    Projectile, ProjectileOwner,
};
pub use movement::{FormationDirection, Heading};
pub use run_state::RunState;

pub mod app;
pub mod audio;
pub mod clock;
pub mod config;
pub mod engine;
pub mod entities;
pub mod factory;
pub mod input;
pub mod movement;
pub mod renderer;
pub mod run_state;
