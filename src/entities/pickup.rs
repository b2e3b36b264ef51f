use rand::Rng;

use super::body::{Body, Entity};
use super::player::Player;
use crate::config::HEAL_AMOUNT;
use crate::movement::{Movement, VerticalMovement};
use crate::run_state::RunState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Health,
    FireRateBoost,
    ExtraScore,
}

impl PickupKind {
    pub const ALL: [PickupKind; 3] = [
        PickupKind::Health,
        PickupKind::FireRateBoost,
        PickupKind::ExtraScore,
    ];

    /// Uniform over all kinds.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            PickupKind::Health => "Health",
            PickupKind::FireRateBoost => "Rapid Fire",
            PickupKind::ExtraScore => "Bonus",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pickup {
    pub body: Body,
    pub movement: VerticalMovement,
    pub kind: PickupKind,
}

impl Pickup {
    pub fn new(body: Body, movement: VerticalMovement, kind: PickupKind) -> Self {
        Self {
            body,
            movement,
            kind,
        }
    }

    /// Grants the effect and deactivates the pickup. A pickup that was
    /// already collected does nothing.
    pub fn apply(&mut self, player: &mut Player, run_state: &mut RunState) {
        if !self.body.active {
            return;
        }
        match self.kind {
            PickupKind::Health => player.heal(HEAL_AMOUNT),
            PickupKind::FireRateBoost => player.upgrade_fire_rate(),
            // Awards nothing; kept as a no-op effect.
            PickupKind::ExtraScore => run_state.add_score(0),
        }
        self.body.active = false;
    }

    pub fn is_out_of_bounds(&self, arena_height: i32) -> bool {
        self.body.y > arena_height
    }
}

impl Entity for Pickup {
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
    use crate::factory;
    use crate::movement::{FormationDirection, MoveContext};
    use std::time::Duration;

    #[test]
    fn test_pickup_falls_slowly() {
        let mut pickup = factory::create_pickup(100, 100, PickupKind::Health);
        pickup.advance(&MoveContext {
            formation_direction: FormationDirection::Left,
        });
        assert_eq!(pickup.body.x, 100);
        assert_eq!(pickup.body.y, 102);
    }

    #[test]
    fn test_health_pickup_heals_once() {
        let mut player = factory::create_player(400, 550);
        let mut run_state = RunState::new();
        player.health = 50;

        let mut pickup = factory::create_pickup(400, 550, PickupKind::Health);
        pickup.apply(&mut player, &mut run_state);
        assert_eq!(player.health, 75);
        assert!(!pickup.is_active());

        pickup.apply(&mut player, &mut run_state);
        assert_eq!(player.health, 75);
    }

    #[test]
    fn test_fire_rate_pickup() {
        let mut player = factory::create_player(400, 550);
        let mut run_state = RunState::new();
        let mut pickup = factory::create_pickup(400, 550, PickupKind::FireRateBoost);
        pickup.apply(&mut player, &mut run_state);
        assert_eq!(player.fire_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_extra_score_pickup_is_a_no_op() {
        let mut player = factory::create_player(400, 550);
        let mut run_state = RunState::new();
        run_state.add_score(40);

        let mut pickup = factory::create_pickup(400, 550, PickupKind::ExtraScore);
        pickup.apply(&mut player, &mut run_state);
        assert_eq!(run_state.score, 40);
        assert_eq!(run_state.lives, 3);
        assert!(!pickup.is_active());
    }

    #[test]
    fn test_pickup_out_of_bounds() {
        let pickup = factory::create_pickup(100, 600, PickupKind::Health);
        assert!(!pickup.is_out_of_bounds(600));
        let pickup = factory::create_pickup(100, 601, PickupKind::Health);
        assert!(pickup.is_out_of_bounds(600));
    }
}
