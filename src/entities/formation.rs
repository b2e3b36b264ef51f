use super::body::Entity;
use super::enemy::{Enemy, EnemyKind};
use crate::config::{
    FORMATION_COLUMNS, FORMATION_DROP, FORMATION_EDGE_MARGIN, FORMATION_ORIGIN_X,
    FORMATION_ORIGIN_Y, FORMATION_ROWS, FORMATION_SPACING_X, FORMATION_SPACING_Y,
    MAX_ENEMY_SPEED,
};
use crate::factory;
use crate::movement::{FormationDirection, MoveContext};

/// What the formation did on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationStep {
    /// Every active enemy moved one step along the shared direction.
    Shift,
    /// An edge was reached: the direction flipped and every active enemy
    /// dropped instead of moving sideways.
    Drop,
}

/// Shared movement state of the enemy grid.
#[derive(Debug, Clone, Default)]
pub struct Formation {
    /// Heading applied to every enemy this tick
    pub direction: FormationDirection,
}

impl Formation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.direction = FormationDirection::Right;
    }

    /// Grid slots as `(x, y, kind)`, row by row.
    pub fn get_positions() -> Vec<(i32, i32, EnemyKind)> {
        (0..FORMATION_ROWS)
            .flat_map(|row| {
                (0..FORMATION_COLUMNS).map(move |col| {
                    (
                        FORMATION_ORIGIN_X + col as i32 * FORMATION_SPACING_X,
                        FORMATION_ORIGIN_Y + row as i32 * FORMATION_SPACING_Y,
                        EnemyKind::for_row(row),
                    )
                })
            })
            .collect()
    }

    /// Fresh grid of enemies for the given level.
    pub fn spawn(level: u32) -> Vec<Enemy> {
        let speed = Self::speed_for_level(level);
        Self::get_positions()
            .into_iter()
            .map(|(x, y, kind)| {
                let mut enemy = factory::create_enemy(x, y, kind);
                enemy.set_speed(speed);
                enemy
            })
            .collect()
    }

    pub fn speed_for_level(level: u32) -> i32 {
        (level.min(MAX_ENEMY_SPEED as u32) as i32).max(1)
    }

    /// True if any active enemy's next step along the current direction
    /// would cross the safety margin of the wall it is heading for.
    pub fn at_edge(&self, enemies: &[Enemy], arena_width: i32) -> bool {
        enemies.iter().filter(|e| e.is_active()).any(|enemy| {
            let next_x = enemy.movement.next_x(&enemy.body, self.direction);
            match self.direction {
                FormationDirection::Right => {
                    next_x + enemy.body.width >= arena_width - FORMATION_EDGE_MARGIN
                }
                FormationDirection::Left => next_x <= FORMATION_EDGE_MARGIN,
            }
        })
    }

    /// Moves the whole formation one tick. Enemies never move sideways on
    /// their own: either all of them shift or all of them drop.
    pub fn update(&mut self, enemies: &mut [Enemy], arena_width: i32) -> FormationStep {
        if self.at_edge(enemies, arena_width) {
            self.direction = self.direction.flipped();
            for enemy in enemies.iter_mut().filter(|e| e.is_active()) {
                enemy.body.y += FORMATION_DROP;
            }
            FormationStep::Drop
        } else {
            let ctx = MoveContext {
                formation_direction: self.direction,
            };
            for enemy in enemies.iter_mut().filter(|e| e.is_active()) {
                enemy.advance(&ctx);
            }
            FormationStep::Shift
        }
    }
}
