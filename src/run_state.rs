//! Score, lives, level and the running flag for one session.

use crate::config::STARTING_LIVES;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub running: bool,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            running: true,
        }
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Removes one life and stops the run on the last one. Returns the lives
    /// left.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.running = false;
        }
        self.lives
    }

    pub fn next_level(&mut self) -> u32 {
        self.level += 1;
        self.level
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
