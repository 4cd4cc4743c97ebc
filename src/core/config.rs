//! Rules configuration.
//!
//! The deal layout and shuffle are fixed; scoring and hint timing are
//! configurable. Defaults reproduce the standard scoring:
//! 500 starting points, -1 per move, +100 per completed run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Scoring and timing parameters for the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Score at the start of every game.
    pub starting_score: i32,

    /// Points deducted for each card move.
    pub move_cost: i32,

    /// Points awarded when a K..A run is moved to the foundation.
    pub run_bonus: i32,

    /// Moves added to the counter each time a hint is requested.
    pub hint_move_penalty: u32,

    /// How long a hint stays on screen before the caller should clear it.
    pub hint_display: Duration,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_score: 500,
            move_cost: 1,
            run_bonus: 100,
            hint_move_penalty: 1,
            hint_display: Duration::from_secs(2),
        }
    }
}

impl RulesConfig {
    /// Create a new config with a custom starting score.
    pub fn with_starting_score(mut self, score: i32) -> Self {
        self.starting_score = score;
        self
    }

    /// Create a new config with a custom per-move cost.
    pub fn with_move_cost(mut self, cost: i32) -> Self {
        self.move_cost = cost;
        self
    }

    /// Create a new config with a custom completed-run bonus.
    pub fn with_run_bonus(mut self, bonus: i32) -> Self {
        self.run_bonus = bonus;
        self
    }

    /// Create a new config with a custom per-hint move penalty.
    pub fn with_hint_move_penalty(mut self, penalty: u32) -> Self {
        self.hint_move_penalty = penalty;
        self
    }

    /// Create a new config with a custom hint display window.
    pub fn with_hint_display(mut self, display: Duration) -> Self {
        self.hint_display = display;
        self
    }
}
