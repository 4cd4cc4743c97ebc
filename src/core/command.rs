//! Commands: everything a caller can ask the engine to do.
//!
//! Commands are plain data so they can be logged, serialized and replayed.
//! Replaying the same commands from the same seed reproduces the same game.
//!
//! ```
//! use spider_engine::core::Command;
//!
//! let log = vec![
//!     Command::NewGame { seed: "2024-01-15".into() },
//!     Command::DealFromStock,
//!     Command::Undo,
//! ];
//! assert!(log[1].records_history());
//! assert!(!log[2].records_history());
//! ```

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Deal a fresh game from `seed`.
    NewGame { seed: String },

    /// Deal the current seed again.
    Restart,

    /// Move the group `from[card_index..]` onto pile `to`.
    MoveCards {
        from: usize,
        to: usize,
        card_index: usize,
    },

    /// Deal one stock card onto each pile.
    DealFromStock,

    /// Revert the last move or deal.
    Undo,

    /// Start or stop the game clock.
    ToggleTimer,

    TogglePause,

    /// One tick of the external one-second clock.
    IncrementTimer,

    /// Compute a hint; costs a move.
    ShowHint,

    /// Clear the hint shown by generation `generation`, if it is still current.
    ClearHint { generation: u64 },

    /// Move the group `from[card_index..]` to the best destination.
    AutoMove { from: usize, card_index: usize },
}

impl Command {
    /// True for commands that push an undo snapshot when they succeed.
    #[must_use]
    pub fn records_history(&self) -> bool {
        matches!(
            self,
            Command::MoveCards { .. } | Command::DealFromStock | Command::AutoMove { .. }
        )
    }
}
