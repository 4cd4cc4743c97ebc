//! Notifications emitted alongside state changes.
//!
//! The engine emits rule-level events (runs completed, cards revealed, the
//! win). The [`Session`](crate::session::Session) adds the lifecycle events
//! a statistics collaborator records: game started and game lost.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Suit;

/// Events produced by one command. Most commands emit zero to two.
pub type Events = SmallVec<[GameEvent; 4]>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A face-down card became the exposed top of a pile and was turned up.
    CardRevealed { pile: usize },

    /// A K..A run left `pile` for the foundation.
    RunCompleted { pile: usize, suit: Suit },

    /// The eighth run reached the foundation.
    GameWon { score: i32, time: u32, moves: u32 },

    /// First mutating action of a game with this seed.
    GameStarted { seed: String },

    /// A new game replaced one that was in progress and unwon.
    GameLost { seed: String },
}

impl GameEvent {
    /// True for the events a statistics collaborator records.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            GameEvent::GameWon { .. } | GameEvent::GameStarted { .. } | GameEvent::GameLost { .. }
        )
    }
}
