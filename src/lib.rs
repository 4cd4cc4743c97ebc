//! # spider-engine
//!
//! Rules engine for single-suit Spider Solitaire: 104 cards, ten piles.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: `SpiderEngine::apply(&state, &command)` returns
//!    the next state and its events. The input state is never touched.
//!
//! 2. **Reproducible Deals**: A string seed fixes the shuffle bit for bit,
//!    so a seed can be shared (the daily challenge is just today's date).
//!
//! 3. **Silent Rejection**: Illegal commands are no-ops. Callers that want
//!    a reason ask `rules::check_move`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Piles, stock, foundation and the undo
//!   history are `im` vectors, so undo snapshots share structure with the
//!   live state instead of deep-copying it.
//!
//! - **Thin Holder**: `Session` owns one `GameState`, resolves random seeds,
//!   issues cancel-safe hint tickets and emits the start/win/loss events a
//!   statistics collaborator needs.
//!
//! ## Modules
//!
//! - `core`: Cards, piles, seeded deck, configuration, commands, events, state
//! - `rules`: Move validation and the state-transition engine
//! - `hints`: Hint ranking and auto-move destination picking
//! - `session`: Mutable game holder
//! - `error`: Error types for validation, invariants and snapshots

pub mod core;
pub mod error;
pub mod rules;
pub mod hints;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, Rank, Suit,
    Pile, Tableau, PILE_COUNT,
    SeededRng, SeedGenerator, create_deck, shuffle_deck, daily_seed, is_daily_challenge,
    RulesConfig, Command, GameEvent, Events,
    GameState, HistoryEntry, CardPos, Hint, Phase, format_timer,
};

pub use crate::error::{InvariantViolation, MoveError, SnapshotError};

pub use crate::rules::{check_move, is_movable_sequence, SpiderEngine, Transition};

pub use crate::hints::{auto_move_target, best_tableau_move, find_hint, ScoredMove};

pub use crate::session::{HintTicket, Outcome, Session};
