//! Core types: cards, piles, the seeded deck, configuration, state, events.
//!
//! Everything here is plain data plus the fixed shuffle contract. Game rules
//! live in [`crate::rules`].

pub mod card;
pub mod pile;
pub mod rng;
pub mod deck;
pub mod seed;
pub mod config;
pub mod command;
pub mod event;
pub mod state;

pub use card::{Card, CardId, Rank, Suit};
pub use pile::{Pile, Tableau, PILE_COUNT};
pub use rng::{hash_seed, SeededRng};
pub use deck::{create_deck, shuffle_deck, DECK_SIZE, RUN_COUNT, RUN_LENGTH};
pub use seed::{daily_seed, is_daily_challenge, SeedGenerator};
pub use config::RulesConfig;
pub use command::Command;
pub use event::{Events, GameEvent};
pub use state::{format_timer, CardPos, GameState, HistoryEntry, Hint, Phase};
