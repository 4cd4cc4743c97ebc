//! Game state: the authoritative layout plus counters, flags and undo history.
//!
//! ## GameState
//!
//! - Tableau (ten piles), stock, foundation
//! - Moves, score, timer
//! - Playing / paused / won flags
//! - Seed the deal came from
//! - Undo history
//! - Transient hint fields
//!
//! All collections are `im` persistent structures, so cloning a state (for
//! a pure transition or an undo snapshot) is cheap and shares structure
//! with the state it was cloned from.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::card::{Card, Suit};
use super::deck::{DECK_SIZE, RUN_COUNT, RUN_LENGTH};
use super::pile::{Tableau, PILE_COUNT};
use crate::error::{InvariantViolation, SnapshotError};

/// A card position on the tableau.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardPos {
    pub pile: usize,
    pub index: usize,
}

impl CardPos {
    #[must_use]
    pub const fn new(pile: usize, index: usize) -> Self {
        Self { pile, index }
    }
}

/// The action a hint points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hint {
    /// Move the group starting at `source` onto pile `target`.
    Move { source: CardPos, target: usize },
    /// No tableau move: deal from the stock.
    Deal,
    /// No tableau move and an empty stock: start a new game.
    NewGame,
}

/// Observable game phase, derived from the state flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Freshly dealt, nothing played yet.
    NotStarted,
    Playing,
    /// Paused, or the timer was stopped after play began.
    Paused,
    Won,
}

/// Snapshot taken immediately before a mutating command.
///
/// Restoring one reverses exactly that command (apart from the move
/// counter, which undo advances instead).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub tableau: Tableau,
    pub stock: Vector<Card>,
    pub foundation: Vector<Suit>,
    pub score: i32,
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) tableau: Tableau,
    /// Face-down reserve; deals pop from the back.
    pub(crate) stock: Vector<Card>,
    /// Suits of completed runs, in completion order.
    pub(crate) foundation: Vector<Suit>,
    pub(crate) moves: u32,
    pub(crate) score: i32,
    /// Elapsed play time in seconds.
    pub(crate) timer: u32,
    pub(crate) is_playing: bool,
    pub(crate) is_paused: bool,
    pub(crate) game_won: bool,
    pub(crate) seed: String,
    pub(crate) history: Vector<HistoryEntry>,
    pub(crate) hint: Option<Hint>,
    pub(crate) hint_generation: u64,
}

impl GameState {
    /// Build a state from an explicit layout.
    ///
    /// Counters start at zero, the score at `starting_score`. No invariant
    /// checking is done here, so partial layouts (puzzles, tests) are fine;
    /// call [`GameState::check_invariants`] for full deals.
    #[must_use]
    pub fn from_layout(tableau: Tableau, stock: Vector<Card>, seed: impl Into<String>, starting_score: i32) -> Self {
        Self {
            tableau,
            stock,
            foundation: Vector::new(),
            moves: 0,
            score: starting_score,
            timer: 0,
            is_playing: false,
            is_paused: false,
            game_won: false,
            seed: seed.into(),
            history: Vector::new(),
            hint: None,
            hint_generation: 0,
        }
    }

    /// Same state with a pre-filled foundation. Intended for custom layouts.
    #[must_use]
    pub fn with_foundation<I: IntoIterator<Item = Suit>>(mut self, suits: I) -> Self {
        self.foundation = suits.into_iter().collect();
        self.game_won = self.foundation.len() == RUN_COUNT;
        self
    }

    // === Layout ===

    #[must_use]
    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    #[must_use]
    pub fn stock(&self) -> &Vector<Card> {
        &self.stock
    }

    #[must_use]
    pub fn foundation(&self) -> &Vector<Suit> {
        &self.foundation
    }

    // === Counters and flags ===

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Elapsed play time in seconds.
    #[must_use]
    pub fn timer(&self) -> u32 {
        self.timer
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.game_won
    }

    #[must_use]
    pub fn seed(&self) -> &str {
        &self.seed
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.game_won {
            Phase::Won
        } else if self.is_paused {
            Phase::Paused
        } else if self.is_playing {
            Phase::Playing
        } else if self.moves == 0 {
            Phase::NotStarted
        } else {
            Phase::Paused
        }
    }

    // === History ===

    #[must_use]
    pub fn history(&self) -> &Vector<HistoryEntry> {
        &self.history
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Snapshot of the undoable parts of the state.
    pub(crate) fn snapshot(&self) -> HistoryEntry {
        HistoryEntry {
            tableau: self.tableau.clone(),
            stock: self.stock.clone(),
            foundation: self.foundation.clone(),
            score: self.score,
        }
    }

    // === Hints ===

    #[must_use]
    pub fn hint(&self) -> Option<Hint> {
        self.hint
    }

    /// Start of the suggested group, if the hint is a tableau move.
    #[must_use]
    pub fn hint_source(&self) -> Option<CardPos> {
        match self.hint {
            Some(Hint::Move { source, .. }) => Some(source),
            _ => None,
        }
    }

    /// True when the hint suggests dealing from the stock.
    #[must_use]
    pub fn hint_deck(&self) -> bool {
        self.hint == Some(Hint::Deal)
    }

    /// True when the hint suggests starting a new game.
    #[must_use]
    pub fn hint_new_game(&self) -> bool {
        self.hint == Some(Hint::NewGame)
    }

    /// Bumped by every hint request; clear requests from older generations are stale.
    #[must_use]
    pub fn hint_generation(&self) -> u64 {
        self.hint_generation
    }

    // === Invariants ===

    /// Cards still in play: tableau plus stock.
    #[must_use]
    pub fn cards_in_play(&self) -> usize {
        self.tableau.card_count() + self.stock.len()
    }

    /// Verify the data-model invariants of a full 104-card game.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        check_layout(&self.tableau, &self.stock, &self.foundation)?;

        let runs = self.foundation.len();
        if self.game_won != (runs == RUN_COUNT) {
            return Err(InvariantViolation::WonFlagMismatch {
                won: self.game_won,
                runs,
            });
        }
        Ok(())
    }

    // === Snapshots ===

    /// Encode the full state, history included, for the caller to persist.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a state produced by [`GameState::to_bytes`].
    ///
    /// The decoded state must satisfy [`GameState::check_invariants`], and
    /// every undo snapshot must hold a valid layout, since undo restores it
    /// as-is.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let state: GameState = bincode::deserialize(bytes)?;
        state.check_invariants()?;
        for (index, entry) in state.history.iter().enumerate() {
            check_layout(&entry.tableau, &entry.stock, &entry.foundation)
                .map_err(|violation| SnapshotError::History { index, violation })?;
        }
        Ok(state)
    }
}

/// Layout checks shared by the live state and its undo snapshots: ten
/// piles, at most eight runs home, all 104 cards present exactly once,
/// face-down cards only under face-up ones, a face-down stock.
fn check_layout(
    tableau: &Tableau,
    stock: &Vector<Card>,
    foundation: &Vector<Suit>,
) -> Result<(), InvariantViolation> {
    if tableau.len() != PILE_COUNT {
        return Err(InvariantViolation::TableauWidth(tableau.len()));
    }

    let runs = foundation.len();
    if runs > RUN_COUNT {
        return Err(InvariantViolation::FoundationOverflow(runs));
    }

    let found = tableau.card_count() + stock.len() + RUN_LENGTH * runs;
    if found != DECK_SIZE {
        return Err(InvariantViolation::CardCount { found });
    }

    let mut seen = FxHashSet::default();
    for card in tableau.iter().flat_map(|pile| pile.iter()).chain(stock.iter()) {
        if !seen.insert(card.id) {
            return Err(InvariantViolation::DuplicateCard(card.id));
        }
    }

    for (index, pile) in tableau.iter().enumerate() {
        let hidden = pile.face_down_count();
        if pile.cards_from(hidden).any(|card| !card.face_up) {
            return Err(InvariantViolation::HiddenAboveVisible { pile: index });
        }
    }

    if let Some(card) = stock.iter().find(|card| card.face_up) {
        return Err(InvariantViolation::StockFaceUp(card.id));
    }

    Ok(())
}

/// Render elapsed seconds as `MM:SS`.
///
/// Minutes are not wrapped into hours: 3725 seconds is `62:05`.
#[must_use]
pub fn format_timer(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
