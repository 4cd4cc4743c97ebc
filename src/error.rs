//! Error types.
//!
//! Engine commands never fail: a rejected command leaves the state as it
//! was. These types only surface at the edges, when a caller asks *why* a
//! move is illegal, checks a state's invariants, or encodes a snapshot.

use crate::core::{CardId, Rank};

/// Why a move was refused.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    #[error("pile index {0} is out of range")]
    PileOutOfRange(usize),
    #[error("source and destination are both pile {0}")]
    SamePile(usize),
    #[error("pile {pile} has no card at index {index}")]
    CardOutOfRange { pile: usize, index: usize },
    #[error("card {index} of pile {pile} is not face-up")]
    FaceDown { pile: usize, index: usize },
    #[error("cards from index {index} of pile {pile} are not a same-suit descending run")]
    NotASequence { pile: usize, index: usize },
    #[error("cannot place {moving} on {target}")]
    RankMismatch { moving: Rank, target: Rank },
}

/// A state that breaks the data-model invariants.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("tableau has {0} piles")]
    TableauWidth(usize),
    #[error("{found} cards accounted for, expected 104")]
    CardCount { found: usize },
    #[error("card {0} appears more than once")]
    DuplicateCard(CardId),
    #[error("pile {pile} has a face-down card above a face-up one")]
    HiddenAboveVisible { pile: usize },
    #[error("stock card {0} is face-up")]
    StockFaceUp(CardId),
    #[error("foundation holds {0} runs")]
    FoundationOverflow(usize),
    #[error("won flag is {won} with {runs} runs in the foundation")]
    WonFlagMismatch { won: bool, runs: usize },
}

/// Failure to encode or decode a state snapshot.
#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("snapshot violates invariants: {0}")]
    Invalid(#[from] InvariantViolation),
    #[error("undo history entry {index} violates invariants: {violation}")]
    History {
        index: usize,
        #[source]
        violation: InvariantViolation,
    },
}

