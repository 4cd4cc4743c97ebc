//! The 104-card single-suit deck and its seeded shuffle.

use super::card::{Card, CardId, Rank, Suit};
use super::rng::SeededRng;

/// Number of A..K runs in the deck.
pub const RUN_COUNT: usize = 8;

/// Cards in one complete A..K run.
pub const RUN_LENGTH: usize = 13;

/// Total cards in the deck.
pub const DECK_SIZE: usize = RUN_COUNT * RUN_LENGTH;

/// Build the unshuffled deck: eight spade runs, Ace to King, all face-down.
#[must_use]
pub fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for run in 0..RUN_COUNT {
        for rank in Rank::all() {
            let id = CardId::new((run * RUN_LENGTH) as u8 + rank.value() - 1);
            deck.push(Card::new(id, Suit::Spades, rank));
        }
    }
    deck
}

/// Fisher–Yates shuffle driven by [`SeededRng`].
///
/// Walks from the last position down to 1, swapping position `i` with
/// `floor(next() * (i + 1))`. The same seed always gives the same order.
#[must_use]
pub fn shuffle_deck(deck: &[Card], seed: &str) -> Vec<Card> {
    let mut rng = SeededRng::new(seed);
    let mut shuffled = deck.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.index_below(i + 1);
        shuffled.swap(i, j);
    }
    shuffled
}
