//! Hint heuristic: rank every legal tableau move and suggest the best.
//!
//! Candidates are visited in (source pile, card index, destination pile)
//! order. A candidate must beat the current best strictly to replace it,
//! so ties keep the first one found.
//!
//! ## Scoring
//!
//! | Condition                                         | Points |
//! |---------------------------------------------------|--------|
//! | Destination empty                                 | 10     |
//! | Destination top one rank above the moving card    | 20     |
//! | ...and the same suit                              | +40    |
//! | Upgrades an off-suit resting place to a same-suit one | +100 |
//! | Uncovers a face-down card                         | +60    |
//! | Empties the source pile                           | +15    |
//!
//! A move whose group already rests on a card of the destination's rank is
//! a lateral move. It is only considered when it trades an off-suit parent
//! for a same-suit one; otherwise it is skipped.

use serde::{Deserialize, Serialize};

use crate::core::{Card, CardPos, Hint, Pile, Tableau};
use crate::rules::validator::movable_from;

const EMPTY_TARGET: u32 = 10;
const RANK_MATCH: u32 = 20;
const SAME_SUIT: u32 = 40;
const SUIT_UPGRADE: u32 = 100;
const REVEALS_CARD: u32 = 60;
const CLEARS_PILE: u32 = 15;

/// A candidate move with its heuristic score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    pub source: CardPos,
    pub target: usize,
    pub score: u32,
}

/// Score moving the group whose first card is `moving` onto `target`.
///
/// `above` is the card directly beneath the group in its source pile, and
/// `clears_pile` is true when the group starts at the bottom. Returns
/// `None` when the move is illegal or a pointless lateral move.
fn score_candidate(moving: &Card, above: Option<&Card>, target: &Pile, clears_pile: bool) -> Option<u32> {
    let mut score = match target.top() {
        None => EMPTY_TARGET,
        Some(top) => {
            if !top.rank.is_one_above(moving.rank) {
                return None;
            }

            let mut score = 0;
            if let Some(parent) = above.filter(|card| card.face_up && card.rank == top.rank) {
                if parent.suit == moving.suit || top.suit != moving.suit {
                    return None;
                }
                score += SUIT_UPGRADE;
            }

            score += RANK_MATCH;
            if top.suit == moving.suit {
                score += SAME_SUIT;
            }
            score
        }
    };

    if above.is_some_and(|card| !card.face_up) {
        score += REVEALS_CARD;
    }
    if clears_pile {
        score += CLEARS_PILE;
    }
    Some(score)
}

/// Highest-scoring tableau move, if any legal move exists.
#[must_use]
pub fn best_tableau_move(tableau: &Tableau) -> Option<ScoredMove> {
    let mut best: Option<ScoredMove> = None;

    for (from, pile) in tableau.iter().enumerate() {
        let Some(start) = movable_from(pile) else {
            continue;
        };

        for index in start..pile.len() {
            let Some(moving) = pile.get(index) else {
                continue;
            };
            let above = index.checked_sub(1).and_then(|i| pile.get(i));

            for (to, target) in tableau.iter().enumerate() {
                if to == from {
                    continue;
                }
                let Some(score) = score_candidate(moving, above, target, index == 0) else {
                    continue;
                };
                if best.map_or(true, |b| score > b.score) {
                    best = Some(ScoredMove {
                        source: CardPos::new(from, index),
                        target: to,
                        score,
                    });
                }
            }
        }
    }

    best
}

/// Suggest the next action: the best tableau move, else a deal, else a new game.
#[must_use]
pub fn find_hint(tableau: &Tableau, stock_len: usize) -> Hint {
    match best_tableau_move(tableau) {
        Some(best) => Hint::Move {
            source: best.source,
            target: best.target,
        },
        None if stock_len > 0 => Hint::Deal,
        None => Hint::NewGame,
    }
}
