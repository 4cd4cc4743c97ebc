//! Pure move predicates shared by the engine and the hint heuristics.
//!
//! A **movable sequence** is a run where every card is the same suit as,
//! and exactly one rank below, the card beneath it. Empty and single-card
//! runs are trivially movable.

use crate::core::{Card, Pile, Rank, Suit, Tableau, RUN_LENGTH};
use crate::error::MoveError;

/// True if every adjacent pair shares a suit and descends by exactly one.
///
/// Accepts anything that yields `&Card` bottom-first: slices, `Pile`
/// iterators, `im` vectors.
pub fn is_movable_sequence<'a, I>(cards: I) -> bool
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut iter = cards.into_iter();
    let Some(mut below) = iter.next() else {
        return true;
    };
    for card in iter {
        if !card.follows(below) {
            return false;
        }
        below = card;
    }
    true
}

/// Suit of the completed K..A run sitting on top of `pile`, if there is one.
///
/// Requires at least 13 cards, a King 13th from the top and a movable
/// sequence across those 13.
#[must_use]
pub fn completed_run(pile: &Pile) -> Option<Suit> {
    let len = pile.len();
    if len < RUN_LENGTH {
        return None;
    }
    if pile.get(len - RUN_LENGTH)?.rank != Rank::KING {
        return None;
    }
    if !is_movable_sequence(pile.top_cards(RUN_LENGTH)) {
        return None;
    }
    pile.top().map(|card| card.suit)
}

/// Length of the movable sequence resting on top of `pile`, walked down
/// from the top card while the suit/rank chain holds. Zero for an empty pile.
#[must_use]
pub fn top_run_len(pile: &Pile) -> usize {
    let mut cards = pile.iter().rev();
    let Some(mut above) = cards.next() else {
        return 0;
    };
    let mut len = 1;
    for card in cards {
        if !above.follows(card) {
            break;
        }
        len += 1;
        above = card;
    }
    len
}

/// Lowest index whose group up to the top is face-up and movable.
///
/// Every index from the returned one to the top also starts a movable
/// group. `None` for an empty pile or a face-down top card.
#[must_use]
pub fn movable_from(pile: &Pile) -> Option<usize> {
    let top = pile.top()?;
    if !top.face_up {
        return None;
    }
    let mut start = pile.len() - 1;
    while start > 0 {
        let (Some(below), Some(above)) = (pile.get(start - 1), pile.get(start)) else {
            break;
        };
        if !below.face_up || !above.follows(below) {
            break;
        }
        start -= 1;
    }
    Some(start)
}

/// Validate moving `tableau[from][index..]` onto pile `to`.
///
/// The group must be face-up and movable. A non-empty destination must
/// show a top card exactly one rank above the group's first card; an empty
/// destination takes any movable group.
pub fn check_move(tableau: &Tableau, from: usize, to: usize, index: usize) -> Result<(), MoveError> {
    let source = tableau.pile(from).ok_or(MoveError::PileOutOfRange(from))?;
    let target = tableau.pile(to).ok_or(MoveError::PileOutOfRange(to))?;
    if from == to {
        return Err(MoveError::SamePile(from));
    }

    let moving = source
        .get(index)
        .ok_or(MoveError::CardOutOfRange { pile: from, index })?;
    if source.cards_from(index).any(|card| !card.face_up) {
        return Err(MoveError::FaceDown { pile: from, index });
    }
    if !is_movable_sequence(source.cards_from(index)) {
        return Err(MoveError::NotASequence { pile: from, index });
    }

    match target.top() {
        Some(top) if !top.rank.is_one_above(moving.rank) => Err(MoveError::RankMismatch {
            moving: moving.rank,
            target: top.rank,
        }),
        _ => Ok(()),
    }
}
