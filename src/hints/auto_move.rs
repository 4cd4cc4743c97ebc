//! Destination picking for a double-activated card.
//!
//! Any pile whose top card is one rank above the group's first card scores
//! `1000 + run length`, where the run length is the movable sequence
//! already resting on that pile. Landing on a long run keeps suits
//! together. An empty pile scores 0, so it is only chosen when nothing
//! else fits. Ties go to the lowest pile index.

use crate::core::Tableau;
use crate::rules::validator::{is_movable_sequence, top_run_len};

const RANK_MATCH_BASE: usize = 1000;

/// Best destination for the group starting at `tableau[from][index]`.
///
/// `None` when the position is out of range, the group is not a movable
/// sequence, or no other pile accepts it.
#[must_use]
pub fn auto_move_target(tableau: &Tableau, from: usize, index: usize) -> Option<usize> {
    let source = tableau.pile(from)?;
    let moving = source.get(index)?;
    if !is_movable_sequence(source.cards_from(index)) {
        return None;
    }

    let mut best: Option<(usize, usize)> = None;
    for (to, target) in tableau.iter().enumerate() {
        if to == from {
            continue;
        }
        let score = match target.top() {
            None => 0,
            Some(top) if top.rank.is_one_above(moving.rank) => RANK_MATCH_BASE + top_run_len(target),
            Some(_) => continue,
        };
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, to));
        }
    }

    best.map(|(_, to)| to)
}
