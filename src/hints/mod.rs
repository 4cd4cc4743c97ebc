//! Move suggestions: the hint ranking and the double-activation auto-move.
//!
//! Both are pure functions over a [`Tableau`](crate::core::Tableau) and
//! share the predicates in [`crate::rules::validator`].

pub mod heuristic;
pub mod auto_move;

pub use heuristic::{best_tableau_move, find_hint, ScoredMove};
pub use auto_move::auto_move_target;
