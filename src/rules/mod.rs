//! Spider Solitaire rules.
//!
//! - `validator`: pure predicates (movable sequences, completed runs, move legality)
//! - `engine`: `SpiderEngine`, the pure state-transition function
//!
//! The engine never fails: rejected commands leave the state unchanged.

pub mod validator;
pub mod engine;

pub use validator::{check_move, completed_run, is_movable_sequence, movable_from, top_run_len};
pub use engine::{SpiderEngine, Transition};
