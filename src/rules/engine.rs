//! The Spider rules engine.
//!
//! `SpiderEngine` turns a state and a command into the next state:
//!
//! ```
//! use spider_engine::core::Command;
//! use spider_engine::rules::SpiderEngine;
//!
//! let engine = SpiderEngine::default();
//! let state = engine.initialize_game("2024-01-15");
//!
//! let next = engine.apply(&state, &Command::DealFromStock);
//! assert!(next.changed);
//! assert_eq!(next.state.stock().len(), 40);
//! assert_eq!(state.stock().len(), 50); // the input is untouched
//! ```
//!
//! ## Rejections
//!
//! Illegal commands (bad indices, broken groups, rank mismatches, undo with
//! no history, dealing from an empty stock) return the state unchanged with
//! `changed == false`. Use [`check_move`] to find out why a move is illegal.
//!
//! ## Completed runs
//!
//! After every move the destination pile is checked, and after every single
//! dealt card that pile is checked, for a K..A run on top. A run is removed
//! to the foundation for `run_bonus` points and the card it uncovers is
//! turned face-up. The eighth run wins the game.

use log::{debug, trace};

use crate::core::{
    create_deck, shuffle_deck, Command, Events, GameEvent, GameState, Pile, RulesConfig, Tableau,
    PILE_COUNT, RUN_COUNT, RUN_LENGTH,
};
use crate::hints::{auto_move_target, find_hint};
use crate::rules::validator::{check_move, completed_run};

/// Piles that receive six cards in the opening deal; the rest get five.
const SIX_CARD_PILES: usize = 4;

/// Result of applying a command.
#[derive(Clone, Debug)]
pub struct Transition {
    pub state: GameState,
    pub events: Events,
    /// False when the command was rejected and `state` equals the input.
    pub changed: bool,
}

/// Pure Spider Solitaire rules.
///
/// The engine holds only configuration. Game state is passed in and the
/// next state handed back; nothing is shared between games.
#[derive(Clone, Debug, Default)]
pub struct SpiderEngine {
    config: RulesConfig,
}

impl SpiderEngine {
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Deal a new game from `seed`.
    ///
    /// Piles 0-3 get six cards, piles 4-9 five, with only the top card
    /// face-up. The remaining 50 cards form the stock.
    #[must_use]
    pub fn initialize_game(&self, seed: &str) -> GameState {
        let mut cards = shuffle_deck(&create_deck(), seed).into_iter();

        let piles: Vec<Pile> = (0..PILE_COUNT)
            .map(|index| {
                let count = if index < SIX_CARD_PILES { 6 } else { 5 };
                let mut pile: Pile = cards.by_ref().take(count).collect();
                pile.reveal_top();
                pile
            })
            .collect();
        let stock = cards.collect();

        debug!("dealt new game from seed {seed:?}");
        GameState::from_layout(Tableau::from_piles(piles), stock, seed, self.config.starting_score)
    }

    /// Apply `command` to `state`, returning the next state and its events.
    #[must_use]
    pub fn apply(&self, state: &GameState, command: &Command) -> Transition {
        let mut next = state.clone();
        let mut events = Events::new();
        let changed = self.apply_in_place(&mut next, command, &mut events);
        Transition {
            state: next,
            events,
            changed,
        }
    }

    /// Apply every command in order, starting from a fresh deal of `seed`.
    #[must_use]
    pub fn replay<'a, I>(&self, seed: &str, commands: I) -> GameState
    where
        I: IntoIterator<Item = &'a Command>,
    {
        let mut state = self.initialize_game(seed);
        let mut events = Events::new();
        for command in commands {
            self.apply_in_place(&mut state, command, &mut events);
            events.clear();
        }
        state
    }

    /// Mutating form of [`SpiderEngine::apply`], for holders that own their state.
    ///
    /// Returns false, leaving `state` untouched, when the command is rejected.
    pub fn apply_in_place(&self, state: &mut GameState, command: &Command, events: &mut Events) -> bool {
        match command {
            Command::NewGame { seed } => {
                self.reset(state, seed.clone());
                true
            }
            Command::Restart => {
                let seed = state.seed.clone();
                self.reset(state, seed);
                true
            }
            Command::MoveCards {
                from,
                to,
                card_index,
            } => self.move_cards(state, *from, *to, *card_index, events),
            Command::DealFromStock => self.deal_from_stock(state, events),
            Command::Undo => self.undo(state),
            Command::ToggleTimer => {
                state.is_playing = !state.is_playing;
                true
            }
            Command::TogglePause => {
                state.is_paused = !state.is_paused;
                true
            }
            Command::IncrementTimer => self.increment_timer(state),
            Command::ShowHint => {
                self.show_hint(state);
                true
            }
            Command::ClearHint { generation } => self.clear_hint(state, *generation),
            Command::AutoMove { from, card_index } => match auto_move_target(&state.tableau, *from, *card_index) {
                Some(to) => self.move_cards(state, *from, to, *card_index, events),
                None => {
                    trace!("auto-move from pile {from} index {card_index}: no destination");
                    false
                }
            },
        }
    }

    /// Replace `state` with a fresh deal, keeping the hint generation
    /// monotonic so clears scheduled in the old game stay stale.
    fn reset(&self, state: &mut GameState, seed: String) {
        let generation = state.hint_generation;
        *state = self.initialize_game(&seed);
        state.hint_generation = generation;
    }

    fn move_cards(&self, state: &mut GameState, from: usize, to: usize, index: usize, events: &mut Events) -> bool {
        if let Err(err) = check_move(&state.tableau, from, to, index) {
            trace!("move rejected: {err}");
            return false;
        }

        let snapshot = state.snapshot();
        let Some(source) = state.tableau.pile_mut(from) else {
            return false;
        };
        let group = source.split_off(index);
        let revealed = source.reveal_top();
        let count = group.len();
        if let Some(target) = state.tableau.pile_mut(to) {
            target.append(group);
        }

        state.history.push_back(snapshot);
        state.score -= self.config.move_cost;
        state.moves += 1;
        if revealed {
            events.push(GameEvent::CardRevealed { pile: from });
        }
        debug!("moved {count} card(s) from pile {from} to pile {to}");

        self.collect_completed_run(state, to, events);
        state.is_playing = true;
        state.is_paused = false;
        true
    }

    fn deal_from_stock(&self, state: &mut GameState, events: &mut Events) -> bool {
        if state.stock.is_empty() {
            trace!("deal rejected: stock is empty");
            return false;
        }

        let snapshot = state.snapshot();
        state.history.push_back(snapshot);

        for index in 0..PILE_COUNT {
            let Some(card) = state.stock.pop_back() else {
                break;
            };
            if let Some(pile) = state.tableau.pile_mut(index) {
                pile.push(card.turned_up());
            }
            self.collect_completed_run(state, index, events);
        }
        debug!("dealt from stock, {} card(s) left", state.stock.len());

        state.is_playing = !state.game_won;
        state.is_paused = false;
        true
    }

    fn undo(&self, state: &mut GameState) -> bool {
        let Some(entry) = state.history.pop_back() else {
            trace!("undo rejected: no history");
            return false;
        };

        state.tableau = entry.tableau;
        state.stock = entry.stock;
        state.foundation = entry.foundation;
        state.score = entry.score;
        state.moves += 1;
        state.game_won = false;
        state.is_playing = true;
        state.is_paused = false;
        debug!("undo, {} snapshot(s) left", state.history.len());
        true
    }

    fn increment_timer(&self, state: &mut GameState) -> bool {
        if state.is_playing && !state.is_paused && !state.game_won {
            state.timer += 1;
            true
        } else {
            false
        }
    }

    fn show_hint(&self, state: &mut GameState) {
        state.moves += self.config.hint_move_penalty;
        let hint = find_hint(&state.tableau, state.stock.len());
        state.hint = Some(hint);
        state.hint_generation += 1;
        debug!("hint {} -> {hint:?}", state.hint_generation);
    }

    fn clear_hint(&self, state: &mut GameState, generation: u64) -> bool {
        if generation != state.hint_generation || state.hint.is_none() {
            trace!("stale hint clear {generation} (current {})", state.hint_generation);
            return false;
        }
        state.hint = None;
        true
    }

    /// Remove a completed run from the top of pile `index`, if there is one.
    fn collect_completed_run(&self, state: &mut GameState, index: usize, events: &mut Events) {
        let Some(pile) = state.tableau.pile_mut(index) else {
            return;
        };
        let Some(suit) = completed_run(pile) else {
            return;
        };
        pile.remove_top(RUN_LENGTH);
        let revealed = pile.reveal_top();

        state.foundation.push_back(suit);
        state.score += self.config.run_bonus;
        events.push(GameEvent::RunCompleted { pile: index, suit });
        if revealed {
            events.push(GameEvent::CardRevealed { pile: index });
        }
        debug!("run completed on pile {index}, {} in foundation", state.foundation.len());

        if state.foundation.len() == RUN_COUNT && !state.game_won {
            state.game_won = true;
            events.push(GameEvent::GameWon {
                score: state.score,
                time: state.timer,
                moves: state.moves,
            });
            debug!("game won: score {} in {} moves", state.score, state.moves);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, CardId, Hint, Phase, Rank, Suit, DECK_SIZE};
    use im::Vector;

    fn up(rank: u8) -> Card {
        Card::new(CardId(rank - 1), Suit::Spades, Rank::new(rank).unwrap()).turned_up()
    }

    fn down(rank: u8) -> Card {
        Card::new(CardId(rank - 1), Suit::Spades, Rank::new(rank).unwrap())
    }

    fn pile(cards: &[Card]) -> Pile {
        cards.iter().copied().collect()
    }

    fn layout(piles: Vec<Pile>, stock: &[Card]) -> GameState {
        GameState::from_layout(
            Tableau::from_piles(piles),
            stock.iter().copied().collect::<Vector<Card>>(),
            "layout",
            500,
        )
    }

    fn move_cmd(from: usize, to: usize, card_index: usize) -> Command {
        Command::MoveCards { from, to, card_index }
    }

    #[test]
    fn test_initial_deal() {
        let engine = SpiderEngine::default();
        let state = engine.initialize_game("test-1");

        let sizes: Vec<usize> = state.tableau().iter().map(Pile::len).collect();
        assert_eq!(sizes, vec![6, 6, 6, 6, 5, 5, 5, 5, 5, 5]);
        assert_eq!(state.stock().len(), 50);
        assert_eq!(state.cards_in_play(), DECK_SIZE);

        for pile in state.tableau() {
            assert_eq!(pile.face_down_count(), pile.len() - 1);
            assert!(pile.top().unwrap().face_up);
        }

        let tops: Vec<u8> = state.tableau().iter().map(|p| p.top().unwrap().rank.value()).collect();
        assert_eq!(tops, vec![9, 5, 3, 8, 1, 11, 5, 3, 12, 1]);

        assert_eq!(state.score(), 500);
        assert_eq!(state.moves(), 0);
        assert_eq!(state.phase(), Phase::NotStarted);
        assert_eq!(state.check_invariants(), Ok(()));
    }

    #[test]
    fn test_move_and_reveal() {
        let engine = SpiderEngine::default();
        let state = layout(vec![pile(&[down(3), up(6), up(5)]), pile(&[up(7)])], &[]);

        let t = engine.apply(&state, &move_cmd(0, 1, 1));
        assert!(t.changed);
        assert_eq!(t.state.tableau().pile(1).unwrap().len(), 3);
        assert_eq!(t.state.tableau().pile(0).unwrap().len(), 1);
        assert!(t.state.tableau().pile(0).unwrap().top().unwrap().face_up);
        assert_eq!(t.state.score(), 499);
        assert_eq!(t.state.moves(), 1);
        assert!(t.state.is_playing());
        assert_eq!(t.state.history().len(), 1);
        assert_eq!(t.events.as_slice(), &[GameEvent::CardRevealed { pile: 0 }]);
    }

    #[test]
    fn test_rejected_move_is_noop() {
        let engine = SpiderEngine::default();
        let state = layout(vec![pile(&[up(6), up(4)]), pile(&[up(9)])], &[]);

        for command in [move_cmd(0, 1, 0), move_cmd(0, 1, 1), move_cmd(0, 0, 1), move_cmd(0, 11, 1), move_cmd(4, 1, 0)] {
            let t = engine.apply(&state, &command);
            assert!(!t.changed, "{command:?} should be rejected");
            assert_eq!(t.state, state);
            assert!(t.events.is_empty());
        }
    }

    #[test]
    fn test_any_valid_group_onto_empty_pile() {
        let engine = SpiderEngine::default();
        let state = layout(vec![pile(&[up(12), up(11), up(10)]), Pile::new()], &[]);

        let t = engine.apply(&state, &move_cmd(0, 1, 0));
        assert!(t.changed);
        assert!(t.state.tableau().pile(0).unwrap().is_empty());
        assert_eq!(t.state.tableau().pile(1).unwrap().len(), 3);
    }

    #[test]
    fn test_completing_a_run() {
        let engine = SpiderEngine::default();
        let run: Vec<Card> = (2..=13).rev().map(up).collect();
        let mut target = pile(&[down(9)]);
        for card in run {
            target.push(card);
        }
        let state = layout(vec![pile(&[up(5), up(1)]), target], &[]);

        let t = engine.apply(&state, &move_cmd(0, 1, 1));
        assert!(t.changed);
        assert_eq!(t.state.foundation().len(), 1);
        assert_eq!(t.state.score(), 500 - 1 + 100);
        assert_eq!(t.state.tableau().pile(1).unwrap().len(), 1);
        assert!(t.state.tableau().pile(1).unwrap().top().unwrap().face_up);
        assert_eq!(
            t.events.as_slice(),
            &[
                GameEvent::RunCompleted { pile: 1, suit: Suit::Spades },
                GameEvent::CardRevealed { pile: 1 },
            ]
        );
    }

    #[test]
    fn test_eighth_run_wins() {
        let engine = SpiderEngine::default();
        let run: Vec<Card> = (2..=13).rev().map(up).collect();
        let state = layout(vec![pile(&[up(1)]), pile(&run)], &[]).with_foundation([Suit::Spades; 7]);
        assert!(!state.is_won());

        let t = engine.apply(&state, &move_cmd(0, 1, 0));
        assert!(t.state.is_won());
        assert_eq!(t.state.phase(), Phase::Won);
        assert!(t.events.contains(&GameEvent::GameWon {
            score: 599,
            time: 0,
            moves: 1,
        }));

        // A won game stops the clock.
        let ticked = engine.apply(&t.state, &Command::IncrementTimer);
        assert!(!ticked.changed);
    }

    #[test]
    fn test_deal_completes_run_per_card() {
        let engine = SpiderEngine::default();
        let run: Vec<Card> = (2..=13).rev().map(up).collect();
        let mut piles = vec![pile(&run)];
        piles.extend((1..10).map(|_| pile(&[up(13)])));
        // The last stock card is dealt first, onto pile 0.
        let stock: Vec<Card> = (0..9).map(|_| down(7)).chain([down(1)]).collect();
        let state = layout(piles, &stock);

        let t = engine.apply(&state, &Command::DealFromStock);
        assert!(t.changed);
        assert!(t.state.stock().is_empty());
        assert_eq!(t.state.foundation().len(), 1);
        assert_eq!(t.state.score(), 600);
        assert!(t.state.tableau().pile(0).unwrap().is_empty());
        assert!(t.state.tableau().iter().skip(1).all(|p| p.len() == 2 && p.top().unwrap().face_up));
        assert_eq!(t.state.moves(), 0);
    }

    #[test]
    fn test_deal_with_short_stock() {
        let engine = SpiderEngine::default();
        let piles: Vec<Pile> = (0..10).map(|_| pile(&[up(13)])).collect();
        let state = layout(piles, &[down(2), down(3), down(4)]);

        let t = engine.apply(&state, &Command::DealFromStock);
        assert!(t.state.stock().is_empty());
        let sizes: Vec<usize> = t.state.tableau().iter().map(Pile::len).collect();
        assert_eq!(sizes, vec![2, 2, 2, 1, 1, 1, 1, 1, 1, 1]);
        assert_eq!(t.state.tableau().pile(0).unwrap().top().unwrap().rank.value(), 4);

        let again = engine.apply(&t.state, &Command::DealFromStock);
        assert!(!again.changed);
    }

    #[test]
    fn test_undo_restores_and_costs_a_move() {
        let engine = SpiderEngine::default();
        let state = layout(vec![pile(&[down(3), up(5)]), pile(&[up(6)])], &[down(8)]);

        let moved = engine.apply(&state, &move_cmd(0, 1, 1)).state;
        let undone = engine.apply(&moved, &Command::Undo);
        assert!(undone.changed);
        assert_eq!(undone.state.tableau(), state.tableau());
        assert_eq!(undone.state.stock(), state.stock());
        assert_eq!(undone.state.score(), 500);
        assert_eq!(undone.state.moves(), 2);
        assert!(!undone.state.can_undo());

        let nothing = engine.apply(&undone.state, &Command::Undo);
        assert!(!nothing.changed);
    }

    #[test]
    fn test_undo_clears_win() {
        let engine = SpiderEngine::default();
        let run: Vec<Card> = (2..=13).rev().map(up).collect();
        let state = layout(vec![pile(&[up(1)]), pile(&run)], &[]).with_foundation([Suit::Spades; 7]);

        let won = engine.apply(&state, &move_cmd(0, 1, 0)).state;
        let undone = engine.apply(&won, &Command::Undo).state;
        assert!(!undone.is_won());
        assert_eq!(undone.foundation().len(), 7);
        assert_eq!(undone.score(), 500);
    }

    #[test]
    fn test_timer_and_toggles() {
        let engine = SpiderEngine::default();
        let mut state = engine.initialize_game("timer");

        state = engine.apply(&state, &Command::IncrementTimer).state;
        assert_eq!(state.timer(), 0);

        state = engine.apply(&state, &Command::ToggleTimer).state;
        state = engine.apply(&state, &Command::IncrementTimer).state;
        assert_eq!(state.timer(), 1);

        state = engine.apply(&state, &Command::TogglePause).state;
        assert_eq!(state.phase(), Phase::Paused);
        state = engine.apply(&state, &Command::IncrementTimer).state;
        assert_eq!(state.timer(), 1);

        state = engine.apply(&state, &Command::TogglePause).state;
        state = engine.apply(&state, &Command::IncrementTimer).state;
        assert_eq!(state.timer(), 2);
    }

    #[test]
    fn test_move_resumes_paused_game() {
        let engine = SpiderEngine::default();
        let state = layout(vec![pile(&[up(5)]), pile(&[up(6)])], &[]);
        let paused = engine.apply(&state, &Command::TogglePause).state;
        assert!(paused.is_paused());

        let moved = engine.apply(&paused, &move_cmd(0, 1, 0)).state;
        assert!(!moved.is_paused());
        assert!(moved.is_playing());
    }

    #[test]
    fn test_restart_replays_seed() {
        let engine = SpiderEngine::default();
        let state = engine.initialize_game("replay");
        let dealt = engine.apply(&state, &Command::DealFromStock).state;

        let restarted = engine.apply(&dealt, &Command::Restart).state;
        assert_eq!(restarted.tableau(), state.tableau());
        assert_eq!(restarted.stock(), state.stock());
        assert_eq!(restarted.seed(), "replay");
        assert_eq!(restarted.moves(), 0);
        assert!(!restarted.can_undo());
    }

    #[test]
    fn test_hint_costs_a_move_and_bumps_generation() {
        let engine = SpiderEngine::default();
        let state = layout(vec![pile(&[up(5)]), pile(&[up(6)])], &[]);

        let hinted = engine.apply(&state, &Command::ShowHint).state;
        assert_eq!(hinted.moves(), 1);
        assert_eq!(hinted.hint_generation(), 1);
        assert!(!hinted.can_undo());
        assert_eq!(
            hinted.hint(),
            Some(Hint::Move {
                source: crate::core::CardPos::new(0, 0),
                target: 1,
            })
        );
    }

    #[test]
    fn test_stale_hint_clear_is_ignored() {
        let engine = SpiderEngine::default();
        let state = layout(vec![pile(&[up(5)]), pile(&[up(6)])], &[down(2)]);

        let first = engine.apply(&state, &Command::ShowHint).state;
        let second = engine.apply(&first, &Command::ShowHint).state;
        assert_eq!(second.hint_generation(), 2);

        let stale = engine.apply(&second, &Command::ClearHint { generation: 1 });
        assert!(!stale.changed);
        assert!(stale.state.hint().is_some());

        let current = engine.apply(&second, &Command::ClearHint { generation: 2 });
        assert!(current.changed);
        assert_eq!(current.state.hint(), None);
    }

    #[test]
    fn test_new_game_keeps_hint_generation() {
        let engine = SpiderEngine::default();
        let state = engine.initialize_game("a");
        let hinted = engine.apply(&state, &Command::ShowHint).state;

        let fresh = engine.apply(&hinted, &Command::NewGame { seed: "b".into() }).state;
        assert_eq!(fresh.hint(), None);
        assert_eq!(fresh.hint_generation(), 1);
        assert_eq!(fresh.seed(), "b");
    }

    #[test]
    fn test_auto_move() {
        let engine = SpiderEngine::default();
        let state = layout(
            vec![pile(&[up(5)]), Pile::new(), pile(&[up(8), up(7), up(6)]), pile(&[up(6)])],
            &[],
        );

        let t = engine.apply(&state, &Command::AutoMove { from: 0, card_index: 0 });
        assert!(t.changed);
        assert_eq!(t.state.tableau().pile(2).unwrap().len(), 4);
        assert_eq!(t.state.moves(), 1);

        let none = engine.apply(&t.state, &Command::AutoMove { from: 3, card_index: 5 });
        assert!(!none.changed);
    }

    #[test]
    fn test_replay_is_deterministic() {
        let engine = SpiderEngine::default();
        let commands = vec![Command::DealFromStock, Command::ShowHint, Command::DealFromStock, Command::Undo];

        let a = engine.replay("replay-seed", &commands);
        let b = engine.replay("replay-seed", &commands);
        assert_eq!(a, b);
        assert_eq!(a.stock().len(), 40);
        assert_eq!(a.moves(), 2);
    }

    #[test]
    fn test_custom_config() {
        let engine = SpiderEngine::new(RulesConfig::default().with_starting_score(0).with_move_cost(5));
        let state = engine.initialize_game("cfg");
        assert_eq!(state.score(), 0);

        let board = GameState::from_layout(
            Tableau::from_piles([pile(&[up(5)]), pile(&[up(6)])]),
            Vector::new(),
            "cfg",
            engine.config().starting_score,
        );
        let moved = engine.apply(&board, &move_cmd(0, 1, 0)).state;
        assert_eq!(moved.score(), -5);
    }

    #[test]
    fn test_free_hints() {
        let engine = SpiderEngine::new(RulesConfig::default().with_hint_move_penalty(0));
        let state = engine.initialize_game("free");
        let hinted = engine.apply(&state, &Command::ShowHint).state;
        assert_eq!(hinted.moves(), 0);
        assert!(hinted.hint().is_some());
    }
}
