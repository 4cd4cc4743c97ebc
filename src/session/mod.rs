//! Session: a thin mutable holder around the pure engine.
//!
//! A `Session` owns one game at a time. It adds the pieces that need memory
//! across games, which the pure engine cannot keep:
//!
//! - **Seeds**: games without an explicit seed get a random one.
//! - **Lifecycle events**: `GameStarted` on the first mutating action of a
//!   seed, `GameLost` when a new game replaces one in progress.
//! - **Hint tickets**: every hint returns a [`HintTicket`]; the caller
//!   schedules [`Session::expire_hint`] after `expires_after`. A ticket from
//!   an older hint is stale and does nothing.
//!
//! ```
//! use spider_engine::core::GameEvent;
//! use spider_engine::session::Session;
//!
//! let mut session = Session::with_seed(Default::default(), "2024-01-15");
//! let outcome = session.deal_from_stock();
//! assert!(outcome.changed);
//! assert!(outcome.events.contains(&GameEvent::GameStarted { seed: "2024-01-15".into() }));
//!
//! let ticket = session.show_hint();
//! assert!(session.expire_hint(ticket));
//! ```

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{
    daily_seed, is_daily_challenge, Command, Events, GameEvent, GameState, RulesConfig, SeedGenerator,
};
use crate::rules::SpiderEngine;

/// Handle for clearing the hint it was issued with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HintTicket {
    pub generation: u64,
    /// How long after issue the hint should be cleared.
    pub expires_after: Duration,
}

/// What a session command did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub changed: bool,
    pub events: Events,
}

/// One player's game, plus the bookkeeping that spans games.
#[derive(Clone, Debug)]
pub struct Session {
    engine: SpiderEngine,
    state: GameState,
    seeds: SeedGenerator,
    /// Seed whose `GameStarted` has already been emitted.
    started_seed: Option<String>,
}

impl Session {
    /// Start a session on a randomly seeded game.
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self::with_generator(config, SeedGenerator::from_entropy())
    }

    /// Start a session whose random seeds come from `seeds`.
    #[must_use]
    pub fn with_generator(config: RulesConfig, mut seeds: SeedGenerator) -> Self {
        let seed = seeds.next_seed();
        Self::build(config, seeds, &seed)
    }

    /// Start a session on a specific seed.
    #[must_use]
    pub fn with_seed(config: RulesConfig, seed: &str) -> Self {
        Self::build(config, SeedGenerator::from_entropy(), seed)
    }

    /// Resume a previously saved game.
    #[must_use]
    pub fn resume(config: RulesConfig, state: GameState) -> Self {
        let started_seed = state.can_undo().then(|| state.seed().to_owned());
        Self {
            engine: SpiderEngine::new(config),
            state,
            seeds: SeedGenerator::from_entropy(),
            started_seed,
        }
    }

    fn build(config: RulesConfig, seeds: SeedGenerator, seed: &str) -> Self {
        let engine = SpiderEngine::new(config);
        let state = engine.initialize_game(seed);
        Self {
            engine,
            state,
            seeds,
            started_seed: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn engine(&self) -> &SpiderEngine {
        &self.engine
    }

    /// Give up the current state, e.g. to persist it.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// True if the current game is the daily challenge for `today` (`YYYY-MM-DD`).
    #[must_use]
    pub fn is_daily_challenge(&self, today: &str) -> bool {
        is_daily_challenge(self.state.seed(), today)
    }

    /// Apply any command, adding lifecycle events to the engine's.
    ///
    /// A `NewGame` with an empty seed is dealt from a random seed instead.
    pub fn dispatch(&mut self, command: &Command) -> Outcome {
        let random;
        let command = match command {
            Command::NewGame { seed } if seed.is_empty() => {
                random = Command::NewGame {
                    seed: self.seeds.next_seed(),
                };
                &random
            }
            _ => command,
        };
        let mut events = Events::new();

        if let Command::NewGame { .. } = command {
            if self.state.is_playing() && !self.state.is_won() {
                debug!("abandoning game {:?}", self.state.seed());
                events.push(GameEvent::GameLost {
                    seed: self.state.seed().to_owned(),
                });
            }
        }

        let changed = self.engine.apply_in_place(&mut self.state, command, &mut events);

        if self.state.can_undo() && self.started_seed.as_deref() != Some(self.state.seed()) {
            let seed = self.state.seed().to_owned();
            events.push(GameEvent::GameStarted { seed: seed.clone() });
            self.started_seed = Some(seed);
        }

        Outcome { changed, events }
    }

    /// Deal a new game; `None` or an empty seed picks a random one.
    pub fn new_game(&mut self, seed: Option<&str>) -> Outcome {
        self.dispatch(&Command::NewGame {
            seed: seed.unwrap_or_default().to_owned(),
        })
    }

    /// Deal the daily challenge for the given date.
    pub fn daily_game(&mut self, year: u16, month: u8, day: u8) -> Outcome {
        self.dispatch(&Command::NewGame {
            seed: daily_seed(year, month, day),
        })
    }

    pub fn restart(&mut self) -> Outcome {
        self.dispatch(&Command::Restart)
    }

    pub fn move_cards(&mut self, from: usize, to: usize, card_index: usize) -> Outcome {
        self.dispatch(&Command::MoveCards { from, to, card_index })
    }

    pub fn deal_from_stock(&mut self) -> Outcome {
        self.dispatch(&Command::DealFromStock)
    }

    pub fn undo(&mut self) -> Outcome {
        self.dispatch(&Command::Undo)
    }

    pub fn toggle_timer(&mut self) -> Outcome {
        self.dispatch(&Command::ToggleTimer)
    }

    pub fn toggle_pause(&mut self) -> Outcome {
        self.dispatch(&Command::TogglePause)
    }

    /// Feed one tick of the caller's one-second clock.
    pub fn increment_timer(&mut self) -> Outcome {
        self.dispatch(&Command::IncrementTimer)
    }

    pub fn auto_move_card(&mut self, from: usize, card_index: usize) -> Outcome {
        self.dispatch(&Command::AutoMove { from, card_index })
    }

    /// Compute a hint and return the ticket that clears it.
    pub fn show_hint(&mut self) -> HintTicket {
        self.dispatch(&Command::ShowHint);
        HintTicket {
            generation: self.state.hint_generation(),
            expires_after: self.engine.config().hint_display,
        }
    }

    /// Clear the hint `ticket` was issued for. Returns false if a newer
    /// hint has replaced it or it was already cleared.
    pub fn expire_hint(&mut self, ticket: HintTicket) -> bool {
        self.dispatch(&Command::ClearHint {
            generation: ticket.generation,
        })
        .changed
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}
