//! Game seeds: random seed generation and the daily-challenge convention.
//!
//! A seed is any string. Two conventions sit on top of that:
//!
//! - **Random seeds** for ordinary new games: six base-36 characters drawn
//!   from a [`SeedGenerator`].
//! - **Daily challenge**: the seed is the calendar date `YYYY-MM-DD`. A game
//!   is today's challenge iff its seed string equals today's date string.
//!
//! ```
//! use spider_engine::core::{daily_seed, is_daily_challenge};
//!
//! let today = daily_seed(2024, 1, 15);
//! assert_eq!(today, "2024-01-15");
//! assert!(is_daily_challenge(&today, "2024-01-15"));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SEED_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SEED_LENGTH: usize = 6;

/// Source of random seed strings for new games.
///
/// Uses ChaCha8 so tests can pin the sequence with [`SeedGenerator::from_u64`].
#[derive(Clone, Debug)]
pub struct SeedGenerator {
    inner: ChaCha8Rng,
}

impl SeedGenerator {
    /// Generator seeded from the thread RNG.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::from_u64(rand::random())
    }

    /// Deterministic generator.
    #[must_use]
    pub fn from_u64(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Produce a fresh base-36 seed string.
    pub fn next_seed(&mut self) -> String {
        (0..SEED_LENGTH)
            .map(|_| char::from(SEED_ALPHABET[self.inner.gen_range(0..SEED_ALPHABET.len())]))
            .collect()
    }
}

impl Default for SeedGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Daily-challenge seed for a calendar date, formatted `YYYY-MM-DD`.
#[must_use]
pub fn daily_seed(year: u16, month: u8, day: u8) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}

/// True if `seed` is the daily challenge for `today` (a `YYYY-MM-DD` string).
#[must_use]
pub fn is_daily_challenge(seed: &str, today: &str) -> bool {
    seed == today
}
