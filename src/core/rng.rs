//! Deterministic random stream driven by a string seed.
//!
//! Seeds are shared between players as "daily challenge" identifiers, so the
//! stream is a fixed contract rather than an implementation detail: the same
//! seed must produce the same deal everywhere, bit for bit.
//!
//! ## Algorithm
//!
//! - **Hash**: start at `0xDEADBEEF`; for each UTF-16 code unit `c`,
//!   `h = (h ^ c) * 2654435761 (mod 2^32)`; finish with `h ^ (h >> 16)`.
//! - **Step**: linear congruential `s = s * 1664525 + 1013904223 (mod 2^32)`.
//! - **Output**: `s / 2^32`, a float in `[0, 1)`.
//!
//! ```
//! use spider_engine::core::SeededRng;
//!
//! let mut a = SeededRng::new("2024-01-15");
//! let mut b = SeededRng::new("2024-01-15");
//! assert_eq!(a.next_f64(), b.next_f64());
//! ```

use serde::{Deserialize, Serialize};

const HASH_INIT: u32 = 0xDEAD_BEEF;
const HASH_MULTIPLIER: u32 = 2_654_435_761;
const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Hash a seed string to the generator's 32-bit starting state.
#[must_use]
pub fn hash_seed(seed: &str) -> u32 {
    let h = seed.encode_utf16().fold(HASH_INIT, |h, unit| {
        (h ^ u32::from(unit)).wrapping_mul(HASH_MULTIPLIER)
    });
    h ^ (h >> 16)
}

/// Seeded linear congruential generator.
///
/// Only used for shuffling; quality is irrelevant next to reproducibility.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a generator from a seed string.
    #[must_use]
    pub fn new(seed: &str) -> Self {
        Self {
            state: hash_seed(seed),
        }
    }

    /// Current internal state.
    #[must_use]
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance and return the next float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        f64::from(self.state) / TWO_POW_32
    }

    /// Uniform index in `0..bound`, computed as `floor(next * bound)`.
    ///
    /// `bound` must be non-zero.
    pub fn index_below(&mut self, bound: usize) -> usize {
        // Exact in f64: a 32-bit fraction times a bound below 2^21.
        (self.next_f64() * bound as f64).floor() as usize
    }
}
